//! # Domain records
//!
//! The two persisted record types and their creation payloads.
//!
//! [`Document`] is `Serialize` with the wire names the REST surface exposes
//! (`parentDocument`, `isArchived`, `coverImage`, ...), so handlers can return
//! it directly. [`User`] is deliberately *not* `Serialize`: it carries the
//! password hash, which must never leave the server. Client-safe projections
//! of a user live in the `api` crate.
//!
//! Record identifiers and creation timestamps are assigned by the store when a
//! `New*` payload is persisted, never by callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single note in a user's document tree.
///
/// Documents form a forest per owner: `parent` is `None` for top-level
/// documents and otherwise points at another document of the same owner.
/// `archived` is the soft-delete flag; an archived document is excluded from
/// active listings and immutable until restored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Document {
    pub id: Uuid,
    pub title: String,
    /// Opaque content blob (e.g. serialized editor state or Markdown).
    pub content: Option<String>,
    /// Owning user. Immutable once set.
    #[serde(rename = "owner")]
    #[cfg_attr(feature = "postgres", sqlx(rename = "owner_id"))]
    pub owner: Uuid,
    #[serde(rename = "parentDocument")]
    #[cfg_attr(feature = "postgres", sqlx(rename = "parent_id"))]
    pub parent: Option<Uuid>,
    #[serde(rename = "isArchived")]
    #[cfg_attr(feature = "postgres", sqlx(rename = "is_archived"))]
    pub archived: bool,
    #[serde(rename = "isPublished")]
    #[cfg_attr(feature = "postgres", sqlx(rename = "is_published"))]
    pub published: bool,
    /// URL or emoji character.
    pub icon: Option<String>,
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a document. The store assigns id and timestamps;
/// every other field starts at its default (not archived, not published,
/// no content/icon/cover).
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub title: String,
    pub owner: Uuid,
    pub parent: Option<Uuid>,
}

impl NewDocument {
    /// Materialize the full record. Backends call this with the id and
    /// timestamp they generated.
    pub fn into_document(self, id: Uuid, now: DateTime<Utc>) -> Document {
        Document {
            id,
            title: self.title,
            content: None,
            owner: self.owner,
            parent: self.parent,
            archived: false,
            published: false,
            icon: None,
            cover_image: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A registered user. Never serialized outward — it carries the password
/// hash. Email is stored and compared exactly as given (case-sensitive).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Argon2 PHC-format hash.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for registering a user. The password arrives already hashed;
/// plaintext never reaches the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    /// Materialize the full record with a store-generated id and timestamp.
    pub fn into_user(self, id: Uuid, now: DateTime<Utc>) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            created_at: now,
        }
    }
}
