//! # Storage traits
//!
//! The persistence contract the service layer is written against: three
//! object-safe async traits, one per collection. Backends implement all of
//! them on a single store type.
//!
//! Identifiers crossing these traits are already-parsed [`Uuid`]s — malformed
//! identifier strings are a distinct error kind that callers must handle
//! *before* touching the store, so "not found" here always means a
//! well-formed id with no record behind it.
//!
//! Nothing in this layer coordinates across records: each call is a single
//! store operation, concurrent writers are last-write-wins, and there is no
//! transaction spanning two documents.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Document, NewDocument, NewUser, User};

/// Failure inside a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The unique-email constraint rejected a user insert.
    #[error("email already registered")]
    DuplicateEmail,
    /// Unexpected backend failure (connection loss, constraint breakage, ...).
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Sort order for document listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentOrder {
    /// Newest first by creation time (active listings).
    CreatedDesc,
    /// Most recently modified first (archived listings — the archive
    /// operation bumps the modification time).
    UpdatedDesc,
}

/// Filter for [`DocumentStore::list`]. Always scoped to one owner.
///
/// `parent` uses two levels of `Option`: `None` means "any parent",
/// `Some(None)` means "top-level only", `Some(Some(id))` means "children of
/// `id`".
#[derive(Debug, Clone)]
pub struct DocumentFilter {
    pub owner: Uuid,
    pub archived: Option<bool>,
    pub parent: Option<Option<Uuid>>,
    pub order: DocumentOrder,
}

impl DocumentFilter {
    /// Top-level, non-archived documents, newest created first.
    pub fn active(owner: Uuid) -> Self {
        Self {
            owner,
            archived: Some(false),
            parent: Some(None),
            order: DocumentOrder::CreatedDesc,
        }
    }

    /// Archived documents at any depth, most recently modified first.
    pub fn archived(owner: Uuid) -> Self {
        Self {
            owner,
            archived: Some(true),
            parent: None,
            order: DocumentOrder::UpdatedDesc,
        }
    }
}

/// Persistent collection of [`Document`] records.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist a new document. The store generates the id and timestamps.
    async fn create(&self, doc: NewDocument) -> Result<Document, StoreError>;

    /// Look up a document by id. `Ok(None)` when no record exists.
    async fn find(&self, id: Uuid) -> Result<Option<Document>, StoreError>;

    /// Overwrite the stored record with `doc` (keyed by `doc.id`).
    async fn save(&self, doc: &Document) -> Result<(), StoreError>;

    /// Permanently remove a document. Returns `false` when no record existed.
    /// Does not touch children; they keep their parent reference.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;

    /// All documents matching `filter`, in the filter's order. No pagination.
    async fn list(&self, filter: DocumentFilter) -> Result<Vec<Document>, StoreError>;
}

/// Persistent collection of [`User`] records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new user. Fails with [`StoreError::DuplicateEmail`] when the
    /// email is already registered (exact, case-sensitive match).
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Exact-match email lookup.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

/// Bearer-token sessions: opaque token string bound to a user id.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert(&self, token: &str, user: Uuid) -> Result<(), StoreError>;

    /// Resolve a presented token to its user. `Ok(None)` for unknown or
    /// revoked tokens.
    async fn user_for_token(&self, token: &str) -> Result<Option<Uuid>, StoreError>;

    /// Revoke a token. Returns `false` when it was not present.
    async fn revoke(&self, token: &str) -> Result<bool, StoreError>;
}
