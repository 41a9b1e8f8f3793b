//! # Document lifecycle service
//!
//! The core of the system: the eight operations over a user's document tree,
//! each resolving the addressed record and running the ownership guard
//! before touching state.
//!
//! | Operation | Outcome on success |
//! |-----------|-------------------|
//! | [`list_active`](DocumentService::list_active) | top-level non-archived docs, newest created first |
//! | [`list_archived`](DocumentService::list_archived) | archived docs at any depth, most recently modified first |
//! | [`create`](DocumentService::create) | the created record (title defaults to `"Untitled"`) |
//! | [`get`](DocumentService::get) | the full record |
//! | [`update`](DocumentService::update) | the updated record (partial patch; archived docs are immutable) |
//! | [`archive`](DocumentService::archive) | the id only — a deliberately minimal response |
//! | [`restore`](DocumentService::restore) | the full restored record |
//! | [`delete`](DocumentService::delete) | the removed id |
//!
//! Per document the archive dimension is a two-state machine: `ACTIVE`
//! (initial) and `ARCHIVED`, with `archive`/`restore` as the only
//! transitions. `update` is valid only while `ACTIVE`; `delete` is valid in
//! either state.
//!
//! Archive, restore, and delete touch the addressed record only — children
//! are never cascaded and a deleted parent leaves its children with a
//! dangling parent reference. Each operation is a sequence of independent
//! store calls with no transaction around them; concurrent updates to the
//! same document are last-write-wins.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use store::{Document, DocumentFilter, DocumentStore, NewDocument};

use crate::error::DomainError;
use crate::guard;

/// Default title for documents created with an empty or missing title.
pub const UNTITLED: &str = "Untitled";

/// Partial update for [`DocumentService::update`]. Absent fields are left
/// untouched. Parent reassignment is not supported through this type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub icon: Option<String>,
    pub cover_image: Option<String>,
    #[serde(rename = "isPublished")]
    pub published: Option<bool>,
}

/// Lifecycle operations over a [`DocumentStore`].
#[derive(Clone)]
pub struct DocumentService {
    store: Arc<dyn DocumentStore>,
}

impl DocumentService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Top-level, non-archived documents for `owner`, newest created first.
    /// No pagination; every match is returned.
    pub async fn list_active(&self, owner: Uuid) -> Result<Vec<Document>, DomainError> {
        Ok(self.store.list(DocumentFilter::active(owner)).await?)
    }

    /// Archived documents for `owner` at any depth, most recently modified
    /// first (archiving bumps the modification time).
    pub async fn list_archived(&self, owner: Uuid) -> Result<Vec<Document>, DomainError> {
        Ok(self.store.list(DocumentFilter::archived(owner)).await?)
    }

    /// Create a document for `owner`, optionally under `parent`.
    ///
    /// A given parent must resolve to a document owned by `owner`; a foreign
    /// parent fails with `Forbidden` and an absent one with `NotFound`,
    /// creating nothing. Parent validation and the insert are two separate
    /// store calls with no atomicity between them.
    pub async fn create(
        &self,
        owner: Uuid,
        title: Option<String>,
        parent: Option<&str>,
    ) -> Result<Document, DomainError> {
        let parent = match parent {
            Some(raw) => {
                let parent_id = parse_id(raw)?;
                let parent_doc = self.store.find(parent_id).await?;
                guard::authorize(parent_doc.as_ref(), owner)?;
                Some(parent_id)
            }
            None => None,
        };

        let title = title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNTITLED.to_string());

        Ok(self
            .store
            .create(NewDocument {
                title,
                owner,
                parent,
            })
            .await?)
    }

    /// Fetch a single document, enforcing ownership.
    pub async fn get(&self, id: &str, requester: Uuid) -> Result<Document, DomainError> {
        self.resolve(id, requester).await
    }

    /// Apply `patch` to a non-archived document and bump its modification
    /// time. Fails with `ArchivedImmutable` (leaving every field unchanged)
    /// when the document is archived.
    pub async fn update(
        &self,
        id: &str,
        requester: Uuid,
        patch: DocumentPatch,
    ) -> Result<Document, DomainError> {
        let mut doc = self.resolve(id, requester).await?;
        if doc.archived {
            return Err(DomainError::ArchivedImmutable);
        }

        if let Some(title) = patch.title {
            doc.title = title;
        }
        if let Some(content) = patch.content {
            doc.content = Some(content);
        }
        if let Some(icon) = patch.icon {
            doc.icon = Some(icon);
        }
        if let Some(cover_image) = patch.cover_image {
            doc.cover_image = Some(cover_image);
        }
        if let Some(published) = patch.published {
            doc.published = published;
        }
        doc.updated_at = Utc::now();

        self.store.save(&doc).await?;
        Ok(doc)
    }

    /// Soft-delete: `ACTIVE → ARCHIVED`. Rejects an already-archived
    /// document with `AlreadyArchived`. Returns the id only.
    pub async fn archive(&self, id: &str, requester: Uuid) -> Result<Uuid, DomainError> {
        let mut doc = self.resolve(id, requester).await?;
        if doc.archived {
            return Err(DomainError::AlreadyArchived);
        }
        doc.archived = true;
        doc.updated_at = Utc::now();
        self.store.save(&doc).await?;
        Ok(doc.id)
    }

    /// `ARCHIVED → ACTIVE`. Rejects a non-archived document with
    /// `NotArchived`. Every other field keeps its pre-archive value.
    pub async fn restore(&self, id: &str, requester: Uuid) -> Result<Document, DomainError> {
        let mut doc = self.resolve(id, requester).await?;
        if !doc.archived {
            return Err(DomainError::NotArchived);
        }
        doc.archived = false;
        doc.updated_at = Utc::now();
        self.store.save(&doc).await?;
        Ok(doc)
    }

    /// Permanently remove the single record, in either archive state.
    /// Children are orphaned, keeping their dangling parent reference.
    pub async fn delete(&self, id: &str, requester: Uuid) -> Result<Uuid, DomainError> {
        let doc = self.resolve(id, requester).await?;
        self.store.delete(doc.id).await?;
        Ok(doc.id)
    }

    /// Parse the id, fetch the record, run the ownership guard.
    async fn resolve(&self, id: &str, requester: Uuid) -> Result<Document, DomainError> {
        let id = parse_id(id)?;
        let doc = self.store.find(id).await?;
        guard::authorize(doc.as_ref(), requester).cloned()
    }
}

/// Malformed identifiers are their own error kind, detected before any store
/// access or guard invocation.
fn parse_id(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw).map_err(|_| DomainError::InvalidId)
}
