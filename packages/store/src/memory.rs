use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::backend::{
    DocumentFilter, DocumentOrder, DocumentStore, SessionStore, StoreError, UserStore,
};
use crate::models::{Document, NewDocument, NewUser, User};

/// In-memory backend for testing and local development.
///
/// Cloning is cheap and clones share the same underlying maps. The mutexes
/// guard individual map operations only — there is no locking across a whole
/// service operation, matching the no-coordination contract of the real
/// backends.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    documents: Arc<Mutex<HashMap<Uuid, Document>>>,
    users: Arc<Mutex<HashMap<Uuid, User>>>,
    sessions: Arc<Mutex<HashMap<String, Uuid>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create(&self, doc: NewDocument) -> Result<Document, StoreError> {
        let record = doc.into_document(Uuid::new_v4(), Utc::now());
        self.documents
            .lock()
            .unwrap()
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Document>, StoreError> {
        Ok(self.documents.lock().unwrap().get(&id).cloned())
    }

    async fn save(&self, doc: &Document) -> Result<(), StoreError> {
        self.documents.lock().unwrap().insert(doc.id, doc.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.documents.lock().unwrap().remove(&id).is_some())
    }

    async fn list(&self, filter: DocumentFilter) -> Result<Vec<Document>, StoreError> {
        let documents = self.documents.lock().unwrap();
        let mut matched: Vec<Document> = documents
            .values()
            .filter(|d| d.owner == filter.owner)
            .filter(|d| filter.archived.map_or(true, |a| d.archived == a))
            .filter(|d| filter.parent.as_ref().map_or(true, |p| d.parent == *p))
            .cloned()
            .collect();
        match filter.order {
            DocumentOrder::CreatedDesc => {
                matched.sort_by(|a, b| b.created_at.cmp(&a.created_at))
            }
            DocumentOrder::UpdatedDesc => {
                matched.sort_by(|a, b| b.updated_at.cmp(&a.updated_at))
            }
        }
        Ok(matched)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateEmail);
        }
        let record = user.into_user(Uuid::new_v4(), Utc::now());
        users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn insert(&self, token: &str, user: Uuid) -> Result<(), StoreError> {
        self.sessions
            .lock()
            .unwrap()
            .insert(token.to_string(), user);
        Ok(())
    }

    async fn user_for_token(&self, token: &str) -> Result<Option<Uuid>, StoreError> {
        Ok(self.sessions.lock().unwrap().get(token).copied())
    }

    async fn revoke(&self, token: &str) -> Result<bool, StoreError> {
        Ok(self.sessions.lock().unwrap().remove(token).is_some())
    }
}
