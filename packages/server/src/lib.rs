//! # REST surface for StackNotes
//!
//! Translates the domain services into HTTP: route table, bearer-token
//! middleware, and the outcome → status-code mapping. The binary entry point
//! lives in `main.rs`; everything here is also reachable from tests, which
//! drive the full router against the in-memory store.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`application`] | router assembly, state construction, serve loop |
//! | [`auth`] | `Authorization: Bearer` middleware and the [`auth::CurrentUser`] extension |
//! | [`error`] | [`error::ApiError`] — maps [`DomainError`] to status + JSON body |
//! | [`routes`] | request handlers and their request/response DTOs |
//! | [`settings`] | layered configuration: defaults → `config.toml` → environment |

use std::sync::Arc;

use api::{DocumentService, UserService};
use store::{DocumentStore, MemoryStore, SessionStore, UserStore};

pub mod application;
pub mod auth;
pub mod error;
pub mod routes;
pub mod settings;

pub use settings::Settings;

/// Shared handler state: the two domain services plus the session store the
/// auth middleware reads tokens from.
pub struct AppState {
    pub documents: DocumentService,
    pub users: UserService,
    pub sessions: Arc<dyn SessionStore>,
}

impl AppState {
    /// Wire the services to one backend exposing all three store traits.
    pub fn from_parts(
        documents: Arc<dyn DocumentStore>,
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Arc<Self> {
        Arc::new(Self {
            documents: DocumentService::new(documents),
            users: UserService::new(users, sessions.clone()),
            sessions,
        })
    }

    /// State over a fresh in-memory store (tests, local development).
    pub fn with_memory_store() -> Arc<Self> {
        let store = Arc::new(MemoryStore::new());
        Self::from_parts(store.clone(), store.clone(), store)
    }
}
