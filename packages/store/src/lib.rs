//! # Persistence layer for StackNotes
//!
//! Domain records and the storage traits the rest of the workspace is built
//! against. All reads and writes go through the [`DocumentStore`],
//! [`UserStore`], and [`SessionStore`] traits, so the same service logic works
//! against the in-memory backend (tests, local development) or PostgreSQL
//! (production, behind the `postgres` feature).
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | `Document` and `User` records plus their `New*` creation payloads |
//! | [`backend`] | the three async storage traits, [`DocumentFilter`], and [`StoreError`] |
//! | `memory` | [`MemoryStore`] — `Arc<Mutex<HashMap>>` backend implementing all three traits |
//! | `postgres` | [`PgStore`] — sqlx/PostgreSQL backend (feature `postgres`) |

pub mod backend;
pub mod models;

mod memory;
pub use memory::MemoryStore;

#[cfg(feature = "postgres")]
mod postgres;
#[cfg(feature = "postgres")]
pub use postgres::PgStore;

pub use backend::{DocumentFilter, DocumentOrder, DocumentStore, SessionStore, StoreError, UserStore};
pub use models::{Document, NewDocument, NewUser, User};
