//! # Domain core for StackNotes
//!
//! Everything between the storage traits and the HTTP surface: the ownership
//! guard, the document lifecycle service, user registration/login, password
//! hashing, and bearer-token issuing. This crate knows nothing about axum —
//! it speaks [`DomainError`] outcomes and leaves status codes to the server
//! crate.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | argon2 password hashing, opaque bearer-token issue/verify |
//! | [`documents`] | [`DocumentService`] — the create/read/update/archive/restore/delete lifecycle |
//! | [`error`] | [`DomainError`] — the full outcome taxonomy |
//! | [`guard`] | [`guard::authorize`] — pure single-owner authorization check |
//! | [`users`] | [`UserService`] — register, login, profile, logout |

pub mod auth;
pub mod documents;
pub mod error;
pub mod guard;
pub mod users;

pub use documents::{DocumentPatch, DocumentService};
pub use error::DomainError;
pub use users::{AuthGrant, UserInfo, UserService};
