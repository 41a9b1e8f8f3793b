//! # Outcome taxonomy
//!
//! Every way a service operation can fail, as one enum. Display strings are
//! the exact messages the REST surface returns, so the server crate only
//! decides status codes. All variants except [`DomainError::Storage`] and
//! [`DomainError::Internal`] are expected domain-level outcomes; those two
//! are the "unexpected" kinds that get logged with detail server-side and
//! collapsed to a generic message for the caller.

use std::collections::BTreeMap;

use thiserror::Error;

use store::StoreError;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Well-formed id with no record behind it (or a record the guard hides).
    #[error("Document not found")]
    NotFound,
    /// The document exists but belongs to someone else.
    #[error("User not authorized for this document")]
    Forbidden,
    /// Malformed identifier. Distinct from [`DomainError::NotFound`] in the
    /// taxonomy, though the REST surface maps both to 404 on purpose.
    #[error("Document not found (invalid ID format)")]
    InvalidId,
    /// Write attempted on an archived document.
    #[error("Cannot update an archived document")]
    ArchivedImmutable,
    #[error("Document already archived")]
    AlreadyArchived,
    #[error("Document is not archived")]
    NotArchived,
    /// Missing or invalid required fields; keyed per field.
    #[error("Validation Error")]
    Validation(BTreeMap<String, String>),
    #[error("User already exists")]
    EmailTaken,
    /// Unknown email and wrong password collapse to this on purpose.
    #[error("Invalid email or password")]
    InvalidCredentials,
    /// Missing, malformed, or revoked bearer credential.
    #[error("Not authenticated")]
    Unauthenticated,
    /// Unexpected persistence failure.
    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),
    /// Unexpected non-storage failure (e.g. the password hasher).
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Single-field validation failure.
    pub fn invalid_field(field: &str, message: &str) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(field.to_string(), message.to_string());
        DomainError::Validation(errors)
    }
}
