//! # Ownership guard
//!
//! The single authorization rule of the system, shared by every lifecycle
//! operation instead of being re-derived at each call site. Pure function
//! over an already-fetched record: the caller resolves the id (and handles
//! malformed ids as [`DomainError::InvalidId`]) before consulting the guard,
//! so "not found" here always means a well-formed id with no record.

use uuid::Uuid;

use store::Document;

use crate::error::DomainError;

/// Decide whether `requester` may act on `document`.
///
/// Absent document → [`DomainError::NotFound`]; foreign owner →
/// [`DomainError::Forbidden`]; otherwise the document is handed back.
pub fn authorize(document: Option<&Document>, requester: Uuid) -> Result<&Document, DomainError> {
    match document {
        None => Err(DomainError::NotFound),
        Some(doc) if doc.owner != requester => Err(DomainError::Forbidden),
        Some(doc) => Ok(doc),
    }
}
