//! # Bearer-token sessions
//!
//! An opaque credential proving a prior successful login. [`issue_token`]
//! draws 32 random bytes, hex-encodes them, and records the binding in the
//! [`SessionStore`]; [`authenticate`] resolves a presented token back to its
//! user. Tokens carry no embedded claims — everything lives server-side, so
//! logout is a plain revocation and there is nothing to forge offline.
//!
//! Tokens do not expire; they live until revoked.

use rand::RngCore;
use uuid::Uuid;

use store::SessionStore;

use crate::error::DomainError;

/// Create a fresh opaque token for `user` and persist the binding.
pub async fn issue_token(sessions: &dyn SessionStore, user: Uuid) -> Result<String, DomainError> {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    let token = hex::encode(bytes);
    sessions.insert(&token, user).await?;
    Ok(token)
}

/// Resolve a presented bearer token to its user, or fail with
/// [`DomainError::Unauthenticated`] for unknown and revoked tokens alike.
pub async fn authenticate(sessions: &dyn SessionStore, token: &str) -> Result<Uuid, DomainError> {
    sessions
        .user_for_token(token)
        .await?
        .ok_or(DomainError::Unauthenticated)
}
