//! # Bearer-token middleware
//!
//! Every protected route passes through [`require_auth`]: read the
//! `Authorization: Bearer <token>` header, resolve the token through the
//! session store, and stash the verified identity in request extensions.
//! Handlers downstream trust [`CurrentUser`] completely and never re-verify.
//!
//! Missing header, non-bearer scheme, and unknown/revoked tokens all fail
//! with the same 401.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use api::DomainError;

use crate::error::ApiError;
use crate::AppState;

/// Verified identity of the requester, inserted by [`require_auth`].
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub uuid::Uuid);

/// The raw bearer token the request carried; logout needs it for revocation.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(DomainError::Unauthenticated)?
        .to_string();

    let user = api::auth::authenticate(state.sessions.as_ref(), &token).await?;

    request.extensions_mut().insert(CurrentUser(user));
    request.extensions_mut().insert(SessionToken(token));
    Ok(next.run(request).await)
}
