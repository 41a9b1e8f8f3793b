//! # User endpoints
//!
//! Register and login are public and answer with the profile plus a fresh
//! bearer token; `me` and `logout` sit behind the auth middleware. Request
//! fields default to empty strings so that missing fields reach the
//! service's validation (and its per-field 400) instead of dying in JSON
//! extraction.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use api::{AuthGrant, UserInfo};

use crate::auth::{CurrentUser, SessionToken};
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Profile plus the bearer token for subsequent requests.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub user: UserInfo,
    pub token: String,
}

impl From<AuthGrant> for AuthResponse {
    fn from(grant: AuthGrant) -> Self {
        Self {
            user: grant.user,
            token: grant.token,
        }
    }
}

/// `POST /api/users/register`
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let grant = state
        .users
        .register(&request.name, &request.email, &request.password)
        .await?;
    Ok((StatusCode::CREATED, Json(grant.into())))
}

/// `POST /api/users/login`
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let grant = state.users.login(&request.email, &request.password).await?;
    Ok(Json(grant.into()))
}

/// `GET /api/users/me`
pub async fn me(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<UserInfo>, ApiError> {
    Ok(Json(state.users.me(user).await?))
}

/// `POST /api/users/logout` — revokes the presented token.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Result<Json<Value>, ApiError> {
    state.users.logout(&token).await?;
    Ok(Json(json!({ "message": "Logged out" })))
}
