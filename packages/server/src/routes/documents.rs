//! # Document endpoints
//!
//! Thin translation layer over [`DocumentService`]: extract the verified
//! requester, hand the raw path id to the service (malformed ids are the
//! service's concern, not the router's), and let [`ApiError`] map outcomes
//! to statuses. Archive and delete return a minimal `{message, id}` body;
//! every other success returns full records.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use api::DocumentPatch;
use store::Document;

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateDocumentRequest {
    pub title: Option<String>,
    #[serde(rename = "parentDocument")]
    pub parent_document: Option<String>,
}

/// `GET /api/documents` — top-level non-archived documents, newest first.
pub async fn list_documents(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<Document>>, ApiError> {
    Ok(Json(state.documents.list_active(user).await?))
}

/// `GET /api/documents/archived` — archived documents at any depth.
pub async fn list_archived_documents(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<Document>>, ApiError> {
    Ok(Json(state.documents.list_archived(user).await?))
}

/// `POST /api/documents` — create, optionally under a parent.
pub async fn create_document(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<Document>), ApiError> {
    let document = state
        .documents
        .create(user, request.title, request.parent_document.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// `GET /api/documents/:id`
pub async fn get_document(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<Document>, ApiError> {
    Ok(Json(state.documents.get(&id, user).await?))
}

/// `PUT /api/documents/:id` — partial update of a non-archived document.
pub async fn update_document(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(patch): Json<DocumentPatch>,
) -> Result<Json<Document>, ApiError> {
    Ok(Json(state.documents.update(&id, user, patch).await?))
}

/// `PATCH /api/documents/:id/archive`
pub async fn archive_document(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = state.documents.archive(&id, user).await?;
    Ok(Json(json!({
        "message": "Document archived successfully",
        "id": id,
    })))
}

/// `PATCH /api/documents/:id/restore`
pub async fn restore_document(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<Document>, ApiError> {
    Ok(Json(state.documents.restore(&id, user).await?))
}

/// `DELETE /api/documents/:id` — permanent, no cascade to children.
pub async fn delete_document(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = state.documents.delete(&id, user).await?;
    Ok(Json(json!({
        "message": "Document permanently deleted",
        "id": id,
    })))
}
