//! End-to-end tests driving the full router (bearer middleware included)
//! against the in-memory store, asserting on statuses and JSON bodies the
//! way a browser client would see them.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use server::application::router;
use server::AppState;

fn app() -> Router {
    router(AppState::with_memory_store())
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// Register a fresh user and hand back their bearer token.
async fn register(app: &Router, name: &str, email: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/users/register",
        None,
        Some(json!({ "name": name, "email": email, "password": "correct horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_unauthenticated_requests_are_rejected() {
    let app = app();

    let (status, body) = send(&app, "GET", "/api/documents", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Not authenticated");

    let (status, _) = send(&app, "GET", "/api/documents", Some("bogus-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/api/users/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_login_and_me() {
    let app = app();
    let token = register(&app, "Ada", "ada@example.com").await;

    let (status, profile) = send(&app, "GET", "/api/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["name"], "Ada");
    assert_eq!(profile["email"], "ada@example.com");
    assert!(profile.get("password").is_none());
    assert!(profile.get("passwordHash").is_none());

    let (status, body) = send(
        &app,
        "POST",
        "/api/users/login",
        None,
        Some(json!({ "email": "ada@example.com", "password": "correct horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], profile["id"]);
    assert!(body["token"].as_str().is_some());
}

#[tokio::test]
async fn test_register_validation_and_duplicates() {
    let app = app();

    let (status, body) = send(&app, "POST", "/api/users/register", None, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation Error");
    let errors = body["errors"].as_object().unwrap();
    assert!(errors.contains_key("name"));
    assert!(errors.contains_key("email"));
    assert!(errors.contains_key("password"));

    register(&app, "Ada", "ada@example.com").await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/users/register",
        None,
        Some(json!({ "name": "Imposter", "email": "ada@example.com", "password": "other password" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User already exists");

    let (status, body) = send(
        &app,
        "POST",
        "/api/users/login",
        None,
        Some(json!({ "email": "ada@example.com", "password": "wrong password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_logout_revokes_the_token() {
    let app = app();
    let token = register(&app, "Ada", "ada@example.com").await;

    let (status, _) = send(&app, "POST", "/api/users/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", "/api/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_document_lifecycle_flow() {
    let app = app();
    let token = register(&app, "Ada", "ada@example.com").await;

    // Create with no title: defaults to "Untitled".
    let (status, doc) = send(&app, "POST", "/api/documents", Some(&token), Some(json!({}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(doc["title"], "Untitled");
    assert_eq!(doc["isArchived"], false);
    assert_eq!(doc["parentDocument"], Value::Null);
    let id = doc["id"].as_str().unwrap().to_string();

    let (status, listed) = send(&app, "GET", "/api/documents", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    // Partial update.
    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/documents/{id}"),
        Some(&token),
        Some(json!({ "title": "Notes", "content": "# heading", "isPublished": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Notes");
    assert_eq!(updated["content"], "# heading");
    assert_eq!(updated["isPublished"], true);

    // Archive: minimal response, gone from the active listing.
    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/documents/{id}/archive"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Document archived successfully");
    assert_eq!(body["id"].as_str().unwrap(), id);

    let (_, listed) = send(&app, "GET", "/api/documents", Some(&token), None).await;
    assert!(listed.as_array().unwrap().is_empty());
    let (status, archived) =
        send(&app, "GET", "/api/documents/archived", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(archived.as_array().unwrap().len(), 1);

    // Restore: full record, fields intact.
    let (status, restored) = send(
        &app,
        "PATCH",
        &format!("/api/documents/{id}/restore"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(restored["title"], "Notes");
    assert_eq!(restored["content"], "# heading");
    assert_eq!(restored["isArchived"], false);

    // Delete permanently.
    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/api/documents/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Document permanently deleted");
    let (_, listed) = send(&app, "GET", "/api/documents", Some(&token), None).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_state_machine_conflicts_map_to_400() {
    let app = app();
    let token = register(&app, "Ada", "ada@example.com").await;

    let (_, doc) = send(&app, "POST", "/api/documents", Some(&token), Some(json!({}))).await;
    let id = doc["id"].as_str().unwrap().to_string();

    // Restore before archiving.
    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/documents/{id}/restore"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Document is not archived");

    send(
        &app,
        "PATCH",
        &format!("/api/documents/{id}/archive"),
        Some(&token),
        None,
    )
    .await;

    // Second archive.
    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/documents/{id}/archive"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Document already archived");

    // Update while archived.
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/documents/{id}"),
        Some(&token),
        Some(json!({ "title": "changed" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Cannot update an archived document");
}

#[tokio::test]
async fn test_ownership_is_enforced_between_users() {
    let app = app();
    let ada = register(&app, "Ada", "ada@example.com").await;
    let eve = register(&app, "Eve", "eve@example.com").await;

    let (_, doc) = send(&app, "POST", "/api/documents", Some(&ada), Some(json!({}))).await;
    let id = doc["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "GET", &format!("/api/documents/{id}"), Some(&eve), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "User not authorized for this document");

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/documents/{id}"),
        Some(&eve),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Creating under a foreign parent is rejected too.
    let (status, _) = send(
        &app,
        "POST",
        "/api/documents",
        Some(&eve),
        Some(json!({ "parentDocument": id })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Ada's document survives all of it.
    let (_, listed) = send(&app, "GET", "/api/documents", Some(&ada), None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_and_unknown_ids_map_to_404() {
    let app = app();
    let token = register(&app, "Ada", "ada@example.com").await;

    let (status, body) = send(
        &app,
        "GET",
        "/api/documents/not-a-valid-id",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Document not found (invalid ID format)");

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/documents/{}", uuid::Uuid::new_v4()),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Document not found");
}

#[tokio::test]
async fn test_archived_route_is_not_captured_by_id_route() {
    let app = app();
    let token = register(&app, "Ada", "ada@example.com").await;

    // Must hit the listing handler, not the `/:id` lookup.
    let (status, body) = send(&app, "GET", "/api/documents/archived", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_child_documents_stay_out_of_the_active_listing() {
    let app = app();
    let token = register(&app, "Ada", "ada@example.com").await;

    let (_, parent) = send(
        &app,
        "POST",
        "/api/documents",
        Some(&token),
        Some(json!({ "title": "Parent" })),
    )
    .await;
    let parent_id = parent["id"].as_str().unwrap().to_string();

    let (status, child) = send(
        &app,
        "POST",
        "/api/documents",
        Some(&token),
        Some(json!({ "title": "Child", "parentDocument": parent_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(child["parentDocument"].as_str().unwrap(), parent_id);

    let (_, listed) = send(&app, "GET", "/api/documents", Some(&token), None).await;
    let titles: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Parent"]);
}
