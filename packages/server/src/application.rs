//! # Router assembly and serve loop
//!
//! [`router`] wires the route table: document routes and `me`/`logout`
//! behind the bearer middleware, register/login public. The static
//! `/archived` route is registered alongside `/:id` — the router matches
//! static segments first, so archived listings are never mistaken for an id
//! lookup.

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, patch, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use store::PgStore;

use crate::auth::require_auth;
use crate::routes::{documents, users};
use crate::settings::Settings;
use crate::AppState;

/// Build the full route table over `state`.
pub fn router(state: Arc<AppState>) -> Router {
    let document_routes = Router::new()
        .route(
            "/",
            get(documents::list_documents).post(documents::create_document),
        )
        .route("/archived", get(documents::list_archived_documents))
        .route(
            "/:id",
            get(documents::get_document)
                .put(documents::update_document)
                .delete(documents::delete_document),
        )
        .route("/:id/archive", patch(documents::archive_document))
        .route("/:id/restore", patch(documents::restore_document))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    let user_routes = Router::new()
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .merge(
            Router::new()
                .route("/me", get(users::me))
                .route("/logout", post(users::logout))
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    require_auth,
                )),
        );

    Router::new()
        .route("/", get(|| async { "StackNotes API running" }))
        .nest("/api/documents", document_routes)
        .nest("/api/users", user_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Construct state for the configured store backend.
pub async fn build_state(settings: &Settings) -> anyhow::Result<Arc<AppState>> {
    match settings.store.backend.as_str() {
        "memory" => {
            tracing::warn!("using the in-memory store; data is lost on shutdown");
            Ok(AppState::with_memory_store())
        }
        "postgres" => {
            let store = Arc::new(PgStore::connect(&settings.database.url()).await?);
            Ok(AppState::from_parts(store.clone(), store.clone(), store))
        }
        other => anyhow::bail!("unknown store backend {other:?} (expected \"memory\" or \"postgres\")"),
    }
}

/// Bind and serve until the process is stopped.
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    let state = build_state(&settings).await?;
    let app = router(state);

    let addr = settings.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, backend = %settings.store.backend, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
