//! HTTP route handlers for the contacts API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health              - Liveness check
//! GET    /health/ready        - Readiness check (pings the store)
//!
//! # Contacts
//! GET    /contacts            - List contacts, newest id first
//! POST   /contacts            - Create contact
//! GET    /contacts/{id}       - Contact detail
//! PUT    /contacts/{id}       - Replace contact fields
//! DELETE /contacts/{id}       - Delete contact
//! ```
//!
//! Every route is also served under `/api`, so deployments that route the
//! API behind a prefix and those that don't both resolve. A trailing slash
//! is ignored, and unknown paths get a JSON 404.

pub mod contacts;
pub mod health;

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::NormalizePath;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

/// Create the API routes router (unprefixed).
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/contacts", get(contacts::index).post(contacts::create))
        .route(
            "/contacts/{id}",
            get(contacts::show)
                .put(contacts::update)
                .delete(contacts::delete),
        )
}

/// 404 for any path no route matches.
async fn not_found() -> AppError {
    AppError::NotFound("Not found".to_string())
}

/// Build the complete application with middleware and state.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(api_routes())
        .nest("/api", api_routes())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Wrap the finished router so `/contacts/` resolves like `/contacts`.
///
/// Normalization must run before routing, so it wraps the router instead of
/// being added with `Router::layer`. Serve the result with
/// `axum::ServiceExt::into_make_service`.
pub fn normalized(router: Router) -> NormalizePath<Router> {
    NormalizePath::trim_trailing_slash(router)
}
