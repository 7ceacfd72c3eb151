//! API route configuration.

use crate::api::handlers::{export_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Public API routes.
///
/// # Endpoints
///
/// - `POST /shorten` - Create or look up the short URL for a long URL
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/shorten", post(shorten_handler))
}

/// Operator routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET /export` - NDJSON dump of every short URL
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/export", get(export_handler))
}
