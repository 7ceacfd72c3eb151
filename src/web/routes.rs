//! Browser route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    add_handler, disable_preview_handler, enable_preview_handler, favicon_handler, index_handler,
    preview_handler, redirect_handler,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Page routes without rate limiting.
///
/// # Endpoints
///
/// - `GET /` - Front page with the add form
/// - `GET /p/{code}` - Preview page
/// - `GET /always-preview/enable` - Set the preview preference cookie
/// - `GET /always-preview/disable` - Clear the preview preference cookie
/// - `GET /favicon.ico` - Issues the `clientid` cookie, then 404
/// - `GET /{code}` - Redirect or preview
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/p/{code}", get(preview_handler))
        .route("/always-preview/enable", get(enable_preview_handler))
        .route("/always-preview/disable", get(disable_preview_handler))
        .route("/favicon.ico", get(favicon_handler))
        .route("/{code}", get(redirect_handler))
}

/// Routes that write; rate limited by the caller.
///
/// # Endpoints
///
/// - `POST /add` - Shorten the submitted URL
pub fn form_routes() -> Router<AppState> {
    Router::new().route("/add", post(add_handler))
}
