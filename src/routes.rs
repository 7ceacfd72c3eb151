//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /`                        - Front page (public)
//! - `POST /add`                     - Form submission (rate limited)
//! - `GET  /p/{code}`                - Preview page (public)
//! - `GET  /{code}`                  - Redirect or preview (public)
//! - `GET  /always-preview/*`        - Preference cookie toggles (public)
//! - `GET  /health`                  - Store health check (public)
//! - `POST /api/shorten`             - JSON shortening (rate limited)
//! - `GET  /api/export`              - NDJSON export (Bearer token, only with `ADMIN_TOKEN`)
//! - `/static/*`                     - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Authentication** - Bearer token on operator routes

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use axum::routing::get;
use axum::{Router, middleware};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
///
/// Rate limiting keys on the socket peer address, or on forwarding headers
/// when `behind_proxy` is set; enable that only when the service runs behind
/// a trusted reverse proxy. The peer key requires the router to be served
/// with `ConnectInfo<SocketAddr>`.
pub fn app_router(state: AppState) -> Router {
    let settings = state.settings.clone();

    let mut api_router = api::routes::public_routes();
    if settings.admin_token.is_some() {
        api_router = api_router.merge(
            api::routes::protected_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer)),
        );
    }

    let limited = web::routes::form_routes().nest("/api", api_router);
    let limited = if settings.behind_proxy {
        limited.layer(rate_limit::proxied_layer(&settings))
    } else {
        limited.layer(rate_limit::layer(&settings))
    };

    Router::new()
        .route("/health", get(health_handler))
        .merge(web::routes::public_routes())
        .merge(limited)
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(tracing::layer())
}
