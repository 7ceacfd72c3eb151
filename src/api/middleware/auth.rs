//! Bearer token authentication for operator endpoints.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;
use sha2::{Digest, Sha256};

use crate::{error::AppError, state::AppState};

/// Authenticates requests against the configured `ADMIN_TOKEN`.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// Both tokens are hashed with SHA-256 before comparison so that the
/// comparison time does not depend on the length of the matching prefix.
///
/// # Errors
///
/// Returns `401 Unauthorized` if:
/// - Authorization header is missing or not a Bearer token
/// - The token does not match
/// - No admin token is configured
///
/// Adds `WWW-Authenticate: Bearer` header to 401 responses per RFC 6750.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/export", get(export_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let authorized = st
        .settings
        .admin_token
        .as_deref()
        .is_some_and(|expected| token_matches(expected, &token));

    if !authorized {
        tracing::debug!("Rejected admin token");
        return Err(AppError::unauthorized(
            "Unauthorized",
            json!({"reason": "Invalid token"}),
        ));
    }

    let req = Request::from_parts(parts, body);

    Ok(next.run(req).await)
}

fn token_matches(expected: &str, presented: &str) -> bool {
    Sha256::digest(expected.as_bytes()) == Sha256::digest(presented.as_bytes())
}
