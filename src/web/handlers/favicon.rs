//! Favicon handler.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::state::AppState;
use crate::web::cookies;

/// There is no favicon; browsers request it on every first visit, which
/// makes it the place to hand out the `clientid` cookie before any form is
/// submitted.
///
/// # Endpoint
///
/// `GET /favicon.ico`
pub async fn favicon_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let mut response = StatusCode::NOT_FOUND.into_response();

    if let (_, Some(cookie)) = cookies::ensure_client_id(&headers, state.settings.secure) {
        cookies::append_set_cookie(&mut response, &cookie);
    }

    response
}
