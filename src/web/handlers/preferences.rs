//! "Always preview" preference toggles.

use axum::{extract::State, response::Response};

use crate::state::AppState;
use crate::web::cookies::{self, PREVIEW_COOKIE};
use crate::web::pages;

/// `GET /always-preview/enable`
pub async fn enable_preview_handler(State(state): State<AppState>) -> Response {
    let mut response = pages::found("/");
    let cookie = cookies::persistent_cookie(PREVIEW_COOKIE, "true", state.settings.secure);
    cookies::append_set_cookie(&mut response, &cookie);
    response
}

/// `GET /always-preview/disable`
pub async fn disable_preview_handler() -> Response {
    let mut response = pages::found("/");
    cookies::append_set_cookie(&mut response, &cookies::expired_cookie(PREVIEW_COOKIE));
    response
}
