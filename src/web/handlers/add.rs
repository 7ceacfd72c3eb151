//! Form submission handler.

use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::domain::entities::Creator;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_info::ClientAddr;
use crate::web::cookies;
use crate::web::handlers::index::IndexTemplate;
use crate::web::pages;

#[derive(Debug, Deserialize)]
pub struct AddForm {
    #[serde(default)]
    pub url: String,
}

/// Shortens the submitted URL and shows its preview page.
///
/// # Endpoint
///
/// `POST /add` (form field `url`)
///
/// # Behavior
///
/// - Empty `url`: redirect to `/`
/// - Rejected URL: front page with the rejection reason
/// - Accepted URL: `302 Found` to `/p/{code}`, reusing the existing code
///   when the URL was shortened before
///
/// A `clientid` cookie is issued when the request has none (or an invalid
/// one); the id is logged with the new record.
pub async fn add_handler(
    State(state): State<AppState>,
    ClientAddr(creator_host): ClientAddr,
    headers: HeaderMap,
    Form(form): Form<AddForm>,
) -> Response {
    if form.url.is_empty() {
        return pages::found("/");
    }

    let (client_id, set_cookie) = cookies::ensure_client_id(&headers, state.settings.secure);
    let creator = Creator::new(creator_host, Some(client_id));

    let result = state
        .short_url_service
        .create_with_retry(&form.url, &creator)
        .await;

    let mut response = match result {
        Ok(short_url) => pages::found(&short_url.preview_path(state.codec())),
        Err(AppError::Validation { message, .. }) => IndexTemplate {
            error: Some(message),
            url: form.url,
            always_preview: cookies::always_preview(&headers),
        }
        .into_response(),
        Err(e) => {
            tracing::error!(url = %form.url, error = ?e, "Failed to add short URL");
            pages::internal_error()
        }
    };

    if let Some(cookie) = set_cookie {
        cookies::append_set_cookie(&mut response, &cookie);
    }

    response
}
