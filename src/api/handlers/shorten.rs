//! Handler for link shortening endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::domain::entities::Creator;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_info::ClientAddr;

/// Creates (or returns the existing) short URL for a long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "code": "1",
///   "short_url": "https://yx.fi/1",
///   "preview_url": "https://yx.fi/p/1",
///   "url": "https://example.com/some/long/path",
///   "added": "2024-01-01T00:00:00Z"
/// }
/// ```
///
/// Submitting the same URL again returns the same code.
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is rejected, with the reason in
/// `error.details.reason`.
pub async fn shorten_handler(
    State(state): State<AppState>,
    ClientAddr(creator_host): ClientAddr,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let creator = Creator::new(creator_host, None);
    let short_url = state
        .short_url_service
        .create_with_retry(&payload.url, &creator)
        .await?;

    let code = state.short_url_service.code_of(&short_url);

    Ok(Json(ShortenResponse {
        short_url: state.short_link(&code),
        preview_url: state.preview_link(&code),
        code,
        url: short_url.url,
        added: short_url.created_at,
    }))
}
