//! Handler for short URL visits.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::domain::resolution::{Action, RequestContext};
use crate::state::AppState;
use crate::utils::request_info::{referer_host, request_host};
use crate::web::cookies;
use crate::web::handlers::preview::PreviewTemplate;
use crate::web::pages;

/// Redirects a short code to its target, or shows the preview page.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Responses
///
/// - **301** (or **307** with `REDIRECT_PERMANENT=false`): redirect to target
/// - **200**: preview page, when the `preview=true` cookie is set and the
///   visitor did not come from this service's own pages
/// - **404**: unknown or malformed code
/// - **500**: store failure
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let ctx = RequestContext {
        always_preview: cookies::always_preview(&headers),
        referer_host: referer_host(&headers),
        request_host: request_host(&headers),
    };

    match state.resolve_service.resolve(&code, &ctx).await {
        Action::Redirect { url, permanent } => {
            let status = if permanent {
                StatusCode::MOVED_PERMANENTLY
            } else {
                StatusCode::TEMPORARY_REDIRECT
            };
            pages::redirect(status, &url)
        }
        Action::ShowPreview(short_url) => PreviewTemplate::new(&state, short_url).into_response(),
        Action::NotFound => pages::not_found(),
        Action::InternalError => pages::internal_error(),
    }
}
