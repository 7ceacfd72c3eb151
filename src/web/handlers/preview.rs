//! Preview page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::domain::entities::ShortUrl;
use crate::state::AppState;
use crate::web::pages;

/// Template for the preview page.
///
/// Renders `templates/preview.html` with the short link, the full target
/// and where it points to, so the visitor can decide before following it.
#[derive(Template, WebTemplate)]
#[template(path = "preview.html")]
pub struct PreviewTemplate {
    pub code: String,
    pub short_link: String,
    pub url: String,
    pub target_domain: String,
    pub added: String,
    pub creator: String,
}

impl PreviewTemplate {
    pub fn new(state: &AppState, short_url: ShortUrl) -> Self {
        let code = state.short_url_service.code_of(&short_url);

        Self {
            short_link: state.short_link(&code),
            target_domain: short_url.target_domain(),
            added: short_url.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            code,
            url: short_url.url,
            creator: short_url.creator,
        }
    }
}

/// Shows details of a short URL without redirecting.
///
/// # Endpoint
///
/// `GET /p/{code}`
///
/// Unknown or malformed codes render the 404 page.
pub async fn preview_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Response {
    match state.short_url_service.find_by_code(&code).await {
        Ok(Some(short_url)) => PreviewTemplate::new(&state, short_url).into_response(),
        Ok(None) => pages::not_found(),
        Err(_) => pages::internal_error(),
    }
}
