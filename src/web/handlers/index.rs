//! Front page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{http::HeaderMap, response::IntoResponse};

use crate::web::cookies;

/// Template for the front page.
///
/// Renders `templates/index.html` with the add form, the reason of the last
/// rejection if any, and the state of the preview preference.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub error: Option<String>,
    pub url: String,
    pub always_preview: bool,
}

/// Renders the front page.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler(headers: HeaderMap) -> impl IntoResponse {
    IndexTemplate {
        error: None,
        url: String::new(),
        always_preview: cookies::always_preview(&headers),
    }
}
