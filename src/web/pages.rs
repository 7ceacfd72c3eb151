//! Shared page responses: error pages and plain `302 Found` redirects.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::{HeaderValue, StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use url::Url;

/// Renders `templates/error.html`.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: &'static str,
    pub message: &'static str,
}

pub fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        ErrorTemplate {
            title: "Short URL not found",
            message: "Short URL by this id was not found.",
        },
    )
        .into_response()
}

pub fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorTemplate {
            title: "Internal server error",
            message: "There was an error and we failed to handle it. Sorry.",
        },
    )
        .into_response()
}

/// `302 Found` to a local path.
pub fn found(path: &str) -> Response {
    redirect(StatusCode::FOUND, path)
}

/// Redirect to an arbitrary stored target URL.
///
/// Targets are stored as submitted; non-ASCII targets are sent in their
/// parsed (punycode and percent-encoded) form.
pub fn redirect(status: StatusCode, target: &str) -> Response {
    match location(target) {
        Some(location) => (status, [(LOCATION, location)]).into_response(),
        None => {
            tracing::error!(target = %target, "Target cannot be sent as Location");
            internal_error()
        }
    }
}

/// ASCII targets go out byte for byte. Anything else is sent in the URL
/// serialization, which is always ASCII; `HeaderValue::from_str` alone would
/// let raw UTF-8 through.
fn location(target: &str) -> Option<HeaderValue> {
    let verbatim = || {
        target
            .is_ascii()
            .then(|| HeaderValue::from_str(target).ok())
            .flatten()
    };

    verbatim().or_else(|| {
        Url::parse(target)
            .ok()
            .and_then(|url| HeaderValue::from_str(url.as_str()).ok())
    })
}
