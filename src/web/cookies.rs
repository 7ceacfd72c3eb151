//! Cookie helpers for the browser surface.
//!
//! Two cookies exist: `clientid` holds the anonymous identity token and
//! `preview=true` stores the "always preview" preference. Both live for ten
//! years on path `/`.

use axum::http::{
    HeaderMap, HeaderValue,
    header::{COOKIE, SET_COOKIE},
};
use axum::response::Response;

use crate::utils::client_id::{self, ClientId};

pub const CLIENT_ID_COOKIE: &str = "clientid";
pub const PREVIEW_COOKIE: &str = "preview";

/// Ten years, in seconds.
const COOKIE_MAX_AGE: u64 = 86_400 * 365 * 10;

/// Returns the first value of cookie `name`.
///
/// Handles multiple cookies in one `Cookie` header and multiple `Cookie`
/// headers.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name).then_some(value)
        })
}

/// The visitor asked to always see the preview page.
pub fn always_preview(headers: &HeaderMap) -> bool {
    cookie_value(headers, PREVIEW_COOKIE) == Some("true")
}

/// Returns the visitor's client id, issuing a new one when the cookie is
/// missing or malformed.
///
/// The second element is the `Set-Cookie` value to attach when a new id was
/// issued.
pub fn ensure_client_id(headers: &HeaderMap, secure: bool) -> (ClientId, Option<String>) {
    let (id, fresh) = client_id::issue_or_validate(cookie_value(headers, CLIENT_ID_COOKIE));

    if !fresh {
        return (id, None);
    }

    tracing::debug!(client_id = %id, "Issued client id");
    let set_cookie = persistent_cookie(CLIENT_ID_COOKIE, id.as_str(), secure);
    (id, Some(set_cookie))
}

/// `Set-Cookie` value for a long-lived cookie.
pub fn persistent_cookie(name: &str, value: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        name, value, COOKIE_MAX_AGE
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that deletes cookie `name`.
pub fn expired_cookie(name: &str) -> String {
    format!("{}=; Path=/; Max-Age=0", name)
}

/// Appends a `Set-Cookie` header to `response`.
pub fn append_set_cookie(response: &mut Response, cookie: &str) {
    match HeaderValue::from_str(cookie) {
        Ok(value) => {
            response.headers_mut().append(SET_COOKIE, value);
        }
        Err(e) => tracing::warn!(error = %e, "Dropping invalid Set-Cookie value"),
    }
}
