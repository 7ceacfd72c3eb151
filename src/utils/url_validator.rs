//! Validation of URLs submitted for shortening.
//!
//! Rules run in order and stop at the first failure: minimum length, maximum
//! length, URL syntax, scheme allow-list. Length is counted in bytes.

use url::Url;

/// URLs shorter than this are not worth shortening.
pub const MIN_URL_LENGTH: usize = 20;

pub const MAX_URL_LENGTH: usize = 2048;

pub const ALLOWED_SCHEMES: &[&str] = &[
    "http", "https", "ftp", "ftps", "feed", "gopher", "magnet", "spotify",
];

/// Why a URL was refused. The `Display` text is shown to the submitter as is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RejectionReason {
    #[error("URL too short for shortening")]
    TooShort,

    #[error("URL too long for shortening")]
    TooLong,

    #[error("Invalid URL: {0}")]
    Malformed(String),

    #[error("URL scheme {0:?} not allowed")]
    SchemeNotAllowed(String),
}

impl RejectionReason {
    /// Stable machine-readable identifier for API responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TooShort => "too_short",
            Self::TooLong => "too_long",
            Self::Malformed(_) => "malformed",
            Self::SchemeNotAllowed(_) => "scheme_not_allowed",
        }
    }
}

/// Checks whether `input` may be shortened.
///
/// # Errors
///
/// Returns the first [`RejectionReason`] that applies.
///
/// # Examples
///
/// ```
/// use shorturl::utils::url_validator::{validate_target_url, RejectionReason};
///
/// assert!(validate_target_url("https://example.com/page").is_ok());
/// assert_eq!(
///     validate_target_url("javascript:alert(1)"),
///     Err(RejectionReason::TooShort)
/// );
/// ```
pub fn validate_target_url(input: &str) -> Result<(), RejectionReason> {
    if input.len() < MIN_URL_LENGTH {
        return Err(RejectionReason::TooShort);
    }
    if input.len() > MAX_URL_LENGTH {
        return Err(RejectionReason::TooLong);
    }

    let url = Url::parse(input).map_err(|e| RejectionReason::Malformed(e.to_string()))?;

    if !ALLOWED_SCHEMES.contains(&url.scheme()) {
        return Err(RejectionReason::SchemeNotAllowed(url.scheme().to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url_of_length(len: usize) -> String {
        let prefix = "https://example.com/";
        assert!(len >= prefix.len());
        format!("{prefix}{}", "a".repeat(len - prefix.len()))
    }

    #[test]
    fn test_accepts_plain_https() {
        assert_eq!(validate_target_url("https://example.com/page"), Ok(()));
    }

    #[test]
    fn test_length_lower_boundary() {
        let nineteen = "http://example.com/";
        assert_eq!(nineteen.len(), 19);
        assert_eq!(validate_target_url(nineteen), Err(RejectionReason::TooShort));

        let twenty = url_of_length(20);
        assert_eq!(validate_target_url(&twenty), Ok(()));
    }

    #[test]
    fn test_length_upper_boundary() {
        assert_eq!(validate_target_url(&url_of_length(2048)), Ok(()));
        assert_eq!(
            validate_target_url(&url_of_length(2049)),
            Err(RejectionReason::TooLong)
        );
    }

    #[test]
    fn test_rejects_javascript_scheme() {
        // Too short before the scheme is even looked at.
        assert!(validate_target_url("javascript:alert(1)").is_err());

        let long = "javascript:alert(document.cookie)";
        assert_eq!(
            validate_target_url(long),
            Err(RejectionReason::SchemeNotAllowed("javascript".to_string()))
        );
    }

    #[test]
    fn test_rejects_data_and_file_schemes() {
        assert!(matches!(
            validate_target_url("data:text/html,<h1>hello</h1>"),
            Err(RejectionReason::SchemeNotAllowed(_))
        ));
        assert!(matches!(
            validate_target_url("file:///etc/passwd/and/more"),
            Err(RejectionReason::SchemeNotAllowed(_))
        ));
    }

    #[test]
    fn test_rejects_unparsable() {
        assert!(matches!(
            validate_target_url("example.com/without/a/scheme"),
            Err(RejectionReason::Malformed(_))
        ));
        assert!(matches!(
            validate_target_url("http://exa mple.com/some/path"),
            Err(RejectionReason::Malformed(_))
        ));
    }

    #[test]
    fn test_accepts_every_allowed_scheme() {
        for url in [
            "http://example.com/path",
            "ftp://ftp.example.com/pub/file.txt",
            "ftps://ftp.example.com/pub/file.txt",
            "feed://example.com/rss.xml",
            "gopher://gopher.example.com/1",
            "magnet:?xt=urn:btih:c12fe1c06bba254a9dc9f519b335aa7c1367a88a",
            "spotify:track:6rqhFgbbKwnb9MLmUQDhG6",
        ] {
            assert_eq!(validate_target_url(url), Ok(()), "{url}");
        }
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            RejectionReason::SchemeNotAllowed("mailto".into()).to_string(),
            "URL scheme \"mailto\" not allowed"
        );
        assert_eq!(RejectionReason::TooLong.kind(), "too_long");
    }
}
