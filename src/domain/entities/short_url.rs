//! Short URL entity.

use chrono::{DateTime, Utc};
use url::Url;

use crate::utils::client_id::ClientId;
use crate::utils::codec::IdCodec;

/// A persisted mapping from a numeric id to a target URL.
///
/// The short code is derived from `id` through [`IdCodec`] and is never
/// stored, so it cannot diverge from the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortUrl {
    pub id: u64,
    pub url: String,
    /// IP address or forwarded-for value of the submitter. Audit only.
    pub creator: String,
    pub created_at: DateTime<Utc>,
}

impl ShortUrl {
    pub fn new(id: u64, url: String, creator: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            url,
            creator,
            created_at,
        }
    }

    pub fn code(&self, codec: &IdCodec) -> String {
        codec.encode(self.id)
    }

    /// Path of the preview page for this record.
    pub fn preview_path(&self, codec: &IdCodec) -> String {
        format!("/p/{}", self.code(codec))
    }

    /// Host of the target URL, empty when it has none (e.g. `magnet:`).
    pub fn target_domain(&self) -> String {
        Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_default()
    }
}

/// Input for inserting a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortUrl {
    pub url: String,
    pub creator: String,
}

/// Who is submitting a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creator {
    pub host: String,
    pub client_id: Option<ClientId>,
}

impl Creator {
    pub fn new(host: impl Into<String>, client_id: Option<ClientId>) -> Self {
        Self {
            host: host.into(),
            client_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: u64, url: &str) -> ShortUrl {
        ShortUrl::new(id, url.to_string(), "1.2.3.4".to_string(), Utc::now())
    }

    #[test]
    fn test_code_is_derived_from_id() {
        let codec = IdCodec::default();
        assert_eq!(sample(5, "https://example.com").code(&codec), "5");
        assert_eq!(sample(10, "https://example.com").code(&codec), "a");
        assert_eq!(sample(1270, "https://example.com").code(&codec), "za");
    }

    #[test]
    fn test_preview_path() {
        let codec = IdCodec::default();
        assert_eq!(sample(36, "https://example.com").preview_path(&codec), "/p/10");
    }

    #[test]
    fn test_target_domain() {
        assert_eq!(
            sample(1, "https://www.example.com/abcd").target_domain(),
            "www.example.com"
        );
        assert_eq!(
            sample(1, "magnet:?xt=urn:btih:c12fe1c06bba254a9dc9").target_domain(),
            ""
        );
    }
}
