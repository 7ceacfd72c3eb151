//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{ResolveService, ShortUrlService};
use crate::domain::repositories::ShortUrlRepository;
use crate::domain::resolution::{ResolveConfig, ResolvePolicy};
use crate::utils::codec::IdCodec;

/// HTTP-facing settings, normally built from [`crate::config::Config`].
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub service_domain: String,
    /// Links use `https` and cookies carry the `Secure` attribute.
    pub secure: bool,
    /// Client addresses come from forwarding headers instead of the socket.
    pub behind_proxy: bool,
    pub admin_token: Option<String>,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
}

impl HttpSettings {
    /// Scheme and host prefix for absolute links, without trailing slash.
    pub fn base_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{}://{}", scheme, self.service_domain)
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            service_domain: "localhost".to_string(),
            secure: false,
            behind_proxy: false,
            admin_token: None,
            rate_limit_per_second: 2,
            rate_limit_burst: 30,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub short_url_service: Arc<ShortUrlService<dyn ShortUrlRepository>>,
    pub resolve_service: Arc<ResolveService<dyn ShortUrlRepository>>,
    pub settings: Arc<HttpSettings>,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn ShortUrlRepository>,
        codec: IdCodec,
        resolve_config: ResolveConfig,
        settings: HttpSettings,
    ) -> Self {
        let short_url_service = Arc::new(ShortUrlService::new(repository, codec));
        let resolve_service = Arc::new(ResolveService::new(
            short_url_service.clone(),
            ResolvePolicy::new(resolve_config),
        ));

        Self {
            short_url_service,
            resolve_service,
            settings: Arc::new(settings),
        }
    }

    pub fn codec(&self) -> &IdCodec {
        self.short_url_service.codec()
    }

    /// Absolute short link for `code`.
    pub fn short_link(&self, code: &str) -> String {
        format!("{}/{}", self.settings.base_url(), code)
    }

    /// Absolute preview link for `code`.
    pub fn preview_link(&self, code: &str) -> String {
        format!("{}/p/{}", self.settings.base_url(), code)
    }
}
