//! Short code resolution: lookup followed by the redirect-or-preview policy.

use std::sync::Arc;
use tracing::debug;

use crate::application::services::ShortUrlService;
use crate::domain::repositories::ShortUrlRepository;
use crate::domain::resolution::{Action, RequestContext, ResolvePolicy};

pub struct ResolveService<R: ShortUrlRepository + ?Sized> {
    short_urls: Arc<ShortUrlService<R>>,
    policy: ResolvePolicy,
}

impl<R: ShortUrlRepository + ?Sized> ResolveService<R> {
    pub fn new(short_urls: Arc<ShortUrlService<R>>, policy: ResolvePolicy) -> Self {
        Self { short_urls, policy }
    }

    pub fn policy(&self) -> &ResolvePolicy {
        &self.policy
    }

    /// Resolves `code` into the action the HTTP layer should take.
    ///
    /// Malformed and unknown codes both yield [`Action::NotFound`]. Store
    /// failures yield [`Action::InternalError`]; the lookup has already
    /// logged them.
    pub async fn resolve(&self, code: &str, ctx: &RequestContext) -> Action {
        match self.short_urls.find_by_code(code).await {
            Ok(Some(record)) => self.policy.decide(record, ctx),
            Ok(None) => {
                debug!(code = %code, "Short code not found");
                Action::NotFound
            }
            Err(e) => {
                debug!(code = %code, error = %e, "Resolving short code failed");
                Action::InternalError
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ShortUrl;
    use crate::domain::repositories::MockShortUrlRepository;
    use crate::domain::resolution::ResolveConfig;
    use crate::error::AppError;
    use crate::utils::codec::IdCodec;
    use chrono::DateTime;
    use serde_json::json;

    fn service(mock: MockShortUrlRepository) -> ResolveService<MockShortUrlRepository> {
        let short_urls = Arc::new(ShortUrlService::new(Arc::new(mock), IdCodec::default()));
        ResolveService::new(
            short_urls,
            ResolvePolicy::new(ResolveConfig {
                service_domain: "yx.fi".to_string(),
                permanent_redirect: false,
            }),
        )
    }

    fn stored(id: u64) -> ShortUrl {
        ShortUrl::new(
            id,
            "https://example.com/target/page".to_string(),
            "1.2.3.4".to_string(),
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_resolve_redirects() {
        let mut mock = MockShortUrlRepository::new();
        mock.expect_find_by_id()
            .withf(|id| *id == 36)
            .returning(|id| Ok(Some(stored(id))));

        let action = service(mock).resolve("10", &RequestContext::default()).await;

        assert_eq!(
            action,
            Action::Redirect {
                url: "https://example.com/target/page".to_string(),
                permanent: false,
            }
        );
    }

    #[tokio::test]
    async fn test_resolve_previews_when_requested() {
        let mut mock = MockShortUrlRepository::new();
        mock.expect_find_by_id().returning(|id| Ok(Some(stored(id))));

        let ctx = RequestContext {
            always_preview: true,
            referer_host: None,
            request_host: Some("yx.fi".to_string()),
        };

        let action = service(mock).resolve("1", &ctx).await;
        assert_eq!(action, Action::ShowPreview(stored(1)));
    }

    #[tokio::test]
    async fn test_resolve_malformed_code_is_not_found() {
        let mut mock = MockShortUrlRepository::new();
        mock.expect_find_by_id().times(0);

        let action = service(mock).resolve("not-a-code", &RequestContext::default()).await;
        assert_eq!(action, Action::NotFound);
    }

    #[tokio::test]
    async fn test_resolve_unknown_code_is_not_found() {
        let mut mock = MockShortUrlRepository::new();
        mock.expect_find_by_id().returning(|_| Ok(None));

        let action = service(mock).resolve("zz", &RequestContext::default()).await;
        assert_eq!(action, Action::NotFound);
    }

    #[tokio::test]
    async fn test_resolve_store_error_is_internal() {
        let mut mock = MockShortUrlRepository::new();
        mock.expect_find_by_id()
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let action = service(mock).resolve("1", &RequestContext::default()).await;
        assert_eq!(action, Action::InternalError);
    }
}
