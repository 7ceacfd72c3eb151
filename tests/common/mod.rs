#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use futures_util::stream::{self, BoxStream, StreamExt};
use serde_json::json;
use shorturl::domain::entities::{NewShortUrl, ShortUrl};
use shorturl::domain::repositories::ShortUrlRepository;
use shorturl::domain::resolution::ResolveConfig;
use shorturl::error::AppError;
use shorturl::infrastructure::persistence::MemoryShortUrlRepository;
use shorturl::routes::app_router;
use shorturl::state::{AppState, HttpSettings};
use shorturl::utils::codec::{CodecConfig, IdCodec};
use std::net::SocketAddr;
use std::sync::Arc;

pub const SERVICE_DOMAIN: &str = "yx.fi";
pub const ADMIN_TOKEN: &str = "test-admin-token";
pub const VALID_CLIENT_ID: &str = "0123456789abcdef0123456789abcdef";

pub fn settings() -> HttpSettings {
    HttpSettings {
        service_domain: SERVICE_DOMAIN.to_string(),
        ..HttpSettings::default()
    }
}

pub fn resolve_config(permanent_redirect: bool) -> ResolveConfig {
    ResolveConfig {
        service_domain: SERVICE_DOMAIN.to_string(),
        permanent_redirect,
    }
}

pub fn create_test_state(
    repository: Arc<dyn ShortUrlRepository>,
    codec_config: CodecConfig,
    permanent_redirect: bool,
    settings: HttpSettings,
) -> AppState {
    let codec = IdCodec::new(codec_config).unwrap();
    AppState::new(
        repository,
        codec,
        resolve_config(permanent_redirect),
        settings,
    )
}

pub fn memory_state() -> (AppState, Arc<MemoryShortUrlRepository>) {
    let repository = Arc::new(MemoryShortUrlRepository::new());
    let state = create_test_state(
        repository.clone(),
        CodecConfig::default(),
        true,
        settings(),
    );
    (state, repository)
}

pub fn failing_state() -> AppState {
    create_test_state(
        Arc::new(FailingRepository),
        CodecConfig::default(),
        true,
        settings(),
    )
}

/// Full application router served over a real socket, so peer addresses
/// reach both the rate limiter and the creator field.
pub fn test_server(state: AppState) -> TestServer {
    let app = app_router(state).into_make_service_with_connect_info::<SocketAddr>();
    TestServer::builder().http_transport().build(app).unwrap()
}

pub async fn seed(repository: &MemoryShortUrlRepository, url: &str) -> ShortUrl {
    repository
        .insert(NewShortUrl {
            url: url.to_string(),
            creator: "10.0.0.1".to_string(),
        })
        .await
        .unwrap()
}

/// All `Set-Cookie` values of a response.
pub fn set_cookies(response: &axum_test::TestResponse) -> Vec<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

/// Store that is always down.
pub struct FailingRepository;

fn unavailable() -> AppError {
    AppError::internal("Database error", json!({ "source": "connection refused" }))
}

#[async_trait]
impl ShortUrlRepository for FailingRepository {
    async fn find_by_id(&self, _id: u64) -> Result<Option<ShortUrl>, AppError> {
        Err(unavailable())
    }

    async fn find_by_url(&self, _url: &str) -> Result<Option<ShortUrl>, AppError> {
        Err(unavailable())
    }

    async fn insert(&self, _new_short_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        Err(unavailable())
    }

    fn list_all(&self) -> BoxStream<'static, Result<ShortUrl, AppError>> {
        stream::once(async { Err::<ShortUrl, AppError>(unavailable()) }).boxed()
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(unavailable())
    }
}
