mod common;

use serde_json::json;
use shorturl::infrastructure::persistence::MemoryShortUrlRepository;
use shorturl::utils::codec::CodecConfig;
use std::sync::Arc;

const TARGET: &str = "https://target.example.com/some/long/path";

#[tokio::test]
async fn test_redirect_success() {
    let (state, repository) = common::memory_state();
    common::seed(&repository, TARGET).await;
    let server = common::test_server(state);

    let response = server.get("/1").add_header("Host", "yx.fi").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), TARGET);
}

#[tokio::test]
async fn test_redirect_temporary_when_configured() {
    let repository = Arc::new(MemoryShortUrlRepository::new());
    common::seed(&repository, TARGET).await;
    let state = common::create_test_state(
        repository,
        CodecConfig::default(),
        false,
        common::settings(),
    );
    let server = common::test_server(state);

    let response = server.get("/1").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), TARGET);
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (state, _repository) = common::memory_state();
    let server = common::test_server(state);

    let response = server.get("/zz").await;

    response.assert_status_not_found();
    assert!(response.text().contains("Short URL not found"));
}

#[tokio::test]
async fn test_redirect_malformed_code_is_not_found() {
    let (state, repository) = common::memory_state();
    common::seed(&repository, TARGET).await;
    let server = common::test_server(state);

    server.get("/a-b").await.assert_status_not_found();
    server.get("/1!").await.assert_status_not_found();
}

#[tokio::test]
async fn test_uppercase_code_rejected_by_default() {
    let (state, repository) = common::memory_state();
    for i in 0..11 {
        common::seed(&repository, &format!("{TARGET}/{i}")).await;
    }
    let server = common::test_server(state);

    assert_eq!(server.get("/b").await.status_code(), 301);
    server.get("/B").await.assert_status_not_found();
}

#[tokio::test]
async fn test_uppercase_code_accepted_when_case_insensitive() {
    let repository = Arc::new(MemoryShortUrlRepository::new());
    for i in 0..11 {
        common::seed(&repository, &format!("{TARGET}/{i}")).await;
    }
    let state = common::create_test_state(
        repository,
        CodecConfig {
            case_insensitive: true,
            ..CodecConfig::default()
        },
        true,
        common::settings(),
    );
    let server = common::test_server(state);

    let response = server.get("/B").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), format!("{TARGET}/10"));
}

#[tokio::test]
async fn test_always_preview_without_referer_shows_preview() {
    let (state, repository) = common::memory_state();
    common::seed(&repository, TARGET).await;
    let server = common::test_server(state);

    let response = server
        .get("/1")
        .add_header("Host", "yx.fi")
        .add_header("Cookie", "preview=true")
        .await;

    response.assert_status_ok();
    assert!(response.text().contains("target.example.com"));
}

#[tokio::test]
async fn test_always_preview_with_foreign_referer_shows_preview() {
    let (state, repository) = common::memory_state();
    common::seed(&repository, TARGET).await;
    let server = common::test_server(state);

    let response = server
        .get("/1")
        .add_header("Host", "yx.fi")
        .add_header("Cookie", "preview=true")
        .add_header("Referer", "https://news.example.org/front")
        .await;

    response.assert_status_ok();
    assert!(response.text().contains("target.example.com"));
}

#[tokio::test]
async fn test_always_preview_with_local_referer_redirects() {
    let (state, repository) = common::memory_state();
    common::seed(&repository, TARGET).await;
    let server = common::test_server(state);

    let response = server
        .get("/1")
        .add_header("Host", "YX.fi:8080")
        .add_header("Cookie", "preview=true")
        .add_header("Referer", "https://yx.fi/p/1")
        .await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), TARGET);
}

#[tokio::test]
async fn test_preview_cookie_other_value_redirects() {
    let (state, repository) = common::memory_state();
    common::seed(&repository, TARGET).await;
    let server = common::test_server(state);

    let response = server
        .get("/1")
        .add_header("Cookie", "preview=false")
        .await;

    assert_eq!(response.status_code(), 301);
}

#[tokio::test]
async fn test_store_failure_renders_error_page() {
    let server = common::test_server(common::failing_state());

    let response = server.get("/1").await;

    assert_eq!(response.status_code(), 500);
    let body = response.text();
    assert!(body.contains("Internal server error"));
    assert!(!body.contains("connection refused"));
}

#[tokio::test]
async fn test_create_then_resolve_first_code() {
    let (state, _repository) = common::memory_state();
    let server = common::test_server(state);

    let created = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/very/long/path" }))
        .await;
    created.assert_status_ok();
    assert_eq!(created.json::<serde_json::Value>()["code"], "1");

    let response = server.get("/1").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(
        response.header("location"),
        "https://example.com/very/long/path"
    );
}

#[tokio::test]
async fn test_redirect_non_ascii_target_is_encoded() {
    let (state, repository) = common::memory_state();
    common::seed(&repository, "https://bücher.example/straße/long").await;
    let server = common::test_server(state);

    let response = server.get("/1").await;

    assert_eq!(response.status_code(), 301);
    let location = response.headers()["location"].as_bytes().to_vec();
    assert!(location.is_ascii());
    assert_eq!(
        String::from_utf8(location).unwrap(),
        "https://xn--bcher-kva.example/stra%C3%9Fe/long"
    );
}
