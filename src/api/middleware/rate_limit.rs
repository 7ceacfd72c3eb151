//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::state::HttpSettings;

type Layer<K> = GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a per-IP limiter keyed on the socket peer address.
///
/// # Limits
///
/// `RATE_LIMIT_PER_SECOND` replenishment with a burst of `RATE_LIMIT_BURST`
/// (validated non-zero at startup). Requests exceeding the limit receive
/// `429 Too Many Requests`.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/add", post(add_handler))
///     .layer(rate_limit::layer(&settings));
/// ```
pub fn layer(settings: &HttpSettings) -> Layer<PeerIpKeyExtractor> {
    build(settings, PeerIpKeyExtractor)
}

/// Same limits, keyed on `X-Forwarded-For` / `X-Real-IP` / `Forwarded`
/// with a fallback to the peer address.
///
/// Use only behind a trusted reverse proxy.
pub fn proxied_layer(settings: &HttpSettings) -> Layer<SmartIpKeyExtractor> {
    build(settings, SmartIpKeyExtractor)
}

fn build<K: KeyExtractor>(settings: &HttpSettings, key_extractor: K) -> Layer<K> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(replenish_interval_ms(settings.rate_limit_per_second))
            .burst_size(settings.rate_limit_burst)
            .key_extractor(key_extractor)
            .finish()
            .expect("rate limit settings are validated to be non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Milliseconds between token refills for `per_second` requests per second.
fn replenish_interval_ms(per_second: u64) -> u64 {
    (1000 / per_second.max(1)).max(1)
}
