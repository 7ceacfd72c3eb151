//! Business logic services for the application layer.

pub mod resolve_service;
pub mod short_url_service;

pub use resolve_service::ResolveService;
pub use short_url_service::ShortUrlService;
