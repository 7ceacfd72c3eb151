//! HTTP request handlers for API endpoints.

pub mod export;
pub mod health;
pub mod shorten;

pub use export::export_handler;
pub use health::health_handler;
pub use shorten::shorten_handler;
