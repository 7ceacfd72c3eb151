//! Core domain entities.
//!
//! - [`ShortUrl`] - a persisted id → target URL mapping
//! - [`NewShortUrl`] - insert input
//! - [`Creator`] - submitter identity passed into allocation

pub mod short_url;

pub use short_url::{Creator, NewShortUrl, ShortUrl};
