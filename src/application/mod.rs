//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and the resolution policy. Services consume repository traits
//! and provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::ShortUrlService`] - Idempotent allocation and lookup by code
//! - [`services::ResolveService`] - Redirect-or-preview decision for visits

pub mod services;
