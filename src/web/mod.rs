//! Browser-facing layer: HTML pages, redirects and preference cookies.
//!
//! Uses Askama templates for server-side rendering.
//!
//! # Modules
//!
//! - [`handlers`] - Page and redirect handlers
//! - [`cookies`] - `clientid` and `preview` cookie helpers
//! - [`pages`] - Error pages and redirect responses
//! - [`routes`] - Route configuration

pub mod cookies;
pub mod handlers;
pub mod pages;
pub mod routes;
