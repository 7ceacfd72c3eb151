//! Utility functions for code conversion, URL checks, and request handling.
//!
//! - [`codec`] - Id to short code conversion
//! - [`url_validator`] - Acceptance rules for target URLs
//! - [`client_id`] - Anonymous client identifiers
//! - [`request_info`] - Host, referer and client address from HTTP headers

pub mod client_id;
pub mod codec;
pub mod request_info;
pub mod url_validator;
