//! Repository implementations.
//!
//! - [`PgShortUrlRepository`] - PostgreSQL storage via SQLx
//! - [`MemoryShortUrlRepository`] - in-process storage for tests and dry runs

pub mod memory_short_url_repository;
pub mod pg_short_url_repository;

pub use memory_short_url_repository::MemoryShortUrlRepository;
pub use pg_short_url_repository::PgShortUrlRepository;
