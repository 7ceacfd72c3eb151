//! Repository trait for short URL records.

use async_trait::async_trait;
use futures_util::stream::BoxStream;

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::error::AppError;

/// Durable storage of short URL records with lookups by id and by target URL.
///
/// The unique constraint on the target URL is enforced here, by the store;
/// it is the only correctness guarantee for concurrent inserts of the same URL.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortUrlRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryShortUrlRepository`] - in-process
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortUrlRepository: Send + Sync {
    /// Finds a record by its id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the store fails. A missing row is
    /// `Ok(None)`, never an error.
    async fn find_by_id(&self, id: u64) -> Result<Option<ShortUrl>, AppError>;

    /// Finds a record by its exact target URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the store fails.
    async fn find_by_url(&self, url: &str) -> Result<Option<ShortUrl>, AppError>;

    /// Inserts a new record; the store assigns `id` and `created_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the target URL already exists.
    /// Returns [`AppError::Internal`] when the store fails.
    async fn insert(&self, new_short_url: NewShortUrl) -> Result<ShortUrl, AppError>;

    /// Streams every record in ascending id order.
    ///
    /// The stream reflects the store as of its first read: records committed
    /// later are not listed. Dropping the stream early releases all resources.
    fn list_all(&self) -> BoxStream<'static, Result<ShortUrl, AppError>>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
