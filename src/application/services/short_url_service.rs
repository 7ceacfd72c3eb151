//! Short URL allocation and lookup service.

use futures_util::stream::BoxStream;
use serde_json::json;
use std::sync::Arc;
use tokio_retry::RetryIf;
use tokio_retry::strategy::FixedInterval;
use tracing::{debug, error, info, warn};

use crate::domain::entities::{Creator, NewShortUrl, ShortUrl};
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;
use crate::utils::codec::IdCodec;
use crate::utils::url_validator::validate_target_url;

/// Extra attempts after an unresolved insert race.
const CONFLICT_RETRIES: usize = 2;
const CONFLICT_RETRY_DELAY_MS: u64 = 10;

/// Service for creating and retrieving short URLs.
///
/// Allocation is get-or-create with collapse-on-conflict: an existing record
/// for the URL is returned unchanged, otherwise a new one is inserted. When a
/// concurrent request wins the insert race, the store's unique constraint
/// rejects the second insert and the winner's record is looked up once more.
/// There is no application-level lock.
pub struct ShortUrlService<R: ShortUrlRepository + ?Sized> {
    repository: Arc<R>,
    codec: IdCodec,
}

impl<R: ShortUrlRepository + ?Sized> ShortUrlService<R> {
    /// Creates a new short URL service.
    pub fn new(repository: Arc<R>, codec: IdCodec) -> Self {
        Self { repository, codec }
    }

    pub fn codec(&self) -> &IdCodec {
        &self.codec
    }

    /// Short code of a record.
    pub fn code_of(&self, short_url: &ShortUrl) -> String {
        short_url.code(&self.codec)
    }

    /// Validates `url` and returns its short URL, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is rejected; nothing is
    /// written in that case. Otherwise see [`Self::get_or_create`].
    pub async fn create(&self, url: &str, creator: &Creator) -> Result<ShortUrl, AppError> {
        if let Err(reason) = validate_target_url(url) {
            debug!(url = %url, reason = %reason, "URL rejected");
            return Err(reason.into());
        }

        self.get_or_create(url, creator).await
    }

    /// Like [`Self::create`], retrying up to twice when a concurrent insert
    /// could not be collapsed.
    ///
    /// # Errors
    ///
    /// As [`Self::create`]; `Conflict` only after every attempt conflicted.
    pub async fn create_with_retry(
        &self,
        url: &str,
        creator: &Creator,
    ) -> Result<ShortUrl, AppError> {
        let strategy = FixedInterval::from_millis(CONFLICT_RETRY_DELAY_MS).take(CONFLICT_RETRIES);

        RetryIf::start(strategy, || self.create(url, creator), AppError::is_conflict).await
    }

    /// Returns the record for `url`, inserting one if none exists.
    ///
    /// Calling this twice with the same URL returns the same record, also
    /// when the calls race.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the insert lost a race and the
    /// winning record still cannot be read back; the caller may retry.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn get_or_create(&self, url: &str, creator: &Creator) -> Result<ShortUrl, AppError> {
        if let Some(existing) = self
            .repository
            .find_by_url(url)
            .await
            .inspect_err(|e| log_store_error("find_by_url", url, e))?
        {
            debug!(id = existing.id, url = %url, "Reusing existing short URL");
            return Ok(existing);
        }

        let new_short_url = NewShortUrl {
            url: url.to_string(),
            creator: creator.host.clone(),
        };

        match self.repository.insert(new_short_url).await {
            Ok(created) => {
                info!(
                    id = created.id,
                    code = %self.code_of(&created),
                    url = %url,
                    creator = %creator.host,
                    client_id = creator.client_id.as_ref().map(|c| c.as_str()).unwrap_or("-"),
                    "Short URL created"
                );
                Ok(created)
            }
            Err(e) if e.is_conflict() => self.collapse_conflict(url).await,
            Err(e) => {
                log_store_error("insert", url, &e);
                Err(e)
            }
        }
    }

    /// Re-reads the record that a concurrent insert committed first.
    async fn collapse_conflict(&self, url: &str) -> Result<ShortUrl, AppError> {
        debug!(url = %url, "Insert lost a race, re-reading");

        match self
            .repository
            .find_by_url(url)
            .await
            .inspect_err(|e| log_store_error("find_by_url", url, e))?
        {
            Some(existing) => Ok(existing),
            None => {
                warn!(url = %url, "Unique violation but no visible record");
                Err(AppError::conflict(
                    "Concurrent insert could not be resolved, retry",
                    json!({ "url": url }),
                ))
            }
        }
    }

    /// Finds a record by short code.
    ///
    /// Codes that do not decode are reported as absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>, AppError> {
        let Some(id) = self.codec.decode(code) else {
            return Ok(None);
        };

        self.repository
            .find_by_id(id)
            .await
            .inspect_err(|e| log_store_error("find_by_id", code, e))
    }

    /// Retrieves a record by short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown or malformed codes.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn get_by_code(&self, code: &str) -> Result<ShortUrl, AppError> {
        self.find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short URL not found", json!({ "code": code })))
    }

    /// Streams every record, for export.
    pub fn list(&self) -> BoxStream<'static, Result<ShortUrl, AppError>> {
        self.repository.list_all()
    }

    /// Checks that the store is reachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

fn log_store_error(operation: &'static str, subject: &str, e: &AppError) {
    if e.is_internal() {
        error!(operation, subject = %subject, error = ?e, "Store operation failed");
    }
}
