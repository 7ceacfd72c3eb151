//! In-process implementation of the short URL repository.
//!
//! Behaves like the PostgreSQL store: ids start at 1 and increase by one,
//! the target URL is unique, and `list_all` yields a snapshot in id order.
//! Used by tests and by the admin CLI's dry-run mode.

use async_trait::async_trait;
use chrono::Utc;
use futures_util::stream::{self, BoxStream, StreamExt};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;

#[derive(Debug, Default)]
struct Records {
    /// Record with id `n` lives at index `n - 1`.
    rows: Vec<ShortUrl>,
    by_url: HashMap<String, u64>,
}

/// Mutex-guarded record table. The lock is never held across an await point.
#[derive(Debug, Default)]
pub struct MemoryShortUrlRepository {
    records: Mutex<Records>,
}

impl MemoryShortUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Records> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ShortUrlRepository for MemoryShortUrlRepository {
    async fn find_by_id(&self, id: u64) -> Result<Option<ShortUrl>, AppError> {
        let records = self.lock();
        let index = match id.checked_sub(1).and_then(|i| usize::try_from(i).ok()) {
            Some(index) => index,
            None => return Ok(None),
        };
        Ok(records.rows.get(index).cloned())
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<ShortUrl>, AppError> {
        let records = self.lock();
        Ok(records
            .by_url
            .get(url)
            .and_then(|id| records.rows.get((*id - 1) as usize))
            .cloned())
    }

    async fn insert(&self, new_short_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        let mut records = self.lock();

        if records.by_url.contains_key(&new_short_url.url) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "shorturl_url_key" }),
            ));
        }

        let id = records.rows.len() as u64 + 1;
        let record = ShortUrl::new(id, new_short_url.url, new_short_url.creator, Utc::now());

        records.by_url.insert(record.url.clone(), id);
        records.rows.push(record.clone());

        Ok(record)
    }

    fn list_all(&self) -> BoxStream<'static, Result<ShortUrl, AppError>> {
        let snapshot = self.lock().rows.clone();
        stream::iter(snapshot.into_iter().map(Ok::<ShortUrl, AppError>)).boxed()
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::TryStreamExt;

    fn new_url(url: &str) -> NewShortUrl {
        NewShortUrl {
            url: url.to_string(),
            creator: "127.0.0.1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_ids_start_at_one() {
        let repo = MemoryShortUrlRepository::new();
        let first = repo.insert(new_url("https://example.com/a")).await.unwrap();
        let second = repo.insert(new_url("https://example.com/b")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_url_conflicts() {
        let repo = MemoryShortUrlRepository::new();
        repo.insert(new_url("https://example.com/a")).await.unwrap();

        let err = repo
            .insert(new_url("https://example.com/a"))
            .await
            .unwrap_err();

        assert!(err.is_conflict());
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_lookups() {
        let repo = MemoryShortUrlRepository::new();
        let created = repo.insert(new_url("https://example.com/a")).await.unwrap();

        assert_eq!(repo.find_by_id(1).await.unwrap(), Some(created.clone()));
        assert_eq!(
            repo.find_by_url("https://example.com/a").await.unwrap(),
            Some(created)
        );
        assert_eq!(repo.find_by_id(0).await.unwrap(), None);
        assert_eq!(repo.find_by_id(2).await.unwrap(), None);
        assert_eq!(repo.find_by_id(u64::MAX).await.unwrap(), None);
        assert_eq!(repo.find_by_url("https://other.com/").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_all_is_a_snapshot() {
        let repo = MemoryShortUrlRepository::new();
        repo.insert(new_url("https://example.com/a")).await.unwrap();
        repo.insert(new_url("https://example.com/b")).await.unwrap();

        let stream = repo.list_all();
        repo.insert(new_url("https://example.com/c")).await.unwrap();

        let listed: Vec<ShortUrl> = stream.try_collect().await.unwrap();
        let ids: Vec<u64> = listed.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
