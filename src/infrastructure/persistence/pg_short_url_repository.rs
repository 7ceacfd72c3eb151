//! PostgreSQL implementation of the short URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::stream::{self, BoxStream, StreamExt, TryStreamExt};
use serde_json::json;
use sqlx::{PgPool, Postgres, Transaction};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;

const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_BATCH_SIZE: i64 = 1000;

#[derive(sqlx::FromRow)]
struct ShortUrlRow {
    id: i64,
    url: String,
    creator: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ShortUrlRow> for ShortUrl {
    type Error = AppError;

    fn try_from(row: ShortUrlRow) -> Result<Self, Self::Error> {
        let id = u64::try_from(row.id)
            .map_err(|_| AppError::internal("Malformed record id", json!({ "id": row.id })))?;

        Ok(ShortUrl::new(id, row.url, row.creator, row.created_at))
    }
}

/// State of a running `list_all` scan.
///
/// Every batch is read inside one `REPEATABLE READ` read-only transaction,
/// so the listing sees the store as of its first query. Dropping the scan
/// rolls the transaction back and returns the connection to the pool.
struct Scan {
    tx: Option<Transaction<'static, Postgres>>,
    /// Highest id visible in the snapshot; `None` until the first batch.
    upper: Option<i64>,
    after: i64,
}

/// PostgreSQL repository for short URL records.
///
/// Every statement runs under a per-call timeout. The `url` column carries
/// the unique constraint that backs idempotent allocation.
pub struct PgShortUrlRepository {
    pool: Arc<PgPool>,
    query_timeout: Duration,
    batch_size: i64,
}

impl PgShortUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self {
            pool,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }

    /// Sets how many rows `list_all` fetches per round trip.
    pub fn with_batch_size(mut self, batch_size: i64) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }
}

async fn with_timeout<T, F>(
    timeout: Duration,
    operation: &'static str,
    query: F,
) -> Result<T, AppError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(timeout, query).await {
        Ok(result) => result.map_err(AppError::from),
        Err(_) => Err(AppError::internal(
            "Store call timed out",
            json!({ "operation": operation, "timeout_ms": timeout.as_millis() as u64 }),
        )),
    }
}

async fn begin_snapshot(
    pool: &PgPool,
    timeout: Duration,
) -> Result<Transaction<'static, Postgres>, AppError> {
    let mut tx = with_timeout(timeout, "list_all", pool.begin()).await?;
    with_timeout(
        timeout,
        "list_all",
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx),
    )
    .await?;
    Ok(tx)
}

async fn next_batch(
    pool: &PgPool,
    timeout: Duration,
    batch_size: i64,
    mut scan: Scan,
) -> Result<Option<(Vec<ShortUrl>, Scan)>, AppError> {
    let mut tx = match scan.tx.take() {
        Some(tx) => tx,
        None => begin_snapshot(pool, timeout).await?,
    };

    let upper = match scan.upper {
        Some(upper) => upper,
        None => {
            let max_id = with_timeout(
                timeout,
                "list_all",
                sqlx::query_scalar::<_, Option<i64>>("SELECT MAX(id) FROM shorturl")
                    .fetch_one(&mut *tx),
            )
            .await?;

            match max_id {
                Some(max_id) => max_id,
                None => return Ok(None),
            }
        }
    };

    if scan.after >= upper {
        return Ok(None);
    }

    let rows = with_timeout(
        timeout,
        "list_all",
        sqlx::query_as::<_, ShortUrlRow>(
            r#"
            SELECT id, url, creator, created_at
            FROM shorturl
            WHERE id > $1 AND id <= $2
            ORDER BY id
            LIMIT $3
            "#,
        )
        .bind(scan.after)
        .bind(upper)
        .bind(batch_size)
        .fetch_all(&mut *tx),
    )
    .await?;

    let Some(last_id) = rows.last().map(|row| row.id) else {
        return Ok(None);
    };

    let batch = rows
        .into_iter()
        .map(ShortUrl::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some((
        batch,
        Scan {
            tx: Some(tx),
            upper: Some(upper),
            after: last_id,
        },
    )))
}

#[async_trait]
impl ShortUrlRepository for PgShortUrlRepository {
    async fn find_by_id(&self, id: u64) -> Result<Option<ShortUrl>, AppError> {
        // BIGSERIAL never exceeds i64::MAX.
        let Ok(id) = i64::try_from(id) else {
            return Ok(None);
        };

        let row = with_timeout(
            self.query_timeout,
            "find_by_id",
            sqlx::query_as::<_, ShortUrlRow>(
                "SELECT id, url, creator, created_at FROM shorturl WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(self.pool.as_ref()),
        )
        .await?;

        row.map(ShortUrl::try_from).transpose()
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<ShortUrl>, AppError> {
        let row = with_timeout(
            self.query_timeout,
            "find_by_url",
            sqlx::query_as::<_, ShortUrlRow>(
                "SELECT id, url, creator, created_at FROM shorturl WHERE url = $1",
            )
            .bind(url)
            .fetch_optional(self.pool.as_ref()),
        )
        .await?;

        row.map(ShortUrl::try_from).transpose()
    }

    async fn insert(&self, new_short_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        let row = with_timeout(
            self.query_timeout,
            "insert",
            sqlx::query_as::<_, ShortUrlRow>(
                r#"
                INSERT INTO shorturl (url, creator)
                VALUES ($1, $2)
                RETURNING id, url, creator, created_at
                "#,
            )
            .bind(&new_short_url.url)
            .bind(&new_short_url.creator)
            .fetch_one(self.pool.as_ref()),
        )
        .await?;

        ShortUrl::try_from(row)
    }

    fn list_all(&self) -> BoxStream<'static, Result<ShortUrl, AppError>> {
        let pool = self.pool.clone();
        let timeout = self.query_timeout;
        let batch_size = self.batch_size;
        let start = Scan {
            tx: None,
            upper: None,
            after: i64::MIN,
        };

        stream::try_unfold(start, move |scan| {
            let pool = pool.clone();
            async move { next_batch(&pool, timeout, batch_size, scan).await }
        })
        .map_ok(|batch| stream::iter(batch.into_iter().map(Ok::<ShortUrl, AppError>)))
        .try_flatten()
        .boxed()
    }

    async fn ping(&self) -> Result<(), AppError> {
        with_timeout(
            self.query_timeout,
            "ping",
            sqlx::query("SELECT 1").execute(self.pool.as_ref()),
        )
        .await?;
        Ok(())
    }
}
