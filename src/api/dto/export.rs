//! DTO for the NDJSON export stream.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::ShortUrl;
use crate::utils::codec::IdCodec;

/// One line of the export.
#[derive(Debug, Serialize)]
pub struct ExportRecord {
    /// Short code, not the numeric id.
    pub id: String,
    pub url: String,
    /// Creator address recorded at allocation time.
    pub host: String,
    pub added: DateTime<Utc>,
}

impl ExportRecord {
    pub fn from_short_url(short_url: ShortUrl, codec: &IdCodec) -> Self {
        Self {
            id: short_url.code(codec),
            url: short_url.url,
            host: short_url.creator,
            added: short_url.created_at,
        }
    }
}
