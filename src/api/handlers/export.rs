//! Handler for the record export stream.

use axum::{
    body::Body,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use futures_util::StreamExt;
use std::io;

use crate::api::dto::export::ExportRecord;
use crate::state::AppState;

/// Streams every short URL as newline-delimited JSON.
///
/// # Endpoint
///
/// `GET /api/export` (Bearer token required)
///
/// # Response
///
/// ```text
/// {"id":"1","url":"https://example.com/a/long/path","host":"1.2.3.4","added":"2024-01-01T00:00:00Z"}
/// {"id":"2","url":"https://example.com/another/path","host":"5.6.7.8","added":"2024-01-01T00:05:00Z"}
/// ```
///
/// Records are read in batches while the body is sent, all from the snapshot
/// taken when the request started. A store error after the
/// first byte aborts the body, which clients see as a truncated response.
pub async fn export_handler(State(state): State<AppState>) -> Response {
    let codec = *state.codec();

    let lines = state.short_url_service.list().map(move |item| {
        let record = item.map_err(|e| {
            tracing::error!(operation = "export", error = ?e, "Export aborted");
            io::Error::other(e.to_string())
        })?;

        let mut line = serde_json::to_vec(&ExportRecord::from_short_url(record, &codec))
            .map_err(io::Error::other)?;
        line.push(b'\n');
        Ok::<Vec<u8>, io::Error>(line)
    });

    (
        [(header::CONTENT_TYPE, "application/x-ndjson")],
        Body::from_stream(lines),
    )
        .into_response()
}
