//! Fetching a linked spreadsheet over HTTP.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::format::SourceFormat;

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Downloads `url` and works out its format.
///
/// The URL path extension is preferred; the `Content-Type` header is the
/// fallback for extension-less download links.
pub fn fetch_bytes(url: &str, max_size: u64) -> Result<(Vec<u8>, SourceFormat)> {
    let client = Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(IngestError::Network)?;

    debug!(url, "fetching source");
    let response = client
        .get(url)
        .header(
            USER_AGENT,
            concat!("qa-ingest/", env!("CARGO_PKG_VERSION")),
        )
        .send()
        .map_err(IngestError::Network)?;

    if !response.status().is_success() {
        return Err(IngestError::HttpStatus {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let format = SourceFormat::from_url(url)
        .or_else(|| content_type.as_deref().and_then(SourceFormat::from_content_type))
        .ok_or_else(|| IngestError::UnsupportedFormat {
            origin: url.to_string(),
            format: content_type.clone().unwrap_or_default(),
        })?;

    if let Some(length) = response.content_length()
        && length > max_size
    {
        return Err(IngestError::FileTooLarge {
            origin: url.to_string(),
            size: length,
            max_size,
        });
    }

    let bytes = response.bytes().map_err(IngestError::Network)?;
    if bytes.len() as u64 > max_size {
        return Err(IngestError::FileTooLarge {
            origin: url.to_string(),
            size: bytes.len() as u64,
            max_size,
        });
    }

    debug!(url, format = %format, bytes = bytes.len(), "source fetched");
    Ok((bytes.to_vec(), format))
}
