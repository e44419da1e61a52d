//! Response handling.
//!
//! Responses are only checked for success and then surfaced as raw text or,
//! for uploads, as the value of the `Location` header. Bodies are never parsed.

use reqwest::header::{HeaderMap, LOCATION};
use reqwest::{Response, StatusCode};

use crate::error::ConnectorError;

/// Maps a status to the `otel.status_code` value recorded on request spans.
///
/// Client errors stay `UNSET`; only server errors mark the span as failed.
pub(crate) fn otel_status(status: StatusCode) -> &'static str {
    if status.is_success() {
        "OK"
    } else if status.is_server_error() {
        "ERROR"
    } else {
        "UNSET"
    }
}

/// Converts a non-success status into [`ConnectorError::HttpStatus`].
///
/// The body of a failed response is dropped unread.
pub(crate) fn ensure_success(response: Response) -> Result<Response, ConnectorError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    Err(status_error(status))
}

fn status_error(status: StatusCode) -> ConnectorError {
    ConnectorError::HttpStatus {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
    }
}

/// Reads the full body of a successful response as text.
pub(crate) async fn body_text(response: Response) -> Result<String, ConnectorError> {
    Ok(response.text().await?)
}

/// Extracts the `Location` header the server uses to point at the queued task.
pub(crate) fn location(status: StatusCode, headers: &HeaderMap) -> Result<String, ConnectorError> {
    let status = status.as_u16();
    let value = headers
        .get(LOCATION)
        .ok_or(ConnectorError::MissingLocationHeader { status })?;

    value
        .to_str()
        .map(str::to_string)
        .map_err(|_| ConnectorError::InvalidLocationHeader { status })
}
