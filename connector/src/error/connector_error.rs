use std::path::PathBuf;

use super::ConfigError;

/// Errors returned by [`ApiConnector`](crate::ApiConnector) operations.
///
/// Nothing is retried internally; every variant is handed straight back to
/// the caller.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    /// The connection could not be established, timed out, or was
    /// interrupted while reading the response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {reason}")]
    HttpStatus {
        /// The numeric status code.
        status: u16,
        /// The canonical reason phrase, or `"Unknown"` for unregistered codes.
        reason: String,
    },

    /// The local upload file could not be read. Raised before any request is sent.
    #[error("cannot read upload file {}: {source}", path.display())]
    FileAccess {
        /// The path that was requested.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The upload was accepted but the server did not say where the task lives.
    #[error("upload returned HTTP {status} without a Location header")]
    MissingLocationHeader {
        /// The success status the server returned.
        status: u16,
    },

    /// The `Location` header was present but is not visible ASCII.
    #[error("upload returned HTTP {status} with an unreadable Location header")]
    InvalidLocationHeader {
        /// The success status the server returned.
        status: u16,
    },

    /// The request URL could not be parsed.
    #[error("invalid URL `{url}`: {source}")]
    InvalidUrl {
        /// The URL as given by the caller.
        url: String,
        /// The parse failure.
        #[source]
        source: url::ParseError,
    },

    /// The connector could not be built.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ConnectorError {
    /// Returns the HTTP status associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. }
            | Self::MissingLocationHeader { status }
            | Self::InvalidLocationHeader { status } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the request failed because it timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}
