/// Errors raised while building an [`ApiConnector`](crate::ApiConnector).
///
/// No network I/O happens at construction, so these only cover header
/// encoding and client allocation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The token contains bytes that cannot appear in an HTTP header value.
    #[error("auth token is not a valid header value")]
    InvalidToken,

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}
