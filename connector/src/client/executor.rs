//! Request execution with tracing instrumentation.
//!
//! This module provides the [`ApiConnector`] struct for issuing authenticated
//! requests against a management controller's REST API.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{RequestBuilder, Response};
use tracing::{debug, instrument, warn, Span};
use url::Url;

use super::upload::FirmwareUpload;
use crate::error::{ConfigError, ConnectorError};
use crate::operation::ConnectorOperation;
use crate::response;

/// Default request timeout in seconds, applied to `get` and `post_action`.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Timeout in seconds for file uploads. Firmware images are large and
/// controllers are slow to accept them.
pub const UPLOAD_TIMEOUT_SECS: u64 = 600;

/// Settings fixed at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorConfig {
    /// Client-wide timeout for `get` and `post_action`.
    pub timeout: Duration,
    /// Per-request timeout for `post_file`.
    pub upload_timeout: Duration,
    /// Skip TLS certificate verification.
    pub accept_invalid_certs: bool,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            upload_timeout: Duration::from_secs(UPLOAD_TIMEOUT_SECS),
            accept_invalid_certs: false,
        }
    }
}

/// Builder for configuring an [`ApiConnector`].
///
/// Only collects values. Headers and the client are created together in
/// [`build`](Self::build), so a connector never exists without its headers.
pub struct ApiConnectorBuilder {
    token: String,
    config: ConnectorConfig,
}

impl fmt::Debug for ApiConnectorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConnectorBuilder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ApiConnectorBuilder {
    fn new(token: String) -> Self {
        Self {
            token,
            config: ConnectorConfig::default(),
        }
    }

    /// Sets the timeout for `get` and `post_action`.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Sets the timeout for `post_file`.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// use std::time::Duration;
    ///
    /// let connector = ApiConnector::builder(token)
    ///     .upload_timeout(Duration::from_secs(1800))
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn upload_timeout(mut self, timeout: Duration) -> Self {
        self.config.upload_timeout = timeout;
        self
    }

    /// Disables TLS certificate verification.
    ///
    /// Controllers commonly ship self-signed certificates. Only use this on a
    /// trusted management network.
    #[must_use]
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.config.accept_invalid_certs = accept;
        self
    }

    /// Builds the [`ApiConnector`].
    ///
    /// ## Errors
    ///
    /// - [`ConfigError::InvalidToken`] if the token cannot be sent in a header
    /// - [`ConfigError::ClientBuild`] if the HTTP client cannot be constructed
    pub fn build(self) -> Result<ApiConnector, ConfigError> {
        let mut auth = HeaderValue::try_from(format!("Basic {}", self.token))
            .map_err(|_| ConfigError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if self.config.accept_invalid_certs {
            warn!("TLS certificate verification disabled for BMC connector");
        }

        let client = reqwest::Client::builder()
            .timeout(self.config.timeout)
            .default_headers(headers)
            .danger_accept_invalid_certs(self.config.accept_invalid_certs)
            .build()
            .map_err(ConfigError::ClientBuild)?;

        Ok(ApiConnector {
            client,
            config: self.config,
        })
    }
}

/// Async HTTP connector for a management controller's REST API.
///
/// Every request carries `Authorization: Basic <token>` and
/// `Accept: application/json`. The configuration is immutable, so one
/// connector can be shared by reference across concurrent tasks.
///
/// The token must already be the Base64 encoding of `user:password`; it is
/// sent as given.
///
/// ## Examples
///
/// ```rust,ignore
/// use bmc_connector::ApiConnector;
///
/// let connector = ApiConnector::new("cm9vdDpjYWx2aW4=")?;
///
/// let system = connector.get("https://bmc.local/redfish/v1/Systems/1").await?;
/// let task = connector
///     .post_file("https://bmc.local/redfish/v1/UpdateService/upload", "bios.bin")
///     .await?;
/// connector
///     .post_action("https://bmc.local/redfish/v1/Systems/1/Actions/ComputerSystem.Reset")
///     .await?;
/// ```
pub struct ApiConnector {
    client: reqwest::Client,
    config: ConnectorConfig,
}

impl fmt::Debug for ApiConnector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConnector")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ApiConnector {
    /// Creates a new builder for configuring a connector.
    ///
    /// ## Arguments
    ///
    /// * `token` - Base64-encoded `user:password` credential.
    pub fn builder(token: impl Into<String>) -> ApiConnectorBuilder {
        ApiConnectorBuilder::new(token.into())
    }

    /// Creates a connector with default settings.
    ///
    /// ## Errors
    ///
    /// Returns an error if the token is not a valid header value or the HTTP
    /// client cannot be constructed.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        Self::builder(token).build()
    }

    /// Returns the settings this connector was built with.
    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    /// Fetches a resource and returns its body as text.
    ///
    /// ## Errors
    ///
    /// - [`ConnectorError::HttpStatus`] for a non-2xx response
    /// - [`ConnectorError::Transport`] for network failures and timeouts
    /// - [`ConnectorError::InvalidUrl`] if `url` cannot be parsed
    #[instrument(
        name = "connector_request",
        skip(self),
        fields(
            connector.operation = tracing::field::Empty,
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn get(&self, url: &str) -> Result<String, ConnectorError> {
        let request = self.request(ConnectorOperation::Get, url)?;
        let response = self.dispatch(request).await?;
        let body = response::body_text(response).await?;

        debug!(bytes = body.len(), "request completed");
        Ok(body)
    }

    /// Uploads a local file as multipart form data and returns the `Location`
    /// header of the response.
    ///
    /// The file is read fully into memory and sent as a single part named
    /// `data`. This request uses [`ConnectorConfig::upload_timeout`] instead
    /// of the client-wide timeout.
    ///
    /// ## Errors
    ///
    /// - [`ConnectorError::FileAccess`] if the file cannot be read; no request is sent
    /// - [`ConnectorError::HttpStatus`] for a non-2xx response
    /// - [`ConnectorError::MissingLocationHeader`] if a 2xx response has no `Location`
    /// - [`ConnectorError::Transport`] for network failures and timeouts
    #[instrument(
        name = "connector_request",
        skip(self, path),
        fields(
            connector.operation = tracing::field::Empty,
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn post_file(
        &self,
        url: &str,
        path: impl AsRef<Path>,
    ) -> Result<String, ConnectorError> {
        let request = self.request(ConnectorOperation::PostFile, url)?;

        let upload = FirmwareUpload::read(path).await?;
        debug!(
            file = upload.file_name(),
            bytes = upload.len(),
            "uploading file"
        );
        let form = upload.into_form()?;

        let request = request
            .multipart(form)
            .timeout(self.config.upload_timeout);
        let response = self.dispatch(request).await?;
        let location = response::location(response.status(), response.headers())?;

        debug!(location = %location, "request completed");
        Ok(location)
    }

    /// Triggers an action endpoint with an empty POST and returns the body.
    ///
    /// ## Errors
    ///
    /// Same as [`get`](Self::get).
    #[instrument(
        name = "connector_request",
        skip(self),
        fields(
            connector.operation = tracing::field::Empty,
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn post_action(&self, url: &str) -> Result<String, ConnectorError> {
        let request = self.request(ConnectorOperation::PostAction, url)?;
        let response = self.dispatch(request).await?;
        let body = response::body_text(response).await?;

        debug!(bytes = body.len(), "request completed");
        Ok(body)
    }

    /// Parses the URL, records it on the current span and starts a request.
    fn request(
        &self,
        operation: ConnectorOperation,
        url: &str,
    ) -> Result<RequestBuilder, ConnectorError> {
        let parsed = Url::parse(url).map_err(|source| ConnectorError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let span = Span::current();
        span.record("connector.operation", operation.to_string().as_str());
        span.record("http.method", operation.http_method().as_str());
        span.record("http.url", parsed.as_str());

        Ok(self.client.request(operation.http_method(), parsed))
    }

    /// Sends the request and rejects non-success statuses.
    async fn dispatch(&self, request: RequestBuilder) -> Result<Response, ConnectorError> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                Span::current().record("otel.status_code", "ERROR");
                return Err(e.into());
            }
        };

        let status = response.status();
        let span = Span::current();
        span.record("http.status_code", status.as_u16());
        span.record("otel.status_code", response::otel_status(status));

        response::ensure_success(response)
    }
}
