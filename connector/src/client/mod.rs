//! HTTP client for the controller's REST API.

mod executor;
pub mod upload;

pub use executor::{
    ApiConnector, ApiConnectorBuilder, ConnectorConfig, DEFAULT_TIMEOUT_SECS, UPLOAD_TIMEOUT_SECS,
};
pub use upload::FirmwareUpload;
