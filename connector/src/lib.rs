//! BMC Connector
//!
//! A thin async client for a baseboard management controller's REST API:
//! read resource state, upload a firmware image, and trigger actions.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bmc_connector::ApiConnector;
//!
//! // The token is the Base64 encoding of `user:password`
//! let connector = ApiConnector::new("cm9vdDpjYWx2aW4=")?;
//!
//! let body = connector.get("https://bmc.local/redfish/v1/Managers/1").await?;
//! let task = connector
//!     .post_file("https://bmc.local/redfish/v1/UpdateService/upload", "firmware.bin")
//!     .await?;
//! ```
//!
//! ## Module Structure
//!
//! - [`client`] - The [`ApiConnector`] and its builder
//! - [`error`] - Error types for construction and requests
//! - [`operation`] - The request operations a connector issues

pub mod client;
pub mod error;
pub mod operation;
mod response;

pub use client::{
    ApiConnector, ApiConnectorBuilder, ConnectorConfig, FirmwareUpload, DEFAULT_TIMEOUT_SECS,
    UPLOAD_TIMEOUT_SECS,
};
pub use error::{ConfigError, ConnectorError};
pub use operation::ConnectorOperation;
