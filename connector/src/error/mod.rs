//! Layered error types for the connector crate.
//!
//! - [`ConnectorError`] - Error type for every request operation
//! - [`ConfigError`] - Failures while building an [`ApiConnector`](crate::ApiConnector)

mod config_error;
mod connector_error;

pub use config_error::ConfigError;
pub use connector_error::ConnectorError;
