//! The request operations a connector can issue.

use strum::{Display, EnumIter, EnumString};

/// The three request shapes an [`ApiConnector`](crate::ApiConnector) issues.
///
/// Used to label request spans and to pick the HTTP method.
///
/// ## Examples
///
/// ```rust
/// use bmc_connector::ConnectorOperation;
///
/// let op = ConnectorOperation::PostFile;
/// assert_eq!(op.to_string(), "post_file");
/// assert!(op.has_body());
///
/// let parsed: ConnectorOperation = "post_action".parse().unwrap();
/// assert_eq!(parsed, ConnectorOperation::PostAction);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ConnectorOperation {
    /// Read a resource's state.
    Get,
    /// Upload a file as multipart form data.
    PostFile,
    /// Trigger an action endpoint with an empty body.
    PostAction,
}

impl ConnectorOperation {
    /// Returns `true` if this operation sends a request body.
    pub fn has_body(&self) -> bool {
        matches!(self, Self::PostFile)
    }

    /// Returns the HTTP method this operation issues.
    pub fn http_method(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::PostFile | Self::PostAction => reqwest::Method::POST,
        }
    }
}

impl From<ConnectorOperation> for reqwest::Method {
    fn from(op: ConnectorOperation) -> Self {
        op.http_method()
    }
}
