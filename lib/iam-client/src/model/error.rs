use serde::{Deserialize, Serialize};

/// Error payload returned when the requested API version is not supported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionError {
    /// Human readable message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The API versions accepted by the service.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supported_versions: Vec<String>,
}

/// Generic error payload of the IAM service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorInfo {
    /// Machine readable error code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Human readable message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The element the error refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Nested errors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ErrorInfo>,
}

/// The kind of error model a status code is declared with.
///
/// Resolved when an operation descriptor is built, so decoding an error body
/// never has to look at type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorModelKind {
    /// The body is a [`VersionError`].
    Version,
    /// The body is an [`ErrorInfo`].
    Info,
}

/// A decoded error payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorModel {
    /// Unsupported API version.
    Version(VersionError),
    /// Any other service error.
    Info(ErrorInfo),
}

impl ErrorModelKind {
    pub(crate) fn decode(self, body: &[u8]) -> Result<ErrorModel, serde_json::Error> {
        let model = match self {
            Self::Version => ErrorModel::Version(serde_json::from_slice(body)?),
            Self::Info => ErrorModel::Info(serde_json::from_slice(body)?),
        };
        Ok(model)
    }
}

impl ErrorModel {
    /// Returns the message carried by the payload, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Version(error) => error.message.as_deref(),
            Self::Info(error) => error.message.as_deref(),
        }
    }
}
