use std::fmt;

use http::{HeaderMap, Method, StatusCode};

use super::auth::AuthenticationError;
use crate::model::ErrorModel;

/// Maximum number of body bytes embedded in error messages.
pub(in crate::client) const BODY_MAX_LENGTH: usize = 1024;

/// Coarse classification of an [`IamClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A caller supplied value is missing or invalid; nothing was sent.
    InvalidArgument,
    /// No response was obtained from the server, or no request could be sent
    /// because the blocking runtime is unavailable.
    Connection,
    /// The server answered with a status that signals a failure.
    Api,
    /// The server answered with a success status but the body could not be decoded.
    Decode,
    /// Credentials could not be applied or refreshed.
    Authentication,
}

/// Errors that can occur when calling the IAM API.
///
/// Every variant carries enough context (status code, URI, raw body) to diagnose
/// the failure without running the call again. Use [`IamClientError::kind`] to
/// branch on the broad category.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum IamClientError {
    /// A required argument is missing or has an unusable value.
    #[display("Invalid argument: {message}")]
    #[from(skip)]
    InvalidArgument {
        /// Description of the problem.
        message: String,
    },

    /// Path template contains unresolved parameters.
    #[display("Path '{path}' is missing required arguments: {missings:?}")]
    #[from(skip)]
    PathUnresolved {
        /// The path template that couldn't be resolved.
        path: String,
        /// List of missing parameter names.
        missings: Vec<String>,
    },

    /// URL parsing error when constructing request URLs.
    UrlError(url::ParseError),

    /// Invalid HTTP header name.
    InvalidHeaderName(http::header::InvalidHeaderName),

    /// Invalid HTTP header value.
    InvalidHeaderValue(http::header::InvalidHeaderValue),

    /// Request payload or parameter could not be serialized to JSON.
    JsonValueError(serde_json::Error),

    /// Query or form payload could not be url-encoded.
    QuerySerializationError(serde_urlencoded::ser::Error),

    /// No response was received (DNS, TCP or TLS failure, timeout).
    #[display("Connection failure on {method} {uri} (status {status_code}): {message}")]
    #[from(skip)]
    Connection {
        /// Status reported by the transport, `0` when none.
        status_code: u16,
        /// The HTTP method of the request.
        method: Method,
        /// The request URI.
        uri: String,
        /// Transport error description.
        message: String,
    },

    /// The server answered with a failure status.
    Api(Box<ApiError>),

    /// A success response body could not be decoded into the expected model.
    #[display("Failed to deserialize {type_name} at '{path}' from {uri} (status {status_code}): {error}\n{body}")]
    #[from(skip)]
    Decode {
        /// The expected model type.
        type_name: &'static str,
        /// JSON path where decoding failed.
        path: String,
        /// The underlying JSON error.
        error: serde_json::Error,
        /// The response status code.
        status_code: u16,
        /// The request URI.
        uri: String,
        /// The raw response body.
        body: String,
    },

    /// Credentials could not be applied or refreshed.
    Authentication(AuthenticationError),

    /// The runtime backing the blocking client could not be started.
    ///
    /// Classified as [`ErrorKind::Connection`]: the call never reached the server.
    #[display("Failed to start the blocking runtime: {_0}")]
    #[from(skip)]
    Runtime(std::io::Error),
}

impl IamClientError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. }
            | Self::PathUnresolved { .. }
            | Self::UrlError(_)
            | Self::InvalidHeaderName(_)
            | Self::InvalidHeaderValue(_)
            | Self::JsonValueError(_)
            | Self::QuerySerializationError(_) => ErrorKind::InvalidArgument,
            Self::Connection { .. } | Self::Runtime(_) => ErrorKind::Connection,
            Self::Api(_) => ErrorKind::Api,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Authentication(_) => ErrorKind::Authentication,
        }
    }

    /// Returns the HTTP status code attached to this error, if any.
    ///
    /// Connection failures without a transport status report `Some(0)`.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Connection { status_code, .. } | Self::Decode { status_code, .. } => {
                Some(*status_code)
            }
            Self::Api(error) => Some(error.status.as_u16()),
            _ => None,
        }
    }

    /// Returns the API error details when the server answered with a failure status.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(error) => Some(error),
            _ => None,
        }
    }
}

impl From<ApiError> for IamClientError {
    fn from(value: ApiError) -> Self {
        Self::Api(Box::new(value))
    }
}

/// A failure response from the IAM API.
#[derive(Debug, Clone, derive_more::Error)]
pub struct ApiError {
    pub(in crate::client) status: StatusCode,
    pub(in crate::client) method: Method,
    pub(in crate::client) uri: String,
    pub(in crate::client) headers: HeaderMap,
    pub(in crate::client) body: String,
    pub(in crate::client) model: Option<ErrorModel>,
}

impl ApiError {
    /// The response status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The HTTP method of the failed request.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The request URI.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The raw response body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The decoded error payload, when the status is declared with an error model
    /// and the body matches it.
    pub fn model(&self) -> Option<&ErrorModel> {
        self.model.as_ref()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] API call {} {} failed",
            self.status.as_u16(),
            self.method,
            self.uri
        )?;
        if let Some(message) = self.model.as_ref().and_then(ErrorModel::message) {
            write!(f, ": {message}")?;
        }
        if !self.body.is_empty() {
            write!(f, "\n{}", truncate_body(&self.body))?;
        }
        Ok(())
    }
}

fn truncate_body(body: &str) -> String {
    if body.len() <= BODY_MAX_LENGTH {
        return body.to_string();
    }
    let mut end = BODY_MAX_LENGTH;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... (truncated)", body.get(..end).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ErrorInfo;

    fn api_error(body: &str) -> ApiError {
        ApiError {
            status: StatusCode::NOT_FOUND,
            method: Method::GET,
            uri: "https://iam.example.com/groups/G1".to_string(),
            headers: HeaderMap::new(),
            body: body.to_string(),
            model: None,
        }
    }

    #[test]
    fn test_iam_client_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<IamClientError>();
        assert_sync::<IamClientError>();
    }

    #[test]
    fn should_display_status_and_uri() {
        let error = IamClientError::from(api_error("not found"));

        insta::assert_snapshot!(error, @r"
        [404] API call GET https://iam.example.com/groups/G1 failed
        not found
        ");
        assert_eq!(error.kind(), ErrorKind::Api);
        assert_eq!(error.status_code(), Some(404));
    }

    #[test]
    fn should_display_model_message() {
        let mut error = api_error("");
        error.model = Some(ErrorModel::Info(ErrorInfo {
            message: Some("Group G1 does not exist".to_string()),
            ..ErrorInfo::default()
        }));

        insta::assert_snapshot!(error, @"[404] API call GET https://iam.example.com/groups/G1 failed: Group G1 does not exist");
    }

    #[test]
    fn should_truncate_long_body() {
        let body = "é".repeat(BODY_MAX_LENGTH);

        let truncated = truncate_body(&body);

        assert!(truncated.ends_with("... (truncated)"));
        assert!(truncated.len() < body.len());
    }

    #[test]
    fn should_classify_errors() {
        let missing = IamClientError::PathUnresolved {
            path: "/groups/{group_id}".to_string(),
            missings: vec!["group_id".to_string()],
        };
        assert_eq!(missing.kind(), ErrorKind::InvalidArgument);
        assert_eq!(missing.status_code(), None);

        let connection = IamClientError::Connection {
            status_code: 0,
            method: Method::GET,
            uri: "http://localhost/groups".to_string(),
            message: "connection refused".to_string(),
        };
        assert_eq!(connection.kind(), ErrorKind::Connection);
        assert_eq!(connection.status_code(), Some(0));

        let runtime = IamClientError::Runtime(std::io::Error::other("too many open files"));
        assert_eq!(runtime.kind(), ErrorKind::Connection);
        assert_eq!(runtime.status_code(), None);
    }
}
