//! OAuth2-specific error types.

use std::fmt;

use crate::client::AuthenticationError;

/// Errors that can occur while obtaining OAuth2 tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OAuth2Error {
    /// Token endpoint URL is invalid.
    InvalidTokenEndpoint {
        /// The invalid URL that was provided.
        url: String,
        /// Description of why the URL is invalid.
        reason: String,
    },

    /// The token endpoint refused or failed the request.
    TokenAcquisitionFailed {
        /// Description of the failure.
        reason: String,
    },

    /// The token has expired and cannot be renewed.
    TokenExpired,

    /// The HTTP client of the token endpoint could not be created.
    HttpClient {
        /// Description of the failure.
        reason: String,
    },

    /// Configuration error.
    ConfigurationError {
        /// Description of the configuration issue.
        reason: String,
    },
}

impl std::error::Error for OAuth2Error {}

impl fmt::Display for OAuth2Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTokenEndpoint { url, reason } => {
                write!(f, "Invalid token endpoint URL '{url}': {reason}")
            }
            Self::TokenAcquisitionFailed { reason } => {
                write!(f, "Token acquisition failed: {reason}")
            }
            Self::TokenExpired => {
                write!(f, "OAuth2 token has expired and cannot be renewed")
            }
            Self::HttpClient { reason } => {
                write!(f, "OAuth2 HTTP client cannot be created: {reason}")
            }
            Self::ConfigurationError { reason } => {
                write!(f, "OAuth2 configuration error: {reason}")
            }
        }
    }
}

impl From<OAuth2Error> for AuthenticationError {
    fn from(value: OAuth2Error) -> Self {
        Self::RefreshFailed {
            message: value.to_string(),
        }
    }
}
