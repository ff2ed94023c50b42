//! Credential handling for IAM API calls.
//!
//! The operation invoker never touches credentials directly: it asks an
//! [`AuthProvider`] to decorate the outgoing headers of operations that declare
//! required scopes, and to refresh its credentials when such an operation is
//! answered with `401 Unauthorized` or `403 Forbidden`.
//!
//! Available providers:
//! - [`NoAuth`]: sends requests unauthenticated
//! - [`StaticCredentials`]: a fixed [`Authentication`] (bearer, basic or API key)
//! - [`OAuth2Provider`](crate::oauth2::OAuth2Provider) (feature `oauth2`): client
//!   credentials grant with per-scope token caching

use std::fmt::Debug;
use std::future;

use http::HeaderMap;

use super::transport::BoxFuture;

mod credentials;
pub use self::credentials::{Authentication, SecureString, StaticCredentials};

/// Errors that can occur while applying or refreshing credentials.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error, derive_more::Display)]
pub enum AuthenticationError {
    /// Bearer token contains invalid characters for HTTP headers.
    #[display("Bearer token contains invalid characters: {message}")]
    InvalidBearerToken {
        /// Description of the invalid characters or format issue.
        message: String,
    },

    /// Basic authentication username contains invalid characters.
    #[display("Basic auth username contains invalid characters: {message}")]
    InvalidUsername {
        /// Description of the invalid characters or format issue.
        message: String,
    },

    /// Basic authentication password contains invalid characters.
    #[display("Basic auth password contains invalid characters: {message}")]
    InvalidPassword {
        /// Description of the invalid characters or format issue.
        message: String,
    },

    /// API key header name is invalid.
    #[display("Invalid API key header name '{header_name}': {message}")]
    InvalidHeaderName {
        /// The invalid header name that was provided.
        header_name: String,
        /// Description of why the header name is invalid.
        message: String,
    },

    /// API key value contains invalid characters for HTTP headers.
    #[display("API key contains invalid characters: {message}")]
    InvalidApiKey {
        /// Description of the invalid characters or format issue.
        message: String,
    },

    /// No credentials are available for the requested scopes.
    #[display("No credentials available for scopes {scopes:?}")]
    CredentialsUnavailable {
        /// The scopes that were requested.
        scopes: Vec<String>,
    },

    /// The provider failed to obtain fresh credentials.
    #[display("Credential refresh failed: {message}")]
    RefreshFailed {
        /// Description of the failure.
        message: String,
    },
}

/// Source of credentials for outgoing requests.
///
/// Implementations own their credential state and may be shared by many
/// concurrent calls, hence the `Send + Sync` bound. Both methods return boxed
/// futures so that providers can be stored as trait objects.
///
/// # Example
///
/// ```rust
/// use http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
/// use iam_client::{AuthProvider, AuthenticationError, BoxFuture};
///
/// #[derive(Debug)]
/// struct EnvToken;
///
/// impl AuthProvider for EnvToken {
///     fn apply_credentials<'a>(
///         &'a self,
///         headers: &'a mut HeaderMap,
///         _scopes: &'a [String],
///     ) -> BoxFuture<'a, Result<(), AuthenticationError>> {
///         Box::pin(async move {
///             let token = std::env::var("IAM_TOKEN").unwrap_or_default();
///             let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|err| {
///                 AuthenticationError::InvalidBearerToken { message: err.to_string() }
///             })?;
///             headers.insert(AUTHORIZATION, value);
///             Ok(())
///         })
///     }
///
///     fn refresh<'a>(
///         &'a self,
///         _failing_headers: &'a HeaderMap,
///         _scopes: &'a [String],
///     ) -> BoxFuture<'a, Result<(), AuthenticationError>> {
///         Box::pin(async { Ok(()) })
///     }
/// }
/// ```
pub trait AuthProvider: Debug + Send + Sync {
    /// Adds the current credentials for `scopes` to the outgoing `headers`.
    fn apply_credentials<'a>(
        &'a self,
        headers: &'a mut HeaderMap,
        scopes: &'a [String],
    ) -> BoxFuture<'a, Result<(), AuthenticationError>>;

    /// Refreshes the credentials after a request carrying `failing_headers` was
    /// rejected with 401 or 403.
    fn refresh<'a>(
        &'a self,
        failing_headers: &'a HeaderMap,
        scopes: &'a [String],
    ) -> BoxFuture<'a, Result<(), AuthenticationError>>;
}

/// Sends requests without credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuth;

impl AuthProvider for NoAuth {
    fn apply_credentials<'a>(
        &'a self,
        _headers: &'a mut HeaderMap,
        _scopes: &'a [String],
    ) -> BoxFuture<'a, Result<(), AuthenticationError>> {
        Box::pin(future::ready(Ok(())))
    }

    fn refresh<'a>(
        &'a self,
        _failing_headers: &'a HeaderMap,
        _scopes: &'a [String],
    ) -> BoxFuture<'a, Result<(), AuthenticationError>> {
        Box::pin(future::ready(Ok(())))
    }
}
