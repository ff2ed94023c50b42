use std::fmt;
use std::future;

use base64::Engine;
use http::header::{AUTHORIZATION, HeaderName};
use http::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{AuthProvider, AuthenticationError};
use crate::client::transport::BoxFuture;

/// A secret string that is zeroed on drop and never printed in full.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecureString(String);

impl SecureString {
    /// Wraps a secret value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrows the secret; avoid keeping the reference around.
    pub fn expose(&self) -> &str {
        &self.0
    }

    fn masked(&self) -> String {
        let value = &self.0;
        match (value.get(..4), value.get(value.len().saturating_sub(4)..)) {
            (Some(head), Some(tail)) if value.len() > 8 => format!("{head}...{tail}"),
            _ => "***".to_string(),
        }
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecureString([REDACTED])")
    }
}

impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl From<String> for SecureString {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SecureString {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for SecureString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SecureString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self)
    }
}

/// Fixed credentials, as found in configuration files.
///
/// ```rust
/// use iam_client::Authentication;
///
/// let bearer = Authentication::Bearer("my-api-token".into());
/// let basic = Authentication::Basic {
///     username: "svc-account".to_string(),
///     password: "s3cret".into(),
/// };
/// let api_key = Authentication::ApiKey {
///     header_name: "X-API-Key".to_string(),
///     key: "secret-key".into(),
/// };
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Authentication {
    /// `Authorization: Bearer <token>`
    Bearer(SecureString),

    /// `Authorization: Basic <base64(username:password)>`
    Basic {
        /// The account name; must not contain `:`.
        username: String,
        /// The account password.
        password: SecureString,
    },

    /// `<header_name>: <key>`
    ApiKey {
        /// The header carrying the key.
        header_name: String,
        /// The API key.
        key: SecureString,
    },
}

impl Authentication {
    /// Renders the credentials as a single HTTP header.
    ///
    /// # Errors
    ///
    /// Fails when the credentials contain characters not allowed in headers.
    pub fn to_header(&self) -> Result<(HeaderName, HeaderValue), AuthenticationError> {
        match self {
            Self::Bearer(token) => {
                let value = HeaderValue::from_str(&format!("Bearer {}", token.expose()))
                    .map_err(|err| AuthenticationError::InvalidBearerToken {
                        message: err.to_string(),
                    })?;
                Ok((AUTHORIZATION, value))
            }
            Self::Basic { username, password } => {
                if username.contains(':') {
                    return Err(AuthenticationError::InvalidUsername {
                        message: "username cannot contain ':'".to_string(),
                    });
                }
                let credentials = base64::engine::general_purpose::STANDARD
                    .encode(format!("{username}:{}", password.expose()));
                let value = HeaderValue::from_str(&format!("Basic {credentials}")).map_err(
                    |err| AuthenticationError::InvalidPassword {
                        message: err.to_string(),
                    },
                )?;
                Ok((AUTHORIZATION, value))
            }
            Self::ApiKey { header_name, key } => {
                let name = HeaderName::from_bytes(header_name.as_bytes()).map_err(|err| {
                    AuthenticationError::InvalidHeaderName {
                        header_name: header_name.clone(),
                        message: err.to_string(),
                    }
                })?;
                let value = HeaderValue::from_str(key.expose()).map_err(|err| {
                    AuthenticationError::InvalidApiKey {
                        message: err.to_string(),
                    }
                })?;
                Ok((name, value))
            }
        }
    }
}

impl fmt::Debug for Authentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearer(_) => f.debug_tuple("Bearer").field(&"[REDACTED]").finish(),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"[REDACTED]")
                .finish(),
            Self::ApiKey { header_name, .. } => f
                .debug_struct("ApiKey")
                .field("header_name", header_name)
                .field("key", &"[REDACTED]")
                .finish(),
        }
    }
}

impl fmt::Display for Authentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearer(token) => write!(f, "Bearer {token}"),
            Self::Basic { username, .. } => write!(f, "Basic (username: {username})"),
            Self::ApiKey { header_name, key } => write!(f, "ApiKey ({header_name}: {key})"),
        }
    }
}

/// An [`AuthProvider`] always sending the same [`Authentication`].
///
/// Static credentials cannot be refreshed: a rejected call is retried once
/// with the same header and then reported as an API error.
#[derive(Debug, Clone)]
pub struct StaticCredentials(Authentication);

impl StaticCredentials {
    /// Creates the provider.
    pub fn new(authentication: Authentication) -> Self {
        Self(authentication)
    }
}

impl From<Authentication> for StaticCredentials {
    fn from(value: Authentication) -> Self {
        Self(value)
    }
}

impl AuthProvider for StaticCredentials {
    fn apply_credentials<'a>(
        &'a self,
        headers: &'a mut HeaderMap,
        _scopes: &'a [String],
    ) -> BoxFuture<'a, Result<(), AuthenticationError>> {
        let result = self.0.to_header().map(|(name, value)| {
            headers.insert(name, value);
        });
        Box::pin(future::ready(result))
    }

    fn refresh<'a>(
        &'a self,
        _failing_headers: &'a HeaderMap,
        _scopes: &'a [String],
    ) -> BoxFuture<'a, Result<(), AuthenticationError>> {
        debug!(authentication = %self.0, "static credentials cannot be refreshed");
        Box::pin(future::ready(Ok(())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_bearer_header() {
        let auth = Authentication::Bearer("my-secret-token".into());

        let (name, value) = auth.to_header().expect("valid token");

        assert_eq!(name, AUTHORIZATION);
        assert_eq!(value, "Bearer my-secret-token");
    }

    #[test]
    fn should_build_basic_header() {
        let auth = Authentication::Basic {
            username: "user".to_string(),
            password: "pass".into(),
        };

        let (name, value) = auth.to_header().expect("valid credentials");

        assert_eq!(name, AUTHORIZATION);
        assert_eq!(value, "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn should_build_api_key_header() {
        let auth = Authentication::ApiKey {
            header_name: "X-API-Key".to_string(),
            key: "secret-key-123".into(),
        };

        let (name, value) = auth.to_header().expect("valid key");

        assert_eq!(name, "x-api-key");
        assert_eq!(value, "secret-key-123");
    }

    #[test]
    fn should_reject_invalid_credentials() {
        let auth = Authentication::Bearer("\0invalid".into());
        assert!(matches!(
            auth.to_header(),
            Err(AuthenticationError::InvalidBearerToken { .. })
        ));

        let auth = Authentication::Basic {
            username: "user:invalid".to_string(),
            password: "password".into(),
        };
        assert!(matches!(
            auth.to_header(),
            Err(AuthenticationError::InvalidUsername { .. })
        ));

        let auth = Authentication::ApiKey {
            header_name: "Invalid Header".to_string(),
            key: "key".into(),
        };
        assert!(matches!(
            auth.to_header(),
            Err(AuthenticationError::InvalidHeaderName { .. })
        ));
    }

    #[test]
    fn should_mask_secrets() {
        let auth = Authentication::Bearer("very-secret-token-12345".into());
        assert_eq!(auth.to_string(), "Bearer very...2345");
        assert_eq!(format!("{auth:?}"), r#"Bearer("[REDACTED]")"#);

        let auth = Authentication::ApiKey {
            header_name: "X-API-Key".to_string(),
            key: "short".into(),
        };
        assert_eq!(auth.to_string(), "ApiKey (X-API-Key: ***)");

        let secret = SecureString::new("12345678");
        assert_eq!(secret.to_string(), "***");
        assert_eq!(format!("{secret:?}"), "SecureString([REDACTED])");
    }

    #[test]
    fn should_deserialize_from_config() {
        let auth: Authentication =
            serde_json::from_str(r#"{"api_key":{"header_name":"X-API-Key","key":"k-123"}}"#)
                .expect("valid config");

        let (name, value) = auth.to_header().expect("valid key");
        assert_eq!(name, "x-api-key");
        assert_eq!(value, "k-123");
    }

    #[tokio::test]
    async fn static_credentials_should_set_header() {
        let provider = StaticCredentials::new(Authentication::Bearer("abc".into()));
        let mut headers = HeaderMap::new();

        provider
            .apply_credentials(&mut headers, &[])
            .await
            .expect("valid token");

        assert_eq!(headers[AUTHORIZATION], "Bearer abc");
    }
}
