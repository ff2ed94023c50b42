//! OAuth2 configuration and builder.

use std::fmt;
use std::time::Duration;

use url::Url;

use super::error::OAuth2Error;
use super::token::OAuth2Token;
use crate::client::SecureString;

/// Default threshold for token refresh (60 seconds before expiry).
const DEFAULT_REFRESH_THRESHOLD: Duration = Duration::from_secs(60);

/// OAuth2 grant type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuth2GrantType {
    /// Client Credentials grant (machine-to-machine).
    ClientCredentials,
    /// Pre-acquired token (externally obtained).
    PreAcquired,
}

/// OAuth2 authentication configuration.
///
/// Use [`OAuth2ConfigBuilder`] to create instances.
#[derive(Clone)]
pub struct OAuth2Config {
    pub(crate) client_id: String,
    pub(crate) client_secret: Option<SecureString>,
    pub(crate) token_url: Url,
    /// Scopes requested on top of the ones an operation requires.
    pub(crate) scopes: Vec<String>,
    pub(crate) grant_type: OAuth2GrantType,
    pub(crate) refresh_threshold: Duration,
    pub(crate) pre_acquired_token: Option<OAuth2Token>,
}

impl OAuth2Config {
    /// Creates a builder for the client credentials grant.
    ///
    /// # Errors
    ///
    /// Fails when `token_url` is not a valid URL.
    pub fn client_credentials(
        client_id: impl Into<String>,
        client_secret: impl Into<SecureString>,
        token_url: impl AsRef<str>,
    ) -> Result<OAuth2ConfigBuilder, OAuth2Error> {
        Ok(OAuth2ConfigBuilder::new(client_id, token_url)?
            .with_client_secret(client_secret)
            .with_grant_type(OAuth2GrantType::ClientCredentials))
    }

    /// Creates a builder for a token obtained elsewhere.
    ///
    /// The token is sent for every scope set and cannot be renewed.
    ///
    /// # Errors
    ///
    /// Fails when `token_url` is not a valid URL.
    pub fn pre_acquired(
        client_id: impl Into<String>,
        token_url: impl AsRef<str>,
        access_token: impl Into<String>,
    ) -> Result<OAuth2ConfigBuilder, OAuth2Error> {
        let token = OAuth2Token::new(access_token);
        Ok(OAuth2ConfigBuilder::new(client_id, token_url)?
            .with_pre_acquired_token(token)
            .with_grant_type(OAuth2GrantType::PreAcquired))
    }

    /// The grant used to obtain tokens.
    pub fn grant_type(&self) -> OAuth2GrantType {
        self.grant_type
    }

    /// The token endpoint.
    pub fn token_url(&self) -> &Url {
        &self.token_url
    }
}

impl fmt::Debug for OAuth2Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuth2Config")
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("token_url", &self.token_url)
            .field("scopes", &self.scopes)
            .field("grant_type", &self.grant_type)
            .field("refresh_threshold", &self.refresh_threshold)
            .finish_non_exhaustive()
    }
}

/// Builder for OAuth2 configuration.
#[derive(Clone)]
pub struct OAuth2ConfigBuilder {
    client_id: String,
    client_secret: Option<SecureString>,
    token_url: Url,
    scopes: Vec<String>,
    grant_type: OAuth2GrantType,
    refresh_threshold: Duration,
    pre_acquired_token: Option<OAuth2Token>,
}

impl OAuth2ConfigBuilder {
    /// Creates a new builder with required parameters.
    ///
    /// # Errors
    ///
    /// Fails when `token_url` is not a valid URL.
    pub fn new(
        client_id: impl Into<String>,
        token_url: impl AsRef<str>,
    ) -> Result<Self, OAuth2Error> {
        let token_url =
            Url::parse(token_url.as_ref()).map_err(|err| OAuth2Error::InvalidTokenEndpoint {
                url: token_url.as_ref().to_string(),
                reason: err.to_string(),
            })?;

        Ok(Self {
            client_id: client_id.into(),
            client_secret: None,
            token_url,
            scopes: Vec::new(),
            grant_type: OAuth2GrantType::ClientCredentials,
            refresh_threshold: DEFAULT_REFRESH_THRESHOLD,
            pre_acquired_token: None,
        })
    }

    /// Sets the client secret.
    #[must_use]
    pub fn with_client_secret(mut self, secret: impl Into<SecureString>) -> Self {
        self.client_secret = Some(secret.into());
        self
    }

    /// Adds a scope requested with every token.
    #[must_use]
    pub fn add_scope(mut self, scope: impl Into<String>) -> Self {
        self.scopes.push(scope.into());
        self
    }

    /// Adds scopes requested with every token.
    #[must_use]
    pub fn add_scopes(mut self, scopes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.scopes.extend(scopes.into_iter().map(Into::into));
        self
    }

    /// Sets how long before expiry a token is renewed.
    #[must_use]
    pub fn with_refresh_threshold(mut self, threshold: Duration) -> Self {
        self.refresh_threshold = threshold;
        self
    }

    #[must_use]
    fn with_grant_type(mut self, grant_type: OAuth2GrantType) -> Self {
        self.grant_type = grant_type;
        self
    }

    #[must_use]
    fn with_pre_acquired_token(mut self, token: OAuth2Token) -> Self {
        self.pre_acquired_token = Some(token);
        self
    }

    /// Builds the OAuth2 configuration.
    ///
    /// # Errors
    ///
    /// Fails when the client credentials grant is used without a secret.
    pub fn build(self) -> Result<OAuth2Config, OAuth2Error> {
        if self.grant_type == OAuth2GrantType::ClientCredentials && self.client_secret.is_none() {
            return Err(OAuth2Error::ConfigurationError {
                reason: "Client credentials flow requires a client secret".to_string(),
            });
        }

        Ok(OAuth2Config {
            client_id: self.client_id,
            client_secret: self.client_secret,
            token_url: self.token_url,
            scopes: self.scopes,
            grant_type: self.grant_type,
            refresh_threshold: self.refresh_threshold,
            pre_acquired_token: self.pre_acquired_token,
        })
    }
}

impl fmt::Debug for OAuth2ConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuth2ConfigBuilder")
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("token_url", &self.token_url)
            .field("scopes", &self.scopes)
            .field("grant_type", &self.grant_type)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_create_client_credentials_config() {
        let config = OAuth2Config::client_credentials(
            "client-id",
            "client-secret",
            "https://auth.example.com/token",
        )
        .expect("Should create builder")
        .add_scopes(["iam:read", "iam:write"])
        .build()
        .expect("Should build config");

        assert_eq!(config.client_id, "client-id");
        assert!(config.client_secret.is_some());
        assert_eq!(config.token_url().as_str(), "https://auth.example.com/token");
        assert_eq!(config.grant_type(), OAuth2GrantType::ClientCredentials);
        assert_eq!(config.scopes, vec!["iam:read", "iam:write"]);
    }

    #[test]
    fn should_create_pre_acquired_config() {
        let config = OAuth2Config::pre_acquired(
            "client-id",
            "https://auth.example.com/token",
            "pre-acquired-token",
        )
        .expect("Should create builder")
        .build()
        .expect("Should build config");

        assert_eq!(config.grant_type(), OAuth2GrantType::PreAcquired);
        assert!(config.pre_acquired_token.is_some());
    }

    #[test]
    fn should_reject_invalid_token_url() {
        let result = OAuth2ConfigBuilder::new("client-id", "not-a-url");

        match result {
            Err(OAuth2Error::InvalidTokenEndpoint { url, .. }) => assert_eq!(url, "not-a-url"),
            other => panic!("Expected InvalidTokenEndpoint error, got {other:?}"),
        }
    }

    #[test]
    fn should_require_client_secret_for_client_credentials() {
        let result = OAuth2ConfigBuilder::new("client-id", "https://auth.example.com/token")
            .expect("Should create builder")
            .build();

        assert!(matches!(
            result,
            Err(OAuth2Error::ConfigurationError { ref reason }) if reason.contains("client secret")
        ));
    }

    #[test]
    fn should_redact_debug_output() {
        let config = OAuth2Config::client_credentials(
            "client-id",
            "super-secret",
            "https://auth.example.com/token",
        )
        .expect("Should create builder")
        .with_refresh_threshold(Duration::from_secs(120))
        .build()
        .expect("Should build config");

        let debug_str = format!("{config:?}");

        assert!(debug_str.contains("[REDACTED]"));
        assert!(!debug_str.contains("super-secret"));
        assert_eq!(config.refresh_threshold, Duration::from_secs(120));
    }
}
