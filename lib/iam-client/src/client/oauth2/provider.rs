//! [`AuthProvider`] backed by OAuth2 tokens.

use http::header::AUTHORIZATION;
use http::{HeaderMap, HeaderValue};
use oauth2::basic::BasicClient;
use oauth2::{ClientId, ClientSecret, Scope, TokenResponse, TokenUrl};
use tokio::sync::Mutex;
use tracing::debug;

use super::config::{OAuth2Config, OAuth2GrantType};
use super::error::OAuth2Error;
use super::token::{OAuth2Token, TokenCache, scope_key};
use crate::client::transport::BoxFuture;
use crate::client::{AuthProvider, AuthenticationError};

/// Credential provider sending OAuth2 bearer tokens.
///
/// Tokens are cached per scope set and renewed when they get close to expiry.
/// Token requests are serialized: when several calls are rejected at the same
/// time, the first refresh obtains a new token and the others reuse it.
#[derive(Debug)]
pub struct OAuth2Provider {
    config: OAuth2Config,
    cache: TokenCache,
    refresh_gate: Mutex<()>,
    http_client: oauth2::reqwest::Client,
}

impl OAuth2Provider {
    /// Creates a provider.
    ///
    /// The token endpoint client does not follow redirects.
    ///
    /// # Errors
    ///
    /// Fails when the HTTP client cannot be created.
    pub fn new(config: OAuth2Config) -> Result<Self, OAuth2Error> {
        let http_client = oauth2::reqwest::ClientBuilder::new()
            .redirect(oauth2::reqwest::redirect::Policy::none())
            .build()
            .map_err(|err| OAuth2Error::HttpClient {
                reason: err.to_string(),
            })?;

        Ok(Self {
            config,
            cache: TokenCache::default(),
            refresh_gate: Mutex::new(()),
            http_client,
        })
    }

    /// The provider configuration.
    pub fn config(&self) -> &OAuth2Config {
        &self.config
    }

    /// Returns a valid token for `scopes`, acquiring one if needed.
    ///
    /// # Errors
    ///
    /// Fails when no token can be obtained.
    pub async fn token(&self, scopes: &[String]) -> Result<OAuth2Token, OAuth2Error> {
        let scopes = self.requested_scopes(scopes);
        let key = scope_key(&scopes);
        let threshold = self.config.refresh_threshold;

        if let Some(token) = self.cache.get_fresh(&key, threshold).await {
            return Ok(token);
        }

        let _gate = self.refresh_gate.lock().await;
        if let Some(token) = self.cache.get_fresh(&key, threshold).await {
            return Ok(token);
        }
        let token = self.acquire(&scopes).await?;
        self.cache.set(key, token.clone()).await;
        Ok(token)
    }

    /// Replaces the token rejected with `failing_authorization`.
    ///
    /// Nothing is requested when the cached token differs from the rejected
    /// one: a concurrent call already renewed it.
    async fn renew(
        &self,
        failing_authorization: Option<&HeaderValue>,
        scopes: &[String],
    ) -> Result<(), OAuth2Error> {
        if self.config.grant_type == OAuth2GrantType::PreAcquired {
            return Err(OAuth2Error::TokenExpired);
        }

        let scopes = self.requested_scopes(scopes);
        let key = scope_key(&scopes);

        let _gate = self.refresh_gate.lock().await;
        if let Some(cached) = self.cache.get(&key).await
            && failing_authorization.is_some_and(|failing| failing != cached.bearer().as_str())
        {
            debug!(scopes = %key, "token already renewed");
            return Ok(());
        }

        self.cache.remove(&key).await;
        let token = self.acquire(&scopes).await?;
        self.cache.set(key, token).await;
        Ok(())
    }

    /// Operation scopes plus configured scopes, sorted and deduplicated.
    fn requested_scopes(&self, scopes: &[String]) -> Vec<String> {
        let mut requested = self
            .config
            .scopes
            .iter()
            .chain(scopes)
            .cloned()
            .collect::<Vec<_>>();
        requested.sort_unstable();
        requested.dedup();
        requested
    }

    async fn acquire(&self, scopes: &[String]) -> Result<OAuth2Token, OAuth2Error> {
        match self.config.grant_type {
            OAuth2GrantType::ClientCredentials => self.acquire_client_credentials(scopes).await,
            OAuth2GrantType::PreAcquired => self
                .config
                .pre_acquired_token
                .clone()
                .filter(|token| !token.is_expired())
                .ok_or(OAuth2Error::TokenExpired),
        }
    }

    async fn acquire_client_credentials(
        &self,
        scopes: &[String],
    ) -> Result<OAuth2Token, OAuth2Error> {
        let mut client = BasicClient::new(ClientId::new(self.config.client_id.clone()))
            .set_token_uri(TokenUrl::from_url(self.config.token_url.clone()));
        if let Some(secret) = &self.config.client_secret {
            client = client.set_client_secret(ClientSecret::new(secret.expose().to_string()));
        }

        debug!(token_url = %self.config.token_url, ?scopes, "requesting token");
        let response = client
            .exchange_client_credentials()
            .add_scopes(scopes.iter().cloned().map(Scope::new))
            .request_async(&self.http_client)
            .await
            .map_err(|err| OAuth2Error::TokenAcquisitionFailed {
                reason: err.to_string(),
            })?;

        let access_token = response.access_token().secret().clone();
        let token = match response.expires_in() {
            Some(expires_in) => OAuth2Token::with_expiry(access_token, expires_in),
            None => OAuth2Token::new(access_token),
        };
        Ok(token)
    }
}

impl AuthProvider for OAuth2Provider {
    fn apply_credentials<'a>(
        &'a self,
        headers: &'a mut HeaderMap,
        scopes: &'a [String],
    ) -> BoxFuture<'a, Result<(), AuthenticationError>> {
        Box::pin(async move {
            let token = self.token(scopes).await?;
            let value = HeaderValue::from_str(&token.bearer()).map_err(|err| {
                AuthenticationError::InvalidBearerToken {
                    message: err.to_string(),
                }
            })?;
            headers.insert(AUTHORIZATION, value);
            Ok(())
        })
    }

    fn refresh<'a>(
        &'a self,
        failing_headers: &'a HeaderMap,
        scopes: &'a [String],
    ) -> BoxFuture<'a, Result<(), AuthenticationError>> {
        Box::pin(async move {
            self.renew(failing_headers.get(AUTHORIZATION), scopes)
                .await
                .map_err(AuthenticationError::from)
        })
    }
}
