//! OAuth2 tokens and their per-scope cache.

use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// An OAuth2 access token with expiration tracking.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct OAuth2Token {
    access_token: String,
    #[zeroize(skip)]
    expires_at: Option<Instant>,
}

impl OAuth2Token {
    /// Creates a token without known expiry.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: None,
        }
    }

    /// Creates a token expiring after `expires_in`.
    pub fn with_expiry(access_token: impl Into<String>, expires_in: Duration) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: Some(Instant::now() + expires_in),
        }
    }

    /// Returns the access token value.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Checks if the token is expired.
    ///
    /// Returns `false` if the token has no expiration time.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() >= exp)
    }

    /// Returns `true` if the token expires within `threshold`.
    pub fn should_refresh(&self, threshold: Duration) -> bool {
        self.expires_at
            .is_some_and(|exp| Instant::now() + threshold >= exp)
    }

    /// The `Authorization` header value carrying this token.
    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

impl fmt::Debug for OAuth2Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuth2Token")
            .field("access_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Cache key of a scope set: sorted, deduplicated, space separated.
pub(crate) fn scope_key(scopes: &[String]) -> String {
    let mut scopes = scopes.iter().map(String::as_str).collect::<Vec<_>>();
    scopes.sort_unstable();
    scopes.dedup();
    scopes.join(" ")
}

/// Tokens indexed by scope set.
#[derive(Debug, Default)]
pub(crate) struct TokenCache {
    tokens: RwLock<BTreeMap<String, OAuth2Token>>,
}

impl TokenCache {
    /// Returns the cached token of `key` if it is not expired.
    pub(crate) async fn get(&self, key: &str) -> Option<OAuth2Token> {
        let guard = self.tokens.read().await;
        guard.get(key).filter(|token| !token.is_expired()).cloned()
    }

    /// Returns the cached token of `key` unless it expires within `threshold`.
    pub(crate) async fn get_fresh(&self, key: &str, threshold: Duration) -> Option<OAuth2Token> {
        let guard = self.tokens.read().await;
        guard
            .get(key)
            .filter(|token| !token.should_refresh(threshold))
            .cloned()
    }

    pub(crate) async fn set(&self, key: String, token: OAuth2Token) {
        self.tokens.write().await.insert(key, token);
    }

    pub(crate) async fn remove(&self, key: &str) {
        self.tokens.write().await.remove(key);
    }
}
