//! The HTTP boundary of the client.
//!
//! [`Transport`] sends one fully built request and reports either a response or
//! one of two failures: no response at all ([`TransportError::Connection`]), or a
//! response whose status the transport treats as an error
//! ([`TransportError::Status`]). Only the latter can trigger a credential
//! refresh.

use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use url::Url;

mod http_client;
pub use self::http_client::ReqwestTransport;

/// A boxed `Send` future, used at the trait-object seams of the client.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A request ready to be sent.
#[derive(derive_more::Debug, Clone)]
pub struct TransportRequest {
    /// The HTTP method.
    pub method: Method,
    /// The absolute URL, query string included.
    pub url: Url,
    /// All request headers, credentials included.
    #[debug(skip)]
    pub headers: HeaderMap,
    /// The encoded body.
    #[debug(ignore)]
    pub body: Option<Bytes>,
}

/// A response received from the server.
#[derive(derive_more::Debug, Clone)]
pub struct TransportResponse {
    /// The response status.
    pub status: StatusCode,
    /// The response headers.
    pub headers: HeaderMap,
    /// The raw response body.
    #[debug(ignore)]
    pub body: Bytes,
}

impl TransportResponse {
    /// Creates a response, mostly useful for custom transports and tests.
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Adds a header to the response.
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Returns the body as text, replacing invalid UTF-8 sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Failure reported by a [`Transport`].
#[derive(Debug, Clone, derive_more::Error, derive_more::Display)]
pub enum TransportError {
    /// No response was received.
    #[display("connection failure: {message}")]
    Connection {
        /// A status code reported by the transport, if any.
        status: Option<u16>,
        /// Description of the failure.
        message: String,
    },

    /// A response was received with an error status.
    #[display("HTTP error status {}", response.status)]
    Status {
        /// The received response.
        response: TransportResponse,
    },
}

/// Sends HTTP requests.
///
/// The default implementation is [`ReqwestTransport`]. Timeouts, TLS, proxies and
/// connection pooling are the transport's business.
pub trait Transport: Debug + Send + Sync {
    /// Sends `request` and waits for the complete response.
    fn send(
        &self,
        request: TransportRequest,
    ) -> BoxFuture<'_, Result<TransportResponse, TransportError>>;
}
