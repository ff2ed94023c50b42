use std::time::Duration;

use reqwest::{Body, Request};
use tracing::debug;

use super::{BoxFuture, Transport, TransportError, TransportRequest, TransportResponse};

/// [`Transport`] backed by a [`reqwest::Client`].
///
/// Responses with a 4xx or 5xx status are reported as [`TransportError::Status`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Wraps an already configured client.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Creates a transport whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Fails when the underlying client cannot be initialized (TLS backend).
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

fn connection_failure(error: &reqwest::Error) -> TransportError {
    TransportError::Connection {
        status: error.status().map(|status| status.as_u16()),
        message: error.to_string(),
    }
}

impl Transport for ReqwestTransport {
    fn send(
        &self,
        request: TransportRequest,
    ) -> BoxFuture<'_, Result<TransportResponse, TransportError>> {
        Box::pin(async move {
            let TransportRequest {
                method,
                url,
                headers,
                body,
            } = request;

            let mut request = Request::new(method, url);
            *request.headers_mut() = headers;
            if let Some(body) = body {
                *request.body_mut() = Some(Body::from(body));
            }

            debug!(?request, "sending...");
            let response = self
                .client
                .execute(request)
                .await
                .map_err(|err| connection_failure(&err))?;
            debug!(?response, "...receiving");

            let status = response.status();
            let headers = response.headers().clone();
            let body = response
                .bytes()
                .await
                .map_err(|err| connection_failure(&err))?;

            let response = TransportResponse {
                status,
                headers,
                body,
            };
            if status.is_client_error() || status.is_server_error() {
                return Err(TransportError::Status { response });
            }
            Ok(response)
        })
    }
}
