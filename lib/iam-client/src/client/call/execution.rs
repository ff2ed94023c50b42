use std::future::IntoFuture;

use http::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{Instrument, debug, info_span, warn};
use uuid::Uuid;

use super::OperationCall;
use crate::client::decode::{ApiResponse, api_error, decode};
use crate::client::request::PreparedRequest;
use crate::client::transport::{BoxFuture, TransportError};
use crate::client::{ApiError, IamClientError};

/// Position of a request within one logical call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    Initial,
    Retry,
}

fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

impl<T> OperationCall<'_, T>
where
    T: DeserializeOwned,
{
    /// Builds the request once, then sends it with at most one
    /// refresh-and-retry cycle.
    async fn exchange(self) -> Result<ApiResponse<T>, IamClientError> {
        let Self {
            client,
            descriptor,
            mut context,
            error,
        } = self;

        if let Some(error) = error {
            return Err(error);
        }
        if context.correlation_id.is_none() && client.config.generate_correlation_ids {
            context.correlation_id = Some(Uuid::new_v4().to_string());
        }
        let request = PreparedRequest::build(&client.config, descriptor, &context)?;
        let uri = request.url.to_string();
        let scopes = descriptor.scopes();

        let mut attempt = Attempt::Initial;
        loop {
            let mut headers = request.headers.clone();
            if !scopes.is_empty() {
                client.auth.apply_credentials(&mut headers, scopes).await?;
            }

            debug!(?attempt, "sending...");
            let result = client
                .transport
                .send(request.to_transport(headers.clone()))
                .await;

            let response = match result {
                Ok(response) if response.status.is_success() => {
                    return decode(descriptor, &uri, response);
                }
                Ok(response) => {
                    return Err(api_error(descriptor, &uri, response).into());
                }
                Err(TransportError::Connection { status, message }) => {
                    return Err(IamClientError::Connection {
                        status_code: status.unwrap_or_default(),
                        method: request.method.clone(),
                        uri,
                        message,
                    });
                }
                Err(TransportError::Status { response }) => response,
            };

            if attempt == Attempt::Initial && is_auth_failure(response.status) && !scopes.is_empty() {
                warn!(status = %response.status, ?scopes, "credentials rejected, refreshing before retry");
                client.auth.refresh(&headers, scopes).await?;
                attempt = Attempt::Retry;
                continue;
            }

            let error: ApiError = api_error(descriptor, &uri, response);
            return Err(error.into());
        }
    }
}

impl<'a, T> IntoFuture for OperationCall<'a, T>
where
    T: DeserializeOwned + Send + 'a,
{
    type Output = Result<ApiResponse<T>, IamClientError>;
    type IntoFuture = BoxFuture<'a, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        let span = info_span!(
            "iam_call",
            operation = %self.descriptor.operation_id(),
            name = self.descriptor.name()
        );
        Box::pin(self.exchange().instrument(span))
    }
}
