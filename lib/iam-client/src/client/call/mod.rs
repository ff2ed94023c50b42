use serde::Serialize;

use super::descriptor::OperationDescriptor;
use super::request::RequestContext;
use super::{CallBody, CallHeaders, CallPath, CallQuery, IamClient, IamClientError};

mod execution;

/// One invocation of an operation, configured then awaited.
///
/// Created by [`IamClient::call`] or by the typed handles of the
/// [`api`](crate::api) module.
///
/// # Parameter methods
/// - [`path_param(name, value)`](Self::path_param): fills a `{name}` placeholder
/// - [`query_param(name, value)`](Self::query_param) / [`with_query(query)`](Self::with_query)
/// - [`header(name, value)`](Self::header) / [`with_headers(headers)`](Self::with_headers):
///   override default headers
/// - [`with_correlation_id(id)`](Self::with_correlation_id)
///
/// # Payload methods
/// - [`json(payload)`](Self::json): structured payload, encoded for the negotiated content type
/// - [`body(body)`](Self::body): any [`CallBody`]
///
/// # Execution
/// `.await` the call: it resolves to an [`ApiResponse`](crate::ApiResponse) or an
/// [`IamClientError`]. A call answered with 401 or 403 is retried once after the
/// credentials are refreshed, when the operation declares required scopes.
///
/// ```rust,no_run
/// # use iam_client::IamClient;
/// # async fn example(client: IamClient) -> Result<(), iam_client::IamClientError> {
/// let group = client
///     .groups()
///     .get_group("G1")
///     .with_correlation_id("3f0c6a52")
///     .await?
///     .into_body();
/// # Ok(())
/// # }
/// ```
#[derive(derive_more::Debug)]
pub struct OperationCall<'a, T> {
    #[debug(skip)]
    pub(super) client: &'a IamClient,
    pub(super) descriptor: &'a OperationDescriptor<T>,
    pub(super) context: RequestContext,
    pub(super) error: Option<IamClientError>,
}

impl<'a, T> OperationCall<'a, T> {
    pub(in crate::client) fn new(client: &'a IamClient, descriptor: &'a OperationDescriptor<T>) -> Self {
        let context = RequestContext {
            path: CallPath::from(descriptor.path()),
            ..RequestContext::default()
        };
        Self {
            client,
            descriptor,
            context,
            error: None,
        }
    }

    /// Sets the value of the `{name}` path placeholder.
    #[must_use]
    pub fn path_param<V>(mut self, name: impl Into<String>, value: V) -> Self
    where
        V: Serialize,
    {
        self.context.path = self.context.path.add_param(name, value);
        self
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn query_param<V>(mut self, name: impl Into<String>, value: V) -> Self
    where
        V: Serialize,
    {
        self.context.query = self.context.query.add_param(name, value);
        self
    }

    /// Adds every parameter of `query`.
    #[must_use]
    pub fn with_query(mut self, query: CallQuery) -> Self {
        self.context.query = self.context.query.merge(query);
        self
    }

    /// Adds a header, overriding the client default headers.
    #[must_use]
    pub fn header<V>(mut self, name: impl Into<String>, value: V) -> Self
    where
        V: Serialize,
    {
        self.context.headers = self.context.headers.add_header(name, value);
        self
    }

    /// Adds every header of `headers`.
    #[must_use]
    pub fn with_headers(mut self, headers: CallHeaders) -> Self {
        self.context.headers = self.context.headers.merge(headers);
        self
    }

    /// Sends `id` as the correlation id of this call.
    #[must_use]
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.context.correlation_id = Some(id.into());
        self
    }

    /// Sets a structured payload.
    ///
    /// A payload that cannot be serialized is reported when the call is awaited.
    #[must_use]
    pub fn json<B>(mut self, payload: &B) -> Self
    where
        B: Serialize + ?Sized,
    {
        match CallBody::json(payload) {
            Ok(body) => self.context.body = Some(body),
            Err(err) => self.error = Some(err),
        }
        self
    }

    /// Sets the payload.
    #[must_use]
    pub fn body(mut self, body: CallBody) -> Self {
        self.context.body = Some(body);
        self
    }

    /// The descriptor of the called operation.
    pub fn descriptor(&self) -> &OperationDescriptor<T> {
        self.descriptor
    }
}
