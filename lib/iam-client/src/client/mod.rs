use std::sync::Arc;

use http::HeaderMap;
use url::Url;

mod builder;
pub use self::builder::IamClientBuilder;

mod call;
pub use self::call::OperationCall;

mod descriptor;
pub use self::descriptor::{OperationDescriptor, ResponseKind};

mod decode;
pub use self::decode::ApiResponse;

mod identity;
pub use self::identity::{API_VERSION_HEADER, CLIENT_HEADER, CORRELATION_ID_HEADER};

mod parameters;
pub use self::parameters::{CallBody, CallHeaders, CallPath, CallQuery};

mod request;

mod auth;
pub use self::auth::{
    AuthProvider, Authentication, AuthenticationError, NoAuth, SecureString, StaticCredentials,
};

#[cfg(feature = "oauth2")]
pub mod oauth2;

pub mod transport;

mod blocking;
pub use self::blocking::BlockingIamClient;

mod error;
pub use self::error::{ApiError, ErrorKind, IamClientError};

/// Configuration shared by every call of a client.
#[derive(Debug, Clone)]
pub(in crate::client) struct ClientConfig {
    pub(in crate::client) base_url: Url,
    pub(in crate::client) identity: identity::ClientIdentity,
    pub(in crate::client) api_version: Option<String>,
    pub(in crate::client) default_headers: HeaderMap,
    pub(in crate::client) generate_correlation_ids: bool,
}

/// Client of the IAM API.
///
/// The client is immutable once built and cheap to clone: clones share the
/// configuration, the [`Transport`](transport::Transport) and the
/// [`AuthProvider`]. Use [`IamClientBuilder`] to create instances.
///
/// Operations are invoked either through the typed handles of the
/// [`api`](crate::api) module or directly with an [`OperationDescriptor`]:
///
/// ```rust,no_run
/// use iam_client::{Authentication, IamClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = IamClient::builder()
///     .with_base_url("https://iam.example.com/api/v1")?
///     .with_authentication(Authentication::Bearer("my-token".into()))
///     .build()?;
///
/// let group = client.groups().get_group("G1").await?.into_body();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct IamClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn transport::Transport>,
    auth: Arc<dyn AuthProvider>,
}

impl IamClient {
    /// Creates a builder with the default configuration.
    pub fn builder() -> IamClientBuilder {
        IamClientBuilder::default()
    }

    /// The URL every operation path is appended to.
    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    /// Starts a call of the operation described by `descriptor`.
    pub fn call<'a, T>(&'a self, descriptor: &'a OperationDescriptor<T>) -> OperationCall<'a, T> {
        OperationCall::new(self, descriptor)
    }
}
