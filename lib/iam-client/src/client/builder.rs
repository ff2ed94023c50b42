use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::uri::{PathAndQuery, Scheme};
use url::Url;

use super::identity::ClientIdentity;
use super::transport::{ReqwestTransport, Transport};
use super::{
    AuthProvider, Authentication, ClientConfig, IamClient, IamClientError, NoAuth,
    StaticCredentials,
};

/// Builder for [`IamClient`].
///
/// # Default configuration
///
/// - **Endpoint**: `http://127.0.0.1:80`, no base path
/// - **Transport**: [`ReqwestTransport`] with a default `reqwest` client
/// - **Credentials**: [`NoAuth`]
/// - **Identity**: this crate name and version, machine name reported by the OS
/// - **API version**: none
/// - **Correlation ids**: only when supplied per call
///
/// # Example
///
/// ```rust
/// use iam_client::{Authentication, IamClient};
/// use http::uri::Scheme;
///
/// # fn example() -> Result<(), iam_client::IamClientError> {
/// let client = IamClient::builder()
///     .with_scheme(Scheme::HTTPS)
///     .with_host("iam.example.com")
///     .with_port(443)
///     .with_base_path("/api/v1")?
///     .with_application("billing", "2.3.0")
///     .with_api_version("1.0")
///     .with_authentication(Authentication::Bearer("my-token".into()))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct IamClientBuilder {
    scheme: Scheme,
    host: String,
    port: u16,
    base_path: Option<PathAndQuery>,
    base_url: Option<Url>,
    identity: ClientIdentity,
    api_version: Option<String>,
    default_headers: HeaderMap,
    generate_correlation_ids: bool,
    transport: Option<Arc<dyn Transport>>,
    auth: Option<Arc<dyn AuthProvider>>,
}

impl IamClientBuilder {
    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Fails when the endpoint does not form a valid URL, or when the
    /// application identity cannot be sent as a header value.
    pub fn build(self) -> Result<IamClient, IamClientError> {
        let Self {
            scheme,
            host,
            port,
            base_path,
            base_url,
            identity,
            api_version,
            default_headers,
            generate_correlation_ids,
            transport,
            auth,
        } = self;

        let base_url = match base_url {
            Some(url) => url,
            None => {
                let path = base_path.as_ref().map_or("/", PathAndQuery::path);
                format!("{scheme}://{host}:{port}{path}").parse::<Url>()?
            }
        };
        // fail at build time rather than on every call
        identity.header_value()?;

        let config = ClientConfig {
            base_url,
            identity,
            api_version,
            default_headers,
            generate_correlation_ids,
        };
        let transport = transport.unwrap_or_else(|| Arc::new(ReqwestTransport::default()));
        let auth = auth.unwrap_or_else(|| Arc::new(NoAuth));

        Ok(IamClient {
            config: Arc::new(config),
            transport,
            auth,
        })
    }

    /// Sets the scheme, `http` by default.
    #[must_use]
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Sets the host name or IP address.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the path prepended to every operation path.
    ///
    /// # Errors
    ///
    /// Fails when `base_path` is not a valid URI path.
    pub fn with_base_path<P>(mut self, base_path: P) -> Result<Self, IamClientError>
    where
        P: TryInto<PathAndQuery>,
        P::Error: std::fmt::Display,
    {
        let base_path = base_path
            .try_into()
            .map_err(|err| IamClientError::InvalidArgument {
                message: format!("invalid base path: {err}"),
            })?;
        self.base_path = Some(base_path);
        Ok(self)
    }

    /// Sets the complete endpoint URL, replacing scheme, host, port and base path.
    ///
    /// # Errors
    ///
    /// Fails when `base_url` is not an absolute URL.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, IamClientError> {
        self.base_url = Some(Url::parse(base_url)?);
        Ok(self)
    }

    /// Sets the application name and version sent in the client identification header.
    #[must_use]
    pub fn with_application(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.identity.app_name = name.into();
        self.identity.app_version = version.into();
        self
    }

    /// Overrides the machine name sent in the client identification header.
    #[must_use]
    pub fn with_machine_name(mut self, machine_name: impl Into<String>) -> Self {
        self.identity.machine_name = machine_name.into();
        self
    }

    /// Requests a specific API version on every call.
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Adds a header sent on every call unless the call overrides it.
    #[must_use]
    pub fn with_default_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.default_headers.insert(name, value);
        self
    }

    /// Generates a random correlation id for calls that do not supply one.
    ///
    /// The id is generated once per logical call, so a retried request keeps it.
    #[must_use]
    pub fn with_generated_correlation_ids(mut self) -> Self {
        self.generate_correlation_ids = true;
        self
    }

    /// Sets the transport.
    #[must_use]
    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Sets the credential provider.
    #[must_use]
    pub fn with_auth_provider(mut self, auth: impl AuthProvider + 'static) -> Self {
        self.auth = Some(Arc::new(auth));
        self
    }

    /// Uses fixed credentials.
    #[must_use]
    pub fn with_authentication(self, authentication: Authentication) -> Self {
        self.with_auth_provider(StaticCredentials::new(authentication))
    }

    /// Uses OAuth2 tokens obtained with `config`.
    ///
    /// # Errors
    ///
    /// Fails when the HTTP client of the token endpoint cannot be created.
    #[cfg(feature = "oauth2")]
    pub fn with_oauth2(
        self,
        config: crate::oauth2::OAuth2Config,
    ) -> Result<Self, crate::oauth2::OAuth2Error> {
        let provider = crate::oauth2::OAuth2Provider::new(config)?;
        Ok(self.with_auth_provider(provider))
    }
}

impl Default for IamClientBuilder {
    fn default() -> Self {
        Self {
            scheme: Scheme::HTTP,
            host: IpAddr::V4(Ipv4Addr::LOCALHOST).to_string(),
            port: 80,
            base_path: None,
            base_url: None,
            identity: ClientIdentity::default(),
            api_version: None,
            default_headers: HeaderMap::new(),
            generate_correlation_ids: false,
            transport: None,
            auth: None,
        }
    }
}
