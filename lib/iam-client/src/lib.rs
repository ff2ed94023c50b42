//! # IAM client
//!
//! Client SDK for the identity and access management service of the tax
//! platform: groups, permissions, systems, grants, roles and resources.
//!
//! Every operation goes through the same pipeline:
//!
//! 1. the request is built from an [`OperationDescriptor`] and the call
//!    parameters (a missing path parameter fails before anything is sent);
//! 2. the [`AuthProvider`] adds credentials when the operation requires scopes;
//! 3. the [`Transport`](transport::Transport) sends the request;
//! 4. a `401`/`403` answer triggers one credential refresh and one retry;
//! 5. the response is decoded according to the status declared by the operation.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use iam_client::api::ListOptions;
//! use iam_client::{Authentication, IamClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = IamClient::builder()
//!     .with_base_url("https://iam.example.com/api/v1")?
//!     .with_application("billing", "2.3.0")
//!     .with_authentication(Authentication::Bearer("my-token".into()))
//!     .build()?;
//!
//! let page = client
//!     .groups()
//!     .list_groups(&ListOptions::new().with_filter("name eq 'Finance'"))
//!     .await?
//!     .into_body()
//!     .unwrap_or_default();
//!
//! for group in page {
//!     println!("{}: {}", group.id, group.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Calls fail with an [`IamClientError`]; [`IamClientError::kind`] tells an
//! invalid argument from a connection failure, an API error, a decoding error
//! or an authentication failure. API errors keep the status, headers and raw
//! body of the response, plus the decoded error payload when the status
//! declares one.
//!
//! ## Blocking calls
//!
//! [`BlockingIamClient`] runs the same calls to completion on its own runtime.
//!
//! ## Features
//!
//! - `oauth2`: [`oauth2::OAuth2Provider`], tokens obtained with the client
//!   credentials grant

mod client;

pub mod api;
pub mod model;

pub use self::client::{
    API_VERSION_HEADER, ApiError, ApiResponse, AuthProvider, Authentication, AuthenticationError,
    BlockingIamClient, CLIENT_HEADER, CORRELATION_ID_HEADER, CallBody, CallHeaders, CallPath,
    CallQuery, ErrorKind, IamClient, IamClientBuilder, IamClientError, NoAuth, OperationCall,
    OperationDescriptor, ResponseKind, SecureString, StaticCredentials, transport,
};
pub use self::client::transport::BoxFuture;

#[cfg(feature = "oauth2")]
pub use self::client::oauth2;
