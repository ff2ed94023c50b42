//! OAuth2 credentials (feature `oauth2`).
//!
//! [`OAuth2Provider`] obtains bearer tokens from a token endpoint with the
//! client credentials grant, or sends a token obtained elsewhere. Tokens are
//! requested for the scopes an operation declares and cached per scope set.
//!
//! ```rust,no_run
//! use iam_client::IamClient;
//! use iam_client::oauth2::OAuth2Config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let oauth2 = OAuth2Config::client_credentials(
//!     "client-id",
//!     "client-secret",
//!     "https://identity.example.com/connect/token",
//! )?
//! .build()?;
//!
//! let client = IamClient::builder()
//!     .with_base_url("https://iam.example.com/api/v1")?
//!     .with_oauth2(oauth2)?
//!     .build()?;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod provider;
mod token;

pub use self::config::{OAuth2Config, OAuth2ConfigBuilder, OAuth2GrantType};
pub use self::error::OAuth2Error;
pub use self::provider::OAuth2Provider;
pub use self::token::OAuth2Token;
