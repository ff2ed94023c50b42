use std::future::IntoFuture;

use serde::de::DeserializeOwned;
use tokio::runtime::{Builder, Runtime};

use super::{ApiResponse, IamClient, IamClientError, OperationCall};

/// Blocking facade of [`IamClient`].
///
/// Calls are built exactly like async ones (the facade dereferences to the
/// wrapped client) and handed to [`execute`](Self::execute), which drives them
/// to completion on an owned current-thread runtime. Retry and error mapping
/// are the ones of the async client.
///
/// Must not be used from within an async runtime.
///
/// ```rust,no_run
/// use iam_client::{BlockingIamClient, IamClient};
///
/// # fn example() -> Result<(), iam_client::IamClientError> {
/// let client = BlockingIamClient::new(
///     IamClient::builder()
///         .with_base_url("https://iam.example.com/api/v1")?
///         .build()?,
/// )?;
///
/// let group = client.execute(client.groups().get_group("G1"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, derive_more::Deref)]
pub struct BlockingIamClient {
    #[deref]
    client: IamClient,
    runtime: Runtime,
}

impl BlockingIamClient {
    /// Wraps `client`.
    ///
    /// # Errors
    ///
    /// Fails when the runtime cannot be started.
    pub fn new(client: IamClient) -> Result<Self, IamClientError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(IamClientError::Runtime)?;
        Ok(Self { client, runtime })
    }

    /// Sends `call` and blocks until its outcome is known.
    ///
    /// # Errors
    ///
    /// Returns the error the call would resolve to when awaited.
    pub fn execute<T>(&self, call: OperationCall<'_, T>) -> Result<ApiResponse<T>, IamClientError>
    where
        T: DeserializeOwned + Send,
    {
        self.runtime.block_on(call.into_future())
    }

    /// Returns the wrapped async client.
    pub fn into_inner(self) -> IamClient {
        self.client
    }
}
