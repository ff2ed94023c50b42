#![allow(dead_code, missing_docs, clippy::expect_used, clippy::missing_panics_doc)]

use iam_client::IamClient;
use rstest::fixture;
use tracing::info;

mod mock_iam;
pub use self::mock_iam::*;

pub fn init_tracing() {
    // should be run once, fail otherwise, we skip that error
    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    info!("Tracing initialized");
}

#[fixture]
pub async fn iam() -> MockIam {
    init_tracing();
    match MockIam::start().await {
        Ok(iam) => iam,
        Err(error) => {
            panic!("fail to start mock IAM service: {error:?}");
        }
    }
}

impl MockIam {
    /// A client targeting the mock, without credentials.
    pub fn client(&self) -> IamClient {
        IamClient::builder()
            .with_base_url(&self.base_url())
            .expect("valid base url")
            .with_application("iam-client-tests", "1.0.0")
            .with_machine_name("ci")
            .with_api_version("1.0")
            .build()
            .expect("valid client")
    }
}
