#![allow(missing_docs, clippy::expect_used)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use http::header::AUTHORIZATION;
use http::{HeaderMap, HeaderValue, StatusCode};
use iam_client::model::Group;
use iam_client::{
    AuthProvider, Authentication, AuthenticationError, BoxFuture, ErrorKind, IamClient,
};
use rstest::rstest;

mod common;
pub use self::common::*;

/// Hands out the current token of a rotating list, moving to the next one on refresh.
#[derive(Debug, Clone)]
struct RotatingTokens {
    tokens: Arc<Mutex<Vec<&'static str>>>,
    refreshes: Arc<AtomicUsize>,
}

impl RotatingTokens {
    fn new(tokens: &[&'static str]) -> Self {
        Self {
            tokens: Arc::new(Mutex::new(tokens.iter().rev().copied().collect())),
            refreshes: Arc::default(),
        }
    }

    fn refreshes(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }
}

impl AuthProvider for RotatingTokens {
    fn apply_credentials<'a>(
        &'a self,
        headers: &'a mut HeaderMap,
        scopes: &'a [String],
    ) -> BoxFuture<'a, Result<(), AuthenticationError>> {
        Box::pin(async move {
            let token = self
                .tokens
                .lock()
                .expect("not poisoned")
                .last()
                .copied()
                .ok_or_else(|| AuthenticationError::CredentialsUnavailable {
                    scopes: scopes.to_vec(),
                })?;
            let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|err| {
                AuthenticationError::InvalidBearerToken {
                    message: err.to_string(),
                }
            })?;
            headers.insert(AUTHORIZATION, value);
            Ok(())
        })
    }

    fn refresh<'a>(
        &'a self,
        _failing_headers: &'a HeaderMap,
        _scopes: &'a [String],
    ) -> BoxFuture<'a, Result<(), AuthenticationError>> {
        Box::pin(async move {
            self.refreshes.fetch_add(1, Ordering::SeqCst);
            self.tokens.lock().expect("not poisoned").pop();
            Ok(())
        })
    }
}

fn client(iam: &MockIam, auth: impl AuthProvider + 'static) -> IamClient {
    IamClient::builder()
        .with_base_url(&iam.base_url())
        .expect("valid base url")
        .with_auth_provider(auth)
        .build()
        .expect("valid client")
}

fn bearers(iam: &MockIam) -> Vec<String> {
    iam.requests()
        .iter()
        .filter_map(|request| request.headers.get(AUTHORIZATION))
        .filter_map(|value| value.to_str().ok().map(ToString::to_string))
        .collect()
}

#[rstest]
#[tokio::test]
async fn should_retry_with_refreshed_token(#[future] iam: MockIam) -> anyhow::Result<()> {
    let iam = iam.await;
    iam.insert_group(Group {
        id: "G1".to_string(),
        ..Group::new("Finance")
    });
    iam.accept_token("fresh");
    let auth = RotatingTokens::new(&["expired", "fresh"]);
    let client = client(&iam, auth.clone());

    let group = client
        .groups()
        .get_group("G1")
        .await?
        .into_body()
        .expect("group");

    assert_eq!(group.name, "Finance");
    assert_eq!(auth.refreshes(), 1);
    assert_eq!(bearers(&iam), ["Bearer expired", "Bearer fresh"]);

    Ok(())
}

#[rstest]
#[tokio::test]
async fn should_give_up_after_one_retry(#[future] iam: MockIam) -> anyhow::Result<()> {
    let iam = iam.await;
    iam.accept_token("fresh");
    let auth = RotatingTokens::new(&["expired", "revoked", "fresh"]);
    let client = client(&iam, auth.clone());

    let error = client
        .groups()
        .get_group("G1")
        .await
        .expect_err("second token rejected too");

    assert_eq!(error.kind(), ErrorKind::Api);
    assert_eq!(error.status_code(), Some(401));
    assert_eq!(auth.refreshes(), 1);
    assert_eq!(bearers(&iam), ["Bearer expired", "Bearer revoked"]);

    Ok(())
}

#[rstest]
#[tokio::test]
async fn should_report_missing_credentials(#[future] iam: MockIam) -> anyhow::Result<()> {
    let iam = iam.await;
    let client = client(&iam, RotatingTokens::new(&[]));

    let error = client
        .groups()
        .get_group("G1")
        .await
        .expect_err("no token available");

    assert_eq!(error.kind(), ErrorKind::Authentication);
    insta::assert_snapshot!(error, @r#"No credentials available for scopes ["iam:groups:read"]"#);
    assert!(iam.requests().is_empty());

    Ok(())
}

#[rstest]
#[tokio::test]
async fn should_send_static_credentials(#[future] iam: MockIam) -> anyhow::Result<()> {
    let iam = iam.await;
    iam.accept_token("secret-token");
    let client = IamClient::builder()
        .with_base_url(&iam.base_url())?
        .with_authentication(Authentication::Bearer("secret-token".into()))
        .build()?;

    let page = client
        .groups()
        .list_groups(&iam_client::api::ListOptions::new())
        .await?;

    assert_eq!(page.status(), StatusCode::OK);
    assert_eq!(bearers(&iam), ["Bearer secret-token"]);

    Ok(())
}

#[rstest]
#[tokio::test]
async fn should_share_client_between_tasks(#[future] iam: MockIam) -> anyhow::Result<()> {
    let iam = iam.await;
    for index in 1..=4 {
        iam.insert_group(Group {
            id: format!("G{index}"),
            ..Group::new(format!("Group {index}"))
        });
    }
    let client = client(&iam, RotatingTokens::new(&["any"]));

    let mut tasks = Vec::new();
    for index in 1..=4 {
        let client = client.clone();
        tasks.push(tokio::spawn(async move {
            client
                .groups()
                .get_group(&format!("G{index}"))
                .await
                .map(iam_client::ApiResponse::into_body)
        }));
    }

    let mut names = Vec::new();
    for task in tasks {
        let group = task.await??.expect("group");
        names.push(group.name);
    }
    assert_eq!(names, ["Group 1", "Group 2", "Group 3", "Group 4"]);
    assert_eq!(iam.requests().len(), 4);

    Ok(())
}
