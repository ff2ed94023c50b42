use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use axum::extract::{OriginalUri, Path, Query, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tracing::info;

use iam_client::model::{Group, Page, PatchOp, PatchOperation};

/// A request as seen by the mock service.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
}

#[derive(Debug, Default)]
struct Inner {
    groups: BTreeMap<String, Group>,
    next_id: u32,
    requests: Vec<RecordedRequest>,
    accepted_token: Option<String>,
}

/// Shared state of the mock service.
#[derive(Debug, Clone, Default)]
pub struct IamState {
    inner: Arc<Mutex<Inner>>,
}

impl IamState {
    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("state not poisoned")
    }
}

/// An in-process IAM service serving groups under `/api`.
///
/// Only the bearer token set with [`MockIam::accept_token`] is accepted once
/// one is set; the API version, when sent, must be `1.0`.
#[derive(Debug)]
pub struct MockIam {
    addr: SocketAddr,
    state: IamState,
}

impl MockIam {
    pub async fn start() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("bind mock IAM listener")?;
        let addr = listener.local_addr()?;
        let state = IamState::default();

        let app = router(state.clone());
        info!(%addr, "launching mock IAM service");
        tokio::spawn(async move {
            if let Err(error) = axum::serve(listener, app).await {
                tracing::error!(?error, "mock IAM service stopped");
            }
        });

        Ok(Self { addr, state })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Only accepts `Bearer {token}` from now on.
    pub fn accept_token(&self, token: &str) {
        self.state.lock().accepted_token = Some(token.to_string());
    }

    pub fn insert_group(&self, group: Group) {
        self.state.lock().groups.insert(group.id.clone(), group);
    }

    pub fn groups(&self) -> Vec<Group> {
        self.state.lock().groups.values().cloned().collect()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().requests.clone()
    }
}

fn router(state: IamState) -> Router {
    let api = Router::new()
        .route("/groups", get(list_groups).post(create_group))
        .route(
            "/groups/{group_id}",
            get(get_group)
                .put(replace_group)
                .patch(patch_group)
                .delete(delete_group),
        )
        .layer(middleware::from_fn_with_state(state.clone(), guard));

    Router::new().nest("/api", api).with_state(state)
}

fn error_info(status: StatusCode, code: &str, message: &str) -> Response {
    (status, Json(json!({ "code": code, "message": message }))).into_response()
}

/// Records the request as sent on the wire, then checks the API version and the credentials.
async fn guard(
    State(state): State<IamState>,
    OriginalUri(uri): OriginalUri,
    request: Request,
    next: Next,
) -> Response {
    let accepted = {
        let mut inner = state.lock();
        inner.requests.push(RecordedRequest {
            method: request.method().clone(),
            path: uri.path().to_string(),
            query: uri.query().map(ToString::to_string),
            headers: request.headers().clone(),
        });
        inner.accepted_token.clone()
    };

    let headers = request.headers();
    if let Some(version) = headers.get("avalara-version")
        && version != "1.0"
    {
        let body = json!({
            "message": format!("API version {} is not supported", version.to_str().unwrap_or("?")),
            "supportedVersions": ["1.0"],
        });
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    }

    if let Some(token) = accepted {
        let expected = format!("Bearer {token}");
        if headers.get(AUTHORIZATION).is_none_or(|value| value != expected.as_str()) {
            return error_info(
                StatusCode::UNAUTHORIZED,
                "AuthenticationException",
                "invalid or expired token",
            );
        }
    }

    next.run(request).await
}

async fn list_groups(
    State(state): State<IamState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Page<Group>> {
    let groups: Vec<Group> = state.lock().groups.values().cloned().collect();
    let total = groups.len();

    let name = params
        .get("$filter")
        .and_then(|filter| filter.strip_prefix("name eq '"))
        .and_then(|rest| rest.strip_suffix('\''));
    let skip = params
        .get("skip")
        .and_then(|skip| skip.parse().ok())
        .unwrap_or(0);
    let top = params
        .get("top")
        .and_then(|top| top.parse().ok())
        .unwrap_or(usize::MAX);

    let items: Vec<Group> = groups
        .into_iter()
        .filter(|group| name.is_none_or(|name| group.name == name))
        .skip(skip)
        .take(top)
        .collect();
    let next_link = (skip + items.len() < total && name.is_none())
        .then(|| format!("/api/groups?skip={}&top={top}", skip + items.len()));
    let recordset_count = (params.get("count").map(String::as_str) == Some("true"))
        .then_some(total as u64);

    Json(Page {
        recordset_count,
        next_link,
        items,
    })
}

async fn get_group(State(state): State<IamState>, Path(group_id): Path<String>) -> Response {
    match state.lock().groups.get(&group_id) {
        Some(group) => Json(group.clone()).into_response(),
        None => not_found(&group_id),
    }
}

async fn create_group(State(state): State<IamState>, Json(mut group): Json<Group>) -> Response {
    let mut inner = state.lock();
    if inner.groups.values().any(|existing| existing.name == group.name) {
        return error_info(
            StatusCode::CONFLICT,
            "DuplicateName",
            &format!("group {} already exists", group.name),
        );
    }
    inner.next_id += 1;
    group.id = format!("G{}", inner.next_id);
    inner.groups.insert(group.id.clone(), group.clone());

    (StatusCode::CREATED, Json(group)).into_response()
}

async fn replace_group(
    State(state): State<IamState>,
    Path(group_id): Path<String>,
    Json(mut group): Json<Group>,
) -> Response {
    let mut inner = state.lock();
    if !inner.groups.contains_key(&group_id) {
        return not_found(&group_id);
    }
    group.id.clone_from(&group_id);
    inner.groups.insert(group_id, group.clone());

    Json(group).into_response()
}

async fn patch_group(
    State(state): State<IamState>,
    Path(group_id): Path<String>,
    headers: HeaderMap,
    Json(operations): Json<Vec<PatchOperation>>,
) -> Response {
    if headers
        .get("content-type")
        .is_none_or(|value| value != "application/json-patch+json")
    {
        return StatusCode::UNSUPPORTED_MEDIA_TYPE.into_response();
    }

    let mut inner = state.lock();
    let Some(group) = inner.groups.get_mut(&group_id) else {
        return not_found(&group_id);
    };
    for operation in operations {
        let text = operation
            .value
            .as_ref()
            .and_then(Value::as_str)
            .map(ToString::to_string);
        match (operation.op, operation.path.as_str()) {
            (PatchOp::Replace | PatchOp::Add, "/name") => {
                group.name = text.unwrap_or_default();
            }
            (PatchOp::Replace | PatchOp::Add, "/description") => group.description = text,
            (PatchOp::Remove, "/description") => group.description = None,
            (op, path) => {
                return error_info(
                    StatusCode::CONFLICT,
                    "UnsupportedPatch",
                    &format!("cannot apply {op:?} on {path}"),
                );
            }
        }
    }

    Json(group.clone()).into_response()
}

async fn delete_group(State(state): State<IamState>, Path(group_id): Path<String>) -> Response {
    match state.lock().groups.remove(&group_id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(&group_id),
    }
}

fn not_found(group_id: &str) -> Response {
    error_info(
        StatusCode::NOT_FOUND,
        "EntityNotFound",
        &format!("group {group_id} does not exist"),
    )
}
