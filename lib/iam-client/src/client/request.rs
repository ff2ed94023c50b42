use bytes::Bytes;
use headers::{ContentType, HeaderMapExt};
use http::header::ACCEPT;
use http::{HeaderMap, HeaderValue, Method};
use url::Url;

use super::descriptor::OperationDescriptor;
use super::identity::{API_VERSION_HEADER, CLIENT_HEADER, CORRELATION_ID_HEADER};
use super::parameters::PathResolved;
use super::transport::TransportRequest;
use super::{CallBody, CallHeaders, CallPath, CallQuery, ClientConfig, IamClientError};

/// The caller supplied values of one call.
#[derive(Debug, Clone, Default)]
pub(in crate::client) struct RequestContext {
    pub(in crate::client) path: CallPath,
    pub(in crate::client) query: CallQuery,
    pub(in crate::client) headers: CallHeaders,
    pub(in crate::client) body: Option<CallBody>,
    pub(in crate::client) correlation_id: Option<String>,
}

/// A request built from a descriptor and a context, without credentials.
///
/// Built once per logical call; every attempt sends a copy of it.
#[derive(Debug, Clone, PartialEq)]
pub(in crate::client) struct PreparedRequest {
    pub(in crate::client) method: Method,
    pub(in crate::client) url: Url,
    pub(in crate::client) headers: HeaderMap,
    pub(in crate::client) body: Option<Bytes>,
}

impl PreparedRequest {
    pub(in crate::client) fn build<T>(
        config: &ClientConfig,
        descriptor: &OperationDescriptor<T>,
        context: &RequestContext,
    ) -> Result<Self, IamClientError> {
        let url = build_url(&config.base_url, &context.path, &context.query)?;

        let body = match &context.body {
            Some(body) => Some(body.encode(&descriptor.select_content_type())?),
            None if descriptor.has_body() => {
                return Err(IamClientError::InvalidArgument {
                    message: format!("missing required payload for '{}'", descriptor.name()),
                });
            }
            None => None,
        };

        // defaults < caller overrides < computed
        let mut headers = config.default_headers.clone();
        for (name, value) in context.headers.to_http_headers()? {
            headers.insert(name, value);
        }
        if let Some(accept) = descriptor.select_accept() {
            headers.insert(ACCEPT, HeaderValue::from_str(&accept)?);
        }
        if body.is_some() {
            headers.typed_insert(ContentType::from(descriptor.select_content_type()));
        }
        headers.insert(CLIENT_HEADER, config.identity.header_value()?);
        if let Some(version) = &config.api_version {
            headers.insert(API_VERSION_HEADER, HeaderValue::from_str(version)?);
        }
        if let Some(correlation_id) = &context.correlation_id {
            headers.insert(CORRELATION_ID_HEADER, HeaderValue::from_str(correlation_id)?);
        }

        Ok(Self {
            method: descriptor.method().clone(),
            url,
            headers,
            body,
        })
    }

    pub(in crate::client) fn to_transport(&self, headers: HeaderMap) -> TransportRequest {
        TransportRequest {
            method: self.method.clone(),
            url: self.url.clone(),
            headers,
            body: self.body.clone(),
        }
    }
}

fn build_url(base_url: &Url, path: &CallPath, query: &CallQuery) -> Result<Url, IamClientError> {
    let path_resolved = PathResolved::try_from(path)?;
    let url = format!(
        "{}/{}",
        base_url.as_str().trim_end_matches('/'),
        path_resolved.path.trim_start_matches('/')
    );
    let mut url = url.parse::<Url>()?;

    let query_string = query.to_query_string()?;
    if !query_string.is_empty() {
        url.set_query(Some(&query_string));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use http::header::CONTENT_TYPE;

    use super::*;
    use crate::client::identity::ClientIdentity;

    fn config() -> ClientConfig {
        let mut default_headers = HeaderMap::new();
        default_headers.insert("x-tenant", HeaderValue::from_static("default"));
        default_headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        ClientConfig {
            base_url: "https://iam.example.com/api/v1/".parse().expect("valid url"),
            identity: ClientIdentity {
                app_name: "billing".to_string(),
                app_version: "2.3.0".to_string(),
                machine_name: "build-01".to_string(),
            },
            api_version: Some("1.0".to_string()),
            default_headers,
            generate_correlation_ids: false,
        }
    }

    fn list_members() -> OperationDescriptor<()> {
        OperationDescriptor::new("listMembers", Method::GET, "/groups/{group_id}/members")
    }

    fn context() -> RequestContext {
        RequestContext {
            path: CallPath::from("/groups/{group_id}/members").add_param("group_id", "G 1"),
            query: CallQuery::new()
                .add_param("top", 10)
                .add_param("include", ["users", "roles"]),
            headers: CallHeaders::new()
                .add_header("X-Tenant", "acme")
                .add_header("Accept", "text/plain"),
            body: None,
            correlation_id: Some("corr-42".to_string()),
        }
    }

    fn rendered_headers(headers: &HeaderMap) -> String {
        headers
            .iter()
            .map(|(name, value)| format!("{name}: {}", value.to_str().unwrap_or_default()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn should_build_url_with_query() {
        let request = PreparedRequest::build(&config(), &list_members(), &context())
            .expect("valid request");

        insta::assert_snapshot!(request.url, @"https://iam.example.com/api/v1/groups/G%201/members?top=10&include=users&include=roles");
    }

    #[test]
    fn should_merge_headers_by_precedence() {
        let request = PreparedRequest::build(&config(), &list_members(), &context())
            .expect("valid request");

        insta::assert_snapshot!(rendered_headers(&request.headers).replace(env!("CARGO_PKG_VERSION"), "[version]"), @r"
        x-tenant: acme
        accept: application/json
        x-avalara-client: billing; 2.3.0; RustRestClient; [version]; build-01
        avalara-version: 1.0
        x-correlation-id: corr-42
        ");
        assert!(request.body.is_none());
    }

    #[test]
    fn should_build_identical_requests_from_the_same_context() {
        let config = config();
        let descriptor = list_members();
        let context = context();

        let first = PreparedRequest::build(&config, &descriptor, &context).expect("valid request");
        let second = PreparedRequest::build(&config, &descriptor, &context).expect("valid request");

        assert_eq!(first, second);
        assert_eq!(
            rendered_headers(&first.headers),
            rendered_headers(&second.headers)
        );
    }

    #[test]
    fn should_encode_payload_with_content_type() {
        let descriptor: OperationDescriptor<()> =
            OperationDescriptor::new("createGroup", Method::POST, "/groups").with_body();
        let context = RequestContext {
            path: CallPath::from("/groups"),
            body: Some(CallBody::json(&serde_json::json!({ "name": "Finance" })).expect("json")),
            ..RequestContext::default()
        };

        let request = PreparedRequest::build(&config(), &descriptor, &context).expect("valid request");

        assert_eq!(request.body.as_deref(), Some(br#"{"name":"Finance"}"#.as_slice()));
        assert_eq!(request.headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn should_fail_fast_without_required_payload() {
        let descriptor: OperationDescriptor<()> =
            OperationDescriptor::new("createGroup", Method::POST, "/groups").with_body();
        let context = RequestContext {
            path: CallPath::from("/groups"),
            ..RequestContext::default()
        };

        let result = PreparedRequest::build(&config(), &descriptor, &context);

        assert!(matches!(result, Err(IamClientError::InvalidArgument { .. })));
    }

    #[test]
    fn should_skip_empty_query() {
        let context = RequestContext {
            path: CallPath::from("/groups"),
            query: CallQuery::new().add_param("skip", None::<u32>),
            ..RequestContext::default()
        };
        let descriptor: OperationDescriptor<()> =
            OperationDescriptor::new("listGroups", Method::GET, "/groups");

        let request = PreparedRequest::build(&config(), &descriptor, &context).expect("valid request");

        assert_eq!(request.url.as_str(), "https://iam.example.com/api/v1/groups");
    }
}
