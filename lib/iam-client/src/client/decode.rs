use http::{HeaderMap, Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::warn;

use super::descriptor::{OperationDescriptor, ResponseKind};
use super::transport::TransportResponse;
use super::{ApiError, IamClientError};

/// A successful response with its decoded body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    status: StatusCode,
    headers: HeaderMap,
    body: Option<T>,
}

impl<T> ApiResponse<T> {
    /// The response status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The decoded body, `None` for operations without content.
    pub fn body(&self) -> Option<&T> {
        self.body.as_ref()
    }

    /// Consumes the response and returns the decoded body.
    pub fn into_body(self) -> Option<T> {
        self.body
    }

    /// Consumes the response and returns its parts.
    pub fn into_parts(self) -> (StatusCode, HeaderMap, Option<T>) {
        (self.status, self.headers, self.body)
    }
}

/// Decodes a 2xx response according to the declared kind of its status.
pub(in crate::client) fn decode<T>(
    descriptor: &OperationDescriptor<T>,
    uri: &str,
    response: TransportResponse,
) -> Result<ApiResponse<T>, IamClientError>
where
    T: DeserializeOwned,
{
    let TransportResponse {
        status,
        headers,
        body,
    } = response;

    let body = match descriptor.response_kind(status.as_u16()) {
        Some(ResponseKind::Empty) => None,
        Some(ResponseKind::Error(_)) => {
            let response = TransportResponse {
                status,
                headers,
                body,
            };
            return Err(api_error(descriptor, uri, response).into());
        }
        Some(ResponseKind::Model) | None if body.trim_ascii().is_empty() => None,
        Some(ResponseKind::Model) | None => {
            let deserializer = &mut serde_json::Deserializer::from_slice(&body);
            let value = serde_path_to_error::deserialize(deserializer).map_err(|err| {
                IamClientError::Decode {
                    type_name: std::any::type_name::<T>(),
                    path: err.path().to_string(),
                    error: err.into_inner(),
                    status_code: status.as_u16(),
                    uri: uri.to_string(),
                    body: String::from_utf8_lossy(&body).into_owned(),
                }
            })?;
            Some(value)
        }
    };

    Ok(ApiResponse {
        status,
        headers,
        body,
    })
}

/// Builds the error of a failure response, decoding the declared error model
/// when possible.
pub(in crate::client) fn api_error<T>(
    descriptor: &OperationDescriptor<T>,
    uri: &str,
    response: TransportResponse,
) -> ApiError {
    let model = match descriptor.response_kind(response.status.as_u16()) {
        Some(ResponseKind::Error(kind)) if !response.body.trim_ascii().is_empty() => {
            kind.decode(&response.body)
                .inspect_err(|err| {
                    warn!(status = %response.status, %err, "error payload does not match its declared model");
                })
                .ok()
        }
        _ => None,
    };

    ApiError {
        status: response.status,
        method: Method::clone(descriptor.method()),
        uri: uri.to_string(),
        body: response.text(),
        headers: response.headers,
        model,
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::model::{ErrorModel, ErrorModelKind, VersionError};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Created {
        id: String,
    }

    const URI: &str = "https://iam.example.com/groups";

    fn descriptor() -> OperationDescriptor<Created> {
        OperationDescriptor::new("createGroup", Method::POST, "/groups")
            .with_response(201, ResponseKind::Model)
            .with_response(204, ResponseKind::Empty)
            .with_response(400, ResponseKind::Error(ErrorModelKind::Version))
    }

    #[test]
    fn should_decode_declared_model() {
        let response = TransportResponse::new(StatusCode::CREATED, r#"{"id":"G1"}"#);

        let decoded = decode(&descriptor(), URI, response).expect("valid body");

        assert_eq!(decoded.status(), StatusCode::CREATED);
        assert_eq!(decoded.into_body(), Some(Created { id: "G1".to_string() }));
    }

    #[test]
    fn should_fall_back_to_default_model_on_undeclared_success() {
        let response = TransportResponse::new(StatusCode::ACCEPTED, r#"{"id":"G2"}"#);

        let decoded = decode(&descriptor(), URI, response).expect("valid body");

        assert_eq!(decoded.body(), Some(&Created { id: "G2".to_string() }));
    }

    #[test]
    fn should_return_no_body_for_empty_responses() {
        let declared = TransportResponse::new(StatusCode::NO_CONTENT, "ignored");
        let blank = TransportResponse::new(StatusCode::OK, " \n");

        let declared = decode(&descriptor(), URI, declared).expect("empty");
        let blank = decode(&descriptor(), URI, blank).expect("blank");

        assert_eq!(declared.body(), None);
        assert_eq!(blank.body(), None);
    }

    #[test]
    fn should_report_decode_error_with_path() {
        let response = TransportResponse::new(StatusCode::CREATED, r#"{"id":42}"#);

        let error = decode(&descriptor(), URI, response).expect_err("wrong shape");

        let IamClientError::Decode {
            path,
            status_code,
            body,
            ..
        } = &error
        else {
            panic!("expected a decode error, got {error:?}");
        };
        assert_eq!(path, "id");
        assert_eq!(*status_code, 201);
        assert_eq!(body, r#"{"id":42}"#);
    }

    #[test]
    fn should_decode_declared_error_model() {
        let response = TransportResponse::new(
            StatusCode::BAD_REQUEST,
            r#"{"message":"unsupported version","supportedVersions":["1.0"]}"#,
        );

        let error = api_error(&descriptor(), URI, response);

        assert_eq!(
            error.model(),
            Some(&ErrorModel::Version(VersionError {
                message: Some("unsupported version".to_string()),
                supported_versions: vec!["1.0".to_string()],
            }))
        );
        insta::assert_snapshot!(error, @r#"
        [400] API call POST https://iam.example.com/groups failed: unsupported version
        {"message":"unsupported version","supportedVersions":["1.0"]}
        "#);
    }

    #[test]
    fn should_keep_raw_body_when_error_model_does_not_match() {
        let response = TransportResponse::new(StatusCode::BAD_REQUEST, "<html>oops</html>");

        let error = api_error(&descriptor(), URI, response);

        assert_eq!(error.model(), None);
        assert_eq!(error.body(), "<html>oops</html>");
    }
}
