use std::fmt;
use std::marker::PhantomData;

use http::Method;
use indexmap::IndexMap;
use mime::Mime;

use super::parameters::is_json;
use crate::model::ErrorModelKind;

/// How the body of a declared status code is read.
///
/// An operation decodes a single model type: every status read as
/// [`ResponseKind::Model`] yields the descriptor's `T`, so the kind only
/// chooses between that model, no body, or an error payload. Undeclared 2xx
/// statuses are read as `T` as well, with a blank body giving no model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// The body is the operation model.
    Model,
    /// No body is expected.
    Empty,
    /// The status signals a failure and the body is an error payload.
    Error(ErrorModelKind),
}

/// The immutable definition of one API operation.
///
/// `T` is the model decoded from successful responses. Descriptors are built
/// once per endpoint and shared by every call:
///
/// ```rust
/// use std::sync::LazyLock;
///
/// use http::Method;
/// use iam_client::model::{ErrorModelKind, Group};
/// use iam_client::{OperationDescriptor, ResponseKind};
///
/// static GET_GROUP: LazyLock<OperationDescriptor<Group>> = LazyLock::new(|| {
///     OperationDescriptor::new("getGroup", Method::GET, "/groups/{group_id}")
///         .with_scopes(["iam:groups:read"])
///         .with_response(200, ResponseKind::Model)
///         .with_response(400, ResponseKind::Error(ErrorModelKind::Version))
/// });
/// ```
pub struct OperationDescriptor<T> {
    name: &'static str,
    method: Method,
    path: &'static str,
    scopes: Vec<String>,
    responses: IndexMap<u16, ResponseKind>,
    accepts: Vec<Mime>,
    content_types: Vec<Mime>,
    has_body: bool,
    model: PhantomData<fn() -> T>,
}

impl<T> OperationDescriptor<T> {
    /// Creates a descriptor accepting and sending `application/json`, without
    /// scopes, declared statuses or request body.
    pub fn new(name: &'static str, method: Method, path: &'static str) -> Self {
        Self {
            name,
            method,
            path,
            scopes: Vec::new(),
            responses: IndexMap::new(),
            accepts: vec![mime::APPLICATION_JSON],
            content_types: vec![mime::APPLICATION_JSON],
            has_body: false,
            model: PhantomData,
        }
    }

    /// Sets the scopes a caller must be granted.
    ///
    /// Credentials are only applied to operations with at least one scope.
    #[must_use]
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Declares how the body of `status` is read.
    #[must_use]
    pub fn with_response(mut self, status: u16, kind: ResponseKind) -> Self {
        self.responses.insert(status, kind);
        self
    }

    /// Sets the acceptable response media types.
    #[must_use]
    pub fn with_accepts(mut self, accepts: Vec<Mime>) -> Self {
        self.accepts = accepts;
        self
    }

    /// Sets the supported request media types.
    #[must_use]
    pub fn with_content_types(mut self, content_types: Vec<Mime>) -> Self {
        self.content_types = content_types;
        self
    }

    /// Marks the request payload as required.
    #[must_use]
    pub fn with_body(mut self) -> Self {
        self.has_body = true;
        self
    }

    /// The operation name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The path template.
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// The required scopes, possibly empty.
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// Returns `true` when the request payload is required.
    pub fn has_body(&self) -> bool {
        self.has_body
    }

    /// The acceptable response media types.
    pub fn accepts(&self) -> &[Mime] {
        &self.accepts
    }

    /// The supported request media types.
    pub fn content_types(&self) -> &[Mime] {
        &self.content_types
    }

    /// Returns the declared kind of `status`.
    pub fn response_kind(&self, status: u16) -> Option<ResponseKind> {
        self.responses.get(&status).copied()
    }

    /// A stable identifier built from the method and path, used in traces.
    pub fn operation_id(&self) -> String {
        slug::slugify(format!("{} {}", self.method, self.path))
    }

    /// The `Accept` value: JSON when declared, every declared type otherwise.
    pub(in crate::client) fn select_accept(&self) -> Option<String> {
        if self.accepts.is_empty() {
            return None;
        }
        if let Some(json) = self.accepts.iter().find(|mime| is_json(mime)) {
            return Some(json.to_string());
        }
        let accepts = self
            .accepts
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        Some(accepts.join(", "))
    }

    /// The `Content-Type` of the payload: JSON when declared (or when nothing
    /// is declared), the first declared type otherwise.
    pub(in crate::client) fn select_content_type(&self) -> Mime {
        self.content_types
            .iter()
            .find(|mime| is_json(mime))
            .or_else(|| self.content_types.first())
            .cloned()
            .unwrap_or(mime::APPLICATION_JSON)
    }
}

impl<T> Clone for OperationDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            method: self.method.clone(),
            path: self.path,
            scopes: self.scopes.clone(),
            responses: self.responses.clone(),
            accepts: self.accepts.clone(),
            content_types: self.content_types.clone(),
            has_body: self.has_body,
            model: PhantomData,
        }
    }
}

impl<T> fmt::Debug for OperationDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationDescriptor")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("path", &self.path)
            .field("scopes", &self.scopes)
            .field("responses", &self.responses)
            .field("model", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}
