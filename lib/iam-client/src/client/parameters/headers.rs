use http::header::{HeaderName, HeaderValue};
use indexmap::IndexMap;
use serde::Serialize;

use super::param::ParamValue;
use crate::client::IamClientError;

/// Request headers supplied by the caller.
///
/// Values are serialized like other parameters: arrays are joined with `,` and
/// `None` values are left out.
///
/// ```rust
/// use iam_client::CallHeaders;
///
/// let headers = CallHeaders::new()
///     .add_header("X-Request-Source", "billing")
///     .add_header("X-Page-Hint", 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallHeaders {
    headers: IndexMap<String, ParamValue>,
}

impl CallHeaders {
    /// Creates an empty header set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a header.
    #[must_use]
    pub fn add_header<T>(mut self, name: impl Into<String>, value: T) -> Self
    where
        T: Serialize,
    {
        self.headers.insert(name.into(), ParamValue::new(&value));
        self
    }

    /// Merges another header set into this one; `other` wins on conflicts.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.headers.extend(other.headers);
        self
    }

    /// Checks if the header set is empty.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Returns the number of headers.
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Converts the headers to HTTP header pairs, skipping `None` values.
    pub(in crate::client) fn to_http_headers(
        &self,
    ) -> Result<Vec<(HeaderName, HeaderValue)>, IamClientError> {
        let mut result = Vec::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            if value.is_blank() {
                continue;
            }
            let value = value.to_single_string(name)?;
            result.push((
                HeaderName::from_bytes(name.as_bytes())?,
                HeaderValue::from_str(&value)?,
            ));
        }
        Ok(result)
    }
}
