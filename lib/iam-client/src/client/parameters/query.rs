use indexmap::IndexMap;
use serde::Serialize;

use super::param::ParamValue;
use crate::client::IamClientError;

/// Query string parameters of a call.
///
/// Parameters keep their insertion order. Array values repeat the name, object
/// values are expanded key by key and `None` values are left out:
///
/// ```rust
/// use iam_client::CallQuery;
///
/// let query = CallQuery::new()
///     .add_param("$filter", "name eq 'Finance'")
///     .add_param("top", 10)
///     .add_param("skip", None::<u32>)
///     .add_param("include", ["members", "roles"]);
/// // $filter=name+eq+%27Finance%27&top=10&include=members&include=roles
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallQuery {
    params: IndexMap<String, ParamValue>,
}

impl CallQuery {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a parameter.
    #[must_use]
    pub fn add_param<T>(mut self, name: impl Into<String>, value: T) -> Self
    where
        T: Serialize,
    {
        self.params.insert(name.into(), ParamValue::new(&value));
        self
    }

    /// Adds the parameters of `other`, replacing those with the same name.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.params.extend(other.params);
        self
    }

    /// Returns `true` when no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Builds the url-encoded query string, without the leading `?`.
    pub(crate) fn to_query_string(&self) -> Result<String, IamClientError> {
        let mut pairs = Vec::with_capacity(self.params.len());
        for (name, value) in &self.params {
            value.to_query_pairs(name, &mut pairs)?;
        }
        serde_urlencoded::to_string(&pairs).map_err(IamClientError::from)
    }
}
