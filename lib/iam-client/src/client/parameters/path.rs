use std::sync::LazyLock;

use indexmap::IndexMap;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;
use serde::Serialize;
use tracing::warn;

use super::param::ParamValue;
use crate::client::IamClientError;

/// Regular expression for matching path parameters in the format `{param_name}`.
static RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(?<name>[\w-]+)}").expect("a valid regex"));

/// Characters escaped in a path segment: everything except RFC 3986 unreserved ones.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// A path template with its parameter values.
///
/// ```rust
/// use iam_client::CallPath;
///
/// let path = CallPath::from("/groups/{group_id}/members/{user_id}")
///     .add_param("group_id", "G1")
///     .add_param("user_id", 42);
/// ```
#[derive(Debug, Clone, Default, PartialEq, derive_more::Display)]
#[display("{path}")]
pub struct CallPath {
    pub(in crate::client) path: String,
    args: IndexMap<String, ParamValue>,
}

impl CallPath {
    /// Sets the value of the `{name}` placeholder.
    ///
    /// Setting the same parameter twice keeps the last value.
    #[must_use]
    pub fn add_param<T>(mut self, name: impl Into<String>, value: T) -> Self
    where
        T: Serialize,
    {
        self.args.insert(name.into(), ParamValue::new(&value));
        self
    }

    /// Returns the path template.
    pub fn template(&self) -> &str {
        &self.path
    }
}

impl From<&str> for CallPath {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<String> for CallPath {
    fn from(path: String) -> Self {
        Self {
            path,
            args: IndexMap::new(),
        }
    }
}

/// A path with every placeholder substituted and percent-encoded.
#[derive(Debug, PartialEq, Eq)]
pub(in crate::client) struct PathResolved {
    pub(in crate::client) path: String,
}

impl TryFrom<&CallPath> for PathResolved {
    type Error = IamClientError;

    fn try_from(value: &CallPath) -> Result<Self, Self::Error> {
        let CallPath { path, args } = value;

        let mut resolved = path.clone();
        let mut missings = Vec::new();
        for caps in RE.captures_iter(path) {
            let Some(name) = caps.name("name").map(|it| it.as_str()) else {
                continue;
            };
            match args.get(name) {
                Some(param) if !param.is_blank() => {
                    let segment = param.to_single_string(name)?;
                    let encoded = utf8_percent_encode(&segment, PATH_SEGMENT).to_string();
                    resolved = resolved.replace(&["{", name, "}"].concat(), &encoded);
                }
                _ => {
                    if !missings.iter().any(|missing| missing == name) {
                        missings.push(name.to_string());
                    }
                }
            }
        }

        if !missings.is_empty() {
            return Err(IamClientError::PathUnresolved {
                path: path.clone(),
                missings,
            });
        }

        for name in args.keys() {
            if !path.contains(&["{", name, "}"].concat()) {
                warn!(?name, %path, "argument name not found in path");
            }
        }

        Ok(Self { path: resolved })
    }
}
