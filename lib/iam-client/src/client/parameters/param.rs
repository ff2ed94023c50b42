use serde::Serialize;
use serde_json::Value;

use crate::client::IamClientError;

/// A parameter value serialized to JSON, rendered later as path segment, query
/// pair or header value.
///
/// Serialization failures are kept and reported when the request is built, so
/// the builder methods stay infallible.
#[derive(Debug, Clone, PartialEq)]
pub(in crate::client) struct ParamValue(Result<Value, String>);

impl ParamValue {
    pub(in crate::client) fn new<T>(value: &T) -> Self
    where
        T: Serialize + ?Sized,
    {
        Self(serde_json::to_value(value).map_err(|err| err.to_string()))
    }

    fn json(&self, name: &str) -> Result<&Value, IamClientError> {
        self.0
            .as_ref()
            .map_err(|err| IamClientError::InvalidArgument {
                message: format!("parameter '{name}' cannot be serialized: {err}"),
            })
    }

    /// `null`, empty strings and empty arrays count as no value.
    pub(in crate::client) fn is_blank(&self) -> bool {
        match &self.0 {
            Ok(Value::Null) => true,
            Ok(Value::String(text)) => text.is_empty(),
            Ok(Value::Array(items)) => items.is_empty(),
            _ => false,
        }
    }

    /// Renders the value as a single string; arrays are joined with `,`.
    pub(in crate::client) fn to_single_string(&self, name: &str) -> Result<String, IamClientError> {
        match self.json(name)? {
            Value::Array(items) => {
                let values = items
                    .iter()
                    .map(|item| scalar_to_string(name, item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(values.join(","))
            }
            value => scalar_to_string(name, value),
        }
    }

    /// Renders the value as query pairs.
    ///
    /// Arrays repeat the parameter name (`tag=a&tag=b`), objects are expanded
    /// key by key (`filter[name]=a`), `null` produces no pair.
    pub(in crate::client) fn to_query_pairs(
        &self,
        name: &str,
        pairs: &mut Vec<(String, String)>,
    ) -> Result<(), IamClientError> {
        match self.json(name)? {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    pairs.push((name.to_string(), scalar_to_string(name, item)?));
                }
            }
            Value::Object(entries) => {
                for (key, item) in entries {
                    if item.is_null() {
                        continue;
                    }
                    pairs.push((format!("{name}[{key}]"), scalar_to_string(name, item)?));
                }
            }
            value => pairs.push((name.to_string(), scalar_to_string(name, value)?)),
        }
        Ok(())
    }
}

fn scalar_to_string(name: &str, value: &Value) -> Result<String, IamClientError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Null => Ok(String::new()),
        Value::Array(_) | Value::Object(_) => Err(IamClientError::InvalidArgument {
            message: format!("parameter '{name}' contains a nested value: {value}"),
        }),
    }
}
