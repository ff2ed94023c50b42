use std::fmt;

use bytes::Bytes;
use mime::Mime;
use serde::Serialize;
use serde_json::Value;

use crate::client::IamClientError;

/// Request payload of a call.
///
/// A structured payload is kept as a JSON value until the request content type
/// is negotiated, then encoded as JSON (or url-encoded for form content types).
/// A raw payload is sent unmodified.
#[derive(Clone, PartialEq)]
pub enum CallBody {
    /// A serializable payload.
    Structured(Value),
    /// Pre-encoded bytes.
    Raw(Bytes),
}

impl fmt::Debug for CallBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structured(value) => f.debug_tuple("Structured").field(value).finish(),
            Self::Raw(data) => write!(f, "Raw({} bytes)", data.len()),
        }
    }
}

impl CallBody {
    /// Creates a structured payload from a serializable value.
    ///
    /// # Errors
    ///
    /// Fails when `value` cannot be represented as JSON.
    pub fn json<T>(value: &T) -> Result<Self, IamClientError>
    where
        T: Serialize + ?Sized,
    {
        let value = serde_json::to_value(value)?;
        Ok(Self::Structured(value))
    }

    /// Creates a payload sent as is.
    pub fn raw(data: impl Into<Bytes>) -> Self {
        Self::Raw(data.into())
    }

    /// Encodes the payload for `content_type`.
    pub(in crate::client) fn encode(&self, content_type: &Mime) -> Result<Bytes, IamClientError> {
        match self {
            Self::Raw(data) => Ok(data.clone()),
            Self::Structured(value) if is_json(content_type) => {
                Ok(Bytes::from(serde_json::to_vec(value)?))
            }
            Self::Structured(value) if is_form(content_type) => {
                Ok(Bytes::from(serde_urlencoded::to_string(value)?))
            }
            Self::Structured(Value::String(text)) => Ok(Bytes::from(text.clone())),
            Self::Structured(_) => Err(IamClientError::InvalidArgument {
                message: format!("cannot encode a structured payload as '{content_type}'"),
            }),
        }
    }
}

/// `application/json` and `application/*+json` media types.
pub(in crate::client) fn is_json(mime: &Mime) -> bool {
    (mime.type_() == mime::APPLICATION && mime.subtype() == mime::JSON)
        || mime.suffix() == Some(mime::JSON)
}

fn is_form(mime: &Mime) -> bool {
    mime.essence_str() == mime::APPLICATION_WWW_FORM_URLENCODED.essence_str()
}
