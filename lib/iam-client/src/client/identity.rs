use std::env;

use http::HeaderValue;
use http::header::HeaderName;

use super::IamClientError;

/// Client identification header.
pub const CLIENT_HEADER: HeaderName = HeaderName::from_static("x-avalara-client");

/// Requested API version header.
pub const API_VERSION_HEADER: HeaderName = HeaderName::from_static("avalara-version");

/// Correlation id header.
pub const CORRELATION_ID_HEADER: HeaderName = HeaderName::from_static("x-correlation-id");

const CLIENT_TAG: &str = "RustRestClient";
const UNKNOWN_MACHINE: &str = "unknown";

/// Identity of the calling application, sent on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(in crate::client) struct ClientIdentity {
    pub(in crate::client) app_name: String,
    pub(in crate::client) app_version: String,
    pub(in crate::client) machine_name: String,
}

impl Default for ClientIdentity {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            machine_name: machine_name(),
        }
    }
}

impl ClientIdentity {
    /// `app; app version; RustRestClient; library version; machine`
    pub(in crate::client) fn header_value(&self) -> Result<HeaderValue, IamClientError> {
        let value = [
            self.app_name.as_str(),
            self.app_version.as_str(),
            CLIENT_TAG,
            env!("CARGO_PKG_VERSION"),
            self.machine_name.as_str(),
        ]
        .join("; ");
        Ok(HeaderValue::from_str(&value)?)
    }
}

/// The host name reported by the OS, then `HOSTNAME`/`COMPUTERNAME`, then `unknown`.
fn machine_name() -> String {
    os_hostname()
        .or_else(|| {
            ["HOSTNAME", "COMPUTERNAME"]
                .into_iter()
                .find_map(|key| env::var(key).ok().and_then(non_blank))
        })
        .unwrap_or_else(|| UNKNOWN_MACHINE.to_string())
}

fn os_hostname() -> Option<String> {
    hostname::get()
        .ok()
        .and_then(|name| non_blank(name.to_string_lossy().into_owned()))
}

fn non_blank(name: String) -> Option<String> {
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}
