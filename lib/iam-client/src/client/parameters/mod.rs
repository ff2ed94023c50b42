//! Per-call request parameters.
//!
//! - [`CallPath`]: path template and its placeholder values (`/groups/{group_id}`)
//! - [`CallQuery`]: query string parameters
//! - [`CallHeaders`]: header overrides
//! - [`CallBody`]: request payload

mod param;

mod path;
pub use self::path::CallPath;
pub(in crate::client) use self::path::PathResolved;

mod query;
pub use self::query::CallQuery;

mod headers;
pub use self::headers::CallHeaders;

mod body;
pub use self::body::CallBody;
pub(in crate::client) use self::body::is_json;
