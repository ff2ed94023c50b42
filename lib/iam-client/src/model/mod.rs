//! Payloads exchanged with the IAM service.
//!
//! Only the fields the client relies on are modelled; unknown fields are
//! ignored when decoding.

mod error;
pub use self::error::{ErrorInfo, ErrorModel, ErrorModelKind, VersionError};

mod page;
pub use self::page::Page;

mod patch;
pub use self::patch::{PatchOp, PatchOperation};

mod reference;
pub use self::reference::Reference;

mod group;
pub use self::group::Group;

mod permission;
pub use self::permission::Permission;

mod system;
pub use self::system::System;

mod grant;
pub use self::grant::Grant;

mod role;
pub use self::role::Role;

mod resource;
pub use self::resource::Resource;
