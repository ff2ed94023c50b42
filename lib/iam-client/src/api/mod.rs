//! Operations of the IAM service.
//!
//! Every resource exposes the same set of operations through a typed handle
//! borrowed from an [`IamClient`](crate::IamClient):
//!
//! | Handle | Collection | Item |
//! |---|---|---|
//! | [`groups()`](crate::IamClient::groups) | `/groups` | `/groups/{group_id}` |
//! | [`permissions()`](crate::IamClient::permissions) | `/permissions` | `/permissions/{permission_id}` |
//! | [`systems()`](crate::IamClient::systems) | `/systems` | `/systems/{system_id}` |
//! | [`grants()`](crate::IamClient::grants) | `/grants` | `/grants/{grant_id}` |
//! | [`roles()`](crate::IamClient::roles) | `/roles` | `/roles/{role_id}` |
//! | [`resources()`](crate::IamClient::resources) | `/resources` | `/resources/{resource_id}` |
//!
//! Reads require the `iam:<resource>:read` scope, writes `iam:<resource>:write`.

use http::Method;

use crate::client::{OperationDescriptor, ResponseKind};
use crate::model::{ErrorModelKind, Page};

mod list;
pub use self::list::ListOptions;

mod groups;
pub use self::groups::GroupsApi;

mod permissions;
pub use self::permissions::PermissionsApi;

mod systems;
pub use self::systems::SystemsApi;

mod grants;
pub use self::grants::GrantsApi;

mod roles;
pub use self::roles::RolesApi;

mod resources;
pub use self::resources::ResourcesApi;

/// Media type of JSON patch documents.
const JSON_PATCH: &str = "application/json-patch+json";

/// Names of the operations of one resource.
struct OperationNames {
    list: &'static str,
    get: &'static str,
    create: &'static str,
    replace: &'static str,
    patch: &'static str,
    delete: &'static str,
}

/// Descriptors of the operations of one resource.
pub(crate) struct Endpoints<T> {
    pub(crate) list: OperationDescriptor<Page<T>>,
    pub(crate) get: OperationDescriptor<T>,
    pub(crate) create: OperationDescriptor<T>,
    pub(crate) replace: OperationDescriptor<T>,
    pub(crate) patch: OperationDescriptor<T>,
    pub(crate) delete: OperationDescriptor<()>,
}

impl<T> Endpoints<T> {
    fn new(
        names: &OperationNames,
        collection: &'static str,
        item: &'static str,
        scope_prefix: &str,
    ) -> Self {
        let read = [format!("{scope_prefix}:read")];
        let write = [format!("{scope_prefix}:write")];
        // `application/json-patch+json` is a valid media type
        let json_patch = JSON_PATCH.parse().unwrap_or(mime::APPLICATION_JSON);

        Self {
            list: declare_errors(
                OperationDescriptor::new(names.list, Method::GET, collection)
                    .with_scopes(read.clone())
                    .with_response(200, ResponseKind::Model),
            ),
            get: declare_errors(
                OperationDescriptor::new(names.get, Method::GET, item)
                    .with_scopes(read)
                    .with_response(200, ResponseKind::Model),
            ),
            create: declare_errors(
                OperationDescriptor::new(names.create, Method::POST, collection)
                    .with_scopes(write.clone())
                    .with_response(201, ResponseKind::Model)
                    .with_body(),
            ),
            replace: declare_errors(
                OperationDescriptor::new(names.replace, Method::PUT, item)
                    .with_scopes(write.clone())
                    .with_response(200, ResponseKind::Model)
                    .with_body(),
            ),
            patch: declare_errors(
                OperationDescriptor::new(names.patch, Method::PATCH, item)
                    .with_scopes(write.clone())
                    .with_response(200, ResponseKind::Model)
                    .with_content_types(vec![json_patch])
                    .with_body(),
            ),
            delete: declare_errors(
                OperationDescriptor::new(names.delete, Method::DELETE, item)
                    .with_scopes(write)
                    .with_response(200, ResponseKind::Empty)
                    .with_response(204, ResponseKind::Empty),
            ),
        }
    }
}

fn declare_errors<T>(descriptor: OperationDescriptor<T>) -> OperationDescriptor<T> {
    descriptor
        .with_response(400, ResponseKind::Error(ErrorModelKind::Version))
        .with_response(401, ResponseKind::Error(ErrorModelKind::Info))
        .with_response(403, ResponseKind::Error(ErrorModelKind::Info))
        .with_response(404, ResponseKind::Error(ErrorModelKind::Info))
        .with_response(409, ResponseKind::Error(ErrorModelKind::Info))
        .with_response(500, ResponseKind::Error(ErrorModelKind::Info))
}
