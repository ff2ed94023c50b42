use std::sync::LazyLock;

use super::{Endpoints, ListOptions, OperationNames};
use crate::client::{IamClient, OperationCall};
use crate::model::{Page, PatchOperation, Permission};

static ENDPOINTS: LazyLock<Endpoints<Permission>> = LazyLock::new(|| {
    Endpoints::new(
        &OperationNames {
            list: "listPermissions",
            get: "getPermission",
            create: "createPermission",
            replace: "replacePermission",
            patch: "patchPermission",
            delete: "deletePermission",
        },
        "/permissions",
        "/permissions/{permission_id}",
        "iam:permissions",
    )
});

/// Operations on [`Permission`]s.
#[derive(Debug, Clone, Copy)]
pub struct PermissionsApi<'a> {
    client: &'a IamClient,
}

impl IamClient {
    /// Operations on permissions.
    pub fn permissions(&self) -> PermissionsApi<'_> {
        PermissionsApi { client: self }
    }
}

impl<'a> PermissionsApi<'a> {
    /// Lists the permissions matching `options`.
    pub fn list_permissions(&self, options: &ListOptions) -> OperationCall<'a, Page<Permission>> {
        self.client.call(&ENDPOINTS.list).with_query(options.to_query())
    }

    /// Retrieves a permission.
    pub fn get_permission(&self, permission_id: &str) -> OperationCall<'a, Permission> {
        self.client
            .call(&ENDPOINTS.get)
            .path_param("permission_id", permission_id)
    }

    /// Creates a permission.
    pub fn create_permission(&self, permission: &Permission) -> OperationCall<'a, Permission> {
        self.client.call(&ENDPOINTS.create).json(permission)
    }

    /// Replaces every field of a permission.
    pub fn replace_permission(
        &self,
        permission_id: &str,
        permission: &Permission,
    ) -> OperationCall<'a, Permission> {
        self.client
            .call(&ENDPOINTS.replace)
            .path_param("permission_id", permission_id)
            .json(permission)
    }

    /// Applies a JSON patch to a permission.
    pub fn patch_permission(
        &self,
        permission_id: &str,
        operations: &[PatchOperation],
    ) -> OperationCall<'a, Permission> {
        self.client
            .call(&ENDPOINTS.patch)
            .path_param("permission_id", permission_id)
            .json(operations)
    }

    /// Deletes a permission.
    pub fn delete_permission(&self, permission_id: &str) -> OperationCall<'a, ()> {
        self.client
            .call(&ENDPOINTS.delete)
            .path_param("permission_id", permission_id)
    }
}
