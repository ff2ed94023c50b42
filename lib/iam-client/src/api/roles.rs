use std::sync::LazyLock;

use super::{Endpoints, ListOptions, OperationNames};
use crate::client::{IamClient, OperationCall};
use crate::model::{Page, PatchOperation, Role};

static ENDPOINTS: LazyLock<Endpoints<Role>> = LazyLock::new(|| {
    Endpoints::new(
        &OperationNames {
            list: "listRoles",
            get: "getRole",
            create: "createRole",
            replace: "replaceRole",
            patch: "patchRole",
            delete: "deleteRole",
        },
        "/roles",
        "/roles/{role_id}",
        "iam:roles",
    )
});

/// Operations on [`Role`]s.
#[derive(Debug, Clone, Copy)]
pub struct RolesApi<'a> {
    client: &'a IamClient,
}

impl IamClient {
    /// Operations on roles.
    pub fn roles(&self) -> RolesApi<'_> {
        RolesApi { client: self }
    }
}

impl<'a> RolesApi<'a> {
    /// Lists the roles matching `options`.
    pub fn list_roles(&self, options: &ListOptions) -> OperationCall<'a, Page<Role>> {
        self.client.call(&ENDPOINTS.list).with_query(options.to_query())
    }

    /// Retrieves a role.
    pub fn get_role(&self, role_id: &str) -> OperationCall<'a, Role> {
        self.client
            .call(&ENDPOINTS.get)
            .path_param("role_id", role_id)
    }

    /// Creates a role.
    pub fn create_role(&self, role: &Role) -> OperationCall<'a, Role> {
        self.client.call(&ENDPOINTS.create).json(role)
    }

    /// Replaces every field of a role.
    pub fn replace_role(&self, role_id: &str, role: &Role) -> OperationCall<'a, Role> {
        self.client
            .call(&ENDPOINTS.replace)
            .path_param("role_id", role_id)
            .json(role)
    }

    /// Applies a JSON patch to a role.
    pub fn patch_role(
        &self,
        role_id: &str,
        operations: &[PatchOperation],
    ) -> OperationCall<'a, Role> {
        self.client
            .call(&ENDPOINTS.patch)
            .path_param("role_id", role_id)
            .json(operations)
    }

    /// Deletes a role.
    pub fn delete_role(&self, role_id: &str) -> OperationCall<'a, ()> {
        self.client
            .call(&ENDPOINTS.delete)
            .path_param("role_id", role_id)
    }
}
