use std::sync::LazyLock;

use super::{Endpoints, ListOptions, OperationNames};
use crate::client::{IamClient, OperationCall};
use crate::model::{Grant, Page, PatchOperation};

static ENDPOINTS: LazyLock<Endpoints<Grant>> = LazyLock::new(|| {
    Endpoints::new(
        &OperationNames {
            list: "listGrants",
            get: "getGrant",
            create: "createGrant",
            replace: "replaceGrant",
            patch: "patchGrant",
            delete: "deleteGrant",
        },
        "/grants",
        "/grants/{grant_id}",
        "iam:grants",
    )
});

/// Operations on [`Grant`]s.
#[derive(Debug, Clone, Copy)]
pub struct GrantsApi<'a> {
    client: &'a IamClient,
}

impl IamClient {
    /// Operations on grants.
    pub fn grants(&self) -> GrantsApi<'_> {
        GrantsApi { client: self }
    }
}

impl<'a> GrantsApi<'a> {
    /// Lists the grants matching `options`.
    pub fn list_grants(&self, options: &ListOptions) -> OperationCall<'a, Page<Grant>> {
        self.client.call(&ENDPOINTS.list).with_query(options.to_query())
    }

    /// Retrieves a grant.
    pub fn get_grant(&self, grant_id: &str) -> OperationCall<'a, Grant> {
        self.client
            .call(&ENDPOINTS.get)
            .path_param("grant_id", grant_id)
    }

    /// Creates a grant.
    pub fn create_grant(&self, grant: &Grant) -> OperationCall<'a, Grant> {
        self.client.call(&ENDPOINTS.create).json(grant)
    }

    /// Replaces every field of a grant.
    pub fn replace_grant(&self, grant_id: &str, grant: &Grant) -> OperationCall<'a, Grant> {
        self.client
            .call(&ENDPOINTS.replace)
            .path_param("grant_id", grant_id)
            .json(grant)
    }

    /// Applies a JSON patch to a grant.
    pub fn patch_grant(
        &self,
        grant_id: &str,
        operations: &[PatchOperation],
    ) -> OperationCall<'a, Grant> {
        self.client
            .call(&ENDPOINTS.patch)
            .path_param("grant_id", grant_id)
            .json(operations)
    }

    /// Deletes a grant.
    pub fn delete_grant(&self, grant_id: &str) -> OperationCall<'a, ()> {
        self.client
            .call(&ENDPOINTS.delete)
            .path_param("grant_id", grant_id)
    }
}
