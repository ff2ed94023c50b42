use std::sync::LazyLock;

use super::{Endpoints, ListOptions, OperationNames};
use crate::client::{IamClient, OperationCall};
use crate::model::{Group, Page, PatchOperation};

static ENDPOINTS: LazyLock<Endpoints<Group>> = LazyLock::new(|| {
    Endpoints::new(
        &OperationNames {
            list: "listGroups",
            get: "getGroup",
            create: "createGroup",
            replace: "replaceGroup",
            patch: "patchGroup",
            delete: "deleteGroup",
        },
        "/groups",
        "/groups/{group_id}",
        "iam:groups",
    )
});

/// Operations on [`Group`]s.
#[derive(Debug, Clone, Copy)]
pub struct GroupsApi<'a> {
    client: &'a IamClient,
}

impl IamClient {
    /// Operations on groups.
    pub fn groups(&self) -> GroupsApi<'_> {
        GroupsApi { client: self }
    }
}

impl<'a> GroupsApi<'a> {
    /// Lists the groups matching `options`.
    pub fn list_groups(&self, options: &ListOptions) -> OperationCall<'a, Page<Group>> {
        self.client.call(&ENDPOINTS.list).with_query(options.to_query())
    }

    /// Retrieves a group.
    ///
    /// An empty `group_id` fails without contacting the service.
    pub fn get_group(&self, group_id: &str) -> OperationCall<'a, Group> {
        self.client
            .call(&ENDPOINTS.get)
            .path_param("group_id", group_id)
    }

    /// Creates a group; the service answers with the stored group.
    pub fn create_group(&self, group: &Group) -> OperationCall<'a, Group> {
        self.client.call(&ENDPOINTS.create).json(group)
    }

    /// Replaces every field of a group.
    pub fn replace_group(&self, group_id: &str, group: &Group) -> OperationCall<'a, Group> {
        self.client
            .call(&ENDPOINTS.replace)
            .path_param("group_id", group_id)
            .json(group)
    }

    /// Applies a JSON patch to a group.
    pub fn patch_group(
        &self,
        group_id: &str,
        operations: &[PatchOperation],
    ) -> OperationCall<'a, Group> {
        self.client
            .call(&ENDPOINTS.patch)
            .path_param("group_id", group_id)
            .json(operations)
    }

    /// Deletes a group.
    pub fn delete_group(&self, group_id: &str) -> OperationCall<'a, ()> {
        self.client
            .call(&ENDPOINTS.delete)
            .path_param("group_id", group_id)
    }
}
