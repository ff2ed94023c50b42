use std::sync::LazyLock;

use super::{Endpoints, ListOptions, OperationNames};
use crate::client::{IamClient, OperationCall};
use crate::model::{Page, PatchOperation, System};

static ENDPOINTS: LazyLock<Endpoints<System>> = LazyLock::new(|| {
    Endpoints::new(
        &OperationNames {
            list: "listSystems",
            get: "getSystem",
            create: "createSystem",
            replace: "replaceSystem",
            patch: "patchSystem",
            delete: "deleteSystem",
        },
        "/systems",
        "/systems/{system_id}",
        "iam:systems",
    )
});

/// Operations on [`System`]s.
#[derive(Debug, Clone, Copy)]
pub struct SystemsApi<'a> {
    client: &'a IamClient,
}

impl IamClient {
    /// Operations on systems.
    pub fn systems(&self) -> SystemsApi<'_> {
        SystemsApi { client: self }
    }
}

impl<'a> SystemsApi<'a> {
    /// Lists the systems matching `options`.
    pub fn list_systems(&self, options: &ListOptions) -> OperationCall<'a, Page<System>> {
        self.client.call(&ENDPOINTS.list).with_query(options.to_query())
    }

    /// Retrieves a system.
    pub fn get_system(&self, system_id: &str) -> OperationCall<'a, System> {
        self.client
            .call(&ENDPOINTS.get)
            .path_param("system_id", system_id)
    }

    /// Creates a system.
    pub fn create_system(&self, system: &System) -> OperationCall<'a, System> {
        self.client.call(&ENDPOINTS.create).json(system)
    }

    /// Replaces every field of a system.
    pub fn replace_system(&self, system_id: &str, system: &System) -> OperationCall<'a, System> {
        self.client
            .call(&ENDPOINTS.replace)
            .path_param("system_id", system_id)
            .json(system)
    }

    /// Applies a JSON patch to a system.
    pub fn patch_system(
        &self,
        system_id: &str,
        operations: &[PatchOperation],
    ) -> OperationCall<'a, System> {
        self.client
            .call(&ENDPOINTS.patch)
            .path_param("system_id", system_id)
            .json(operations)
    }

    /// Deletes a system.
    pub fn delete_system(&self, system_id: &str) -> OperationCall<'a, ()> {
        self.client
            .call(&ENDPOINTS.delete)
            .path_param("system_id", system_id)
    }
}
