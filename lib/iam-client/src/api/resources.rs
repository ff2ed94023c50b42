use std::sync::LazyLock;

use super::{Endpoints, ListOptions, OperationNames};
use crate::client::{IamClient, OperationCall};
use crate::model::{Page, PatchOperation, Resource};

static ENDPOINTS: LazyLock<Endpoints<Resource>> = LazyLock::new(|| {
    Endpoints::new(
        &OperationNames {
            list: "listResources",
            get: "getResource",
            create: "createResource",
            replace: "replaceResource",
            patch: "patchResource",
            delete: "deleteResource",
        },
        "/resources",
        "/resources/{resource_id}",
        "iam:resources",
    )
});

/// Operations on [`Resource`]s.
#[derive(Debug, Clone, Copy)]
pub struct ResourcesApi<'a> {
    client: &'a IamClient,
}

impl IamClient {
    /// Operations on resources.
    pub fn resources(&self) -> ResourcesApi<'_> {
        ResourcesApi { client: self }
    }
}

impl<'a> ResourcesApi<'a> {
    /// Lists the resources matching `options`.
    pub fn list_resources(&self, options: &ListOptions) -> OperationCall<'a, Page<Resource>> {
        self.client.call(&ENDPOINTS.list).with_query(options.to_query())
    }

    /// Retrieves a resource.
    pub fn get_resource(&self, resource_id: &str) -> OperationCall<'a, Resource> {
        self.client
            .call(&ENDPOINTS.get)
            .path_param("resource_id", resource_id)
    }

    /// Creates a resource.
    pub fn create_resource(&self, resource: &Resource) -> OperationCall<'a, Resource> {
        self.client.call(&ENDPOINTS.create).json(resource)
    }

    /// Replaces every field of a resource.
    pub fn replace_resource(
        &self,
        resource_id: &str,
        resource: &Resource,
    ) -> OperationCall<'a, Resource> {
        self.client
            .call(&ENDPOINTS.replace)
            .path_param("resource_id", resource_id)
            .json(resource)
    }

    /// Applies a JSON patch to a resource.
    pub fn patch_resource(
        &self,
        resource_id: &str,
        operations: &[PatchOperation],
    ) -> OperationCall<'a, Resource> {
        self.client
            .call(&ENDPOINTS.patch)
            .path_param("resource_id", resource_id)
            .json(operations)
    }

    /// Deletes a resource.
    pub fn delete_resource(&self, resource_id: &str) -> OperationCall<'a, ()> {
        self.client
            .call(&ENDPOINTS.delete)
            .path_param("resource_id", resource_id)
    }
}
