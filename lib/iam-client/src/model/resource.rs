use serde::{Deserialize, Serialize};

use super::Reference;

/// An object protected by permissions, such as a company or an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Identifier, assigned by the service.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Name of the resource.
    pub name: String,
    /// Kind of resource, defined by the owning system.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    /// System owning the resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<Reference>,
    /// Parent resource in the hierarchy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Reference>,
}
