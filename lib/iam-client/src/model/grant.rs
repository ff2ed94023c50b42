use serde::{Deserialize, Serialize};

use super::Reference;

/// A bundle of permissions that can be assigned as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grant {
    /// Identifier, assigned by the service.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Unique name of the grant.
    pub name: String,
    /// Free text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Permissions bundled by the grant.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<Reference>,
}
