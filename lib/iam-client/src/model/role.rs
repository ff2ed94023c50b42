use serde::{Deserialize, Serialize};

use super::Reference;

/// A job function, defined as a set of grants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Identifier, assigned by the service.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Unique name of the role.
    pub name: String,
    /// Free text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Grants given by the role.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grants: Vec<Reference>,
}
