use serde::{Deserialize, Serialize};

use super::Reference;

/// An action allowed on resources of a system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    /// Identifier, assigned by the service.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Unique name of the permission.
    pub name: String,
    /// Free text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// System declaring the permission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<Reference>,
}
