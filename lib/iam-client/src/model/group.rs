use serde::{Deserialize, Serialize};

use super::Reference;

/// A named set of users and roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Identifier, assigned by the service.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Unique name of the group.
    pub name: String,
    /// Free text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tenant owning the group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<Reference>,
    /// Roles granted to every member.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<Reference>,
}

impl Group {
    /// Creates a group payload with a name only.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
