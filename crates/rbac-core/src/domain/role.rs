use serde::{Deserialize, Serialize};

/// Role entity - a named bundle of permissions held by users.
///
/// Only `name` takes part in authorization. `permissions` is carried for
/// completeness of the data model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: i32,
    pub name: String,
    pub permissions: Vec<String>,
}

impl Role {
    pub fn new(id: i32, name: impl Into<String>, permissions: Vec<String>) -> Self {
        Self {
            id,
            name: name.into(),
            permissions,
        }
    }
}
