use serde::{Deserialize, Serialize};

/// Company entity - the tenant that owns users and templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: i32,
    pub name: String,
}
