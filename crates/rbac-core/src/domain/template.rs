use serde::{Deserialize, Serialize};

/// Template entity - an arbitrary JSON document scoped to one company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: i32,
    pub name: String,
    pub data: serde_json::Value,
    pub company_id: i32,
}
