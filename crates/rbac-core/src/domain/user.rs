use serde::{Deserialize, Serialize};

use super::{Company, Role};

/// User entity - belongs to exactly one company and holds exactly one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub company_id: i32,
    pub role_id: i32,
}

/// A user loaded together with its company and role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub user: User,
    pub company: Company,
    pub role: Role,
}
