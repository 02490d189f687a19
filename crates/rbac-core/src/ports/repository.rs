use async_trait::async_trait;

use crate::domain::{Role, Template, User, UserAccount};
use crate::error::RepoError;

/// Lookup of a single entity by primary key.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i32> {
    /// Find a user by email address, loading its company and role.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, RepoError>;
}

/// Role repository.
pub trait RoleRepository: BaseRepository<Role, i32> {}

/// Template repository.
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// All templates owned by a company.
    async fn find_by_company(&self, company_id: i32) -> Result<Vec<Template>, RepoError>;
}
