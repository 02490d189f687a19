//! In-memory credential store - used when no database is configured and in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use rbac_core::domain::{Company, Role, Template, User, UserAccount};
use rbac_core::error::RepoError;
use rbac_core::ports::{BaseRepository, RoleRepository, TemplateRepository, UserRepository};

use super::mask_email;

/// In-memory store for companies, roles, users and templates.
///
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryStore {
    companies: RwLock<HashMap<i32, Company>>,
    roles: RwLock<HashMap<i32, Role>>,
    users: RwLock<HashMap<i32, User>>,
    templates: RwLock<Vec<Template>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_company(&self, company: Company) {
        self.companies.write().await.insert(company.id, company);
    }

    pub async fn insert_role(&self, role: Role) {
        self.roles.write().await.insert(role.id, role);
    }

    pub async fn insert_user(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    pub async fn insert_template(&self, template: Template) {
        self.templates.write().await.push(template);
    }

    pub async fn remove_role(&self, id: i32) -> Option<Role> {
        self.roles.write().await.remove(&id)
    }
}

#[async_trait]
impl BaseRepository<User, i32> for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let Some(user) = self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned()
        else {
            return Ok(None);
        };

        let company = self
            .companies
            .read()
            .await
            .get(&user.company_id)
            .cloned()
            .ok_or_else(|| {
                RepoError::Query(format!("user {} references a missing company", user.id))
            })?;

        let role = self
            .roles
            .read()
            .await
            .get(&user.role_id)
            .cloned()
            .ok_or_else(|| {
                RepoError::Query(format!("user {} references a missing role", user.id))
            })?;

        Ok(Some(UserAccount {
            user,
            company,
            role,
        }))
    }
}

#[async_trait]
impl BaseRepository<Role, i32> for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Role>, RepoError> {
        Ok(self.roles.read().await.get(&id).cloned())
    }
}

impl RoleRepository for InMemoryStore {}

#[async_trait]
impl TemplateRepository for InMemoryStore {
    async fn find_by_company(&self, company_id: i32) -> Result<Vec<Template>, RepoError> {
        let mut templates: Vec<Template> = self
            .templates
            .read()
            .await
            .iter()
            .filter(|t| t.company_id == company_id)
            .cloned()
            .collect();
        templates.sort_by_key(|t| t.id);

        Ok(templates)
    }
}
