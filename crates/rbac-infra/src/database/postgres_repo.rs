//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use rbac_core::domain::{Template, UserAccount};
use rbac_core::error::RepoError;
use rbac_core::ports::{RoleRepository, TemplateRepository, UserRepository};

use super::entity::company::Entity as CompanyEntity;
use super::entity::role::Entity as RoleEntity;
use super::entity::template::{self, Entity as TemplateEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::mask_email;
use super::postgres_base::{PostgresBaseRepository, query_error};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL role repository.
pub type PostgresRoleRepository = PostgresBaseRepository<RoleEntity>;

/// PostgreSQL template repository.
pub type PostgresTemplateRepository = PostgresBaseRepository<TemplateEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let Some(user) = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(query_error)?
        else {
            return Ok(None);
        };

        let company = CompanyEntity::find_by_id(user.company_id)
            .one(self.db.as_ref())
            .await
            .map_err(query_error)?
            .ok_or_else(|| {
                RepoError::Query(format!("user {} references a missing company", user.id))
            })?;

        let role = RoleEntity::find_by_id(user.role_id)
            .one(self.db.as_ref())
            .await
            .map_err(query_error)?
            .ok_or_else(|| {
                RepoError::Query(format!("user {} references a missing role", user.id))
            })?;

        Ok(Some(UserAccount {
            user: user.into(),
            company: company.into(),
            role: role.into(),
        }))
    }
}

impl RoleRepository for PostgresRoleRepository {}

#[async_trait]
impl TemplateRepository for PostgresTemplateRepository {
    async fn find_by_company(&self, company_id: i32) -> Result<Vec<Template>, RepoError> {
        let result = TemplateEntity::find()
            .filter(template::Column::CompanyId.eq(company_id))
            .order_by_asc(template::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
