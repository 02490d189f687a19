#[cfg(test)]
mod tests {
    use crate::database::entity::{company, role, template, user};
    use crate::database::postgres_repo::{
        PostgresRoleRepository, PostgresTemplateRepository, PostgresUserRepository,
    };
    use std::sync::Arc;

    use rbac_core::domain::Role;
    use rbac_core::error::RepoError;
    use rbac_core::ports::{BaseRepository, TemplateRepository, UserRepository};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, RuntimeErr};
    use serde_json::json;

    fn user_model() -> user::Model {
        user::Model {
            id: 1,
            username: "alice".to_owned(),
            email: "a@b.com".to_owned(),
            password_hash: "$argon2id$stub".to_owned(),
            company_id: 10,
            role_id: 2,
        }
    }

    #[tokio::test]
    async fn test_find_user_by_email_loads_relations() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user_model()]])
            .append_query_results(vec![vec![company::Model {
                id: 10,
                name: "Acme".to_owned(),
            }]])
            .append_query_results(vec![vec![role::Model {
                id: 2,
                name: "user".to_owned(),
                permissions: json!(["templates:read"]),
            }]])
            .into_connection();

        let repo = PostgresUserRepository::new(db);

        let account = repo.find_by_email("a@b.com").await.unwrap().unwrap();

        assert_eq!(account.user.id, 1);
        assert_eq!(account.company.name, "Acme");
        assert_eq!(account.role.name, "user");
        assert_eq!(account.role.permissions, vec!["templates:read".to_string()]);
    }

    #[tokio::test]
    async fn test_find_user_by_email_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<user::Model>::new()])
            .into_connection();

        let repo = PostgresUserRepository::new(db);

        assert!(repo.find_by_email("nobody@b.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_user_with_dangling_role_is_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user_model()]])
            .append_query_results(vec![vec![company::Model {
                id: 10,
                name: "Acme".to_owned(),
            }]])
            .append_query_results(vec![Vec::<role::Model>::new()])
            .into_connection();

        let repo = PostgresUserRepository::new(db);

        assert!(repo.find_by_email("a@b.com").await.is_err());
    }

    #[tokio::test]
    async fn test_find_role_by_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![role::Model {
                id: 3,
                name: "admin".to_owned(),
                permissions: json!(["templates:read", 5, "templates:write"]),
            }]])
            .into_connection();

        let repo = PostgresRoleRepository::new(db);

        let role = BaseRepository::<Role, i32>::find_by_id(&repo, 3).await.unwrap();

        let role = role.unwrap();
        assert_eq!(role.name, "admin");
        assert_eq!(
            role.permissions,
            vec!["templates:read".to_string(), "templates:write".to_string()]
        );
    }

    #[tokio::test]
    async fn test_find_templates_by_company() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![
                template::Model {
                    id: 1,
                    name: "Invoice".to_owned(),
                    data: json!({"fields": ["amount"]}),
                    company_id: 10,
                },
                template::Model {
                    id: 2,
                    name: "Receipt".to_owned(),
                    data: json!({}),
                    company_id: 10,
                },
            ]])
            .into_connection();

        let repo = PostgresTemplateRepository::new(db);

        let templates = repo.find_by_company(10).await.unwrap();

        assert_eq!(templates.len(), 2);
        assert_eq!(templates[0].name, "Invoice");
        assert_eq!(templates[0].data, json!({"fields": ["amount"]}));
    }

    #[tokio::test]
    async fn test_find_role_connection_failure_is_connection_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Conn(RuntimeErr::Internal(
                "connection refused".to_owned(),
            ))])
            .into_connection();

        let repo = PostgresRoleRepository::new(db);

        let result = BaseRepository::<Role, i32>::find_by_id(&repo, 3).await;

        assert!(matches!(result, Err(RepoError::Connection(_))));
    }

    #[tokio::test]
    async fn test_find_role_bad_query_is_query_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Custom("relation does not exist".to_owned())])
            .into_connection();

        let repo = PostgresRoleRepository::new(db);

        let result = BaseRepository::<Role, i32>::find_by_id(&repo, 3).await;

        assert!(matches!(result, Err(RepoError::Query(_))));
    }

    #[tokio::test]
    async fn test_repositories_share_one_connection() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(vec![vec![role::Model {
                    id: 2,
                    name: "user".to_owned(),
                    permissions: json!([]),
                }]])
                .append_query_results(vec![Vec::<template::Model>::new()])
                .into_connection(),
        );

        let roles = PostgresRoleRepository::new(db.clone());
        let templates = PostgresTemplateRepository::new(db);

        let role = BaseRepository::<Role, i32>::find_by_id(&roles, 2).await.unwrap();
        assert_eq!(role.map(|r| r.name), Some("user".to_string()));
        assert!(templates.find_by_company(10).await.unwrap().is_empty());
    }
}
