//! Application state - shared across all handlers.

use std::sync::Arc;

use rbac_core::ports::{
    PasswordService, RoleRepository, TemplateRepository, TokenService, UserRepository,
};
use rbac_infra::{Argon2PasswordService, InMemoryStore, JwtTokenService};

use crate::config::AppConfig;

#[cfg(feature = "postgres")]
use anyhow::Context;
#[cfg(feature = "postgres")]
use rbac_infra::database::{
    DatabaseConnections, PostgresRoleRepository, PostgresTemplateRepository,
    PostgresUserRepository,
};

/// Shared application state.
///
/// Everything here is read-only after startup, so handlers never lock.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub roles: Arc<dyn RoleRepository>,
    pub templates: Arc<dyn TemplateRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// A missing signing secret or a configured database that cannot be
    /// reached is fatal. Only an unset `DATABASE_URL` selects the in-memory
    /// store.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone())?);
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        #[cfg(feature = "postgres")]
        let state = {
            if let Some(db_config) = &config.database {
                let connections = DatabaseConnections::init(db_config)
                    .await
                    .inspect_err(|e| tracing::error!("Failed to connect to database: {}", e))
                    .context("failed to connect to the configured database")?;
                let db = Arc::new(connections.main);

                Self {
                    users: Arc::new(PostgresUserRepository::new(db.clone())),
                    roles: Arc::new(PostgresRoleRepository::new(db.clone())),
                    templates: Arc::new(PostgresTemplateRepository::new(db)),
                    tokens,
                    passwords,
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory(Arc::new(InMemoryStore::new()), tokens, passwords)
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            tracing::info!("Running without postgres feature - using in-memory store");
            Self::in_memory(Arc::new(InMemoryStore::new()), tokens, passwords)
        };

        tracing::info!(
            token_lifetime_secs = state.tokens.expiration_seconds(),
            "Application state initialized"
        );

        Ok(state)
    }

    /// State backed entirely by one in-memory store.
    pub fn in_memory(
        store: Arc<InMemoryStore>,
        tokens: Arc<dyn TokenService>,
        passwords: Arc<dyn PasswordService>,
    ) -> Self {
        Self {
            users: store.clone(),
            roles: store.clone(),
            templates: store,
            tokens,
            passwords,
        }
    }
}

#[cfg(test)]
mod tests {
    use rbac_core::ports::AuthError;
    use rbac_infra::JwtConfig;

    use super::*;
    use crate::telemetry::TelemetryConfig;

    fn config(secret: &str) -> AppConfig {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            database: None,
            jwt: JwtConfig::new(secret),
            telemetry: TelemetryConfig::default(),
        }
    }

    #[actix_rt::test]
    async fn test_missing_secret_prevents_startup() {
        let err = AppState::new(&config("")).await.err().unwrap();

        assert!(matches!(
            err.downcast_ref::<AuthError>(),
            Some(AuthError::Configuration(_))
        ));
    }

    #[actix_rt::test]
    async fn test_state_without_database_uses_memory_store() {
        let state = AppState::new(&config("secret")).await.unwrap();

        assert!(state.users.find_by_email("a@b.com").await.unwrap().is_none());
        assert_eq!(state.tokens.expiration_seconds(), 3600);
    }

    #[cfg(feature = "postgres")]
    #[actix_rt::test]
    async fn test_unreachable_database_prevents_startup() {
        let mut config = config("secret");
        config.database = Some(rbac_infra::database::DatabaseConfig {
            url: "postgres://u:p@127.0.0.1:1/rbac".to_string(),
            max_connections: 1,
            min_connections: 0,
        });

        let err = AppState::new(&config).await.err().unwrap();

        assert!(err.to_string().contains("configured database"));
    }
}
