//! Application configuration loaded from environment variables.

use std::env;

use rbac_infra::auth::DEFAULT_EXPIRATION_SECS;
use rbac_infra::{DatabaseConfig, JwtConfig};

use crate::telemetry::TelemetryConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// An unset `JWT_SECRET` yields an empty secret, which the token service
    /// refuses at construction.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = lookup("DATABASE_URL").map(|url| DatabaseConfig {
            url,
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10),
            min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", 1),
        });

        let jwt = JwtConfig {
            secret: lookup("JWT_SECRET").unwrap_or_default(),
            expiration_secs: parse_or(&lookup, "JWT_EXPIRATION_SECS", DEFAULT_EXPIRATION_SECS),
        };

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 3000),
            database,
            jwt,
            telemetry: TelemetryConfig::from_lookup(&lookup),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert!(config.database.is_none());
        assert!(config.jwt.secret.is_empty());
        assert_eq!(config.jwt.expiration_secs, 3600);
        assert!(!config.telemetry.json_logs);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost/rbac_demo"),
            ("DB_MAX_CONNECTIONS", "25"),
            ("JWT_SECRET", "s3cret"),
            ("JWT_EXPIRATION_SECS", "600"),
            ("LOG_FORMAT", "JSON"),
        ]);

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        let database = config.database.unwrap();
        assert_eq!(database.url, "postgres://localhost/rbac_demo");
        assert_eq!(database.max_connections, 25);
        assert_eq!(database.min_connections, 1);
        assert_eq!(config.jwt.secret, "s3cret");
        assert_eq!(config.jwt.expiration_secs, 600);
        assert!(config.telemetry.json_logs);
    }

    #[test]
    fn test_unparsable_numbers_fall_back() {
        let config = config_from(&[("PORT", "eighty"), ("JWT_EXPIRATION_SECS", "soon")]);

        assert_eq!(config.port, 3000);
        assert_eq!(config.jwt.expiration_secs, 3600);
    }
}
