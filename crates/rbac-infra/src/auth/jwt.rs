//! JWT token service implementation.

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use rbac_core::ports::{AuthError, IdentityClaim, TokenService};

/// Default token lifetime: one hour.
pub const DEFAULT_EXPIRATION_SECS: i64 = 3600;

/// JWT token service configuration.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_secs: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiration_secs: DEFAULT_EXPIRATION_SECS,
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .field("expiration_secs", &self.expiration_secs)
            .finish()
    }
}

/// Wire shape of the token payload.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    user_id: i32,
    company_id: i32,
    role_id: i32,
    exp: i64, // expiration timestamp
    iat: i64, // issued at
}

/// JWT-based token service signing with HS256.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiration_secs: i64,
}

impl JwtTokenService {
    /// Build the service; an empty secret is a configuration error.
    pub fn new(config: JwtConfig) -> Result<Self, AuthError> {
        if config.secret.trim().is_empty() {
            return Err(AuthError::Configuration(
                "signing secret is empty; set JWT_SECRET".to_string(),
            ));
        }
        if config.expiration_secs <= 0 {
            return Err(AuthError::Configuration(format!(
                "token lifetime must be positive, got {}s",
                config.expiration_secs
            )));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            expiration_secs: config.expiration_secs,
        })
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(&self, claim: IdentityClaim, now: DateTime<Utc>) -> Result<String, AuthError> {
        let exp = now + TimeDelta::seconds(self.expiration_secs);

        let claims = Claims {
            user_id: claim.user_id,
            company_id: claim.company_id,
            role_id: claim.role_id,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, claim: IdentityClaim) -> Result<String, AuthError> {
        self.issue_at(claim, Utc::now())
    }

    fn verify(&self, token: &str) -> Result<IdentityClaim, AuthError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    _ => AuthError::InvalidToken(e.to_string()),
                }
            })?;

        Ok(IdentityClaim {
            user_id: token_data.claims.user_id,
            company_id: token_data.claims.company_id,
            role_id: token_data.claims.role_id,
        })
    }

    fn expiration_seconds(&self) -> i64 {
        self.expiration_secs
    }
}
