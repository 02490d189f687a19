//! Authentication and authorization ports.

use serde::{Deserialize, Serialize};

/// Identity fields embedded in every issued token.
///
/// These three ids are the whole payload; expiry is managed by the token
/// implementation and never surfaces here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaim {
    pub user_id: i32,
    pub company_id: i32,
    pub role_id: i32,
}

/// Token service trait for issuing and verifying signed tokens.
pub trait TokenService: Send + Sync {
    /// Sign a claim into a time-limited token.
    fn issue(&self, claim: IdentityClaim) -> Result<String, AuthError>;

    /// Check signature and expiry, then decode the claim.
    fn verify(&self, token: &str) -> Result<IdentityClaim, AuthError>;

    /// Lifetime of an issued token in seconds.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored digest.
    ///
    /// A digest that cannot be parsed is reported as a mismatch.
    fn verify(&self, password: &str, digest: &str) -> bool;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Token service misconfigured: {0}")]
    Configuration(String),

    #[error("Hashing error: {0}")]
    Hashing(String),

    #[error("Credential lookup failed: {0}")]
    Backend(String),
}

impl AuthError {
    /// True for every failure that means "no valid identity was presented".
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            AuthError::MissingAuth | AuthError::InvalidToken(_) | AuthError::TokenExpired
        )
    }
}
