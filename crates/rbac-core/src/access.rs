//! Role gate - the per-request authorization decision.
//!
//! A request moves through three states: it starts unauthenticated, becomes
//! authenticated once a bearer token verifies, and is permitted once the
//! token's role resolves to a name in the allowed set. Every other outcome
//! is terminal: [`AuthError::MissingAuth`], [`AuthError::InvalidToken`] and
//! [`AuthError::TokenExpired`] mean 401, [`AuthError::InsufficientPermissions`]
//! means 403.

use std::collections::BTreeSet;

use crate::ports::{AuthError, BaseRepository, IdentityClaim, RoleRepository, TokenService};

const BEARER_PREFIX: &str = "Bearer ";

/// Set of role names allowed through a gated endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGate {
    allowed: BTreeSet<String>,
}

impl RoleGate {
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// Check a role name against the allowed set.
    pub fn permits(&self, role_name: &str) -> bool {
        self.allowed.contains(role_name)
    }

    pub fn allowed(&self) -> impl Iterator<Item = &str> {
        self.allowed.iter().map(String::as_str)
    }

    /// Evaluate one request given the raw `Authorization` header value.
    ///
    /// The header is checked before anything else, and the token is verified
    /// before the role store is consulted.
    pub async fn check(
        &self,
        authorization: Option<&str>,
        tokens: &dyn TokenService,
        roles: &dyn RoleRepository,
    ) -> Result<IdentityClaim, AuthError> {
        let header = authorization.ok_or(AuthError::MissingAuth)?;
        let token = bearer_token(header)?;
        let claim = tokens.verify(token)?;

        let role = roles
            .find_by_id(claim.role_id)
            .await
            .map_err(|e| AuthError::Backend(e.to_string()))?;

        match role {
            Some(role) if self.permits(&role.name) => Ok(claim),
            Some(role) => {
                tracing::warn!(
                    user_id = claim.user_id,
                    role_id = claim.role_id,
                    role = %role.name,
                    "Role not permitted"
                );
                Err(AuthError::InsufficientPermissions)
            }
            None => {
                tracing::warn!(
                    user_id = claim.user_id,
                    role_id = claim.role_id,
                    "Token role no longer exists"
                );
                Err(AuthError::InsufficientPermissions)
            }
        }
    }
}

/// Extract the token from a `Bearer <token>` header value.
pub fn bearer_token(header: &str) -> Result<&str, AuthError> {
    match header.strip_prefix(BEARER_PREFIX).map(str::trim) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::InvalidToken("Expected Bearer token".to_string())),
    }
}
