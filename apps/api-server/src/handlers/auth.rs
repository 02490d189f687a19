//! Authentication handlers.

use actix_web::{HttpResponse, web};

use rbac_core::ports::{AuthError, IdentityClaim};
use rbac_shared::dto::{LoginRequest, LoginResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/auth/login
///
/// The account lookup runs before the password compare, and the compare
/// before issuance, so an unknown email always yields 404 and a wrong
/// password for a known email always yields 400.
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Find user by email
    let account = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    // Verify password
    if !state
        .passwords
        .verify(&req.password, &account.user.password_hash)
    {
        tracing::info!(user_id = account.user.id, "Login rejected: bad password");
        return Err(AuthError::InvalidCredentials.into());
    }

    // Generate token
    let claim = IdentityClaim {
        user_id: account.user.id,
        company_id: account.company.id,
        role_id: account.role.id,
    };
    let token = state.tokens.issue(claim)?;

    tracing::info!(
        user_id = claim.user_id,
        company_id = claim.company_id,
        role = %account.role.name,
        "User logged in"
    );

    Ok(HttpResponse::Ok().json(LoginResponse::bearer(
        token,
        state.tokens.expiration_seconds() as u64,
    )))
}
