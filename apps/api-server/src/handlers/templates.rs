//! Template listing, scoped to the caller's company.

use actix_web::{HttpResponse, web};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/templates - gated to `user` and `admin`
pub async fn list_templates(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let templates = state.templates.find_by_company(identity.company_id).await?;

    tracing::debug!(
        user_id = identity.user_id,
        company_id = identity.company_id,
        count = templates.len(),
        "Listed templates"
    );

    Ok(HttpResponse::Ok().json(templates))
}
