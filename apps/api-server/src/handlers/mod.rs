//! HTTP handlers and route configuration.

mod auth;
mod health;
mod templates;

use actix_web::{error, web};

use crate::middleware::auth::Authorize;
use crate::middleware::error::AppError;

/// Roles allowed to list templates.
const TEMPLATE_READERS: [&str; 2] = ["user", "admin"];

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .service(web::scope("/auth").route("/login", web::post().to(auth::login)))
            // Gated routes
            .service(
                web::resource("/templates")
                    .wrap(Authorize::roles(TEMPLATE_READERS))
                    .route(web::get().to(templates::list_templates)),
            ),
    );
}

/// Malformed JSON bodies become 400 with the usual error body.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = match &err {
            error::JsonPayloadError::ContentType => "Expected application/json".to_string(),
            other => other.to_string(),
        };
        AppError::BadRequest(message).into()
    })
}
