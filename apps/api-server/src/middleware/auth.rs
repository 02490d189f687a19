//! Authorization gate middleware and the identity extractor.

use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest,
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header,
    web,
};
use std::future::{Future, Ready, ready};
use std::ops::Deref;
use std::pin::Pin;
use std::rc::Rc;

use rbac_core::RoleGate;
use rbac_core::ports::{AuthError, IdentityClaim};

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Gate middleware factory - admits requests whose token role is allowed.
///
/// ```ignore
/// web::resource("/templates")
///     .wrap(Authorize::roles(["user", "admin"]))
///     .route(web::get().to(list_templates))
/// ```
pub struct Authorize {
    gate: Rc<RoleGate>,
}

impl Authorize {
    pub fn roles<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            gate: Rc::new(RoleGate::new(roles)),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Authorize
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthorizeMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        tracing::debug!(
            allowed = ?self.gate.allowed().collect::<Vec<_>>(),
            "Role gate installed"
        );
        ready(Ok(AuthorizeMiddleware {
            service: Rc::new(service),
            gate: self.gate.clone(),
        }))
    }
}

pub struct AuthorizeMiddleware<S> {
    service: Rc<S>,
    gate: Rc<RoleGate>,
}

impl<S, B> Service<ServiceRequest> for AuthorizeMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let gate = self.gate.clone();

        Box::pin(async move {
            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                tracing::error!("AppState not found in app data");
                let err = AppError::Internal("Server configuration error".to_string());
                return Ok(req.error_response(err).map_into_right_body());
            };

            let authorization = match authorization_header(&req) {
                Ok(value) => value,
                Err(e) => return Ok(req.error_response(AppError::from(e)).map_into_right_body()),
            };

            let decision = gate
                .check(
                    authorization.as_deref(),
                    state.tokens.as_ref(),
                    state.roles.as_ref(),
                )
                .await;

            match decision {
                Ok(claim) => {
                    req.extensions_mut().insert(claim);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(e) => Ok(req.error_response(AppError::from(e)).map_into_right_body()),
            }
        })
    }
}

fn authorization_header(req: &ServiceRequest) -> Result<Option<String>, AuthError> {
    req.headers()
        .get(header::AUTHORIZATION)
        .map(|value| {
            value
                .to_str()
                .map(str::to_owned)
                .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))
        })
        .transpose()
}

/// Claim of the caller, available to handlers behind [`Authorize`].
///
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, user {}!", identity.user_id)
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Identity(pub IdentityClaim);

impl Deref for Identity {
    type Target = IdentityClaim;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // Only the gate inserts a claim; an ungated route never sees one
        let claim = req.extensions().get::<IdentityClaim>().copied();

        ready(
            claim
                .map(Identity)
                .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string())),
        )
    }
}
