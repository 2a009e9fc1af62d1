use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, ResponseError,
};
use futures_util::future::{ok, Ready, LocalBoxFuture};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{
    auth::cookie::SESSION_COOKIE,
    entities::session::Claims,
    errors::AuthError,
    repositories::token::TokenServiceRepository,
    AppState,
};

/// Verifies the session cookie and exposes its claims to handlers through
/// request extensions. Requests without a valid session only reach public
/// routes; role checks are left to the extractors.
pub struct SessionMiddleware;

impl<S> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(SessionMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct SessionMiddlewareService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let public = is_public_route(req.path(), req.method().as_str());

            match read_session(&req) {
                Ok(Some(claims)) => {
                    req.extensions_mut().insert(claims);
                    service.call(req).await
                }
                // A stale cookie must not lock anyone out of login or registration
                Ok(None) | Err(_) if public => service.call(req).await,
                Ok(None) => {
                    tracing::debug!(path = req.path(), "Rejected request without session");
                    Ok(reject(req, AuthError::MissingCredentials))
                }
                Err(e) => {
                    tracing::warn!(path = req.path(), "Rejected request with unusable session: {}", e);
                    Ok(reject(req, e))
                }
            }
        })
    }
}

fn is_public_route(path: &str, method: &str) -> bool {
    if method == "OPTIONS" {
        return true;
    }

    matches!(
        (path, method),
        ("/", "GET") |
        ("/api/health", "GET") |
        ("/api/departments", "GET") |
        ("/api/register", "POST") |
        ("/api/login", "POST") |
        ("/api/logout", "POST")
    )
}

fn read_session(req: &ServiceRequest) -> Result<Option<Claims>, AuthError> {
    let Some(cookie) = req.cookie(SESSION_COOKIE) else {
        return Ok(None);
    };

    if cookie.value().is_empty() {
        return Ok(None);
    }

    let state = req.app_data::<web::Data<AppState>>()
        .ok_or_else(|| {
            tracing::error!("AppState missing in middleware");
            AuthError::MissingSessionService
        })?;

    let decoded = state.auth_handler.token_service.decode_session_token(cookie.value())?;
    Ok(Some(decoded.claims))
}

fn reject(req: ServiceRequest, err: AuthError) -> ServiceResponse<BoxBody> {
    req.into_response(err.error_response())
}
