use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::entities::user::{LoginUser, NewUser};
use crate::errors::{AppError, AuthError};
use crate::use_cases::extractors::SessionClaims;
use crate::AppState;

#[instrument(skip(state, user), fields(email = %user.email))]
pub async fn register(
    state: web::Data<AppState>,
    user: web::Json<NewUser>
) -> Result<impl Responder, AppError> {
    let grant = state.auth_handler.register(user.into_inner()).await?;

    Ok(HttpResponse::Created()
        .cookie(state.cookie_policy.session_cookie(grant.token))
        .json(grant.user))
}

#[instrument(skip(state, credentials), fields(email = %credentials.email))]
pub async fn login(
    state: web::Data<AppState>,
    credentials: web::Json<LoginUser>
) -> Result<impl Responder, AuthError> {
    let grant = state.auth_handler.login(credentials.into_inner()).await?;

    Ok(HttpResponse::Ok()
        .cookie(state.cookie_policy.session_cookie(grant.token))
        .json(grant.user))
}

pub async fn logout(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok()
        .cookie(state.cookie_policy.removal_cookie())
        .json(serde_json::json!({"message": "Logged out successfully"}))
}

#[instrument(skip(state, session), fields(user_id = session.0.id))]
pub async fn current_user(
    state: web::Data<AppState>,
    session: SessionClaims,
) -> Result<impl Responder, AppError> {
    let profile = state.auth_handler.current_user(session.0.id).await?;
    Ok(HttpResponse::Ok().json(profile))
}
