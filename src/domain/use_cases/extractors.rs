use actix_web::{FromRequest, HttpRequest, HttpMessage};
use futures_util::future::{ready, Ready};

use crate::{
    entities::{session::{Claims, SessionUser}, user::UserRole},
    errors::AuthError,
};

fn session_user(req: &HttpRequest) -> Result<SessionUser, AuthError> {
    let extensions = req.extensions();
    let claims = extensions.get::<Claims>().ok_or(AuthError::MissingCredentials)?;
    SessionUser::try_from(claims)
}

fn session_user_with_role(req: &HttpRequest, role: UserRole) -> Result<SessionUser, AuthError> {
    let user = session_user(req)?;
    if user.role == role {
        Ok(user)
    } else {
        Err(AuthError::RoleRequired(role.to_string()))
    }
}

/// Any logged-in caller. Returns 401 when there is no valid session.
/// Usage: add `user: SessionClaims` as a handler parameter.
#[derive(Debug)]
pub struct SessionClaims(pub SessionUser);

impl FromRequest for SessionClaims {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(session_user(req).map(SessionClaims).map_err(Into::into))
    }
}

/// A logged-in student. Returns 401 for other roles.
#[derive(Debug)]
pub struct StudentClaims(pub SessionUser);

impl FromRequest for StudentClaims {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            session_user_with_role(req, UserRole::Student)
                .map(StudentClaims)
                .map_err(Into::into)
        )
    }
}

/// A logged-in faculty member. Returns 401 for other roles.
#[derive(Debug)]
pub struct FacultyClaims(pub SessionUser);

impl FromRequest for FacultyClaims {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            session_user_with_role(req, UserRole::Faculty)
                .map(FacultyClaims)
                .map_err(Into::into)
        )
    }
}
