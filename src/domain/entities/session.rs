use serde::{Serialize, Deserialize};

use crate::entities::user::{UserProfile, UserRole};
use crate::errors::AuthError;

/// Claims carried by the signed session cookie.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub sub: String,
    pub role: UserRole,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> Result<i64, AuthError> {
        self.sub.parse().map_err(|_| AuthError::InvalidUserId)
    }
}

/// Outcome of a successful login or registration: the user plus the token
/// that the HTTP layer writes into the session cookie.
#[derive(Debug, Clone)]
pub struct SessionGrant {
    pub user: UserProfile,
    pub token: String,
}

/// The caller identified by a verified session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionUser {
    pub id: i64,
    pub role: UserRole,
}

impl TryFrom<&Claims> for SessionUser {
    type Error = AuthError;

    fn try_from(claims: &Claims) -> Result<Self, Self::Error> {
        Ok(SessionUser {
            id: claims.user_id()?,
            role: claims.role,
        })
    }
}
