use jsonwebtoken::{encode, Header, decode, Validation, TokenData, Algorithm};
use chrono::{Utc, Duration};

use crate::entities::session::Claims;
use crate::entities::user::User;
use crate::repositories::token::TokenServiceRepository;
use crate::settings::{AppConfig, SessionKeys};
use crate::errors::AuthError;

const SESSION_ALGORITHM: Algorithm = Algorithm::HS512;

/// Issues and verifies the HS512-signed token stored in the session cookie.
#[derive(Clone)]
pub struct SessionService {
    keys: SessionKeys,
    ttl: Duration,
}

impl SessionService {
    pub fn new(config: &AppConfig) -> Self {
        SessionService {
            keys: SessionKeys::from(config),
            ttl: Duration::hours(config.session_ttl_hours),
        }
    }
}

impl TokenServiceRepository for SessionService {
    fn create_session_token(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = (now + self.ttl).timestamp() as usize;

        let claims = Claims {
            sub: user.id.to_string(),
            role: user.role,
            exp,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(SESSION_ALGORITHM), &claims, &self.keys.encoding).map_err(AuthError::from)
    }

    fn decode_session_token(&self, token: &str) -> Result<TokenData<Claims>, AuthError> {
        let mut validation = Validation::new(SESSION_ALGORITHM);
        validation.validate_exp = true;

        decode::<Claims>(token, &self.keys.decoding, &validation).map_err(AuthError::from)
    }
}
