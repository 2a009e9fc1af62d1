use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};

use crate::settings::AppConfig;

pub const SESSION_COOKIE: &str = "skill_tracker_session";

/// How the session cookie is written back to the browser.
#[derive(Debug, Clone)]
pub struct CookiePolicy {
    secure: bool,
    max_age_hours: i64,
}

impl CookiePolicy {
    pub fn new(config: &AppConfig) -> Self {
        CookiePolicy {
            secure: config.is_production(),
            max_age_hours: config.session_ttl_hours,
        }
    }

    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE, token)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(CookieDuration::hours(self.max_age_hours))
            .finish()
    }

    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(SESSION_COOKIE, "")
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .finish();
        cookie.make_removal();
        cookie
    }
}
