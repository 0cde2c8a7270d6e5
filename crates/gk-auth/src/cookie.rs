//! Session cookie attributes

use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, SameSite};
use gk_core::config::SessionConfig;

/// Cookie configuration for sessions
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub path: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    /// Lifetime in seconds
    pub max_age: i64,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "session".to_string(),
            path: "/".to_string(),
            secure: true,
            http_only: true,
            same_site: SameSite::Lax,
            max_age: 60 * 60 * 24,
        }
    }
}

impl CookieConfig {
    /// Create a development configuration (non-secure)
    pub fn development() -> Self {
        Self {
            secure: false,
            ..Default::default()
        }
    }

    /// Derive cookie attributes from the session settings
    pub fn from_session_config(config: &SessionConfig, production: bool) -> Self {
        Self {
            name: config.cookie_name.clone(),
            secure: production,
            max_age: config.ttl_seconds,
            ..Default::default()
        }
    }

    /// Build the cookie carrying a session token
    pub fn build_cookie(&self, token: impl Into<String>) -> Cookie<'static> {
        Cookie::build((self.name.clone(), token.into()))
            .path(self.path.clone())
            .http_only(self.http_only)
            .secure(self.secure)
            .same_site(self.same_site)
            .max_age(time::Duration::seconds(self.max_age))
            .build()
    }

    /// Cookie to hand to `CookieJar::remove`; path must match the stored cookie
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((self.name.clone(), ""))
            .path(self.path.clone())
            .build()
    }

    /// Empty cookie that expires immediately, sent whether or not the
    /// browser still holds a session
    pub fn expired_cookie(&self) -> Cookie<'static> {
        Cookie::build((self.name.clone(), ""))
            .path(self.path.clone())
            .http_only(self.http_only)
            .secure(self.secure)
            .same_site(self.same_site)
            .max_age(time::Duration::ZERO)
            .build()
    }

    /// Whether a response already writes this cookie
    pub fn is_set_in(&self, headers: &HeaderMap) -> bool {
        headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| Cookie::parse(value).ok())
            .any(|cookie| cookie.name() == self.name)
    }
}
