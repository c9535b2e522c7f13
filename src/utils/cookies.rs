//! The session cookie.
//!
//! The token is stored in an HTTP-only, `SameSite=Strict` cookie so scripts
//! in the page can never read it.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use campusdesk_config::CookieConfig;
use time::{Duration, OffsetDateTime};

pub fn session_cookie(token: String, config: &CookieConfig) -> Cookie<'static> {
    Cookie::build((config.name.clone(), token))
        .path("/")
        .http_only(true)
        .secure(config.secure)
        .same_site(SameSite::Strict)
        .max_age(Duration::days(config.expires_in_days))
        .build()
}

/// A cookie that overwrites the session cookie and expires immediately.
pub fn expired_session_cookie(config: &CookieConfig) -> Cookie<'static> {
    Cookie::build((config.name.clone(), ""))
        .path("/")
        .http_only(true)
        .secure(config.secure)
        .same_site(SameSite::Strict)
        .max_age(Duration::ZERO)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build()
}

pub fn set_session_cookie(jar: CookieJar, token: String, config: &CookieConfig) -> CookieJar {
    jar.add(session_cookie(token, config))
}

/// Always emits a `Set-Cookie`, even when the request carried no cookie.
pub fn clear_session_cookie(jar: CookieJar, config: &CookieConfig) -> CookieJar {
    jar.add(expired_session_cookie(config))
}

pub fn session_token(jar: &CookieJar, config: &CookieConfig) -> Option<String> {
    jar.get(&config.name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}
