use std::env;

use crate::env_or;
use crate::server::AppEnvironment;

/// Attributes of the HTTP-only cookie carrying the session token.
#[derive(Clone, Debug)]
pub struct CookieConfig {
    pub name: String,
    pub expires_in_days: i64,
    /// Only set in production so local HTTP development keeps working.
    pub secure: bool,
}

impl CookieConfig {
    pub fn from_env(environment: AppEnvironment) -> Self {
        Self {
            name: env::var("JWT_COOKIE_NAME").unwrap_or_else(|_| "token".to_string()),
            expires_in_days: env_or("JWT_COOKIE_EXPIRES_IN", 1),
            secure: environment.is_production(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_only_in_production() {
        assert!(CookieConfig::from_env(AppEnvironment::Production).secure);
        assert!(!CookieConfig::from_env(AppEnvironment::Development).secure);
        assert!(!CookieConfig::from_env(AppEnvironment::Test).secure);
    }
}
