use std::env;

use crate::env_or;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Session token lifetime in seconds.
    pub token_ttl: i64,
    /// Password reset token lifetime in seconds.
    pub reset_token_ttl: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "change-me-in-production".to_string()),
            token_ttl: env_or("JWT_EXPIRES_IN", 86400), // 1 day
            reset_token_ttl: env_or("RESET_TOKEN_EXPIRES_IN", 3600), // 1 hour
        }
    }
}
