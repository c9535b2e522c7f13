//! # CampusDesk Config
//!
//! Configuration structures loaded from environment variables. Every value has
//! a development default; configuration is read once at startup and never
//! mutated afterwards.
//!
//! - [`server`]: Listen address, deployment environment and credential store backend
//! - [`jwt`]: Token signing secret and lifetimes
//! - [`cookie`]: Session cookie attributes
//! - [`email`]: SMTP settings and the frontend URL used in reset links
//! - [`cors`]: Allowed origins
//!
//! # Example
//!
//! ```ignore
//! use campusdesk_config::{CookieConfig, JwtConfig, ServerConfig};
//!
//! let server = ServerConfig::from_env();
//! let jwt_config = JwtConfig::from_env();
//! let cookie_config = CookieConfig::from_env(server.environment);
//! ```

pub mod cookie;
pub mod cors;
pub mod email;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use cookie::CookieConfig;
pub use cors::CorsConfig;
pub use email::EmailConfig;
pub use jwt::JwtConfig;
pub use server::{AppEnvironment, CredentialStoreKind, ServerConfig};

pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
