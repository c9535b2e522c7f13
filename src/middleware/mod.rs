//! Middleware and extractors for authentication and authorization.
//!
//! - [`auth`]: Session token extraction and the `require_permission!` extractors
//! - [`role`]: Role checks and the admin gate
//!
//! # Authentication Flow
//!
//! 1. The client sends the session cookie (or an `Authorization: Bearer` header)
//! 2. `AuthUser` verifies the token and extracts the claims
//! 3. Role and permission checks run against those claims only
//! 4. The handler executes if all checks pass
//!
//! A missing or invalid token is always 401. A valid token lacking the role or
//! capability is always 403.

pub mod auth;
pub mod role;
