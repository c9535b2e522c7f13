//! Authentication DTOs.

use std::collections::BTreeMap;

use campusdesk_auth::{SessionClaims, SessionIdentity};
use campusdesk_core::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Login request with email and password.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "A valid email is required"))]
    #[schema(example = "admin@school.test")]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "password123")]
    pub password: String,
}

/// A user's public profile, as returned by login and the current-user query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub permissions: Vec<String>,
}

impl From<SessionIdentity> for UserProfile {
    fn from(identity: SessionIdentity) -> Self {
        Self {
            id: identity.id,
            name: identity.name,
            email: identity.email,
            role: identity.role,
            permissions: identity.permissions,
        }
    }
}

impl From<&SessionClaims> for UserProfile {
    fn from(claims: &SessionClaims) -> Self {
        claims.identity().into()
    }
}

/// Successful login. The token itself travels in the HTTP-only cookie.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub user: UserProfile,
    pub expires_at: DateTime<Utc>,
}

/// Starts a password reset.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "A valid email is required"))]
    #[schema(example = "parent@school.test")]
    pub email: String,
}

/// Completes a password reset with the emailed token.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "newPassword123")]
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error body written by the server for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// The static role → capability table.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PermissionTableResponse {
    pub roles: BTreeMap<String, Vec<String>>,
}
