//! Role and capability checks for Axum.
//!
//! Routes are gated either by the [`require_admin`] layer or by the
//! `require_permission!` extractors, which call [`check_permission`].

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use campusdesk_core::{AppError, is_admin_role};
use campusdesk_observability::track_authorization_check;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub const ADMIN_REQUIRED_MESSAGE: &str = "Access denied. Administrator privileges required.";

/// Fails with 403 unless the caller's permissions grant `capability`.
pub fn check_permission(auth_user: &AuthUser, capability: &str) -> Result<(), AppError> {
    let allowed = auth_user.has_permission(capability);
    track_authorization_check(allowed, auth_user.role().as_str());

    if !allowed {
        tracing::debug!(
            user_id = %auth_user.0.sub,
            role = %auth_user.role(),
            capability,
            "Permission denied"
        );
        return Err(AppError::forbidden(format!(
            "Access denied. Missing required permission: {}",
            capability
        )));
    }

    Ok(())
}

fn check_admin(auth_user: &AuthUser) -> Result<(), AppError> {
    let allowed = is_admin_role(Some(auth_user.role()));
    track_authorization_check(allowed, auth_user.role().as_str());

    if !allowed {
        return Err(AppError::forbidden(ADMIN_REQUIRED_MESSAGE.to_string()));
    }

    Ok(())
}

/// Middleware for routes reserved to SUPER_ADMIN and SCHOOL_ADMIN.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, middleware};
/// use crate::middleware::role::require_admin;
///
/// let admin_routes = Router::new()
///     .route("/admin", get(admin_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
/// ```
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    let result = match AuthUser::from_request_parts(&mut parts, &state).await {
        Ok(auth_user) => check_admin(&auth_user).map(|()| auth_user),
        Err(e) => Err(e),
    };

    match result {
        Ok(auth_user) => {
            parts.extensions.insert(auth_user);
            next.run(Request::from_parts(parts, body)).await
        }
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusdesk_auth::SessionClaims;
    use campusdesk_core::{Role, capability_strings};

    fn user(role: Role) -> AuthUser {
        AuthUser(SessionClaims {
            sub: uuid::Uuid::new_v4().to_string(),
            email: "someone@school.test".to_string(),
            name: "Someone".to_string(),
            role,
            permissions: capability_strings(role),
            exp: 0,
            iat: 0,
        })
    }

    #[test]
    fn test_check_permission() {
        assert!(check_permission(&user(Role::Teacher), "manage_attendance").is_ok());

        let err = check_permission(&user(Role::Student), "manage_attendance").unwrap_err();
        assert_eq!(err.status.as_u16(), 403);
    }

    #[test]
    fn test_super_admin_wildcard_passes_any_capability() {
        assert!(check_permission(&user(Role::SuperAdmin), "anything_at_all").is_ok());
    }

    #[test]
    fn test_check_admin() {
        assert!(check_admin(&user(Role::SuperAdmin)).is_ok());
        assert!(check_admin(&user(Role::SchoolAdmin)).is_ok());

        let err = check_admin(&user(Role::Teacher)).unwrap_err();
        assert_eq!(err.message(), ADMIN_REQUIRED_MESSAGE);
    }
}
