//! Client-side route gating.
//!
//! Uses the same resolver as the server, so the client never offers a page
//! the server would refuse.

use campusdesk_core::has_permission;

use crate::state::SessionState;

pub const LOGIN_PATH: &str = "/login";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Allowed,
    /// The session is still being resolved; render a loading indicator.
    Pending,
    RedirectToLogin,
    RedirectToUnauthorized,
}

impl RouteAccess {
    pub fn redirect_path(&self) -> Option<&'static str> {
        match self {
            RouteAccess::RedirectToLogin => Some(LOGIN_PATH),
            RouteAccess::RedirectToUnauthorized => Some(UNAUTHORIZED_PATH),
            RouteAccess::Allowed | RouteAccess::Pending => None,
        }
    }
}

/// Decides whether the current session may open a route requiring
/// `required` (or just a signed-in user when `None`).
pub fn route_access(session: &SessionState, required: Option<&str>) -> RouteAccess {
    let Some(user) = &session.user else {
        return if session.loading {
            RouteAccess::Pending
        } else {
            RouteAccess::RedirectToLogin
        };
    };

    match required {
        Some(capability) if !has_permission(Some(user.role), capability) => {
            RouteAccess::RedirectToUnauthorized
        }
        _ => RouteAccess::Allowed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusdesk_core::{Role, capability_strings};
    use campusdesk_models::UserProfile;

    fn signed_in(role: Role) -> SessionState {
        SessionState {
            user: Some(UserProfile {
                id: "1".to_string(),
                name: "Test".to_string(),
                email: "test@school.test".to_string(),
                role,
                permissions: capability_strings(role),
            }),
            ..SessionState::default()
        }
    }

    #[test]
    fn test_signed_out_goes_to_login() {
        let access = route_access(&SessionState::default(), None);
        assert_eq!(access, RouteAccess::RedirectToLogin);
        assert_eq!(access.redirect_path(), Some("/login"));
    }

    #[test]
    fn test_waits_while_bootstrapping() {
        let state = SessionState {
            loading: true,
            ..SessionState::default()
        };
        assert_eq!(route_access(&state, Some("view_reports")), RouteAccess::Pending);
    }

    #[test]
    fn test_capability_gate() {
        let teacher = signed_in(Role::Teacher);
        assert_eq!(
            route_access(&teacher, Some("manage_grades")),
            RouteAccess::Allowed
        );
        assert_eq!(
            route_access(&teacher, Some("view_audit_logs")),
            RouteAccess::RedirectToUnauthorized
        );
        assert_eq!(route_access(&teacher, None), RouteAccess::Allowed);
    }

    #[test]
    fn test_super_admin_opens_everything() {
        let admin = signed_in(Role::SuperAdmin);
        assert_eq!(
            route_access(&admin, Some("manage_backups")),
            RouteAccess::Allowed
        );
    }
}
