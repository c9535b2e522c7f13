use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use campusdesk_auth::{SessionClaims, verify_session_token};
use campusdesk_core::{AppError, Role};
use campusdesk_observability::track_jwt_validation;

use crate::state::AppState;
use crate::utils::cookies::session_token;

pub const UNAUTHENTICATED_MESSAGE: &str = "Please log in";

/// Extractor that validates the session token and provides the caller's claims.
///
/// The token is read from the session cookie first and from an
/// `Authorization: Bearer` header second. Every failure (missing, malformed,
/// expired or forged) is a 401.
#[derive(Debug, Clone)]
pub struct AuthUser(pub SessionClaims);

impl AuthUser {
    pub fn has_permission(&self, capability: &str) -> bool {
        campusdesk_core::set_grants(&self.0.permissions, capability)
    }

    pub fn role(&self) -> Role {
        self.0.role
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Already authenticated by `require_auth` further up the stack.
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let jar = CookieJar::from_headers(&parts.headers);
        let token = session_token(&jar, &state.cookie_config)
            .or_else(|| bearer_token(parts).map(str::to_string));

        let Some(token) = token else {
            track_jwt_validation("missing");
            return Err(AppError::unauthorized(UNAUTHENTICATED_MESSAGE.to_string()));
        };

        match verify_session_token(&token, &state.jwt_config) {
            Ok(claims) => {
                track_jwt_validation("valid");
                Ok(AuthUser(claims))
            }
            Err(rejection) => {
                tracing::debug!(reason = rejection.as_str(), "Rejected session token");
                track_jwt_validation(rejection.as_str());
                Err(AppError::unauthorized(UNAUTHENTICATED_MESSAGE.to_string()))
            }
        }
    }
}

/// Middleware that rejects unauthenticated requests and stores the caller in
/// the request extensions for later extractors.
pub async fn require_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    parts.extensions.insert(auth_user);

    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Declares an extractor that admits only callers holding `$permission`.
///
/// Callers without a token get 401; callers whose role lacks the capability
/// get 403.
#[macro_export]
macro_rules! require_permission {
    ($name:ident, $permission:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = campusdesk_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user =
                    $crate::middleware::auth::AuthUser::from_request_parts(parts, state).await?;

                $crate::middleware::role::check_permission(&auth_user, $permission)?;

                Ok($name(auth_user))
            }
        }
    };
}

require_permission!(RequireViewReports, campusdesk_core::permissions::VIEW_REPORTS);
require_permission!(RequireViewAuditLogs, campusdesk_core::permissions::VIEW_AUDIT_LOGS);
require_permission!(RequireManageBackups, campusdesk_core::permissions::MANAGE_BACKUPS);
