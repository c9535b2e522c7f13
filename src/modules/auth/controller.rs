use axum::Json;
use axum::extract::State;
use axum_extra::extract::CookieJar;
use campusdesk_core::{AppError, permission_table};
use campusdesk_models::{
    ErrorResponse, ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse,
    PermissionTableResponse, ResetPasswordRequest, UserProfile,
};
use tracing::instrument;

use super::service::AuthService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::cookies::{clear_session_cookie, set_session_cookie};
use crate::validator::ValidatedJson;

/// Log in with email and password
///
/// The session token is returned in an HTTP-only cookie, never in the body.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful; session cookie set", body = LoginResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login_user(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let outcome = AuthService::login(&state, dto).await?;
    let jar = set_session_cookie(jar, outcome.token, &state.cookie_config);
    Ok((jar, Json(outcome.response)))
}

/// Log out
///
/// Clears the session cookie. Succeeds whether or not a session existed.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn logout_user(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    let jar = clear_session_cookie(jar, &state.cookie_config);
    (jar, Json(MessageResponse::new("Logged out successfully")))
}

/// Current user
///
/// Answered from the token claims alone.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "The authenticated user", body = UserProfile),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("cookie_auth" = []), ("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip_all, fields(user_id = %auth_user.0.sub))]
pub async fn get_current_user(auth_user: AuthUser) -> Json<UserProfile> {
    Json(UserProfile::from(&auth_user.0))
}

/// Role to capability table
#[utoipa::path(
    get,
    path = "/api/auth/permissions",
    responses(
        (status = 200, description = "Capabilities granted to each role", body = PermissionTableResponse)
    ),
    tag = "Authentication"
)]
pub async fn get_permission_table() -> Json<PermissionTableResponse> {
    Json(PermissionTableResponse {
        roles: permission_table(),
    })
}

/// Request a password reset email
#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Reset email sent if the account exists", body = MessageResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ForgotPasswordRequest>,
) -> Json<MessageResponse> {
    AuthService::forgot_password(&state, &dto.email).await;
    Json(MessageResponse::new(
        "If an account with that email exists, a password reset link has been sent",
    ))
}

/// Reset password with a token
#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset", body = MessageResponse),
        (status = 400, description = "Invalid or expired reset token", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    AuthService::reset_password(&state, dto).await?;
    Ok(Json(MessageResponse::new(
        "Password has been reset successfully",
    )))
}
