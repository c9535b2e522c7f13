use std::sync::LazyLock;

use campusdesk_auth::{create_reset_token, issue_session_token, verify_reset_token};
use campusdesk_core::{AppError, hash_password, verify_password};
use campusdesk_models::{LoginRequest, LoginResponse, ResetPasswordRequest, UserProfile};
use campusdesk_observability::{track_jwt_issued, track_login_failure, track_login_success};
use chrono::{TimeZone, Utc};
use tracing::instrument;

use crate::state::AppState;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
pub const INVALID_RESET_TOKEN_MESSAGE: &str = "Invalid or expired reset token";

/// Verified against when the email is unknown so that a miss costs as much
/// as a wrong password.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("campusdesk-dummy-password").ok());

fn invalid_credentials() -> AppError {
    AppError::unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string())
}

/// A login that succeeded, with the token still to be placed in a cookie.
#[derive(Debug)]
pub struct LoginOutcome {
    pub token: String,
    pub response: LoginResponse,
}

pub struct AuthService;

impl AuthService {
    /// Checks the credentials and issues a session token.
    ///
    /// Unknown email, wrong password and deactivated account all fail with the
    /// same 401 message.
    #[instrument(skip_all)]
    pub async fn login(state: &AppState, dto: LoginRequest) -> Result<LoginOutcome, AppError> {
        let Some(user) = state.users.find_by_email(&dto.email).await? else {
            if let Some(dummy) = DUMMY_HASH.as_deref() {
                let _ = verify_password(&dto.password, dummy);
            }
            track_login_failure("unknown_email");
            return Err(invalid_credentials());
        };

        if !verify_password(&dto.password, &user.password_hash)? {
            track_login_failure("wrong_password");
            return Err(invalid_credentials());
        }

        if !user.is_active {
            track_login_failure("inactive");
            tracing::info!(user_id = %user.id, "Login attempt on deactivated account");
            return Err(invalid_credentials());
        }

        let issued = issue_session_token(&user.session_identity(), &state.jwt_config)?;
        track_jwt_issued();
        track_login_success(user.role.as_str());

        let expires_at = Utc
            .timestamp_opt(issued.claims.exp as i64, 0)
            .single()
            .ok_or_else(|| AppError::internal_error("Token expiry out of range".to_string()))?;

        tracing::info!(user_id = %user.id, role = %user.role, "User logged in");

        Ok(LoginOutcome {
            token: issued.token,
            response: LoginResponse {
                user: UserProfile::from(issued.claims.identity()),
                expires_at,
            },
        })
    }

    /// Emails a reset link when the account exists. Never reveals whether it
    /// does: lookup and delivery failures are logged and swallowed, and
    /// delivery runs in the background so SMTP latency does not show up in
    /// the response time.
    #[instrument(skip_all)]
    pub async fn forgot_password(state: &AppState, email: &str) {
        let user = match state.users.find_by_email(email).await {
            Ok(Some(user)) if user.is_active => user,
            Ok(_) => {
                tracing::debug!("Password reset requested for unknown or inactive account");
                return;
            }
            Err(e) => {
                tracing::error!(error = %e.error, "Failed to look up user for password reset");
                return;
            }
        };

        let token = match create_reset_token(
            &user.id.to_string(),
            &user.email,
            &user.password_hash,
            &state.jwt_config,
        ) {
            Ok(token) => token,
            Err(e) => {
                tracing::error!(error = %e.error, "Failed to create reset token");
                return;
            }
        };

        let email = state.email.clone();
        let valid_for = state.jwt_config.reset_token_ttl;
        tokio::spawn(async move {
            if let Err(e) = email
                .send_password_reset_email(&user.email, &user.name, &token, valid_for)
                .await
            {
                tracing::error!(user_id = %user.id, error = %e.error, "Failed to send password reset email");
            }
        });
    }

    /// Sets a new password for the account named by a valid reset token.
    ///
    /// The token is bound to the password hash it was issued against, so it
    /// works once: after a successful reset the fingerprint no longer matches.
    #[instrument(skip_all)]
    pub async fn reset_password(
        state: &AppState,
        dto: ResetPasswordRequest,
    ) -> Result<(), AppError> {
        let invalid = || AppError::bad_request(anyhow::anyhow!(INVALID_RESET_TOKEN_MESSAGE));

        let claims = verify_reset_token(&dto.token, &state.jwt_config).map_err(|rejection| {
            tracing::debug!(reason = rejection.as_str(), "Rejected reset token");
            invalid()
        })?;

        let user_id = uuid::Uuid::parse_str(&claims.sub).map_err(|_| invalid())?;
        let user = state
            .users
            .find_by_id(user_id)
            .await?
            .filter(|user| user.is_active)
            .ok_or_else(invalid)?;

        if !claims.matches_credential(&user.password_hash) {
            tracing::debug!(user_id = %user.id, "Reset token issued against a replaced password");
            return Err(invalid());
        }

        let password_hash = hash_password(&dto.new_password)?;
        state.users.update_password(user.id, &password_hash).await?;

        tracing::info!(user_id = %user.id, "Password reset");

        if let Err(e) = state
            .email
            .send_password_reset_confirmation(&user.email, &user.name)
            .await
        {
            tracing::warn!(user_id = %user.id, error = %e.error, "Failed to send reset confirmation email");
        }

        Ok(())
    }
}
