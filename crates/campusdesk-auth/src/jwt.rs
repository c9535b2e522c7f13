//! Token issuing and verification.
//!
//! Session tokens are HS256 JWTs carrying the subject id, role and permission
//! set. Verification never panics: it returns a [`TokenRejection`] naming why
//! the token was refused.
//!
//! # Example
//!
//! ```ignore
//! use campusdesk_auth::{SessionIdentity, issue_session_token, verify_session_token};
//!
//! let issued = issue_session_token(&identity, &jwt_config)?;
//! let claims = verify_session_token(&issued.token, &jwt_config)?;
//! assert_eq!(claims.identity(), identity);
//! ```

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Serialize;

use campusdesk_config::JwtConfig;
use campusdesk_core::AppError;

use crate::claims::{
    PASSWORD_RESET_PURPOSE, ResetTokenClaims, SessionClaims, SessionIdentity,
    credential_fingerprint,
};
use crate::error::TokenRejection;

/// A freshly signed session token together with the claims it encodes.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: SessionClaims,
}

/// Signs arbitrary claims with the configured secret.
///
/// # Errors
///
/// Fails only when the signing key is unusable (empty secret). This is a
/// deployment error and is not worth retrying.
pub fn sign_claims<T: Serialize>(claims: &T, jwt_config: &JwtConfig) -> Result<String, AppError> {
    if jwt_config.secret.is_empty() {
        return Err(AppError::internal_error(
            "JWT secret is not configured".to_string(),
        ));
    }

    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    // jsonwebtoken still accepts `exp == now` here; see `ensure_unexpired`.
    validation.leeway = 0;
    validation
}

fn now() -> usize {
    Utc::now().timestamp() as usize
}

/// A token is valid only strictly before `exp`.
fn ensure_unexpired(exp: usize, now: usize) -> Result<(), TokenRejection> {
    if exp > now {
        Ok(())
    } else {
        Err(TokenRejection::Expired)
    }
}

/// Issues a session token for `identity` expiring `token_ttl` seconds from now.
pub fn issue_session_token(
    identity: &SessionIdentity,
    jwt_config: &JwtConfig,
) -> Result<IssuedToken, AppError> {
    let iat = now();
    let claims = SessionClaims {
        sub: identity.id.clone(),
        email: identity.email.clone(),
        name: identity.name.clone(),
        role: identity.role,
        permissions: identity.permissions.clone(),
        exp: iat + jwt_config.token_ttl.max(0) as usize,
        iat,
    };

    let token = sign_claims(&claims, jwt_config)?;
    Ok(IssuedToken { token, claims })
}

/// Checks the signature and expiry of a session token.
pub fn verify_session_token(
    token: &str,
    jwt_config: &JwtConfig,
) -> Result<SessionClaims, TokenRejection> {
    if token.is_empty() {
        return Err(TokenRejection::Malformed);
    }

    let claims = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation(),
    )
    .map(|data| data.claims)
    .map_err(TokenRejection::from)?;

    ensure_unexpired(claims.exp, now())?;
    Ok(claims)
}

/// Creates a password reset token valid for `reset_token_ttl` seconds, bound
/// to the account's current `password_hash`.
pub fn create_reset_token(
    user_id: &str,
    email: &str,
    password_hash: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let iat = now();
    let claims = ResetTokenClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        purpose: PASSWORD_RESET_PURPOSE.to_string(),
        fingerprint: credential_fingerprint(password_hash),
        exp: iat + jwt_config.reset_token_ttl.max(0) as usize,
        iat,
    };

    sign_claims(&claims, jwt_config)
}

/// Verifies a password reset token. Session tokens are refused.
///
/// Only the signature, expiry and purpose are checked here; the caller must
/// still compare the fingerprint against the stored hash with
/// [`ResetTokenClaims::matches_credential`].
pub fn verify_reset_token(
    token: &str,
    jwt_config: &JwtConfig,
) -> Result<ResetTokenClaims, TokenRejection> {
    let claims = decode::<ResetTokenClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation(),
    )
    .map(|data| data.claims)
    .map_err(TokenRejection::from)?;

    if claims.purpose != PASSWORD_RESET_PURPOSE {
        return Err(TokenRejection::Malformed);
    }

    ensure_unexpired(claims.exp, now())?;
    Ok(claims)
}
