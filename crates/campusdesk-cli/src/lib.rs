//! # CampusDesk CLI
//!
//! User administration against any [`CredentialStore`]. The binary wires these
//! to PostgreSQL; tests run them against the in-memory store.

use campusdesk_core::{AppError, Role, capabilities_for, hash_password};
use campusdesk_db::CredentialStore;
use campusdesk_models::users::normalize_email;
use campusdesk_models::{NewUser, UserRecord};
use validator::ValidateEmail;

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub password: String,
}

pub async fn create_user(
    store: &dyn CredentialStore,
    input: CreateUserInput,
) -> Result<UserRecord, AppError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::unprocessable(anyhow::anyhow!("Name is required")));
    }
    let email = normalize_email(&input.email);
    if !email.validate_email() {
        return Err(AppError::unprocessable(anyhow::anyhow!(
            "A valid email is required"
        )));
    }
    if input.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::unprocessable(anyhow::anyhow!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    store
        .insert(NewUser {
            name: name.to_string(),
            email,
            password_hash: hash_password(&input.password)?,
            role: input.role,
        })
        .await
}

/// Enables or disables login for the account with `email`.
pub async fn set_user_active(
    store: &dyn CredentialStore,
    email: &str,
    is_active: bool,
) -> Result<UserRecord, AppError> {
    let user = store
        .find_by_email(email)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("No user with email {}", email)))?;

    store.set_active(user.id, is_active).await?;

    Ok(UserRecord { is_active, ..user })
}

/// One line per role: `ROLE  cap, cap, ...`.
pub fn role_table_lines() -> Vec<String> {
    Role::ALL
        .iter()
        .map(|role| format!("{:<14}{}", role.as_str(), capabilities_for(*role).join(", ")))
        .collect()
}
