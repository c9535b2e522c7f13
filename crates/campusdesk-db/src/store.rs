use async_trait::async_trait;
use campusdesk_core::AppError;
use campusdesk_models::{NewUser, UserRecord};
use uuid::Uuid;

/// Lookup and maintenance of user credentials.
///
/// Emails are matched case-insensitively; implementations store them
/// lower-cased.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, AppError>;

    /// Fails with 400 when the email is already taken.
    async fn insert(&self, user: NewUser) -> Result<UserRecord, AppError>;

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), AppError>;

    /// Returns `false` when no user has that id.
    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<bool, AppError>;

    async fn list(&self) -> Result<Vec<UserRecord>, AppError>;
}

pub(crate) fn duplicate_email() -> AppError {
    AppError::bad_request(anyhow::anyhow!("Email already exists"))
}
