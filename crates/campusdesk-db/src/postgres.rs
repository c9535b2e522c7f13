use async_trait::async_trait;
use campusdesk_core::{AppError, Role};
use campusdesk_models::users::normalize_email;
use campusdesk_models::{NewUser, UserRecord};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::instrument;
use uuid::Uuid;

use crate::store::{CredentialStore, duplicate_email};

const USER_COLUMNS: &str =
    "id, name, email, password_hash, role, is_active, created_at, updated_at";

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role: Role = row.role.parse()?;

        Ok(UserRecord {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            role,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Credential store over the `users` table.
#[derive(Debug, Clone)]
pub struct PgCredentialStore {
    db: PgPool,
}

impl PgCredentialStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(normalize_email(email))
        .fetch_optional(&self.db)
        .await?
        .map(UserRecord::try_from)
        .transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, AppError> {
        sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .map(UserRecord::try_from)
            .transpose()
    }

    #[instrument(skip(self, user), fields(email = %user.email, role = %user.role))]
    async fn insert(&self, user: NewUser) -> Result<UserRecord, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (name, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.name)
        .bind(normalize_email(&user.email))
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return duplicate_email();
                }
            }
            AppError::from(e)
        })?;

        row.try_into()
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), AppError> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $1, updated_at = NOW() WHERE id = $2")
                .bind(password_hash)
                .bind(id)
                .execute(&self.db)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("User not found")));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE users SET is_active = $1, updated_at = NOW() WHERE id = $2")
                .bind(is_active)
                .bind(id)
                .execute(&self.db)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<UserRecord>, AppError> {
        sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY email"))
            .fetch_all(&self.db)
            .await?
            .into_iter()
            .map(UserRecord::try_from)
            .collect()
    }
}
