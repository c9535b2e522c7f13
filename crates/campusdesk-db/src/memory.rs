use std::collections::HashMap;

use async_trait::async_trait;
use campusdesk_core::AppError;
use campusdesk_models::users::normalize_email;
use campusdesk_models::{NewUser, UserRecord};
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::store::{CredentialStore, duplicate_email};

/// Process-local credential store. Records are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    users: RwLock<HashMap<Uuid, UserRecord>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let email = normalize_email(email);
        Ok(self
            .users
            .read()
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, AppError> {
        Ok(self.users.read().get(&id).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<UserRecord, AppError> {
        let email = normalize_email(&user.email);
        let mut users = self.users.write();

        if users.values().any(|existing| existing.email == email) {
            return Err(duplicate_email());
        }

        let now = Utc::now();
        let record = UserRecord {
            id: Uuid::new_v4(),
            name: user.name,
            email,
            password_hash: user.password_hash,
            role: user.role,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        users.insert(record.id, record.clone());

        Ok(record)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), AppError> {
        let mut users = self.users.write();
        let user = users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        user.password_hash = password_hash.to_string();
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<bool, AppError> {
        let mut users = self.users.write();
        match users.get_mut(&id) {
            Some(user) => {
                user.is_active = is_active;
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list(&self) -> Result<Vec<UserRecord>, AppError> {
        let mut users: Vec<UserRecord> = self.users.read().values().cloned().collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(users)
    }
}
