//! User records as held by a credential store.

use campusdesk_auth::SessionIdentity;
use campusdesk_core::{Role, capability_strings};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A stored user, including the password hash. Never serialized to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    /// Always lower-case.
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// The identity a session token for this user asserts. Permissions come
    /// from the static table, not from the record.
    pub fn session_identity(&self) -> SessionIdentity {
        SessionIdentity {
            id: self.id.to_string(),
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
            permissions: capability_strings(self.role),
        }
    }
}

/// Input for inserting a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Lower-cases and trims an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_identity_uses_static_table() {
        let now = Utc::now();
        let record = UserRecord {
            id: Uuid::new_v4(),
            name: "Root".to_string(),
            email: "root@school.test".to_string(),
            password_hash: "hash".to_string(),
            role: Role::SuperAdmin,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let identity = record.session_identity();
        assert_eq!(identity.id, record.id.to_string());
        assert_eq!(identity.permissions, vec!["*".to_string()]);
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Mixed.Case@School.TEST "), "mixed.case@school.test");
    }
}
