//! JWT claim structures.
//!
//! - [`SessionClaims`]: the session token issued at login
//! - [`ResetTokenClaims`]: the single-purpose password reset token
//!
//! The two shapes are disjoint: a reset token lacks `role`/`permissions` and a
//! session token lacks `purpose`, so neither decodes as the other.

use campusdesk_core::{Role, set_grants};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Value of [`ResetTokenClaims::purpose`].
pub const PASSWORD_RESET_PURPOSE: &str = "password_reset";

/// Who a session token speaks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    /// Opaque user id.
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    /// Capability strings, possibly containing the wildcard.
    pub permissions: Vec<String>,
}

impl SessionIdentity {
    pub fn has_permission(&self, capability: &str) -> bool {
        set_grants(&self.permissions, capability)
    }
}

/// Claims embedded in session tokens.
///
/// Authorization decisions are made from these claims alone, without a
/// database lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User ID (subject claim)
    pub sub: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub permissions: Vec<String>,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl SessionClaims {
    pub fn identity(&self) -> SessionIdentity {
        SessionIdentity {
            id: self.sub.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
            permissions: self.permissions.clone(),
        }
    }
}

/// Short digest of a stored password hash.
///
/// Bcrypt salts every hash, so any password change (even to the same
/// password) yields a new fingerprint.
pub fn credential_fingerprint(password_hash: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password_hash.as_bytes());
    let hash = hasher.finalize();
    hex::encode(&hash[..16])
}

/// Claims embedded in password reset tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetTokenClaims {
    pub sub: String,
    pub email: String,
    pub purpose: String,
    /// [`credential_fingerprint`] of the password hash at issue time. A token
    /// stops working once the password it was issued against is replaced.
    pub fingerprint: String,
    pub exp: usize,
    pub iat: usize,
}

impl ResetTokenClaims {
    pub fn matches_credential(&self, password_hash: &str) -> bool {
        self.fingerprint == credential_fingerprint(password_hash)
    }
}
