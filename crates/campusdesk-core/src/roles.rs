//! The fixed role enumeration.
//!
//! Every user has exactly one role, carried in the session token. Roles
//! serialize in their wire form (`SUPER_ADMIN`, `SCHOOL_ADMIN`, ...) which is
//! also the value stored in the `users.role` column.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    SchoolAdmin,
    Teacher,
    Student,
    Parent,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::SuperAdmin,
        Role::SchoolAdmin,
        Role::Teacher,
        Role::Student,
        Role::Parent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::SchoolAdmin => "SCHOOL_ADMIN",
            Role::Teacher => "TEACHER",
            Role::Student => "STUDENT",
            Role::Parent => "PARENT",
        }
    }

    /// Human readable name, used in CLI output and dashboard titles.
    pub fn label(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super Admin",
            Role::SchoolAdmin => "School Admin",
            Role::Teacher => "Teacher",
            Role::Student => "Student",
            Role::Parent => "Parent",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError(pub String);

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid role: {}", self.0)
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseRoleError(s.to_string()))
    }
}
