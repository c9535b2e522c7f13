//! # CampusDesk Core
//!
//! Core types, errors, and utilities shared by the CampusDesk server, client and CLI.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`roles`]: The fixed [`Role`] enumeration
//! - [`permissions`]: Capability constants, the static role table and the permission resolver
//! - [`navigation`]: Navigation entries derived from the capability table
//! - [`password`]: bcrypt password hashing and verification
//!
//! The resolver is pure and holds no state, so the same functions gate routes on
//! the server and views on the client.
//!
//! # Example
//!
//! ```
//! use campusdesk_core::{Role, has_permission, permissions};
//!
//! assert!(has_permission(Some(Role::SuperAdmin), "anything_at_all"));
//! assert!(has_permission(Some(Role::Teacher), permissions::MANAGE_ATTENDANCE));
//! assert!(!has_permission(Some(Role::Student), permissions::MANAGE_FEES));
//! assert!(!has_permission(None, permissions::VIEW_GRADES));
//! ```

pub mod errors;
pub mod navigation;
pub mod password;
pub mod permissions;
pub mod roles;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use navigation::{NavEntry, dashboard_for, navigation_for};
pub use password::{hash_password, verify_password};
pub use permissions::{
    WILDCARD, capabilities_for, capability_strings, has_permission, has_role, is_admin_role,
    permission_table, set_grants,
};
pub use roles::{ParseRoleError, Role};
