//! Capabilities and the static role → capability table.
//!
//! The table is compiled in and never changes at runtime; a change requires a
//! redeploy. Both the server's route guards and the client's view gating call
//! into this module so the two sides cannot disagree.
//!
//! # Example
//!
//! ```
//! use campusdesk_core::{Role, has_permission, is_admin_role, permissions};
//!
//! assert!(has_permission(Some(Role::SchoolAdmin), permissions::MANAGE_FEES));
//! assert!(!has_permission(Some(Role::Teacher), permissions::MANAGE_FEES));
//! assert!(is_admin_role(Some(Role::SuperAdmin)));
//! ```

use std::collections::BTreeMap;

use crate::roles::Role;

/// Capability value granting every capability, including ones not listed here.
pub const WILDCARD: &str = "*";

// =============================================================================
// People
// =============================================================================

pub const MANAGE_STUDENTS: &str = "manage_students";
pub const VIEW_STUDENTS: &str = "view_students";
pub const MANAGE_TEACHERS: &str = "manage_teachers";
pub const VIEW_CHILDREN: &str = "view_children";

// =============================================================================
// Academics
// =============================================================================

pub const MANAGE_CLASSES: &str = "manage_classes";
pub const VIEW_CLASSES: &str = "view_classes";
pub const MANAGE_ATTENDANCE: &str = "manage_attendance";
pub const VIEW_ATTENDANCE: &str = "view_attendance";
pub const MANAGE_GRADES: &str = "manage_grades";
pub const VIEW_GRADES: &str = "view_grades";

// =============================================================================
// Finance
// =============================================================================

pub const MANAGE_FEES: &str = "manage_fees";
pub const VIEW_FEES: &str = "view_fees";

// =============================================================================
// Communication
// =============================================================================

pub const SEND_NOTIFICATIONS: &str = "send_notifications";
pub const VIEW_NOTIFICATIONS: &str = "view_notifications";

// =============================================================================
// Administration
// =============================================================================

pub const VIEW_REPORTS: &str = "view_reports";
pub const VIEW_AUDIT_LOGS: &str = "view_audit_logs";
/// Only reachable through the wildcard.
pub const MANAGE_BACKUPS: &str = "manage_backups";
/// Only reachable through the wildcard.
pub const MANAGE_SCHOOLS: &str = "manage_schools";

const SUPER_ADMIN_CAPABILITIES: &[&str] = &[WILDCARD];

const SCHOOL_ADMIN_CAPABILITIES: &[&str] = &[
    MANAGE_STUDENTS,
    MANAGE_TEACHERS,
    MANAGE_CLASSES,
    MANAGE_FEES,
    MANAGE_ATTENDANCE,
    VIEW_REPORTS,
    VIEW_AUDIT_LOGS,
    SEND_NOTIFICATIONS,
    VIEW_NOTIFICATIONS,
];

const TEACHER_CAPABILITIES: &[&str] = &[
    VIEW_STUDENTS,
    VIEW_CLASSES,
    MANAGE_ATTENDANCE,
    MANAGE_GRADES,
    SEND_NOTIFICATIONS,
    VIEW_NOTIFICATIONS,
];

const STUDENT_CAPABILITIES: &[&str] = &[VIEW_GRADES, VIEW_ATTENDANCE, VIEW_FEES, VIEW_NOTIFICATIONS];

const PARENT_CAPABILITIES: &[&str] = &[
    VIEW_CHILDREN,
    VIEW_GRADES,
    VIEW_ATTENDANCE,
    VIEW_FEES,
    VIEW_NOTIFICATIONS,
];

/// The capability set statically configured for `role`.
pub fn capabilities_for(role: Role) -> &'static [&'static str] {
    match role {
        Role::SuperAdmin => SUPER_ADMIN_CAPABILITIES,
        Role::SchoolAdmin => SCHOOL_ADMIN_CAPABILITIES,
        Role::Teacher => TEACHER_CAPABILITIES,
        Role::Student => STUDENT_CAPABILITIES,
        Role::Parent => PARENT_CAPABILITIES,
    }
}

/// Owned copy of a role's capabilities, as embedded in session tokens.
pub fn capability_strings(role: Role) -> Vec<String> {
    capabilities_for(role)
        .iter()
        .map(|c| c.to_string())
        .collect()
}

/// Whether a permission set grants `capability`: verbatim membership or the wildcard.
pub fn set_grants<S: AsRef<str>>(permissions: &[S], capability: &str) -> bool {
    permissions
        .iter()
        .any(|p| p.as_ref() == WILDCARD || p.as_ref() == capability)
}

/// Answers "may `role` perform `capability`?". An absent role is never granted anything.
pub fn has_permission(role: Option<Role>, capability: &str) -> bool {
    role.is_some_and(|role| set_grants(capabilities_for(role), capability))
}

/// Strict role equality.
pub fn has_role(current: Option<Role>, target: Role) -> bool {
    current == Some(target)
}

/// SUPER_ADMIN or SCHOOL_ADMIN.
pub fn is_admin_role(role: Option<Role>) -> bool {
    matches!(role, Some(Role::SuperAdmin | Role::SchoolAdmin))
}

/// The whole table keyed by the role's wire name, for publishing to clients.
pub fn permission_table() -> BTreeMap<String, Vec<String>> {
    Role::ALL
        .into_iter()
        .map(|role| (role.as_str().to_string(), capability_strings(role)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_super_admin_has_every_capability() {
        for capability in [MANAGE_BACKUPS, MANAGE_SCHOOLS, VIEW_GRADES, "not_a_real_thing", ""] {
            assert!(has_permission(Some(Role::SuperAdmin), capability));
        }
    }

    #[test]
    fn test_absent_capability_is_denied() {
        assert!(!has_permission(Some(Role::Teacher), MANAGE_FEES));
        assert!(!has_permission(Some(Role::Student), MANAGE_GRADES));
        assert!(!has_permission(Some(Role::Parent), VIEW_STUDENTS));
        assert!(!has_permission(Some(Role::SchoolAdmin), MANAGE_BACKUPS));
    }

    #[test]
    fn test_listed_capability_is_granted() {
        assert!(has_permission(Some(Role::SchoolAdmin), MANAGE_STUDENTS));
        assert!(has_permission(Some(Role::Teacher), MANAGE_ATTENDANCE));
        assert!(has_permission(Some(Role::Student), VIEW_FEES));
        assert!(has_permission(Some(Role::Parent), VIEW_CHILDREN));
    }

    #[test]
    fn test_missing_role_is_denied() {
        assert!(!has_permission(None, VIEW_NOTIFICATIONS));
        assert!(!has_permission(None, WILDCARD));
    }

    #[test]
    fn test_only_super_admin_holds_wildcard() {
        for role in Role::ALL {
            let has_wildcard = capabilities_for(role).contains(&WILDCARD);
            assert_eq!(has_wildcard, role == Role::SuperAdmin, "{role}");
        }
    }

    #[test]
    fn test_has_role_is_strict() {
        assert!(has_role(Some(Role::SchoolAdmin), Role::SchoolAdmin));
        assert!(!has_role(Some(Role::SuperAdmin), Role::SchoolAdmin));
        assert!(!has_role(None, Role::Student));
    }

    #[test]
    fn test_is_admin_role() {
        assert!(is_admin_role(Some(Role::SuperAdmin)));
        assert!(is_admin_role(Some(Role::SchoolAdmin)));
        assert!(!is_admin_role(Some(Role::Teacher)));
        assert!(!is_admin_role(Some(Role::Student)));
        assert!(!is_admin_role(Some(Role::Parent)));
        assert!(!is_admin_role(None));
    }

    #[test]
    fn test_set_grants_with_token_permissions() {
        let perms = vec!["view_grades".to_string()];
        assert!(set_grants(&perms, VIEW_GRADES));
        assert!(!set_grants(&perms, MANAGE_GRADES));

        let everything = vec!["*".to_string()];
        assert!(set_grants(&everything, MANAGE_GRADES));

        let empty: Vec<String> = vec![];
        assert!(!set_grants(&empty, VIEW_GRADES));
    }

    #[test]
    fn test_permission_table_covers_every_role() {
        let table = permission_table();
        assert_eq!(table.len(), Role::ALL.len());
        assert_eq!(table["SUPER_ADMIN"], vec!["*".to_string()]);
        assert!(table["TEACHER"].contains(&MANAGE_GRADES.to_string()));
    }
}
