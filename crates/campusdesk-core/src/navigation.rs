//! Navigation entries offered to each role.
//!
//! Entries are filtered through the permission resolver instead of being
//! listed per role, so a role is never shown a page the server would refuse.

use serde::Serialize;

use crate::permissions::{self, has_permission};
use crate::roles::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub label: &'static str,
    pub path: &'static str,
    /// Capability required to see the entry; `None` means any authenticated user.
    pub capability: Option<&'static str>,
}

const fn entry(label: &'static str, path: &'static str, capability: Option<&'static str>) -> NavEntry {
    NavEntry {
        label,
        path,
        capability,
    }
}

const ENTRIES: &[NavEntry] = &[
    entry("Dashboard", "/dashboard", None),
    entry("Schools", "/schools", Some(permissions::MANAGE_SCHOOLS)),
    entry("Students", "/students", Some(permissions::MANAGE_STUDENTS)),
    entry("My Students", "/my-students", Some(permissions::VIEW_STUDENTS)),
    entry("Teachers", "/teachers", Some(permissions::MANAGE_TEACHERS)),
    entry("Classes", "/classes", Some(permissions::MANAGE_CLASSES)),
    entry("My Classes", "/my-classes", Some(permissions::VIEW_CLASSES)),
    entry("Attendance", "/attendance", Some(permissions::MANAGE_ATTENDANCE)),
    entry("My Attendance", "/my-attendance", Some(permissions::VIEW_ATTENDANCE)),
    entry("Gradebook", "/gradebook", Some(permissions::MANAGE_GRADES)),
    entry("Grades", "/grades", Some(permissions::VIEW_GRADES)),
    entry("Fees", "/fees", Some(permissions::MANAGE_FEES)),
    entry("My Fees", "/my-fees", Some(permissions::VIEW_FEES)),
    entry("Children", "/children", Some(permissions::VIEW_CHILDREN)),
    entry("Notifications", "/notifications", Some(permissions::VIEW_NOTIFICATIONS)),
    entry("Reports", "/reports", Some(permissions::VIEW_REPORTS)),
    entry("Audit Logs", "/audit-logs", Some(permissions::VIEW_AUDIT_LOGS)),
    entry("Backups", "/backups", Some(permissions::MANAGE_BACKUPS)),
];

pub fn navigation_for(role: Role) -> Vec<NavEntry> {
    ENTRIES
        .iter()
        .filter(|entry| {
            entry
                .capability
                .is_none_or(|capability| has_permission(Some(role), capability))
        })
        .copied()
        .collect()
}

/// Which dashboard a role lands on after login.
pub fn dashboard_for(role: Role) -> &'static str {
    match role {
        Role::SuperAdmin | Role::SchoolAdmin => "admin",
        Role::Teacher => "teacher",
        Role::Student => "student",
        Role::Parent => "parent",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(role: Role) -> Vec<&'static str> {
        navigation_for(role).into_iter().map(|e| e.path).collect()
    }

    #[test]
    fn test_super_admin_sees_everything() {
        assert_eq!(navigation_for(Role::SuperAdmin).len(), ENTRIES.len());
    }

    #[test]
    fn test_every_role_sees_dashboard() {
        for role in Role::ALL {
            assert!(paths(role).contains(&"/dashboard"), "{role}");
        }
    }

    #[test]
    fn test_teacher_navigation() {
        let teacher = paths(Role::Teacher);
        assert!(teacher.contains(&"/gradebook"));
        assert!(teacher.contains(&"/attendance"));
        assert!(!teacher.contains(&"/fees"));
        assert!(!teacher.contains(&"/backups"));
    }

    #[test]
    fn test_parent_navigation() {
        let parent = paths(Role::Parent);
        assert!(parent.contains(&"/children"));
        assert!(!parent.contains(&"/students"));
    }

    #[test]
    fn test_entries_match_resolver() {
        for role in Role::ALL {
            for entry in navigation_for(role) {
                if let Some(capability) = entry.capability {
                    assert!(has_permission(Some(role), capability));
                }
            }
        }
    }

    #[test]
    fn test_dashboard_for_role() {
        assert_eq!(dashboard_for(Role::SuperAdmin), "admin");
        assert_eq!(dashboard_for(Role::SchoolAdmin), "admin");
        assert_eq!(dashboard_for(Role::Teacher), "teacher");
        assert_eq!(dashboard_for(Role::Student), "student");
        assert_eq!(dashboard_for(Role::Parent), "parent");
    }
}
