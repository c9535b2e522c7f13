//! Dashboard and navigation payloads.

use std::collections::BTreeMap;

use campusdesk_core::{NavEntry, Role};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NavItem {
    pub label: String,
    pub path: String,
    pub capability: Option<String>,
}

impl From<NavEntry> for NavItem {
    fn from(entry: NavEntry) -> Self {
        Self {
            label: entry.label.to_string(),
            path: entry.path.to_string(),
            capability: entry.capability.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    pub role: Role,
    /// One of `admin`, `teacher`, `student`, `parent`.
    pub dashboard: String,
    pub title: String,
    pub navigation: Vec<NavItem>,
}

/// Descriptor for a module whose backend is not implemented yet (reports,
/// audit logs, backups). Only the access gate is real.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModuleStatusResponse {
    pub module: String,
    pub capability: String,
    pub available: bool,
    pub message: String,
}

/// User counts shown on the administrator dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminOverviewResponse {
    pub total_users: usize,
    pub active_users: usize,
    /// Keyed by role code, every role present even when zero.
    pub users_by_role: BTreeMap<String, usize>,
}
