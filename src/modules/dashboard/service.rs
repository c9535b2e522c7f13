use std::collections::BTreeMap;

use campusdesk_core::{AppError, Role, dashboard_for, navigation_for};
use campusdesk_models::{AdminOverviewResponse, DashboardResponse, NavItem};
use tracing::instrument;

use crate::state::AppState;

pub struct DashboardService;

impl DashboardService {
    /// The landing dashboard and navigation for `role`.
    pub fn dashboard(role: Role) -> DashboardResponse {
        DashboardResponse {
            role,
            dashboard: dashboard_for(role).to_string(),
            title: format!("{} Dashboard", role.label()),
            navigation: navigation_for(role).into_iter().map(NavItem::from).collect(),
        }
    }

    #[instrument(skip_all)]
    pub async fn admin_overview(state: &AppState) -> Result<AdminOverviewResponse, AppError> {
        let users = state.users.list().await?;

        let mut users_by_role: BTreeMap<String, usize> = Role::ALL
            .iter()
            .map(|role| (role.as_str().to_string(), 0))
            .collect();
        for user in &users {
            *users_by_role.entry(user.role.as_str().to_string()).or_default() += 1;
        }

        Ok(AdminOverviewResponse {
            total_users: users.len(),
            active_users: users.iter().filter(|user| user.is_active).count(),
            users_by_role,
        })
    }
}
