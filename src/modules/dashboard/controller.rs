use axum::Json;
use axum::extract::State;
use campusdesk_core::AppError;
use campusdesk_models::{AdminOverviewResponse, DashboardResponse, ErrorResponse};
use tracing::instrument;

use super::service::DashboardService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Role dashboard
///
/// Tells the client which dashboard to render and which navigation entries
/// the caller's role may see.
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Dashboard for the caller's role", body = DashboardResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("cookie_auth" = []), ("bearer_auth" = [])),
    tag = "Dashboard"
)]
#[instrument(skip_all, fields(role = %auth_user.role()))]
pub async fn get_dashboard(auth_user: AuthUser) -> Json<DashboardResponse> {
    Json(DashboardService::dashboard(auth_user.role()))
}

/// Administrator overview
#[utoipa::path(
    get,
    path = "/api/dashboard/admin",
    responses(
        (status = 200, description = "User counts", body = AdminOverviewResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Administrator privileges required", body = ErrorResponse)
    ),
    security(("cookie_auth" = []), ("bearer_auth" = [])),
    tag = "Dashboard"
)]
#[instrument(skip_all)]
pub async fn get_admin_overview(
    State(state): State<AppState>,
) -> Result<Json<AdminOverviewResponse>, AppError> {
    Ok(Json(DashboardService::admin_overview(&state).await?))
}
