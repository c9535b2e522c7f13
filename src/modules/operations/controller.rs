use axum::Json;
use campusdesk_core::permissions::{MANAGE_BACKUPS, VIEW_AUDIT_LOGS, VIEW_REPORTS};
use campusdesk_models::{ErrorResponse, ModuleStatusResponse};
use tracing::instrument;

use crate::middleware::auth::{RequireManageBackups, RequireViewAuditLogs, RequireViewReports};

fn unavailable(module: &str, capability: &str) -> ModuleStatusResponse {
    ModuleStatusResponse {
        module: module.to_string(),
        capability: capability.to_string(),
        available: false,
        message: format!("The {} module is not available yet", module),
    }
}

/// Reports summary
#[utoipa::path(
    get,
    path = "/api/reports/summary",
    responses(
        (status = 200, description = "Module descriptor", body = ModuleStatusResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Missing view_reports", body = ErrorResponse)
    ),
    security(("cookie_auth" = []), ("bearer_auth" = [])),
    tag = "Operations"
)]
#[instrument(skip_all, fields(user_id = %auth_user.0.sub))]
pub async fn get_reports_summary(
    RequireViewReports(auth_user): RequireViewReports,
) -> Json<ModuleStatusResponse> {
    Json(unavailable("reports", VIEW_REPORTS))
}

/// Audit logs
#[utoipa::path(
    get,
    path = "/api/audit-logs",
    responses(
        (status = 200, description = "Module descriptor", body = ModuleStatusResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Missing view_audit_logs", body = ErrorResponse)
    ),
    security(("cookie_auth" = []), ("bearer_auth" = [])),
    tag = "Operations"
)]
#[instrument(skip_all, fields(user_id = %auth_user.0.sub))]
pub async fn get_audit_logs(
    RequireViewAuditLogs(auth_user): RequireViewAuditLogs,
) -> Json<ModuleStatusResponse> {
    Json(unavailable("audit-logs", VIEW_AUDIT_LOGS))
}

/// Backups
#[utoipa::path(
    get,
    path = "/api/backups",
    responses(
        (status = 200, description = "Module descriptor", body = ModuleStatusResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Missing manage_backups", body = ErrorResponse)
    ),
    security(("cookie_auth" = []), ("bearer_auth" = [])),
    tag = "Operations"
)]
#[instrument(skip_all, fields(user_id = %auth_user.0.sub))]
pub async fn get_backups(
    RequireManageBackups(auth_user): RequireManageBackups,
) -> Json<ModuleStatusResponse> {
    Json(unavailable("backups", MANAGE_BACKUPS))
}
