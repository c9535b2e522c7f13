use axum::{Router, routing::get};

use super::controller::{get_audit_logs, get_backups, get_reports_summary};
use crate::state::AppState;

pub fn init_operations_router() -> Router<AppState> {
    Router::new()
        .route("/reports/summary", get(get_reports_summary))
        .route("/audit-logs", get(get_audit_logs))
        .route("/backups", get(get_backups))
}
