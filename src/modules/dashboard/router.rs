use axum::{Router, middleware, routing::get};

use super::controller::{get_admin_overview, get_dashboard};
use crate::middleware::auth::require_auth;
use crate::middleware::role::require_admin;
use crate::state::AppState;

pub fn init_dashboard_router(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/admin", get(get_admin_overview))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/", get(get_dashboard))
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
