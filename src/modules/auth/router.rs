use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{
    forgot_password, get_current_user, get_permission_table, login_user, logout_user,
    reset_password,
};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login_user))
        .route("/logout", post(logout_user))
        .route("/me", get(get_current_user))
        .route("/permissions", get(get_permission_table))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password", post(reset_password))
}
