use campusdesk_core::Role;
use campusdesk_models::{
    AdminOverviewResponse, DashboardResponse, ErrorResponse, ForgotPasswordRequest, LoginRequest,
    LoginResponse, MessageResponse, ModuleStatusResponse, NavItem, PermissionTableResponse,
    ResetPasswordRequest, UserProfile,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::logout_user,
        crate::modules::auth::controller::get_current_user,
        crate::modules::auth::controller::get_permission_table,
        crate::modules::auth::controller::forgot_password,
        crate::modules::auth::controller::reset_password,
        crate::modules::dashboard::controller::get_dashboard,
        crate::modules::dashboard::controller::get_admin_overview,
        crate::modules::operations::controller::get_reports_summary,
        crate::modules::operations::controller::get_audit_logs,
        crate::modules::operations::controller::get_backups,
    ),
    components(
        schemas(
            Role,
            LoginRequest,
            LoginResponse,
            UserProfile,
            ForgotPasswordRequest,
            ResetPasswordRequest,
            MessageResponse,
            ErrorResponse,
            PermissionTableResponse,
            DashboardResponse,
            NavItem,
            AdminOverviewResponse,
            ModuleStatusResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login, logout, current user and password reset"),
        (name = "Dashboard", description = "Role dashboards and navigation"),
        (name = "Operations", description = "Capability-gated reports, audit logs and backups")
    ),
    info(
        title = "CampusDesk API",
        version = "0.1.0",
        description = "Authentication and role-based access control for the CampusDesk school management system.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("token"))),
            );
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
