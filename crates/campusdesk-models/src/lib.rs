//! # CampusDesk Models
//!
//! Request and response DTOs shared by the server and the client, plus the
//! user record handed out by credential stores.
//!
//! - [`auth`]: Login, current-user and password reset payloads
//! - [`users`]: User records as stored
//! - [`dashboard`]: Role dashboards, navigation and gated module descriptors

pub mod auth;
pub mod dashboard;
pub mod users;

pub use auth::{
    ErrorResponse, ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse,
    PermissionTableResponse, ResetPasswordRequest, UserProfile,
};
pub use dashboard::{AdminOverviewResponse, DashboardResponse, ModuleStatusResponse, NavItem};
pub use users::{NewUser, UserRecord};
