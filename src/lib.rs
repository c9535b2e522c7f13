//! # CampusDesk API
//!
//! The authentication and role-based access control core of the CampusDesk
//! school management system, served with Axum.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Session extractor, role and capability gates
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Login, logout, current user, password reset
//! │   ├── dashboard/   # Role dashboards and the admin overview
//! │   └── operations/  # Capability-gated reports, audit logs, backups
//! └── utils/           # Session cookie and email helpers
//! ```
//!
//! Each feature module follows the same structure:
//!
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: Business logic
//! - `router.rs`: Axum router configuration
//!
//! Domain types live in the workspace crates: roles and permissions in
//! `campusdesk-core`, tokens in `campusdesk-auth`, DTOs in `campusdesk-models`
//! and credential stores in `campusdesk-db`.
//!
//! ## Sessions
//!
//! Login issues a signed token carrying the user's id, name, email, role and
//! permissions, and stores it in an HTTP-only cookie. Every protected request
//! is authorized from those claims alone. A missing, malformed, expired or
//! forged token is a 401; a valid token lacking the role or capability is a 403.
//!
//! ### API Documentation
//!
//! - Swagger UI: `http://localhost:5000/swagger-ui`
//! - Scalar: `http://localhost:5000/scalar`

pub mod docs;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;

// Re-export workspace crates for convenience
pub use campusdesk_auth;
pub use campusdesk_config;
pub use campusdesk_core;
pub use campusdesk_db;
pub use campusdesk_models;
