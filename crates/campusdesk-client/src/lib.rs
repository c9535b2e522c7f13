//! # CampusDesk Client
//!
//! The client half of the session core: what a frontend needs to know about
//! the signed-in user and how that knowledge changes.
//!
//! - [`state`]: Session state, login phases and the pure reducer
//! - [`session`]: [`SessionStore`], which drives the reducer from API calls
//! - [`api`]: The [`AuthApi`] seam and its reqwest implementation
//! - [`gate`]: Route gating against the shared capability table
//! - [`error`]: The discriminated [`ApiError`]
//!
//! # Example
//!
//! ```ignore
//! use campusdesk_client::{HttpAuthApi, SessionStore};
//!
//! let api = HttpAuthApi::new("http://localhost:5000")?;
//! let mut session = SessionStore::new(api);
//!
//! session.bootstrap().await;
//! if !session.is_authenticated() {
//!     session.login("admin@school.test", "password123").await?;
//! }
//! assert!(session.has_permission("view_reports"));
//! ```

pub mod api;
pub mod error;
pub mod gate;
pub mod session;
pub mod state;

pub use api::{AuthApi, HttpAuthApi};
pub use error::{ApiError, ApiErrorKind};
pub use gate::{LOGIN_PATH, RouteAccess, UNAUTHORIZED_PATH, route_access};
pub use session::{BootstrapOutcome, SessionStore};
pub use state::{AuthEvent, LoginPhase, SessionState, reduce};
