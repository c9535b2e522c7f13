//! Utility modules for the CampusDesk API.
//!
//! - [`cookies`]: Building and clearing the session cookie
//! - [`email`]: Password reset emails over SMTP

pub mod cookies;
pub mod email;
