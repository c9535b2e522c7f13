//! Reports, audit logs and backups.
//!
//! Only the access gates are real; each endpoint answers with a module
//! descriptor until its backend exists.

pub mod controller;
pub mod router;
