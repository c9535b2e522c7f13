//! # CampusDesk Auth
//!
//! The token service: signed, time-bounded session tokens asserting a user's
//! identity, role and permission set, plus password reset tokens.
//!
//! Nothing here touches HTTP or cookies. The raw token string goes in, claims
//! or a [`TokenRejection`] come out.
//!
//! - [`claims`]: Claim structures
//! - [`jwt`]: Issuing and verification
//! - [`error`]: Verification failure reasons

pub mod claims;
pub mod error;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::{
    PASSWORD_RESET_PURPOSE, ResetTokenClaims, SessionClaims, SessionIdentity,
    credential_fingerprint,
};
pub use error::TokenRejection;
pub use jwt::{
    IssuedToken, create_reset_token, issue_session_token, sign_claims, verify_reset_token,
    verify_session_token,
};
