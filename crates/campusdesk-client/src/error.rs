use thiserror::Error;

/// Why a request to the server failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// No valid session: missing, malformed, expired or forged token.
    Unauthenticated,
    /// Valid session, but the role lacks the required capability.
    Unauthorized,
    /// Login refused the email/password pair.
    CredentialRejected,
    /// Network failure, timeout or server error. Says nothing about the session.
    Transport,
}

/// Error returned by every [`AuthApi`](crate::AuthApi) call.
///
/// Built once at the HTTP boundary; callers branch on [`kind`](Self::kind)
/// and never on the message text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Unauthenticated, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Unauthorized, message)
    }

    pub fn credential_rejected(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::CredentialRejected, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Transport, message)
    }

    /// Whether this error proves the client-held session is no longer usable.
    pub fn clears_session(&self) -> bool {
        matches!(
            self.kind,
            ApiErrorKind::Unauthenticated | ApiErrorKind::Unauthorized
        )
    }
}
