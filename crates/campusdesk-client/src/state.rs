//! Client session state and its transition function.
//!
//! [`reduce`] is the only place the state changes. It is total: every event
//! is accepted in every phase, so a late response from an earlier request is
//! folded like any other (the last one to arrive wins).

use campusdesk_models::UserProfile;

/// Where the login flow stands.
///
/// ```text
/// idle ──submit──▶ submitting ──success──▶ authenticated ──logout──▶ logging_out ──▶ idle
///                       │                                                 
///                       └──failure──▶ failed ──submit──▶ submitting
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginPhase {
    #[default]
    Idle,
    Submitting,
    Authenticated,
    Failed,
    LoggingOut,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub user: Option<UserProfile>,
    /// True only while an auth-affecting request is in flight.
    pub loading: bool,
    pub error: Option<String>,
    pub phase: LoginPhase,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Everything that can happen to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    LoginStarted,
    LoginSucceeded(UserProfile),
    LoginFailed(String),
    LogoutStarted,
    LoggedOut,
    BootstrapStarted,
    SessionRestored(UserProfile),
    /// The server said the session is not valid.
    SessionCleared,
    /// A request failed for reasons unrelated to the session. The user, if
    /// any, is kept.
    RequestFailed(String),
}

pub fn reduce(state: &SessionState, event: AuthEvent) -> SessionState {
    match event {
        AuthEvent::LoginStarted => SessionState {
            loading: true,
            phase: LoginPhase::Submitting,
            ..state.clone()
        },
        AuthEvent::LoginSucceeded(user) => SessionState {
            user: Some(user),
            loading: false,
            error: None,
            phase: LoginPhase::Authenticated,
        },
        AuthEvent::LoginFailed(message) => SessionState {
            user: None,
            loading: false,
            error: Some(message),
            phase: LoginPhase::Failed,
        },
        AuthEvent::LogoutStarted => SessionState {
            loading: true,
            phase: LoginPhase::LoggingOut,
            ..state.clone()
        },
        AuthEvent::LoggedOut | AuthEvent::SessionCleared => SessionState::default(),
        AuthEvent::BootstrapStarted => SessionState {
            loading: true,
            ..state.clone()
        },
        AuthEvent::SessionRestored(user) => SessionState {
            user: Some(user),
            loading: false,
            error: None,
            phase: LoginPhase::Authenticated,
        },
        AuthEvent::RequestFailed(message) => SessionState {
            loading: false,
            error: Some(message),
            phase: match state.phase {
                LoginPhase::Submitting if state.user.is_some() => LoginPhase::Authenticated,
                phase => phase,
            },
            ..state.clone()
        },
    }
}
