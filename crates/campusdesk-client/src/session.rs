use campusdesk_core::{Role, has_permission, has_role, is_admin_role};
use campusdesk_models::UserProfile;

use crate::api::AuthApi;
use crate::error::{ApiError, ApiErrorKind};
use crate::state::{AuthEvent, SessionState, reduce};

/// Result of the startup "who am I" query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Restored(UserProfile),
    /// The server rejected the ambient session; state was cleared.
    Cleared,
    /// The server could not be asked; state was left as it was.
    Unknown(ApiError),
}

/// Owns the client session state and folds API results into it.
///
/// Meant to be created once by the application's composition root and passed
/// to whatever needs it. All changes go through [`reduce`].
pub struct SessionStore<A: AuthApi> {
    api: A,
    state: SessionState,
}

impl<A: AuthApi> SessionStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: SessionState::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.state.user.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.user().map(|user| user.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    /// Checks the static table for the current role; false when signed out.
    pub fn has_permission(&self, capability: &str) -> bool {
        has_permission(self.role(), capability)
    }

    pub fn has_role(&self, role: Role) -> bool {
        has_role(self.role(), role)
    }

    pub fn is_admin(&self) -> bool {
        is_admin_role(self.role())
    }

    fn dispatch(&mut self, event: AuthEvent) {
        self.state = reduce(&self.state, event);
    }

    /// Submits credentials. Allowed from any phase; re-authenticating while
    /// signed in replaces the session. A signed-in user is only dropped when
    /// the server rejects the credentials or the session, never on transport
    /// failures.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<UserProfile, ApiError> {
        self.dispatch(AuthEvent::LoginStarted);

        match self.api.login(email, password).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, role = %user.role, "Logged in");
                self.dispatch(AuthEvent::LoginSucceeded(user.clone()));
                Ok(user)
            }
            Err(err) => {
                tracing::debug!(kind = ?err.kind, "Login failed");
                let keeps_session = self.is_authenticated()
                    && !matches!(
                        err.kind,
                        ApiErrorKind::CredentialRejected | ApiErrorKind::Unauthenticated
                    );
                if keeps_session {
                    self.dispatch(AuthEvent::RequestFailed(err.message.clone()));
                } else {
                    self.dispatch(AuthEvent::LoginFailed(err.message.clone()));
                }
                Err(err)
            }
        }
    }

    /// Ends the session. Local state is cleared even when the server call
    /// fails; the failure is only logged.
    pub async fn logout(&mut self) {
        self.dispatch(AuthEvent::LogoutStarted);

        if let Err(err) = self.api.logout().await {
            tracing::warn!(kind = ?err.kind, error = %err, "Logout request failed; clearing local session anyway");
        }

        self.dispatch(AuthEvent::LoggedOut);
    }

    /// Resolves the current user from the ambient session. Call once at startup.
    pub async fn bootstrap(&mut self) -> BootstrapOutcome {
        self.dispatch(AuthEvent::BootstrapStarted);

        match self.api.current_user().await {
            Ok(user) => {
                self.dispatch(AuthEvent::SessionRestored(user.clone()));
                BootstrapOutcome::Restored(user)
            }
            Err(err) if err.clears_session() => {
                self.dispatch(AuthEvent::SessionCleared);
                BootstrapOutcome::Cleared
            }
            Err(err) => {
                tracing::warn!(error = %err, "Could not resolve session; keeping current state");
                self.dispatch(AuthEvent::RequestFailed(err.message.clone()));
                BootstrapOutcome::Unknown(err)
            }
        }
    }

    /// Applies the error policy to a failure from any other request:
    /// Unauthenticated and Unauthorized clear the session, anything else is
    /// recorded and the session is kept.
    pub fn report_error(&mut self, err: &ApiError) {
        if err.clears_session() {
            self.dispatch(AuthEvent::SessionCleared);
        } else {
            self.dispatch(AuthEvent::RequestFailed(err.message.clone()));
        }
    }
}
