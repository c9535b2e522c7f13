use std::sync::Arc;

use campusdesk_config::{CookieConfig, CorsConfig, EmailConfig, JwtConfig, ServerConfig};
use campusdesk_core::{AppError, Role, hash_password};
use campusdesk_db::{CredentialStore, InMemoryCredentialStore, PgCredentialStore};
use campusdesk_models::NewUser;

use crate::utils::email::{EmailService, mailer_from_config};

/// Shared, read-only application state. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn CredentialStore>,
    pub email: EmailService,
    pub jwt_config: JwtConfig,
    pub cookie_config: CookieConfig,
    pub email_config: EmailConfig,
    pub cors_config: CorsConfig,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("cookie_config", &self.cookie_config)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// State with the given store and everything else read from the environment.
    pub fn from_env(users: Arc<dyn CredentialStore>, server: &ServerConfig) -> Self {
        let email_config = EmailConfig::from_env();

        Self {
            users,
            email: EmailService::new(mailer_from_config(&email_config), &email_config),
            jwt_config: JwtConfig::from_env(),
            cookie_config: CookieConfig::from_env(server.environment),
            email_config,
            cors_config: CorsConfig::from_env(),
        }
    }
}

pub async fn init_app_state(server: &ServerConfig) -> anyhow::Result<AppState> {
    let users: Arc<dyn CredentialStore> = match server.credential_store {
        campusdesk_config::CredentialStoreKind::Postgres => {
            let database_url = std::env::var("DATABASE_URL").map_err(|_| {
                anyhow::anyhow!("DATABASE_URL must be set (or CREDENTIAL_STORE=memory)")
            })?;
            let pool = campusdesk_db::init_db_pool(&database_url).await?;
            campusdesk_db::run_migrations(&pool).await?;
            Arc::new(PgCredentialStore::new(pool))
        }
        campusdesk_config::CredentialStoreKind::Memory => {
            tracing::warn!("Using in-memory credential store; users are lost on restart");
            Arc::new(InMemoryCredentialStore::new())
        }
    };

    Ok(AppState::from_env(users, server))
}

/// Creates a SUPER_ADMIN from `SEED_ADMIN_EMAIL` / `SEED_ADMIN_PASSWORD` when
/// both are set and the email is not taken yet. Mostly useful with the
/// in-memory store, which starts empty.
pub async fn seed_admin_from_env(state: &AppState) -> Result<(), AppError> {
    let (Ok(email), Ok(password)) = (
        std::env::var("SEED_ADMIN_EMAIL"),
        std::env::var("SEED_ADMIN_PASSWORD"),
    ) else {
        return Ok(());
    };

    if state.users.find_by_email(&email).await?.is_some() {
        return Ok(());
    }

    let user = state
        .users
        .insert(NewUser {
            name: std::env::var("SEED_ADMIN_NAME").unwrap_or_else(|_| "Administrator".to_string()),
            email,
            password_hash: hash_password(&password)?,
            role: Role::SuperAdmin,
        })
        .await?;

    tracing::info!(user_id = %user.id, email = %user.email, "Seeded super admin");
    Ok(())
}
