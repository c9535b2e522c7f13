//! # CampusDesk DB
//!
//! PostgreSQL pool initialization, schema migrations, and the credential
//! stores behind the login flow.
//!
//! - [`store`]: The [`CredentialStore`] trait
//! - [`postgres`]: [`PgCredentialStore`], backed by the `users` table
//! - [`memory`]: [`InMemoryCredentialStore`], for tests and demo mode
//!
//! # Example
//!
//! ```ignore
//! use campusdesk_db::{PgCredentialStore, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&std::env::var("DATABASE_URL")?).await?;
//! run_migrations(&pool).await?;
//! let users = PgCredentialStore::new(pool);
//! ```

pub mod memory;
pub mod postgres;
pub mod store;

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

pub use memory::InMemoryCredentialStore;
pub use postgres::PgCredentialStore;
pub use store::CredentialStore;

/// Creates a PostgreSQL connection pool.
///
/// The returned pool is cheaply cloneable and is shared through the
/// application state.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;

    tracing::info!("Connected to database");
    Ok(pool)
}

/// Applies the migrations under `migrations/` at the workspace root.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}
