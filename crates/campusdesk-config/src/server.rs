use std::env;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    pub fn from_env() -> Self {
        match env::var("APP_ENV")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "production" | "prod" => AppEnvironment::Production,
            "test" => AppEnvironment::Test,
            _ => AppEnvironment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        *self == AppEnvironment::Production
    }
}

/// Backend holding user records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialStoreKind {
    Postgres,
    /// Process-local store, for demos and tests. Records vanish on restart.
    Memory,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub addr: String,
    pub metrics_addr: String,
    pub environment: AppEnvironment,
    pub credential_store: CredentialStoreKind,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let credential_store = match env::var("CREDENTIAL_STORE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "memory" => CredentialStoreKind::Memory,
            _ => CredentialStoreKind::Postgres,
        };

        Self {
            addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string()),
            metrics_addr: env::var("METRICS_ADDR").unwrap_or_else(|_| "0.0.0.0:9090".to_string()),
            environment: AppEnvironment::from_env(),
            credential_store,
        }
    }
}
