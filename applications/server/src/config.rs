/// Service configuration
use crate::error::{Result, ServiceError};
use roster_storage::PoolSettings;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_database")]
    pub database: DatabaseSettings,

    /// Test configuration flag: skips schema initialization at startup.
    #[serde(default)]
    pub testing: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_db_host")]
    pub host: String,

    #[serde(default = "default_db_port")]
    pub port: u16,

    #[serde(default = "default_db_name")]
    pub name: String,

    #[serde(default = "default_db_user")]
    pub user: String,

    #[serde(default = "default_db_password")]
    pub password: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,

    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

impl ServiceConfig {
    /// Load configuration from file and environment
    ///
    /// Reads an optional `config.toml`, then overrides with environment
    /// variables prefixed `ROSTER`, `__`-separated for nesting
    /// (e.g. `ROSTER_DATABASE__HOST`, `ROSTER_SERVER__PORT`,
    /// `ROSTER_TESTING`).
    pub fn load() -> Result<Self> {
        let mut settings = config::Config::builder();

        // Load from config file if it exists
        let config_path = PathBuf::from("config.toml");
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("ROSTER")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServiceError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServiceError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.database.max_connections == 0 {
            return Err(ServiceError::Config(
                "database.max_connections must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl DatabaseSettings {
    /// Settings handed to the storage layer's pool constructor.
    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            host: self.host.clone(),
            port: self.port,
            database: self.name.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            max_connections: self.max_connections,
            idle_timeout: Duration::from_secs(self.idle_timeout_secs),
            acquire_timeout: Duration::from_secs(self.acquire_timeout_secs),
        }
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_database() -> DatabaseSettings {
    DatabaseSettings {
        host: default_db_host(),
        port: default_db_port(),
        name: default_db_name(),
        user: default_db_user(),
        password: default_db_password(),
        max_connections: default_max_connections(),
        idle_timeout_secs: default_idle_timeout_secs(),
        acquire_timeout_secs: default_acquire_timeout_secs(),
    }
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> u16 {
    5432
}

fn default_db_name() -> String {
    "users_db".to_string()
}

fn default_db_user() -> String {
    "postgres".to_string()
}

fn default_db_password() -> String {
    "password".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_idle_timeout_secs() -> u64 {
    30
}

fn default_acquire_timeout_secs() -> u64 {
    2
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            database: default_database(),
            testing: false,
        }
    }
}
