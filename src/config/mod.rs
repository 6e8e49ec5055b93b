use crate::core::{AppError, Result};
use std::env;
use std::str::FromStr;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub storage: StorageBackend,
    /// Present when `storage` is [`StorageBackend::MySql`]
    pub database: Option<DatabaseConfig>,
    pub server: ServerConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Configuration(format!("Invalid LOG_FORMAT: {}", other))),
        }
    }
}

/// Where bikes and accounts are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    MySql,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" => Ok(StorageBackend::MySql),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(AppError::Configuration(format!(
                "Invalid STORAGE_BACKEND: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub realm: String,
    pub bootstrap_admin: Option<BootstrapAccount>,
    pub bootstrap_user: Option<BootstrapAccount>,
}

/// Account created or refreshed at startup
#[derive(Clone)]
pub struct BootstrapAccount {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for BootstrapAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAccount")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let storage = env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "mysql".to_string())
            .parse()?;

        let database = match storage {
            StorageBackend::MySql => Some(DatabaseConfig::from_env()?),
            StorageBackend::Memory => None,
        };

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                log_format: env::var("LOG_FORMAT")
                    .unwrap_or_else(|_| "pretty".to_string())
                    .parse()?,
            },
            storage,
            database,
            server: ServerConfig::from_env()?,
            security: SecurityConfig {
                realm: env::var("AUTH_REALM").unwrap_or_else(|_| "bikeservice".to_string()),
                bootstrap_admin: bootstrap_account("ADMIN_USERNAME", "ADMIN_PASSWORD")?,
                bootstrap_user: bootstrap_account("USER_USERNAME", "USER_PASSWORD")?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AppError::Configuration(
                "SERVER_PORT must be greater than 0".to_string(),
            ));
        }

        if self.server.workers == 0 {
            return Err(AppError::Configuration(
                "SERVER_WORKERS must be greater than 0".to_string(),
            ));
        }

        if self.security.realm.is_empty() || self.security.realm.contains('"') {
            return Err(AppError::Configuration(
                "AUTH_REALM must be non-empty and contain no quotes".to_string(),
            ));
        }

        match (&self.storage, &self.database) {
            (StorageBackend::MySql, Some(database)) => database.validate()?,
            (StorageBackend::MySql, None) => {
                return Err(AppError::Configuration(
                    "MySQL storage requires database settings".to_string(),
                ))
            }
            (StorageBackend::Memory, _) => {}
        }

        Ok(())
    }
}

fn bootstrap_account(user_var: &str, password_var: &str) -> Result<Option<BootstrapAccount>> {
    match (env::var(user_var).ok(), env::var(password_var).ok()) {
        (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
            Ok(Some(BootstrapAccount { username, password }))
        }
        (Some(username), _) if !username.is_empty() => Err(AppError::Configuration(format!(
            "{} is set but {} is missing",
            user_var, password_var
        ))),
        _ => Ok(None),
    }
}
