// Application wiring shared by the binary and the HTTP tests.

use std::sync::Arc;

use actix_web::web;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{AppConfig, Config, DatabaseConfig, LogFormat, SecurityConfig, StorageBackend};
use crate::core::Result;
use crate::middleware::{auth::provision_user, json_config, BasicAuth};
use crate::modules::bikes::{BikeService, InMemoryBikeRepository, MySqlBikeRepository};
use crate::modules::users::{CredentialStore, InMemoryCredentialStore, MySqlCredentialStore, Role};
use crate::modules::{bikes, health};

/// Shared services handed to every worker
#[derive(Clone)]
pub struct AppState {
    pub bike_service: Arc<BikeService>,
    pub credentials: Arc<dyn CredentialStore>,
}

impl AppState {
    /// Connect the configured storage backend and provision bootstrap accounts
    pub async fn build(config: &Config) -> Result<Self> {
        let state = match (config.storage, &config.database) {
            (StorageBackend::MySql, Some(database)) => {
                let pool = database.create_pool().await?;
                tracing::info!(
                    "Database pool initialized ({} connections)",
                    database.max_connections
                );

                DatabaseConfig::run_migrations(&pool).await?;
                tracing::info!("Database migrations applied");

                Self {
                    bike_service: Arc::new(BikeService::new(Arc::new(MySqlBikeRepository::new(
                        pool.clone(),
                    )))),
                    credentials: Arc::new(MySqlCredentialStore::new(pool)),
                }
            }
            (StorageBackend::MySql, None) => {
                return Err(crate::core::AppError::Configuration(
                    "MySQL storage requires database settings".to_string(),
                ))
            }
            (StorageBackend::Memory, _) => {
                tracing::warn!("Using in-memory storage; data is lost on shutdown");
                Self::in_memory()
            }
        };

        state.provision_accounts(&config.security).await?;
        Ok(state)
    }

    /// State backed entirely by process memory
    pub fn in_memory() -> Self {
        Self {
            bike_service: Arc::new(BikeService::new(Arc::new(InMemoryBikeRepository::new()))),
            credentials: Arc::new(InMemoryCredentialStore::new()),
        }
    }

    async fn provision_accounts(&self, security: &SecurityConfig) -> Result<()> {
        let accounts = [
            (&security.bootstrap_admin, Role::Admin),
            (&security.bootstrap_user, Role::User),
        ];

        for (account, role) in accounts {
            if let Some(account) = account {
                provision_user(
                    self.credentials.as_ref(),
                    &account.username,
                    &account.password,
                    role,
                )
                .await?;
            }
        }

        Ok(())
    }

    pub fn auth_middleware(&self, realm: &str) -> Result<BasicAuth> {
        BasicAuth::new(self.credentials.clone(), realm)
    }
}

/// Register services and every route on an app
pub fn configure_app(state: AppState) -> impl Fn(&mut web::ServiceConfig) + Clone {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(state.bike_service.clone()))
            .app_data(json_config())
            .configure(health::configure)
            .configure(bikes::configure);
    }
}

/// Initialize tracing
pub fn init_tracing(app: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("bikeservice={},actix_web=info", app.log_level).into());

    let registry = tracing_subscriber::registry().with(filter);

    let result = match app.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };

    if let Err(e) = result {
        eprintln!("Tracing already initialized: {}", e);
    }
}
