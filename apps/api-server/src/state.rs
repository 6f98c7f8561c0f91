//! Application state - shared across all handlers.

use std::sync::Arc;

use folio_core::ports::{AuthError, ContentStore, Mailer, ObjectStorage, ObjectStorageError};
use folio_infra::{
    AdminGate, InMemoryContentStore, LogMailer, SendGridMailer, SidecarObjectStorage,
};

#[cfg(feature = "rate-limit")]
use folio_core::ports::RateLimiter;
#[cfg(feature = "rate-limit")]
use folio_infra::{InMemoryRateLimiter, RateLimitConfig};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
    pub objects: Arc<dyn ObjectStorage>,
    pub mailer: Arc<dyn Mailer>,
    pub admin: Arc<AdminGate>,
    #[cfg(feature = "rate-limit")]
    pub admin_limiter: Arc<dyn RateLimiter>,
    pub site_url: String,
}

/// Failures that abort startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("object storage: {0}")]
    ObjectStorage(#[from] ObjectStorageError),

    #[error("admin gate: {0}")]
    Auth(#[from] AuthError),
}

impl AppState {
    /// Build the application state, preferring PostgreSQL and falling back
    /// to the seeded in-memory store.
    pub async fn new(config: &AppConfig) -> Result<Self, StartupError> {
        let store = Self::content_store(config).await;
        Self::with_store(store, config)
    }

    #[cfg(feature = "postgres")]
    async fn content_store(config: &AppConfig) -> Arc<dyn ContentStore> {
        use folio_infra::PostgresContentStore;

        let Some(db_config) = &config.database else {
            tracing::warn!("DATABASE_URL not set. Using seeded in-memory content store.");
            return Arc::new(InMemoryContentStore::seeded());
        };

        match folio_infra::database::connect(db_config).await {
            Ok(conn) => Arc::new(PostgresContentStore::new(conn)),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Arc::new(InMemoryContentStore::seeded())
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn content_store(_config: &AppConfig) -> Arc<dyn ContentStore> {
        tracing::info!("Running without postgres feature - using in-memory content store");
        Arc::new(InMemoryContentStore::seeded())
    }

    /// Wire every adapter other than the content store from `config`.
    pub fn with_store(
        store: Arc<dyn ContentStore>,
        config: &AppConfig,
    ) -> Result<Self, StartupError> {
        let objects: Arc<dyn ObjectStorage> =
            Arc::new(SidecarObjectStorage::new(config.object_storage.clone())?);

        let mailer: Arc<dyn Mailer> = match &config.mail {
            Some(mail) => Arc::new(SendGridMailer::new(mail.clone())),
            None => {
                tracing::warn!("SENDGRID_API_KEY not set. Contact messages will only be logged.");
                Arc::new(LogMailer)
            }
        };

        let admin = Arc::new(AdminGate::new(
            config.admin_password.as_deref(),
            config.production,
        )?);

        #[cfg(feature = "rate-limit")]
        let admin_limiter: Arc<dyn RateLimiter> = Arc::new(InMemoryRateLimiter::new(RateLimitConfig {
            max_requests: config.admin_rate_limit.max_requests,
            window: std::time::Duration::from_secs(config.admin_rate_limit.window_secs),
        }));

        tracing::info!("Application state initialized");

        Ok(Self {
            store,
            objects,
            mailer,
            admin,
            #[cfg(feature = "rate-limit")]
            admin_limiter,
            site_url: config.site_url.clone(),
        })
    }
}
