use std::sync::Arc;

use crate::config::config::{AppConfig, PaginationConfig};
use crate::error::Result;
use crate::observability::AppMetrics;
use crate::services::mail::Mailer;
use crate::storage::{Repositories, SurrealPool};

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db_pool: SurrealPool,
    /// One repository per review entity
    pub repos: Repositories,
    /// Outgoing mail transport
    pub mailer: Arc<dyn Mailer>,
    /// Sender address for outgoing mail
    pub from_address: String,
    /// List pagination defaults
    pub pagination: PaginationConfig,
    /// Request and download counters
    pub metrics: Arc<AppMetrics>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("db_pool", &"SurrealPool")
            .field("repos", &self.repos)
            .field("mailer", &self.mailer.name())
            .field("from_address", &self.from_address)
            .field("pagination", &self.pagination)
            .finish()
    }
}

impl AppState {
    /// Create new application state
    pub async fn new(
        db_pool: SurrealPool,
        mailer: Box<dyn Mailer>,
        config: &AppConfig,
    ) -> Result<Self> {
        let repos = Repositories::surreal(db_pool.inner().await?);

        Ok(Self {
            db_pool,
            repos,
            mailer: Arc::from(mailer),
            from_address: config.email.from_address.clone(),
            pagination: config.pagination.clone(),
            metrics: Arc::new(AppMetrics::default()),
        })
    }
}
