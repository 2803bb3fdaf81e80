//! services/booking/src/view/state.rs
//!
//! Defines the state owned by one running page: the booking orchestrator plus the
//! current directory filters.

use crate::adapters::{load_directory, SqliteAdapter};
use crate::config::Config;
use crate::error::AppError;
use clinic_booking_core::{BookingOrchestrator, StorageService};
use std::sync::Arc;
use tracing::info;

/// Everything the view adapter needs between events.
pub struct ViewState {
    pub orchestrator: BookingOrchestrator,
    pub query: String,
    pub category: String,
}

impl ViewState {
    pub fn new(orchestrator: BookingOrchestrator) -> Self {
        Self {
            orchestrator,
            query: String::new(),
            category: String::new(),
        }
    }

    /// Loads the directory, opens storage and restores the persisted session and
    /// ledger, as a fresh page load does.
    pub async fn from_config(config: &Config) -> Result<Self, AppError> {
        let directory = Arc::new(load_directory(config.directory_path.as_deref()).await?);

        info!("Opening database...");
        let db = SqliteAdapter::connect(&config.database_url).await?;
        info!("Running database migrations...");
        db.run_migrations().await?;
        info!("Database migrations complete.");

        let storage: Arc<dyn StorageService> = Arc::new(db);
        let orchestrator = BookingOrchestrator::restore(directory, storage).await?;
        info!(
            "Restored {} reservations; signed in: {}",
            orchestrator.ledger().len(),
            orchestrator.current_session().is_some()
        );
        Ok(Self::new(orchestrator))
    }

    pub fn reset_filters(&mut self) {
        self.query.clear();
        self.category.clear();
    }
}
