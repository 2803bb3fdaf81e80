//! services/booking/src/error.rs
//!
//! Defines the primary error type for the booking service.

use crate::config::ConfigError;
use clinic_booking_core::{BookingError, DirectoryError};

/// The primary error type for the `booking` service.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The booking core refused to start (e.g. it could not restore state).
    #[error("Booking error: {0}")]
    Booking(#[from] BookingError),

    /// The provider list was rejected at load time.
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// Represents an error from the underlying database library.
    #[error("Database Error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migrations failed to apply.
    #[error("Migration Error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A provider list or UI event could not be (de)serialized.
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    /// Represents a standard Input/Output error (e.g., loading the provider file).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
