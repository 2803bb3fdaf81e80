//! crates/clinic_booking_core/src/ports.rs
//!
//! Defines the storage contract for the booking core.
//! The trait forms the boundary of the hexagonal architecture, allowing the core
//! to be independent of the concrete persistence mechanism.

use crate::domain::{Account, Reservation};
use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from the underlying storage.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait StorageService: Send + Sync {
    // --- Accounts ---

    /// Stores a new account. Fails with `AlreadyExists` if the email is taken.
    async fn insert_account(&self, account: &Account) -> PortResult<()>;

    /// Fetches an account by exact email. Fails with `NotFound` if absent.
    async fn get_account_by_email(&self, email: &str) -> PortResult<Account>;

    // --- Session ---
    async fn load_session(&self) -> PortResult<Option<Account>>;

    async fn save_session(&self, account: &Account) -> PortResult<()>;

    async fn clear_session(&self) -> PortResult<()>;

    // --- Reservations ---

    /// Durably appends a reservation. Only returns once the write is committed.
    async fn append_reservation(&self, reservation: &Reservation) -> PortResult<()>;

    /// Returns every stored reservation in insertion order.
    async fn list_reservations(&self) -> PortResult<Vec<Reservation>>;
}
