//! crates/clinic_booking_core/src/ledger.rs
//!
//! The append-only record of confirmed reservations.

use crate::domain::Reservation;
use crate::ports::{PortResult, StorageService};
use std::sync::Arc;
use tracing::info;

pub struct ReservationLedger {
    storage: Arc<dyn StorageService>,
    entries: Vec<Reservation>,
}

impl ReservationLedger {
    /// Loads every previously committed reservation.
    pub async fn load(storage: Arc<dyn StorageService>) -> PortResult<Self> {
        let entries = storage.list_reservations().await?;
        Ok(Self { storage, entries })
    }

    /// Persists the reservation, then records it locally. Nothing is kept on failure.
    pub async fn append(&mut self, reservation: Reservation) -> PortResult<&Reservation> {
        self.storage.append_reservation(&reservation).await?;
        info!(
            "Reservation {} committed for {} with {} at {} on {}",
            reservation.id,
            reservation.patient,
            reservation.provider_name,
            reservation.time,
            reservation.date
        );
        self.entries.push(reservation);
        Ok(&self.entries[self.entries.len() - 1])
    }

    pub fn all(&self) -> &[Reservation] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
