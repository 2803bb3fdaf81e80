pub mod credentials;
pub mod directory;
pub mod domain;
pub mod draft;
pub mod ledger;
pub mod orchestrator;
pub mod ports;

#[cfg(test)]
mod testing;

pub use credentials::{AuthError, AuthResult, CredentialStore};
pub use directory::{Directory, DirectoryError};
pub use domain::{
    Account, BookingFields, PendingIntent, Provider, Registration, Reservation, Slot, VisitType,
    NO_REASON,
};
pub use draft::{Field, ReservationDraft, ValidationErrors};
pub use ledger::ReservationLedger;
pub use orchestrator::{BookingError, BookingOrchestrator, BookingResult, BookingState};
pub use ports::{PortError, PortResult, StorageService};
