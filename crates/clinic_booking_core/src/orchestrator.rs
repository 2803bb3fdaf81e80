//! crates/clinic_booking_core/src/orchestrator.rs
//!
//! The booking state machine. It gates drafts on authentication, parks a booking
//! request across the login/registration boundary, validates drafts and commits
//! them to the ledger.

use crate::credentials::{AuthError, CredentialStore};
use crate::directory::Directory;
use crate::domain::{Account, BookingFields, PendingIntent, Registration, Reservation, Slot};
use crate::draft::{ReservationDraft, ValidationErrors};
use crate::ledger::ReservationLedger;
use crate::ports::{PortError, StorageService};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("Storage error: {0}")]
    Storage(#[from] PortError),
    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
    /// Guard for a draft that outlived its session. `logout` resets the state, so
    /// the public flow never reaches it.
    #[error("A signed-in session is required to book")]
    SessionRequired,
}

pub type BookingResult<T> = Result<T, BookingError>;

/// Where the booking modal currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingState {
    Idle,
    AwaitingAuth(PendingIntent),
    DraftOpen(ReservationDraft),
    DraftSubmitted {
        draft: ReservationDraft,
        errors: ValidationErrors,
    },
    Confirmed(Reservation),
}

impl BookingState {
    pub fn label(&self) -> &'static str {
        match self {
            BookingState::Idle => "idle",
            BookingState::AwaitingAuth(_) => "awaiting authentication",
            BookingState::DraftOpen(_) => "a draft is open",
            BookingState::DraftSubmitted { .. } => "a draft has errors",
            BookingState::Confirmed(_) => "showing a confirmation",
        }
    }

    /// The live draft, whether or not it has been submitted yet.
    pub fn draft(&self) -> Option<&ReservationDraft> {
        match self {
            BookingState::DraftOpen(draft) | BookingState::DraftSubmitted { draft, .. } => {
                Some(draft)
            }
            _ => None,
        }
    }
}

/// Owns the session, the single live draft or pending intent, and the ledger.
pub struct BookingOrchestrator {
    directory: Arc<Directory>,
    credentials: CredentialStore,
    ledger: ReservationLedger,
    state: BookingState,
}

impl BookingOrchestrator {
    /// Rebuilds the orchestrator from persisted state, as on a fresh load.
    pub async fn restore(
        directory: Arc<Directory>,
        storage: Arc<dyn StorageService>,
    ) -> BookingResult<Self> {
        let credentials = CredentialStore::restore(storage.clone()).await?;
        let ledger = ReservationLedger::load(storage).await?;
        Ok(Self {
            directory,
            credentials,
            ledger,
            state: BookingState::Idle,
        })
    }

    pub fn state(&self) -> &BookingState {
        &self.state
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn ledger(&self) -> &ReservationLedger {
        &self.ledger
    }

    pub fn current_session(&self) -> Option<&Account> {
        self.credentials.current_session()
    }

    //=====================================================================================
    // Transitions
    //=====================================================================================

    /// Opens a fresh draft for the provider, or parks the request until the user
    /// authenticates. Any previous draft or intent is discarded.
    ///
    /// An unknown provider name leaves the state untouched.
    pub fn start_booking(&mut self, provider_name: &str) {
        if self.credentials.current_session().is_none() {
            debug!("No session; parking booking for {}", provider_name);
            self.state = BookingState::AwaitingAuth(PendingIntent {
                provider_name: provider_name.to_string(),
            });
            return;
        }

        let Some(provider) = self.directory.find(provider_name) else {
            warn!("Ignoring booking for unknown provider '{}'", provider_name);
            return;
        };
        debug!("Opening draft for {}", provider.name);
        self.state = BookingState::DraftOpen(ReservationDraft::new(provider.clone()));
    }

    pub fn select_slot(&mut self, slot: Slot) -> BookingResult<()> {
        match &mut self.state {
            BookingState::DraftOpen(draft) | BookingState::DraftSubmitted { draft, .. } => {
                draft.select_slot(slot);
                Ok(())
            }
            other => Err(BookingError::InvalidTransition {
                action: "select a slot",
                state: other.label(),
            }),
        }
    }

    /// Validates the form against the live draft. On success the reservation is
    /// appended to the ledger and the state moves to `Confirmed`; on failure the
    /// draft stays editable with the failing fields recorded.
    pub async fn submit(&mut self, fields: BookingFields) -> BookingResult<Reservation> {
        if self.credentials.current_session().is_none() {
            return Err(BookingError::SessionRequired);
        }

        let mut draft = match std::mem::replace(&mut self.state, BookingState::Idle) {
            BookingState::DraftOpen(draft) | BookingState::DraftSubmitted { draft, .. } => draft,
            other => {
                let state = other.label();
                self.state = other;
                return Err(BookingError::InvalidTransition {
                    action: "submit",
                    state,
                });
            }
        };
        draft.set_fields(fields);

        let reservation = match draft.to_reservation() {
            Ok(reservation) => reservation,
            Err(errors) => {
                debug!("Draft rejected: {}", errors);
                self.state = BookingState::DraftSubmitted {
                    draft,
                    errors: errors.clone(),
                };
                return Err(BookingError::Validation(errors));
            }
        };

        match self.ledger.append(reservation).await {
            Ok(saved) => {
                let saved = saved.clone();
                self.state = BookingState::Confirmed(saved.clone());
                Ok(saved)
            }
            Err(e) => {
                warn!("Failed to persist reservation: {}", e);
                self.state = BookingState::DraftOpen(draft);
                Err(BookingError::Storage(e))
            }
        }
    }

    /// Resumes a parked booking once a session exists. The intent is consumed here
    /// and cannot fire again.
    pub fn on_auth_success(&mut self) {
        if self.credentials.current_session().is_none() {
            return;
        }
        match std::mem::replace(&mut self.state, BookingState::Idle) {
            BookingState::AwaitingAuth(intent) => {
                info!("Resuming booking for {}", intent.provider_name);
                self.start_booking(&intent.provider_name);
            }
            other => {
                debug!("Authenticated with no pending booking");
                self.state = other;
            }
        }
    }

    /// Abandons the open draft or pending intent without persisting anything.
    pub fn cancel(&mut self) -> BookingResult<()> {
        match self.state {
            BookingState::AwaitingAuth(_)
            | BookingState::DraftOpen(_)
            | BookingState::DraftSubmitted { .. } => {
                debug!("Cancelled while {}", self.state.label());
                self.state = BookingState::Idle;
                Ok(())
            }
            _ => Err(BookingError::InvalidTransition {
                action: "cancel",
                state: self.state.label(),
            }),
        }
    }

    pub fn dismiss_confirmation(&mut self) -> BookingResult<()> {
        match self.state {
            BookingState::Confirmed(_) => {
                self.state = BookingState::Idle;
                Ok(())
            }
            _ => Err(BookingError::InvalidTransition {
                action: "dismiss the confirmation",
                state: self.state.label(),
            }),
        }
    }

    //=====================================================================================
    // Authentication
    //=====================================================================================

    pub async fn register(&mut self, registration: Registration) -> BookingResult<Account> {
        let account = self.credentials.register(registration).await?;
        self.on_auth_success();
        Ok(account)
    }

    pub async fn login(&mut self, email: &str, password: &str) -> BookingResult<Account> {
        let account = self.credentials.login(email, password).await?;
        self.on_auth_success();
        Ok(account)
    }

    /// Clears the session and resets everything derived from it, as a reload would.
    pub async fn logout(&mut self) -> BookingResult<()> {
        self.credentials.logout().await?;
        self.state = BookingState::Idle;
        Ok(())
    }
}
