//! services/booking/src/view/protocol.rs
//!
//! Defines the message protocol between the page and the booking service. The page
//! sends one `UiEvent` per user action and receives a full `ServerMessage` back.

use crate::view::models::{CategoryOption, HeaderView, ModalView, ProviderCard};
use clinic_booking_core::{BookingFields, Registration, VisitType};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

//=========================================================================================
// Messages Sent FROM the Page TO the Service
//=========================================================================================

/// The user actions the page can report.
///
/// `Debug` is written by hand so passwords never reach the logs.
#[derive(Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// Applies the search box and the specialty selector.
    Search {
        #[serde(default)]
        query: String,
        #[serde(default)]
        category: String,
    },

    /// Clears the search box and the specialty selector.
    ResetFilters,

    /// The "Book Appointment" button on a provider card.
    Book { provider: String },

    SelectSlot { slot: String },

    /// The booking form's confirm button.
    Submit(BookingForm),

    /// Closes the booking modal or the registration prompt without booking.
    Cancel,

    /// Closes the receipt.
    DismissReceipt,

    Register(RegisterForm),

    Login { email: String, password: String },

    Logout,
}

/// Raw booking form values.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct BookingForm {
    pub patient_name: String,
    pub patient_phone: String,
    pub date: String,
    pub visit_type: String,
    pub reason: String,
}

impl BookingForm {
    pub fn into_fields(self) -> BookingFields {
        let visit_type = if self.visit_type.trim().is_empty() {
            VisitType::default()
        } else {
            self.visit_type.parse::<VisitType>().unwrap_or_else(|e| {
                warn!("{}; using the default visit type", e);
                VisitType::default()
            })
        };
        BookingFields {
            patient_name: self.patient_name,
            patient_phone: self.patient_phone,
            date: self.date,
            visit_type,
            reason: self.reason,
        }
    }
}

#[derive(Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

const REDACTED: &str = "<redacted>";

impl fmt::Debug for UiEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiEvent::Search { query, category } => f
                .debug_struct("Search")
                .field("query", query)
                .field("category", category)
                .finish(),
            UiEvent::ResetFilters => f.write_str("ResetFilters"),
            UiEvent::Book { provider } => {
                f.debug_struct("Book").field("provider", provider).finish()
            }
            UiEvent::SelectSlot { slot } => {
                f.debug_struct("SelectSlot").field("slot", slot).finish()
            }
            UiEvent::Submit(form) => f.debug_tuple("Submit").field(form).finish(),
            UiEvent::Cancel => f.write_str("Cancel"),
            UiEvent::DismissReceipt => f.write_str("DismissReceipt"),
            UiEvent::Register(form) => f.debug_tuple("Register").field(form).finish(),
            UiEvent::Login { email, .. } => f
                .debug_struct("Login")
                .field("email", email)
                .field("password", &REDACTED)
                .finish(),
            UiEvent::Logout => f.write_str("Logout"),
        }
    }
}

impl fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterForm")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &REDACTED)
            .finish()
    }
}

impl From<RegisterForm> for Registration {
    fn from(form: RegisterForm) -> Self {
        Registration {
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            password: form.password,
        }
    }
}

//=========================================================================================
// Messages Sent FROM the Service TO the Page
//=========================================================================================

/// Represents the structured messages the service sends back to the page.
#[derive(Serialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Everything the page needs to redraw after an event.
    Update(ViewUpdate),

    /// The event could not be understood; nothing changed.
    Error { message: String },
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ViewUpdate {
    pub header: HeaderView,
    pub specialty_options: Vec<CategoryOption>,
    pub query: String,
    pub category: String,
    pub cards: Vec<ProviderCard>,
    pub modal: ModalView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Info,
    Error,
}

/// A one-off alert for the user.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}
