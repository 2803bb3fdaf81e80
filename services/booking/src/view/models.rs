//! services/booking/src/view/models.rs
//!
//! Serializable view models derived from the booking core. The page renders these
//! directly; nothing here holds state of its own.

use crate::view::receipt::ReceiptView;
use clinic_booking_core::{
    Account, BookingState, Field, Provider, ReservationDraft, Slot, ValidationErrors,
};
use serde::Serialize;

/// Formats a fee the way the clinic prints it.
pub fn naira(fee: u32) -> String {
    format!("₦{}", fee)
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HeaderView {
    Guest,
    SignedIn { display_name: String },
}

impl HeaderView {
    pub fn for_session(session: Option<&Account>) -> Self {
        match session {
            Some(account) => HeaderView::SignedIn {
                display_name: account.display_name(),
            },
            None => HeaderView::Guest,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    pub value: String,
    pub label: String,
}

/// The specialty selector: "All Specialties" followed by each category.
pub fn category_options(categories: &[String]) -> Vec<CategoryOption> {
    std::iter::once(CategoryOption {
        value: String::new(),
        label: "All Specialties".to_string(),
    })
    .chain(categories.iter().map(|c| CategoryOption {
        value: c.clone(),
        label: c.clone(),
    }))
    .collect()
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ProviderCard {
    pub name: String,
    pub specialty: String,
    pub location: String,
    pub fee_label: String,
    pub image_url: String,
}

impl From<&Provider> for ProviderCard {
    fn from(provider: &Provider) -> Self {
        Self {
            name: provider.name.clone(),
            specialty: provider.specialty.clone(),
            location: provider.location.clone(),
            fee_label: format!("Fee: {}", naira(provider.fee)),
            image_url: provider.image_url.clone(),
        }
    }
}

//=========================================================================================
// Modal
//=========================================================================================

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModalView {
    Hidden,
    /// Unauthenticated users are sent to registration first.
    RegisterPrompt,
    Booking(BookingFormView),
    Receipt(ReceiptView),
}

impl From<&BookingState> for ModalView {
    fn from(state: &BookingState) -> Self {
        match state {
            BookingState::Idle => ModalView::Hidden,
            BookingState::AwaitingAuth(_) => ModalView::RegisterPrompt,
            BookingState::DraftOpen(draft) => {
                ModalView::Booking(BookingFormView::new(draft, None))
            }
            BookingState::DraftSubmitted { draft, errors } => {
                ModalView::Booking(BookingFormView::new(draft, Some(errors)))
            }
            BookingState::Confirmed(reservation) => ModalView::Receipt(reservation.into()),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SlotButton {
    pub label: &'static str,
    pub active: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BookingFormView {
    pub title: String,
    pub provider_name: String,
    pub specialty: String,
    pub location: String,
    pub fee_label: String,
    pub image_url: String,
    pub slots: Vec<SlotButton>,
    pub selected_slot_label: String,
    pub errors: Vec<FieldError>,
}

fn field_id(field: Field) -> &'static str {
    match field {
        Field::PatientName => "patient_name",
        Field::PatientPhone => "patient_phone",
        Field::Date => "date",
        Field::Slot => "slot",
    }
}

impl BookingFormView {
    fn new(draft: &ReservationDraft, errors: Option<&ValidationErrors>) -> Self {
        let provider = draft.provider();
        let selected = draft.slot();
        Self {
            title: format!("Book Appointment with {}", provider.name),
            provider_name: provider.name.clone(),
            specialty: provider.specialty.clone(),
            location: provider.location.clone(),
            fee_label: format!("Fee: {}", naira(provider.fee)),
            image_url: provider.image_url.clone(),
            slots: Slot::ALL
                .into_iter()
                .map(|slot| SlotButton {
                    label: slot.label(),
                    active: selected == Some(slot),
                })
                .collect(),
            selected_slot_label: match selected {
                Some(slot) => format!("Time: {}", slot),
                None => "Time: —".to_string(),
            },
            errors: errors
                .map(|errors| {
                    errors
                        .iter()
                        .map(|field| FieldError {
                            field: field_id(field),
                            message: field.message(),
                        })
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}
