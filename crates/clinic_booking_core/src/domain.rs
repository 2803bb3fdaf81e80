//! crates/clinic_booking_core/src/domain.rs
//!
//! Defines the pure, core data structures for the booking workflow.
//! These structs are independent of any database or serialization format.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A clinician listed in the directory. Identity is the display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    pub name: String,
    pub specialty: String,
    pub location: String,
    /// Consultation fee in whole Naira. Always positive.
    pub fee: u32,
    pub image_url: String,
}

/// A registered patient account. Passwords are stored exactly as entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl Account {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The input collected by the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

//=========================================================================================
// Slots & Visit Types
//=========================================================================================

/// One of the fixed bookable time labels offered for every provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    NineAm,
    TenAm,
    OneThirtyPm,
    FourPm,
    EightPm,
}

impl Slot {
    /// Every slot, in the order they are offered.
    pub const ALL: [Slot; 5] = [
        Slot::NineAm,
        Slot::TenAm,
        Slot::OneThirtyPm,
        Slot::FourPm,
        Slot::EightPm,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Slot::NineAm => "09:00 AM",
            Slot::TenAm => "10:00 AM",
            Slot::OneThirtyPm => "1:30 PM",
            Slot::FourPm => "16:00 PM",
            Slot::EightPm => "20:00 PM",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("'{0}' is not a bookable time slot")]
pub struct UnknownSlot(pub String);

impl FromStr for Slot {
    type Err = UnknownSlot;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Slot::ALL
            .into_iter()
            .find(|slot| slot.label() == s.trim())
            .ok_or_else(|| UnknownSlot(s.to_string()))
    }
}

/// How the patient intends to attend. The form always has one selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum VisitType {
    #[default]
    InPerson,
    Online,
}

impl VisitType {
    pub fn label(self) -> &'static str {
        match self {
            VisitType::InPerson => "In-person",
            VisitType::Online => "Online",
        }
    }
}

impl fmt::Display for VisitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("'{0}' is not a known visit type")]
pub struct UnknownVisitType(pub String);

impl FromStr for VisitType {
    type Err = UnknownVisitType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "In-person" => Ok(VisitType::InPerson),
            "Online" => Ok(VisitType::Online),
            other => Err(UnknownVisitType(other.to_string())),
        }
    }
}

//=========================================================================================
// Booking Records
//=========================================================================================

/// Raw values from the booking form, as supplied by the view layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFields {
    pub patient_name: String,
    pub patient_phone: String,
    pub date: String,
    pub visit_type: VisitType,
    pub reason: String,
}

/// A booking request parked until the user authenticates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingIntent {
    pub provider_name: String,
}

/// Shown on receipts when the patient leaves the reason blank.
pub const NO_REASON: &str = "N/A";

/// A confirmed reservation as stored in the ledger. Never mutated after commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub id: Uuid,
    pub patient: String,
    pub phone: String,
    pub provider_name: String,
    pub specialty: String,
    pub location: String,
    pub date: String,
    pub time: Slot,
    pub visit_type: VisitType,
    pub reason: String,
    pub fee: u32,
    pub booked_at: DateTime<Utc>,
}
