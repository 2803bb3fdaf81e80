//! crates/clinic_booking_core/src/draft.rs
//!
//! The in-progress booking form and its validation rules.

use crate::domain::{BookingFields, Provider, Reservation, Slot, NO_REASON};
use chrono::Utc;
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// A form input that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    PatientName,
    PatientPhone,
    Date,
    Slot,
}

impl Field {
    /// The inline message shown next to the offending input.
    pub fn message(self) -> &'static str {
        match self {
            Field::PatientName => "Please enter your name.",
            Field::PatientPhone => "Please enter your phone number.",
            Field::Date => "Please select a date.",
            Field::Slot => "Please select a time slot.",
        }
    }
}

/// Every field that failed the last validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeSet<Field>,
}

impl ValidationErrors {
    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Field> + '_ {
        self.fields.iter().copied()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.iter().map(Field::message).collect();
        f.write_str(&messages.join(" "))
    }
}

/// Booking state for one modal lifecycle, bound to a single provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationDraft {
    provider: Provider,
    slot: Option<Slot>,
    fields: BookingFields,
}

impl ReservationDraft {
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            slot: None,
            fields: BookingFields::default(),
        }
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    pub fn slot(&self) -> Option<Slot> {
        self.slot
    }

    pub fn fields(&self) -> &BookingFields {
        &self.fields
    }

    /// Replaces any previously chosen slot.
    pub fn select_slot(&mut self, slot: Slot) {
        self.slot = Some(slot);
    }

    pub fn set_fields(&mut self, fields: BookingFields) {
        self.fields = fields;
    }

    /// Checks every rule independently and reports all failures together.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if self.fields.patient_name.trim().is_empty() {
            errors.fields.insert(Field::PatientName);
        }
        if self.fields.patient_phone.trim().is_empty() {
            errors.fields.insert(Field::PatientPhone);
        }
        if self.fields.date.is_empty() {
            errors.fields.insert(Field::Date);
        }
        if self.slot.is_none() {
            errors.fields.insert(Field::Slot);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Produces the ledger record for this draft, if it validates.
    pub fn to_reservation(&self) -> Result<Reservation, ValidationErrors> {
        self.validate()?;
        let time = self.slot.ok_or_else(|| ValidationErrors {
            fields: BTreeSet::from([Field::Slot]),
        })?;

        let reason = self.fields.reason.trim();
        Ok(Reservation {
            id: Uuid::new_v4(),
            patient: self.fields.patient_name.trim().to_string(),
            phone: self.fields.patient_phone.trim().to_string(),
            provider_name: self.provider.name.clone(),
            specialty: self.provider.specialty.clone(),
            location: self.provider.location.clone(),
            date: self.fields.date.clone(),
            time,
            visit_type: self.fields.visit_type,
            reason: if reason.is_empty() {
                NO_REASON.to_string()
            } else {
                reason.to_string()
            },
            fee: self.provider.fee,
            booked_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VisitType;
    use crate::testing::provider;

    fn complete_fields() -> BookingFields {
        BookingFields {
            patient_name: "Jane Doe".into(),
            patient_phone: "08011112222".into(),
            date: "2025-12-01".into(),
            visit_type: VisitType::Online,
            reason: String::new(),
        }
    }

    #[test]
    fn blank_form_reports_every_field() {
        let draft = ReservationDraft::new(provider("Dr. John Smith", "Cardiologist"));
        let errors = draft.validate().unwrap_err();
        let fields: Vec<Field> = errors.iter().collect();
        assert_eq!(
            fields,
            [Field::PatientName, Field::PatientPhone, Field::Date, Field::Slot]
        );
    }

    #[test]
    fn whitespace_name_and_phone_are_empty() {
        let mut draft = ReservationDraft::new(provider("Dr. John Smith", "Cardiologist"));
        draft.select_slot(Slot::TenAm);
        draft.set_fields(BookingFields {
            patient_name: "   ".into(),
            patient_phone: "\t".into(),
            date: "2025-12-01".into(),
            ..BookingFields::default()
        });

        let errors = draft.validate().unwrap_err();
        assert!(errors.contains(Field::PatientName));
        assert!(errors.contains(Field::PatientPhone));
        assert!(!errors.contains(Field::Date));
        assert!(!errors.contains(Field::Slot));
    }

    #[test]
    fn selecting_a_slot_replaces_the_previous_one() {
        let mut draft = ReservationDraft::new(provider("Dr. John Smith", "Cardiologist"));
        draft.select_slot(Slot::NineAm);
        draft.select_slot(Slot::EightPm);
        assert_eq!(draft.slot(), Some(Slot::EightPm));
    }

    #[test]
    fn reservation_copies_provider_and_defaults_reason() {
        let mut draft = ReservationDraft::new(provider("Dr. John Smith", "Cardiologist"));
        draft.select_slot(Slot::TenAm);
        draft.set_fields(complete_fields());

        let reservation = draft.to_reservation().unwrap();
        assert_eq!(reservation.provider_name, "Dr. John Smith");
        assert_eq!(reservation.specialty, "Cardiologist");
        assert_eq!(reservation.time, Slot::TenAm);
        assert_eq!(reservation.visit_type, VisitType::Online);
        assert_eq!(reservation.reason, NO_REASON);
        assert_eq!(reservation.fee, 8000);
    }

    #[test]
    fn reason_is_trimmed_and_kept() {
        let mut draft = ReservationDraft::new(provider("Dr. John Smith", "Cardiologist"));
        draft.select_slot(Slot::TenAm);
        draft.set_fields(BookingFields {
            reason: "  chest pain ".into(),
            ..complete_fields()
        });
        assert_eq!(draft.to_reservation().unwrap().reason, "chest pain");
    }

    #[test]
    fn messages_match_the_form() {
        assert_eq!(Field::Slot.message(), "Please select a time slot.");
        assert_eq!(Field::PatientPhone.message(), "Please enter your phone number.");
    }
}
