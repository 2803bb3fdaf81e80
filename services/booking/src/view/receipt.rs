//! services/booking/src/view/receipt.rs
//!
//! The confirmation receipt shown after a successful booking. Turning it into an
//! image is left to the page; only the download name is fixed here.

use crate::view::models::naira;
use clinic_booking_core::{Reservation, NO_REASON};
use serde::Serialize;

pub const RECEIPT_FILE_NAME: &str = "CityCare_Appointment_Receipt.png";

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ReceiptView {
    pub patient: String,
    pub doctor: String,
    pub specialty: String,
    pub location: String,
    pub date: String,
    pub time: String,
    pub visit_type: String,
    pub number: String,
    pub reason: String,
    pub fee: String,
    pub download_name: &'static str,
}

impl From<&Reservation> for ReceiptView {
    fn from(reservation: &Reservation) -> Self {
        Self {
            patient: reservation.patient.clone(),
            doctor: reservation.provider_name.clone(),
            specialty: reservation.specialty.clone(),
            location: reservation.location.clone(),
            date: reservation.date.clone(),
            time: reservation.time.label().to_string(),
            visit_type: reservation.visit_type.label().to_string(),
            number: reservation.phone.clone(),
            reason: if reservation.reason.is_empty() {
                NO_REASON.to_string()
            } else {
                reservation.reason.clone()
            },
            fee: naira(reservation.fee),
            download_name: RECEIPT_FILE_NAME,
        }
    }
}
