//! services/booking/src/view/auth.rs
//!
//! Handlers for the register, login and logout events. Each returns the alert the
//! page should show.

use crate::view::protocol::{Notice, RegisterForm};
use crate::view::state::ViewState;
use clinic_booking_core::{AuthError, BookingError};
use tracing::error;

fn auth_failure(e: BookingError) -> Notice {
    match e {
        BookingError::Auth(AuthError::DuplicateEmail(_)) => {
            Notice::error("Account already exists with this email.")
        }
        BookingError::Auth(AuthError::InvalidCredentials) => {
            Notice::error("Invalid credentials. Please check your email and password.")
        }
        other => {
            error!("Authentication failed: {:?}", other);
            Notice::error("Something went wrong. Please try again.")
        }
    }
}

/// Registers and signs in a new account, then resumes any parked booking.
pub async fn register_handler(state: &mut ViewState, form: RegisterForm) -> Notice {
    match state.orchestrator.register(form.into()).await {
        Ok(account) => Notice::info(format!("Welcome, {}!", account.first_name)),
        Err(e) => auth_failure(e),
    }
}

/// Signs in an existing account, then resumes any parked booking.
pub async fn login_handler(state: &mut ViewState, email: &str, password: &str) -> Notice {
    match state.orchestrator.login(email, password).await {
        Ok(account) => Notice::info(format!("Welcome back, {}!", account.first_name)),
        Err(e) => auth_failure(e),
    }
}

/// Signs out and resets the page as a reload would.
pub async fn logout_handler(state: &mut ViewState) -> Option<Notice> {
    match state.orchestrator.logout().await {
        Ok(()) => {
            state.reset_filters();
            None
        }
        Err(e) => {
            error!("Failed to logout: {:?}", e);
            Some(Notice::error("Failed to logout. Please try again."))
        }
    }
}
