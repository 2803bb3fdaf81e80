//! services/booking/src/view/dispatch.rs
//!
//! This is the main entry point and control loop for a page connection. Each
//! `UiEvent` is turned into one explicit call on the booking orchestrator, and the
//! page is re-rendered from the resulting state.

use crate::error::AppError;
use crate::view::{
    auth::{login_handler, logout_handler, register_handler},
    models::{category_options, HeaderView, ModalView, ProviderCard},
    protocol::{Notice, ServerMessage, UiEvent, ViewUpdate},
    state::ViewState,
};
use clinic_booking_core::{BookingError, Slot};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info, warn};

/// Builds the full view for the current state.
pub fn render(state: &ViewState, notice: Option<Notice>) -> ViewUpdate {
    let orchestrator = &state.orchestrator;
    let directory = orchestrator.directory();
    ViewUpdate {
        header: HeaderView::for_session(orchestrator.current_session()),
        specialty_options: category_options(directory.categories()),
        query: state.query.clone(),
        category: state.category.clone(),
        cards: directory
            .search(&state.query, &state.category)
            .iter()
            .map(ProviderCard::from)
            .collect(),
        modal: ModalView::from(orchestrator.state()),
        notice,
    }
}

/// Applies one event and returns the page as it should now look.
pub async fn dispatch(state: &mut ViewState, event: UiEvent) -> ViewUpdate {
    debug!("Dispatching {:?}", event);
    let notice = match event {
        UiEvent::Search { query, category } => {
            state.query = query;
            state.category = category;
            None
        }
        UiEvent::ResetFilters => {
            state.reset_filters();
            None
        }
        UiEvent::Book { provider } => {
            state.orchestrator.start_booking(&provider);
            None
        }
        UiEvent::SelectSlot { slot } => match slot.parse::<Slot>() {
            Ok(slot) => state.orchestrator.select_slot(slot).err().and_then(ignorable),
            Err(e) => Some(Notice::error(e.to_string())),
        },
        UiEvent::Submit(form) => match state.orchestrator.submit(form.into_fields()).await {
            Ok(reservation) => {
                info!("Showing receipt for reservation {}", reservation.id);
                None
            }
            // Field errors are rendered inline on the form.
            Err(BookingError::Validation(_)) => None,
            Err(BookingError::Storage(e)) => {
                error!("Failed to save booking: {}", e);
                Some(Notice::error(
                    "We could not save your booking. Please try again.",
                ))
            }
            Err(e) => ignorable(e),
        },
        UiEvent::Cancel => state.orchestrator.cancel().err().and_then(ignorable),
        UiEvent::DismissReceipt => state
            .orchestrator
            .dismiss_confirmation()
            .err()
            .and_then(ignorable),
        UiEvent::Register(form) => Some(register_handler(state, form).await),
        UiEvent::Login { email, password } => {
            Some(login_handler(state, &email, &password).await)
        }
        UiEvent::Logout => logout_handler(state).await,
    };
    render(state, notice)
}

/// Stale clicks (e.g. closing a modal that is already closed) are logged and dropped.
fn ignorable(e: BookingError) -> Option<Notice> {
    match e {
        BookingError::InvalidTransition { .. } => {
            debug!("Ignoring stale event: {}", e);
            None
        }
        other => {
            warn!("Booking action failed: {}", other);
            Some(Notice::error(other.to_string()))
        }
    }
}

async fn write_message<W>(writer: &mut W, message: &ServerMessage) -> Result<(), AppError>
where
    W: AsyncWrite + Unpin,
{
    let mut json = serde_json::to_string(message)?;
    json.push('\n');
    writer.write_all(json.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

/// Serves one page over newline-delimited JSON: the initial render first, then
/// one `ServerMessage` per incoming `UiEvent` line, until the reader closes.
pub async fn serve_lines<R, W>(
    state: &mut ViewState,
    reader: R,
    mut writer: W,
) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    write_message(&mut writer, &ServerMessage::Update(render(state, None))).await?;

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let message = match serde_json::from_str::<UiEvent>(&line) {
            Ok(event) => ServerMessage::Update(dispatch(state, event).await),
            Err(e) => {
                warn!("Rejected malformed event: {}", e);
                ServerMessage::Error {
                    message: format!("Unrecognised event: {}", e),
                }
            }
        };
        write_message(&mut writer, &message).await?;
    }

    info!("Page disconnected.");
    Ok(())
}
