//! A booking made in one run is still there, with the same session, in the next.

use booking_lib::config::Config;
use booking_lib::view::models::{HeaderView, ModalView};
use booking_lib::view::protocol::{BookingForm, RegisterForm};
use booking_lib::view::{dispatch, UiEvent, ViewState};
use std::path::Path;

fn config_for(db_path: &Path) -> Config {
    let url = format!("sqlite://{}?mode=rwc", db_path.display());
    Config::from_lookup(move |key| match key {
        "DATABASE_URL" => Some(url.clone()),
        _ => None,
    })
    .unwrap()
}

#[tokio::test]
async fn session_and_ledger_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&dir.path().join("clinic.db"));

    {
        let mut state = ViewState::from_config(&config).await.unwrap();
        dispatch(
            &mut state,
            UiEvent::Book {
                provider: "Dr. Umar Musa".into(),
            },
        )
        .await;
        dispatch(
            &mut state,
            UiEvent::Register(RegisterForm {
                first_name: "Musa".into(),
                last_name: "Ibrahim".into(),
                email: "musa@example.com".into(),
                password: "pw".into(),
            }),
        )
        .await;
        dispatch(
            &mut state,
            UiEvent::SelectSlot {
                slot: "09:00 AM".into(),
            },
        )
        .await;
        let view = dispatch(
            &mut state,
            UiEvent::Submit(BookingForm {
                patient_name: "Musa Ibrahim".into(),
                patient_phone: "08033334444".into(),
                date: "2025-11-20".into(),
                visit_type: "Online".into(),
                reason: "Fever".into(),
            }),
        )
        .await;
        assert!(matches!(view.modal, ModalView::Receipt(_)));
    }

    let mut state = ViewState::from_config(&config).await.unwrap();
    let view = booking_lib::view::render(&state, None);
    assert_eq!(
        view.header,
        HeaderView::SignedIn {
            display_name: "Musa Ibrahim".into()
        }
    );
    assert_eq!(view.modal, ModalView::Hidden);

    let ledger = state.orchestrator.ledger().all();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].provider_name, "Dr. Umar Musa");
    assert_eq!(ledger[0].reason, "Fever");
    assert_eq!(ledger[0].fee, 8000);

    // Logging out persists too.
    dispatch(&mut state, UiEvent::Logout).await;
    drop(state);
    let state = ViewState::from_config(&config).await.unwrap();
    assert!(state.orchestrator.current_session().is_none());
    assert_eq!(state.orchestrator.ledger().len(), 1);
}
