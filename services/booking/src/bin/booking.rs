//! services/booking/src/bin/booking.rs
//!
//! Hosts the booking page adapter over stdin/stdout: one JSON `UiEvent` per input
//! line, one JSON `ServerMessage` per output line. Logs go to stderr.

use booking_lib::{config::Config, error::AppError, view::{serve_lines, ViewState}};
use tokio::io::{stdin, stdout, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!("Configuration loaded. Starting booking page...");

    // --- 2. Restore Directory, Storage & Session ---
    let mut state = ViewState::from_config(&config).await?;

    // --- 3. Serve the Page ---
    serve_lines(&mut state, BufReader::new(stdin()), stdout()).await?;

    Ok(())
}
