pub mod auth;
pub mod dispatch;
pub mod models;
pub mod protocol;
pub mod receipt;
pub mod state;

// Re-export the dispatch loop so the binary hosting the page can reach it directly.
pub use dispatch::{dispatch, render, serve_lines};
pub use protocol::{ServerMessage, UiEvent, ViewUpdate};
pub use state::ViewState;
