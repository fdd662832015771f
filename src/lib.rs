//! TUI Recall (workspace facade crate).
//!
//! The game logic, input mapping, terminal rendering and feedback live in
//! dedicated crates under `crates/`; this package re-exports them and adds
//! the runner pieces: configuration, logging and screen-level routing.

pub use tui_recall_core as core;
pub use tui_recall_feedback as feedback;
pub use tui_recall_input as input;
pub use tui_recall_term as term;
pub use tui_recall_types as types;

pub mod app;
pub mod clock;
pub mod config;
pub mod logging;

pub use app::App;
pub use clock::TickClock;
pub use config::RecallConfig;
