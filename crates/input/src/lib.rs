//! Terminal input module (engine-facing).
//!
//! This module is independent of the game core. It maps `crossterm` key
//! events into [`KeyAction`]s and turns raw mouse button events into taps
//! and long-presses, which is how a terminal plays the part of a touchscreen.

pub mod map;
pub mod pointer;

pub use tui_recall_types as types;

pub use map::{handle_key_event, should_quit, KeyAction};
pub use pointer::{PointerGesture, PointerTracker};
