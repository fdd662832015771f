//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget/layout libraries and renders into a simple framebuffer
//! that is diffed and flushed to a terminal backend.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Map board units to terminal cells in one place (drawing and hit testing)
//! - Only write what changed between frames

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_recall_core as core;
pub use tui_recall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, MenuLine, MenuView, Rect, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
