//! Feedback module - audio/haptic cue collaborators
//!
//! The game core only queues [`FeedbackEvent`]s. This crate turns them into
//! whatever the host can actually do. In a terminal that means ringing the
//! bell as the haptic stand-in and checking that cue assets are present.
//!
//! Cue failures never reach game state: [`dispatch`] logs each error and
//! moves on to the next event.

pub mod cues;
pub mod sink;

pub use tui_recall_types as types;

pub use cues::CueSet;
pub use sink::{dispatch, FeedbackSink, NullFeedback, RecordingFeedback, TerminalFeedback};
