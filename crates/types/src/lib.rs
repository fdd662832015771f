//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, feedback cues).
//!
//! # Board Geometry
//!
//! The board is measured in logical units, independent of the terminal:
//!
//! - **Tiles**: 10 tiles, numbered 0-9
//! - **Tile size**: 60x60 units, centred on the tile position
//! - **Spacing**: positions are sampled at least 80 units apart
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `WRONG_TAP_RESET_MS` | 1000 | Time a wrong tile stays red before the round resets |
//! | `RESULT_DELAY_MS` | 100 | Delay between the last correct tap and the result screen |
//! | `LONG_PRESS_MS` | 500 | Hold time that turns a press into a long-press |
//!
//! # Examples
//!
//! ```
//! use tui_recall_types::{Difficulty, Point, TILE_COUNT};
//!
//! // Parse a difficulty preset (case-insensitive)
//! let preset = Difficulty::from_str("slow").unwrap();
//! assert_eq!(preset.reveal_ms(), 10_000);
//!
//! // Unsupported values are rejected, not clamped
//! assert_eq!(Difficulty::from_reveal_ms(3_000), None);
//!
//! // Distances are euclidean in board units
//! let d = Point::new(0.0, 0.0).distance(Point::new(30.0, 40.0));
//! assert_eq!(d, 50.0);
//!
//! assert_eq!(TILE_COUNT, 10);
//! ```

/// Number of tiles on the board (numbers 0-9)
pub const TILE_COUNT: u8 = 10;

/// Minimum distance between sampled tile positions, in board units
pub const MIN_TILE_DISTANCE: f32 = 80.0;

/// Rejection-sampling attempts per tile before a position is accepted as is
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100;

/// Tile edge length in board units
pub const TILE_SIZE: f32 = 60.0;

/// Horizontal margin as a fraction of board width (both sides)
pub const MARGIN_X_FRACTION: f32 = 0.03;

/// Top margin as a fraction of board height
pub const MARGIN_TOP_FRACTION: f32 = 0.08;

/// Bottom margin as a fraction of board height
pub const MARGIN_BOTTOM_FRACTION: f32 = 0.05;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// How long a wrong tile stays marked before the round resets
pub const WRONG_TAP_RESET_MS: u32 = 1000;

/// Delay between finishing the sequence and showing the result screen
pub const RESULT_DELAY_MS: u32 = 100;

/// Hold duration that turns a press into a long-press
pub const LONG_PRESS_MS: u32 = 500;


/// A point on the board, in logical units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Board extent in logical units.
///
/// The presentation layer decides how units map onto the screen; the core
/// only samples positions inside the margins derived from these bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Sampling rectangle `(x_min, x_max, y_min, y_max)` after margins.
    pub fn sampling_area(&self) -> (f32, f32, f32, f32) {
        (
            self.width * MARGIN_X_FRACTION,
            self.width * (1.0 - MARGIN_X_FRACTION),
            self.height * MARGIN_TOP_FRACTION,
            self.height * (1.0 - MARGIN_BOTTOM_FRACTION),
        )
    }
}

impl Default for Bounds {
    fn default() -> Self {
        // Landscape phone-sized board.
        Self::new(844.0, 390.0)
    }
}

/// Reveal-duration presets
///
/// The delay controls how long numbers stay visible before the recall phase:
/// - **Fast**: 0.5 seconds
/// - **Normal**: 2 seconds
/// - **Slow**: 10 seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Fast,
    #[default]
    Normal,
    Slow,
}

impl Difficulty {
    /// All presets, in menu order
    pub const ALL: [Difficulty; 3] = [Difficulty::Fast, Difficulty::Normal, Difficulty::Slow];

    /// Reveal delay in milliseconds
    pub fn reveal_ms(&self) -> u32 {
        match self {
            Difficulty::Fast => 500,
            Difficulty::Normal => 2000,
            Difficulty::Slow => 10_000,
        }
    }

    /// Look up the preset with exactly this reveal delay.
    ///
    /// Unsupported delays are rejected rather than clamped.
    pub fn from_reveal_ms(ms: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.reveal_ms() == ms)
    }

    /// Parse a preset name or its delay in seconds (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_recall_types::Difficulty;
    ///
    /// assert_eq!(Difficulty::from_str("Normal"), Some(Difficulty::Normal));
    /// assert_eq!(Difficulty::from_str("0.5"), Some(Difficulty::Fast));
    /// assert_eq!(Difficulty::from_str("7"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "fast" => return Some(Difficulty::Fast),
            "normal" => return Some(Difficulty::Normal),
            "slow" => return Some(Difficulty::Slow),
            _ => {}
        }

        let secs: f32 = s.parse().ok()?;
        if !secs.is_finite() || secs < 0.0 {
            return None;
        }
        Self::from_reveal_ms((secs * 1000.0).round() as u32)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Fast => "fast",
            Difficulty::Normal => "normal",
            Difficulty::Slow => "slow",
        }
    }

    /// Label shown in the difficulty menu
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Fast => "photographic",
            Difficulty::Normal => "human",
            Difficulty::Slow => "rote",
        }
    }
}

/// Per-tile feedback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileState {
    #[default]
    Idle,
    Correct,
    Wrong,
}

/// Round phases
///
/// `AwaitingStart → Revealing → Recall → Finished`, or on a mistake
/// `Recall → Locked → AwaitingStart`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Start button shown, no round in progress
    #[default]
    AwaitingStart,
    /// Numbers visible, waiting for the reveal delay
    Revealing,
    /// Numbers hidden, taps are validated
    Recall,
    /// A wrong tile is marked; taps ignored until the round resets
    Locked,
    /// All ten tiles tapped in order
    Finished,
}

impl Phase {
    /// Whether a round is in progress (difficulty changes are refused)
    pub fn in_round(&self) -> bool {
        matches!(self, Phase::Revealing | Phase::Recall | Phase::Locked)
    }
}

/// Discrete cue requested from the feedback collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackEvent {
    CorrectTap,
    WrongTap,
    Haptic,
    Victory,
}

impl FeedbackEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackEvent::CorrectTap => "correct-tap",
            FeedbackEvent::WrongTap => "wrong-tap",
            FeedbackEvent::Haptic => "haptic",
            FeedbackEvent::Victory => "victory",
        }
    }

    /// Audio cue name, if the event has one (haptics have no sound)
    pub fn cue(&self) -> Option<&'static str> {
        match self {
            FeedbackEvent::CorrectTap => Some("press2"),
            FeedbackEvent::WrongTap => Some("wrong"),
            FeedbackEvent::Victory => Some("victory"),
            FeedbackEvent::Haptic => None,
        }
    }
}

/// Actions that drive the game state machine
///
/// Produced by the presentation layer after hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Start (or restart) a round
    StartGame,
    /// Tap the tile carrying this number
    Tap(u8),
    /// Change the reveal delay (between rounds only)
    SetDifficulty(Difficulty),
}
