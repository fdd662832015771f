//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the recall game rules, the round state machine and
//! layout generation. It has **no dependencies** on terminal I/O, audio or
//! input devices, making it:
//!
//! - **Deterministic**: Same seed produces identical layouts and permutations
//! - **Testable**: Time only moves when the host calls `tick`
//! - **Portable**: Any front end can drive it with taps and ticks
//!
//! # Module Structure
//!
//! - [`game_state`]: Round state machine, tap validation, feedback queue
//! - [`layout`]: Rejection-sampled tile positions
//! - [`rng`]: Seeded LCG with Fisher-Yates permutation
//! - [`scheduler`]: Generation-tagged deferred tasks (reveal end, reset, result)
//! - [`snapshot`]: View model consumed by renderers
//!
//! # Game Rules
//!
//! - Ten tiles carry a shuffled permutation of 0-9
//! - Numbers stay visible for the difficulty's reveal delay, then get covered
//! - Taps must follow 0, 1, 2, ... 9; one wrong tap ends the round
//! - A finished round reports the time from start to the last correct tap
//!
//! # Example
//!
//! ```
//! use tui_recall_core::GameState;
//! use tui_recall_types::{Bounds, Difficulty, GameAction, Phase};
//!
//! let mut game = GameState::new(12345, Bounds::new(1600.0, 1000.0))
//!     .with_difficulty(Difficulty::Fast);
//! game.apply_action(GameAction::StartGame);
//!
//! // Numbers are hidden once the reveal delay has elapsed
//! game.tick(Difficulty::Fast.reveal_ms());
//! assert_eq!(game.phase(), Phase::Recall);
//!
//! for n in 0..10 {
//!     game.apply_action(GameAction::Tap(n));
//! }
//! assert_eq!(game.phase(), Phase::Finished);
//! assert!(game.elapsed_ms().unwrap() > 0);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with the
//! elapsed time; deferred tasks fire from inside `tick`.

pub mod game_state;
pub mod layout;
pub mod rng;
pub mod scheduler;
pub mod snapshot;

pub use tui_recall_types as types;

// Re-export commonly used types for convenience
pub use game_state::{GameSession, GameState, Tile, FEEDBACK_QUEUE_LEN};
pub use layout::{generate_positions, min_pairwise_distance, Layout};
pub use rng::SimpleRng;
pub use scheduler::{DeferredTask, Scheduler};
pub use snapshot::{GameSnapshot, TileSnapshot};
