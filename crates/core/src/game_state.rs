//! Game state module - the recall round state machine
//!
//! This module ties together the RNG, layout generation and the deferred-task
//! scheduler. It validates taps, keeps the round clock, and queues feedback
//! events for whatever cue backend the host wires up.

use arrayvec::ArrayVec;
use tracing::{debug, trace, warn};

use crate::layout::generate_positions;
use crate::rng::SimpleRng;
use crate::scheduler::{DeferredTask, Scheduled, Scheduler};
use crate::snapshot::{GameSnapshot, TileSnapshot};
use crate::types::*;

/// Maximum number of undrained feedback events.
pub const FEEDBACK_QUEUE_LEN: usize = 16;

/// One numbered tile on the board
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tile {
    /// Stable slot 0..9 (also the draw order).
    pub index: u8,
    /// Number the player sees, a permutation of 0..9 across tiles.
    pub number: u8,
    pub position: Point,
    pub state: TileState,
}

impl Tile {
    /// Whether `point` lies inside this tile's square.
    pub fn contains(&self, point: Point) -> bool {
        let half = TILE_SIZE / 2.0;
        (point.x - self.position.x).abs() <= half && (point.y - self.position.y).abs() <= half
    }
}

/// Per-round bookkeeping, replaced wholesale by `start_game`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameSession {
    pub start_ms: u64,
    pub end_ms: Option<u64>,
    /// Next number to tap; reaches `TILE_COUNT` exactly when the round is won.
    pub expected: u8,
    pub overlay_visible: bool,
    pub game_over: bool,
}

impl GameSession {
    fn begin(now_ms: u64) -> Self {
        Self {
            start_ms: now_ms,
            ..Self::default()
        }
    }

    pub fn elapsed_ms(&self) -> Option<u64> {
        self.end_ms.map(|end| end.saturating_sub(self.start_ms))
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    tiles: [Tile; TILE_COUNT as usize],
    session: GameSession,
    phase: Phase,
    difficulty: Difficulty,
    bounds: Bounds,
    /// Monotonic round id (increments on every start). Tags deferred tasks.
    generation: u32,
    /// Game clock, advanced only by `tick`.
    clock_ms: u64,
    show_result: bool,
    /// Points accepted past the attempt cap in the current layout.
    relaxed_points: u8,
    rng: SimpleRng,
    scheduler: Scheduler,
    feedback: ArrayVec<FeedbackEvent, FEEDBACK_QUEUE_LEN>,
}

impl GameState {
    /// Create a new game with the given RNG seed and board bounds
    pub fn new(seed: u32, bounds: Bounds) -> Self {
        let mut tiles = [Tile::default(); TILE_COUNT as usize];
        for (i, tile) in tiles.iter_mut().enumerate() {
            tile.index = i as u8;
            tile.number = i as u8;
        }

        Self {
            tiles,
            session: GameSession::default(),
            phase: Phase::AwaitingStart,
            difficulty: Difficulty::default(),
            bounds,
            generation: 0,
            clock_ms: 0,
            show_result: false,
            relaxed_points: 0,
            rng: SimpleRng::new(seed),
            scheduler: Scheduler::new(),
            feedback: ArrayVec::new(),
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn tiles(&self) -> &[Tile; TILE_COUNT as usize] {
        &self.tiles
    }

    pub fn expected(&self) -> u8 {
        self.session.expected
    }

    pub fn show_result(&self) -> bool {
        self.show_result
    }

    pub fn relaxed_points(&self) -> u8 {
        self.relaxed_points
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    /// Elapsed time of the finished round, start to last correct tap.
    pub fn elapsed_ms(&self) -> Option<u64> {
        self.session.elapsed_ms()
    }

    /// Start a fresh round.
    ///
    /// Valid from any phase. Deferred work from the previous round stays in
    /// the scheduler but is ignored once it fires.
    pub fn start_game(&mut self) -> bool {
        self.generation = self.generation.wrapping_add(1);

        let numbers = self.rng.permutation();
        let layout = generate_positions(&mut self.rng, self.bounds);
        for (i, tile) in self.tiles.iter_mut().enumerate() {
            *tile = Tile {
                index: i as u8,
                number: numbers[i],
                position: layout.positions[i],
                state: TileState::Idle,
            };
        }
        self.relaxed_points = layout.relaxed;
        if layout.relaxed > 0 {
            warn!(
                relaxed = layout.relaxed,
                width = self.bounds.width,
                height = self.bounds.height,
                "board too small for spacing; some tiles may sit closer than the minimum"
            );
        }

        self.session = GameSession::begin(self.clock_ms);
        self.show_result = false;
        self.phase = Phase::Revealing;
        self.scheduler.schedule(
            DeferredTask::EndReveal,
            self.generation,
            self.clock_ms,
            self.difficulty.reveal_ms(),
        );

        debug!(
            generation = self.generation,
            difficulty = self.difficulty.as_str(),
            "round started"
        );
        true
    }

    /// Validate a tap on the tile carrying `number`.
    ///
    /// Returns false when the tap was ignored (no state change, no event).
    pub fn handle_tap(&mut self, number: u8) -> bool {
        if self.phase != Phase::Recall || number >= TILE_COUNT {
            return false;
        }
        let Some(slot) = self.slot_of(number) else {
            return false;
        };
        if self.tiles[slot].state == TileState::Correct {
            return false;
        }

        if number == self.session.expected {
            self.tiles[slot].state = TileState::Correct;
            self.session.expected += 1;
            self.push_feedback(FeedbackEvent::CorrectTap);

            if self.session.expected == TILE_COUNT {
                self.finish();
            }
        } else {
            self.tiles[slot].state = TileState::Wrong;
            self.phase = Phase::Locked;
            self.push_feedback(FeedbackEvent::WrongTap);
            self.push_feedback(FeedbackEvent::Haptic);
            self.scheduler.schedule(
                DeferredTask::ResetAfterMistake { number },
                self.generation,
                self.clock_ms,
                WRONG_TAP_RESET_MS,
            );
            debug!(
                generation = self.generation,
                tapped = number,
                expected = self.session.expected,
                "wrong tile"
            );
        }
        true
    }

    fn finish(&mut self) {
        self.session.end_ms = Some(self.clock_ms);
        self.session.game_over = true;
        self.session.overlay_visible = false;
        self.phase = Phase::Finished;
        self.push_feedback(FeedbackEvent::Victory);
        self.scheduler.schedule(
            DeferredTask::ShowResult,
            self.generation,
            self.clock_ms,
            RESULT_DELAY_MS,
        );
        debug!(
            generation = self.generation,
            elapsed_ms = self.session.elapsed_ms().unwrap_or(0),
            "round finished"
        );
    }

    /// Change the reveal delay. Refused while a round is in progress.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if self.phase.in_round() {
            return false;
        }
        self.difficulty = difficulty;
        debug!(difficulty = difficulty.as_str(), "difficulty changed");
        true
    }

    /// Bounds used by the next layout. The current board is left alone.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    /// Number of the tile under `point`, if any.
    ///
    /// Correct tiles are no longer drawn, so they never catch a tap.
    /// Remaining overlaps resolve to the tile drawn last (highest index).
    pub fn tile_at(&self, point: Point) -> Option<u8> {
        self.tiles
            .iter()
            .rev()
            .filter(|t| t.state != TileState::Correct)
            .find(|t| t.contains(point))
            .map(|t| t.number)
    }

    /// Advance the clock and run deferred tasks that came due.
    ///
    /// Returns true if any task changed the state.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        self.clock_ms += elapsed_ms as u64;

        let mut changed = false;
        for scheduled in self.scheduler.take_due(self.clock_ms) {
            changed |= self.run_deferred(scheduled);
        }
        changed
    }

    fn run_deferred(&mut self, scheduled: Scheduled) -> bool {
        if scheduled.generation != self.generation {
            trace!(
                task = ?scheduled.task,
                task_generation = scheduled.generation,
                generation = self.generation,
                "dropping stale task"
            );
            return false;
        }

        match scheduled.task {
            DeferredTask::EndReveal => {
                if self.phase != Phase::Revealing {
                    return false;
                }
                self.phase = Phase::Recall;
                self.session.overlay_visible = true;
                true
            }
            DeferredTask::ResetAfterMistake { number } => {
                if self.phase != Phase::Locked {
                    return false;
                }
                if let Some(slot) = self.slot_of(number) {
                    self.tiles[slot].state = TileState::Idle;
                }
                self.session.overlay_visible = false;
                self.phase = Phase::AwaitingStart;
                true
            }
            DeferredTask::ShowResult => {
                if self.phase != Phase::Finished {
                    return false;
                }
                self.show_result = true;
                true
            }
        }
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::StartGame => self.start_game(),
            GameAction::Tap(number) => self.handle_tap(number),
            GameAction::SetDifficulty(d) => self.set_difficulty(d),
        }
    }

    /// Drain queued feedback events, oldest first.
    pub fn take_feedback(&mut self) -> ArrayVec<FeedbackEvent, FEEDBACK_QUEUE_LEN> {
        std::mem::take(&mut self.feedback)
    }

    fn push_feedback(&mut self, event: FeedbackEvent) {
        if self.feedback.try_push(event).is_err() {
            trace!(event = event.as_str(), "feedback queue full; dropping cue");
        }
    }

    fn slot_of(&self, number: u8) -> Option<usize> {
        self.tiles.iter().position(|t| t.number == number)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let revealing = self.phase == Phase::Revealing;
        let overlay = self.session.overlay_visible;
        let expected = self.session.expected;

        for (dst, tile) in out.tiles.iter_mut().zip(self.tiles.iter()) {
            *dst = TileSnapshot {
                index: tile.index,
                number: tile.number,
                position: tile.position,
                state: tile.state,
                number_visible: revealing,
                covered: overlay && tile.number >= expected,
            };
        }

        out.phase = self.phase;
        out.difficulty = self.difficulty;
        out.generation = self.generation;
        out.expected = expected;
        out.show_start_button = self.phase == Phase::AwaitingStart;
        out.show_board = matches!(self.phase, Phase::Revealing | Phase::Recall | Phase::Locked);
        out.overlay_visible = overlay;
        out.show_result = self.show_result;
        out.elapsed_ms = self.session.elapsed_ms();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1, Bounds::default())
    }
}
