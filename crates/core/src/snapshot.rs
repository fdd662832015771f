use crate::types::{Difficulty, Phase, Point, TileState, TILE_COUNT};

/// Render-facing view of one tile.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TileSnapshot {
    pub index: u8,
    pub number: u8,
    pub position: Point,
    pub state: TileState,
    /// The digit is drawn (reveal phase only).
    pub number_visible: bool,
    /// An opaque square covers the tile (recall phase, not yet tapped).
    pub covered: bool,
}

/// The view model emitted after every transition.
///
/// The presentation layer reads only this; it never reaches into `GameState`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSnapshot {
    pub tiles: [TileSnapshot; TILE_COUNT as usize],
    pub phase: Phase,
    pub difficulty: Difficulty,
    pub generation: u32,
    /// Next number the player must tap.
    pub expected: u8,
    pub show_start_button: bool,
    pub show_board: bool,
    pub overlay_visible: bool,
    pub show_result: bool,
    pub elapsed_ms: Option<u64>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.tiles = [TileSnapshot::default(); TILE_COUNT as usize];
        self.phase = Phase::AwaitingStart;
        self.difficulty = Difficulty::default();
        self.generation = 0;
        self.expected = 0;
        self.show_start_button = true;
        self.show_board = false;
        self.overlay_visible = false;
        self.show_result = false;
        self.elapsed_ms = None;
    }

    /// Elapsed time in seconds, for the result screen.
    pub fn elapsed_secs(&self) -> Option<f64> {
        self.elapsed_ms.map(|ms| ms as f64 / 1000.0)
    }

    /// Whether taps are currently being validated.
    pub fn accepting_taps(&self) -> bool {
        self.phase == Phase::Recall
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            tiles: [TileSnapshot::default(); TILE_COUNT as usize],
            phase: Phase::AwaitingStart,
            difficulty: Difficulty::default(),
            generation: 0,
            expected: 0,
            show_start_button: true,
            show_board: false,
            overlay_visible: false,
            show_result: false,
            elapsed_ms: None,
        };
        s.clear();
        s
    }
}
