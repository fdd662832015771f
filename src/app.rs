//! Screen-level routing between terminal input and the game state machine.
//!
//! `App` owns everything the runner needs between frames: the game, the
//! pointer tracker, the difficulty menu and the current viewport. It turns
//! key actions and pointer gestures into `GameAction`s by hit testing against
//! the same `GameView` geometry the renderer draws with.

use arrayvec::ArrayVec;
use tracing::debug;

use crate::core::{GameSnapshot, GameState, FEEDBACK_QUEUE_LEN};
use crate::input::{KeyAction, PointerGesture, PointerTracker};
use crate::term::{FrameBuffer, GameView, MenuLine, MenuView, Viewport};
use crate::types::{Difficulty, FeedbackEvent, GameAction};

pub struct App {
    game: GameState,
    view: GameView,
    pointer: PointerTracker,
    menu: Option<MenuView>,
    viewport: Viewport,
    snapshot: GameSnapshot,
}

impl App {
    pub fn new(seed: u32, difficulty: Difficulty, viewport: Viewport) -> Self {
        let view = GameView::default();
        let game = GameState::new(seed, view.board_bounds(viewport)).with_difficulty(difficulty);
        let snapshot = game.snapshot();
        Self {
            game,
            view,
            pointer: PointerTracker::new(),
            menu: None,
            viewport,
            snapshot,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn view(&self) -> &GameView {
        &self.view
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn menu_open(&self) -> bool {
        self.menu.is_some()
    }

    /// Latest snapshot, refreshed after every input and tick.
    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    /// Track a terminal resize. The board on screen keeps its layout; the
    /// next round is laid out for the new size.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.game.set_bounds(self.view.board_bounds(viewport));
        self.pointer.reset();
    }

    /// Route a key action. Returns true if anything changed.
    pub fn handle_key_action(&mut self, action: KeyAction) -> bool {
        let changed = if self.menu.is_some() {
            match action {
                KeyAction::ChooseDifficulty(d) => self.choose_difficulty(d),
                KeyAction::Cancel | KeyAction::OpenDifficultyMenu => self.close_menu(),
                KeyAction::Start => false,
            }
        } else {
            match action {
                KeyAction::Start if !self.game.phase().in_round() => {
                    self.apply(GameAction::StartGame)
                }
                KeyAction::Start => false,
                KeyAction::OpenDifficultyMenu => self.open_menu(),
                KeyAction::ChooseDifficulty(d) => self.apply(GameAction::SetDifficulty(d)),
                KeyAction::Cancel => false,
            }
        };
        self.refresh();
        changed
    }

    /// Feed a raw mouse event through the gesture tracker.
    pub fn handle_mouse(&mut self, event: crossterm::event::MouseEvent) -> bool {
        match self.pointer.handle_mouse(event) {
            Some(gesture) => self.handle_gesture(gesture),
            None => false,
        }
    }

    /// Route a recognised gesture. Returns true if anything changed.
    pub fn handle_gesture(&mut self, gesture: PointerGesture) -> bool {
        let changed = match gesture {
            PointerGesture::Tap { column, row } => self.tap(column, row),
            PointerGesture::LongPress { column, row } => self.long_press(column, row),
        };
        self.refresh();
        changed
    }

    /// Advance gesture timing and the game clock.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let mut changed = match self.pointer.update(elapsed_ms) {
            Some(gesture) => self.handle_gesture(gesture),
            None => false,
        };
        changed |= self.game.tick(elapsed_ms);
        self.refresh();
        changed
    }

    pub fn take_feedback(&mut self) -> ArrayVec<FeedbackEvent, FEEDBACK_QUEUE_LEN> {
        self.game.take_feedback()
    }

    pub fn render_into(&self, fb: &mut FrameBuffer) {
        self.view
            .render_into(&self.snapshot, self.menu, self.viewport, fb);
    }

    fn tap(&mut self, column: u16, row: u16) -> bool {
        let vp = self.viewport;

        if self.menu.is_some() {
            return match self.view.menu_line_at(vp, column, row) {
                Some(MenuLine::Preset(d)) => self.choose_difficulty(d),
                Some(MenuLine::Cancel) => self.close_menu(),
                // Clicks inside the frame but off an entry keep the menu open.
                None if self.view.menu_rect(vp).contains(column, row) => false,
                None => self.close_menu(),
            };
        }

        if self.snapshot.show_result && self.view.hits_reset_button(vp, column, row) {
            return self.apply(GameAction::StartGame);
        }
        if self.snapshot.show_start_button && self.view.hits_start_button(vp, column, row) {
            return self.apply(GameAction::StartGame);
        }
        if !self.snapshot.accepting_taps() || row >= self.view.board_rows(vp) {
            return false;
        }

        let point = self.view.board_point(column, row);
        match self.game.tile_at(point) {
            Some(number) => self.apply(GameAction::Tap(number)),
            None => false,
        }
    }

    fn long_press(&mut self, column: u16, row: u16) -> bool {
        if self.menu.is_none()
            && self.snapshot.show_start_button
            && self.view.hits_start_button(self.viewport, column, row)
        {
            return self.open_menu();
        }
        false
    }

    fn open_menu(&mut self) -> bool {
        if self.game.phase().in_round() {
            return false;
        }
        self.menu = Some(MenuView {
            current: self.game.difficulty(),
        });
        debug!("difficulty menu opened");
        true
    }

    fn close_menu(&mut self) -> bool {
        self.menu.take().is_some()
    }

    fn choose_difficulty(&mut self, difficulty: Difficulty) -> bool {
        self.menu = None;
        self.apply(GameAction::SetDifficulty(difficulty));
        true
    }

    fn apply(&mut self, action: GameAction) -> bool {
        let changed = self.game.apply_action(action);
        if !changed {
            debug!(?action, phase = ?self.game.phase(), "action ignored");
        }
        changed
    }

    fn refresh(&mut self) {
        self.game.snapshot_into(&mut self.snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Phase, TILE_COUNT};

    fn app() -> App {
        App::new(7, Difficulty::Fast, Viewport::new(120, 40))
    }

    fn start_button_cell(app: &App) -> (u16, u16) {
        let r = app.view().start_button_rect(app.viewport());
        (r.x + 1, r.y + 1)
    }

    #[test]
    fn clicking_start_begins_a_round() {
        let mut app = app();
        let (c, r) = start_button_cell(&app);
        assert!(app.handle_gesture(PointerGesture::Tap { column: c, row: r }));
        assert_eq!(app.game().phase(), Phase::Revealing);
    }

    #[test]
    fn long_press_on_start_opens_menu_and_choice_applies() {
        let mut app = app();
        let (c, r) = start_button_cell(&app);
        app.handle_gesture(PointerGesture::LongPress { column: c, row: r });
        assert!(app.menu_open());

        app.handle_key_action(KeyAction::ChooseDifficulty(Difficulty::Slow));
        assert!(!app.menu_open());
        assert_eq!(app.game().difficulty(), Difficulty::Slow);
        assert_eq!(app.game().phase(), Phase::AwaitingStart);
    }

    #[test]
    fn start_key_is_ignored_while_menu_is_open() {
        let mut app = app();
        app.handle_key_action(KeyAction::OpenDifficultyMenu);
        assert!(!app.handle_key_action(KeyAction::Start));
        assert_eq!(app.game().phase(), Phase::AwaitingStart);
        app.handle_key_action(KeyAction::Cancel);
        assert!(!app.menu_open());
    }

    #[test]
    fn menu_cannot_open_mid_round() {
        let mut app = app();
        app.handle_key_action(KeyAction::Start);
        assert!(!app.handle_key_action(KeyAction::OpenDifficultyMenu));
        assert!(!app.menu_open());
    }

    #[test]
    fn tapping_tiles_in_order_through_the_view_wins() {
        let mut app = app();
        app.handle_key_action(KeyAction::Start);
        app.tick(Difficulty::Fast.reveal_ms());
        assert_eq!(app.game().phase(), Phase::Recall);

        for n in 0..TILE_COUNT {
            let tile = app
                .game()
                .tiles()
                .iter()
                .find(|t| t.number == n)
                .copied()
                .unwrap();
            let (c, r) = app.view().cell_of(tile.position);
            let point = app.view().board_point(c, r);
            assert_eq!(app.game().tile_at(point), Some(n));
            assert!(app.handle_gesture(PointerGesture::Tap { column: c, row: r }));
        }
        assert_eq!(app.game().phase(), Phase::Finished);
    }

    #[test]
    fn taps_on_empty_board_are_ignored() {
        let mut app = app();
        app.handle_key_action(KeyAction::Start);
        app.tick(Difficulty::Fast.reveal_ms());
        // Status line row never maps to a tile.
        let status_row = app.viewport().height - 1;
        assert!(!app.handle_gesture(PointerGesture::Tap {
            column: 0,
            row: status_row
        }));
        assert_eq!(app.game().expected(), 0);
    }

    #[test]
    fn resize_changes_bounds_for_next_round() {
        let mut app = app();
        app.resize(Viewport::new(60, 20));
        let b = app.game().bounds();
        assert_eq!(b.width, 480.0);
        assert_eq!(b.height, 19.0 * 16.0);
    }
}
