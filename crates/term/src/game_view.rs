//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It also owns the inverse mapping, from a
//! clicked terminal cell back to board units, so drawing and hit testing
//! always agree on where a tile is.

use crate::core::{GameSnapshot, TileSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Bounds, Difficulty, Phase, Point, TileState, TILE_SIZE};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned block of terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && row >= self.y
            && (column - self.x) < self.w
            && (row - self.y) < self.h
    }
}

/// One selectable line of the difficulty menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuLine {
    Preset(Difficulty),
    Cancel,
}

/// Difficulty menu state handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuView {
    pub current: Difficulty,
}

const START_LABEL: &str = "( start )";
const RESET_LABEL: &str = "[ reset ]";
const MENU_W: u16 = 30;
// Title, three presets, cancel, plus the border.
const MENU_H: u16 = 7;

const TILE_RGB: Rgb = Rgb::new(240, 240, 240);
const WRONG_RGB: Rgb = Rgb::new(220, 50, 50);
const BLACK: Rgb = Rgb::new(0, 0, 0);

/// A lightweight terminal renderer for the recall board.
pub struct GameView {
    /// Board units covered by one terminal column.
    units_per_col: f32,
    /// Board units covered by one terminal row.
    units_per_row: f32,
}

impl Default for GameView {
    fn default() -> Self {
        // 1:2 compensates for the usual terminal glyph aspect ratio.
        Self {
            units_per_col: 8.0,
            units_per_row: 16.0,
        }
    }
}

impl GameView {
    pub fn new(units_per_col: f32, units_per_row: f32) -> Self {
        Self {
            units_per_col,
            units_per_row,
        }
    }

    /// Rows available to the board; the last row is the status line.
    pub fn board_rows(&self, viewport: Viewport) -> u16 {
        viewport.height.saturating_sub(1)
    }

    /// Board extent in units for this viewport.
    pub fn board_bounds(&self, viewport: Viewport) -> Bounds {
        Bounds::new(
            viewport.width as f32 * self.units_per_col,
            self.board_rows(viewport) as f32 * self.units_per_row,
        )
    }

    /// Centre of a terminal cell, in board units.
    pub fn board_point(&self, column: u16, row: u16) -> Point {
        Point::new(
            (column as f32 + 0.5) * self.units_per_col,
            (row as f32 + 0.5) * self.units_per_row,
        )
    }

    /// Terminal cell containing a board point (clamped at zero).
    pub fn cell_of(&self, point: Point) -> (u16, u16) {
        let col = (point.x / self.units_per_col).floor().max(0.0);
        let row = (point.y / self.units_per_row).floor().max(0.0);
        (col.min(u16::MAX as f32) as u16, row.min(u16::MAX as f32) as u16)
    }

    pub fn start_button_rect(&self, viewport: Viewport) -> Rect {
        let w = START_LABEL.len() as u16 + 2;
        let h = 3;
        Rect {
            x: viewport.width.saturating_sub(w + 2),
            y: self.board_rows(viewport).saturating_sub(h + 1),
            w,
            h,
        }
    }

    pub fn hits_start_button(&self, viewport: Viewport, column: u16, row: u16) -> bool {
        self.start_button_rect(viewport).contains(column, row)
    }

    pub fn reset_button_rect(&self, viewport: Viewport) -> Rect {
        let w = RESET_LABEL.len() as u16;
        Rect {
            x: viewport.width.saturating_sub(w) / 2,
            y: self.board_rows(viewport) / 2 + 2,
            w,
            h: 1,
        }
    }

    pub fn hits_reset_button(&self, viewport: Viewport, column: u16, row: u16) -> bool {
        self.reset_button_rect(viewport).contains(column, row)
    }

    pub fn menu_rect(&self, viewport: Viewport) -> Rect {
        let w = MENU_W.min(viewport.width);
        let h = MENU_H.min(viewport.height);
        Rect {
            x: viewport.width.saturating_sub(w) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        }
    }

    /// Menu entry under a clicked cell.
    pub fn menu_line_at(&self, viewport: Viewport, column: u16, row: u16) -> Option<MenuLine> {
        let r = self.menu_rect(viewport);
        if !r.contains(column, row) || column == r.x || column + 1 == r.x + r.w {
            return None;
        }
        match row.checked_sub(r.y)? {
            2 => Some(MenuLine::Preset(Difficulty::Fast)),
            3 => Some(MenuLine::Preset(Difficulty::Normal)),
            4 => Some(MenuLine::Preset(Difficulty::Slow)),
            5 => Some(MenuLine::Cancel),
            _ => None,
        }
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        menu: Option<MenuView>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board_rows = self.board_rows(viewport);

        if snap.show_board {
            for tile in snap.tiles.iter() {
                self.draw_tile(fb, tile, board_rows);
            }
        }

        if snap.show_start_button {
            self.draw_start_button(fb, viewport);
        }

        if snap.show_result {
            self.draw_result(fb, snap, viewport);
        }

        self.draw_status_line(fb, snap, viewport);

        if let Some(menu) = menu {
            self.draw_menu(fb, menu, viewport);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        menu: Option<MenuView>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, menu, viewport, &mut fb);
        fb
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, tile: &TileSnapshot, board_rows: u16) {
        if tile.covered {
            let fg = match tile.state {
                TileState::Wrong => WRONG_RGB,
                _ => TILE_RGB,
            };
            let style = CellStyle::new(fg, BLACK);
            self.for_each_tile_cell(tile.position, board_rows, |col, row| {
                fb.put_char(col, row, '█', style);
            });
        } else if tile.number_visible {
            let (col, row) = self.cell_of(tile.position);
            let digit = char::from_digit(tile.number as u32, 10).unwrap_or('?');
            fb.put_char(col, row, digit, CellStyle::new(TILE_RGB, BLACK).bold());
        }
        // Correct tiles are drawn black on black, i.e. not at all.
    }

    /// Visit every cell whose centre lies inside the tile square.
    fn for_each_tile_cell(&self, center: Point, board_rows: u16, mut f: impl FnMut(u16, u16)) {
        let half = TILE_SIZE / 2.0;
        let (c0, r0) = self.cell_of(Point::new(center.x - half, center.y - half));
        let (c1, r1) = self.cell_of(Point::new(center.x + half, center.y + half));
        for row in r0..=r1.min(board_rows.saturating_sub(1)) {
            for col in c0..=c1 {
                let p = self.board_point(col, row);
                if (p.x - center.x).abs() <= half && (p.y - center.y).abs() <= half {
                    f(col, row);
                }
            }
        }
    }

    fn draw_start_button(&self, fb: &mut FrameBuffer, viewport: Viewport) {
        let r = self.start_button_rect(viewport);
        let style = CellStyle::new(TILE_RGB, BLACK).bold();
        self.draw_border(fb, r, style);
        fb.put_str(r.x + 1, r.y + 1, START_LABEL, style);
    }

    fn draw_result(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport) {
        let mid = self.board_rows(viewport) / 2;
        let text = match snap.elapsed_secs() {
            Some(secs) => format!("time: {secs:.3} s"),
            None => "time: -".to_string(),
        };
        fb.put_str_centered(mid, &text, CellStyle::new(TILE_RGB, BLACK).bold());

        let r = self.reset_button_rect(viewport);
        fb.put_str(r.x, r.y, RESET_LABEL, CellStyle::new(TILE_RGB, WRONG_RGB).bold());
    }

    fn draw_status_line(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport) {
        let Some(row) = viewport.height.checked_sub(1) else {
            return;
        };
        let hint = match snap.phase {
            Phase::AwaitingStart => "click start or press enter",
            Phase::Revealing => "memorise",
            Phase::Recall => "tap in order",
            Phase::Locked => "wrong tile",
            Phase::Finished => "enter to play again",
        };
        let line = format!(
            " {} ({:.1}s) | next {} | {} | d difficulty  q quit",
            snap.difficulty.label(),
            snap.difficulty.reveal_ms() as f32 / 1000.0,
            snap.expected,
            hint,
        );
        fb.put_str(0, row, &line, CellStyle::default().dim());
    }

    fn draw_menu(&self, fb: &mut FrameBuffer, menu: MenuView, viewport: Viewport) {
        let r = self.menu_rect(viewport);
        let body = CellStyle::new(TILE_RGB, Rgb::new(30, 30, 40));
        fb.fill_rect(r.x, r.y, r.w, r.h, ' ', body);
        self.draw_border(fb, r, body);

        fb.put_str(r.x + 2, r.y + 1, "difficulty", body.bold());
        for (i, d) in Difficulty::ALL.iter().enumerate() {
            let marker = if *d == menu.current { '>' } else { ' ' };
            let line = format!(
                "{marker} {} {:<13}{:>4.1}s",
                i + 1,
                d.label(),
                d.reveal_ms() as f32 / 1000.0
            );
            fb.put_str(r.x + 2, r.y + 2 + i as u16, &line, body);
        }
        fb.put_str(r.x + 2, r.y + 5, "  esc cancel", body.dim());
    }

    fn draw_border(&self, fb: &mut FrameBuffer, r: Rect, style: CellStyle) {
        if r.w < 2 || r.h < 2 {
            return;
        }
        let (x1, y1) = (r.x + r.w - 1, r.y + r.h - 1);

        fb.put_char(r.x, r.y, '┌', style);
        fb.put_char(x1, r.y, '┐', style);
        fb.put_char(r.x, y1, '└', style);
        fb.put_char(x1, y1, '┘', style);
        for x in r.x + 1..x1 {
            fb.put_char(x, r.y, '─', style);
            fb.put_char(x, y1, '─', style);
        }
        for y in r.y + 1..y1 {
            fb.put_char(r.x, y, '│', style);
            fb.put_char(x1, y, '│', style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_point_round_trips_through_cell_of() {
        let view = GameView::default();
        for (c, r) in [(0, 0), (5, 3), (119, 38)] {
            assert_eq!(view.cell_of(view.board_point(c, r)), (c, r));
        }
    }

    #[test]
    fn board_bounds_exclude_status_line() {
        let view = GameView::default();
        let b = view.board_bounds(Viewport::new(100, 41));
        assert_eq!(b, Bounds::new(800.0, 640.0));
    }

    #[test]
    fn start_button_sits_bottom_right() {
        let view = GameView::default();
        let vp = Viewport::new(80, 24);
        let r = view.start_button_rect(vp);
        assert_eq!(r.x + r.w, 78);
        assert_eq!(r.y + r.h, 22);
        assert!(view.hits_start_button(vp, r.x + 1, r.y + 1));
        assert!(!view.hits_start_button(vp, 0, 0));
    }

    #[test]
    fn menu_lines_map_to_presets() {
        let view = GameView::default();
        let vp = Viewport::new(80, 24);
        let r = view.menu_rect(vp);
        assert_eq!(
            view.menu_line_at(vp, r.x + 3, r.y + 2),
            Some(MenuLine::Preset(Difficulty::Fast))
        );
        assert_eq!(
            view.menu_line_at(vp, r.x + 3, r.y + 4),
            Some(MenuLine::Preset(Difficulty::Slow))
        );
        assert_eq!(view.menu_line_at(vp, r.x + 3, r.y + 5), Some(MenuLine::Cancel));
        assert_eq!(view.menu_line_at(vp, r.x + 3, r.y + 1), None);
        assert_eq!(view.menu_line_at(vp, 0, 0), None);
    }
}
