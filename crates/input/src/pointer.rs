//! Tap / long-press detection for terminal mouse input.
//!
//! Terminals report button down, drag and up, but no gesture timing. The
//! tracker accumulates hold time from the game tick so a press held past the
//! threshold fires a long-press while the button is still down, and a short
//! press becomes a tap on release.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::types::LONG_PRESS_MS;

/// A recognised pointer gesture at a terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerGesture {
    Tap { column: u16, row: u16 },
    LongPress { column: u16, row: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Press {
    column: u16,
    row: u16,
    held_ms: u32,
    long_fired: bool,
}

/// Tracks the left button to classify presses.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    press: Option<Press>,
    long_press_ms: u32,
    /// Drag distance (cells, per axis) that cancels the press.
    slop: u16,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::with_config(LONG_PRESS_MS, 1)
    }

    pub fn with_config(long_press_ms: u32, slop: u16) -> Self {
        Self {
            press: None,
            long_press_ms,
            slop,
        }
    }

    pub fn long_press_ms(&self) -> u32 {
        self.long_press_ms
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Feed a mouse event. Taps are reported on release.
    pub fn handle_mouse(&mut self, event: MouseEvent) -> Option<PointerGesture> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.press = Some(Press {
                    column: event.column,
                    row: event.row,
                    held_ms: 0,
                    long_fired: false,
                });
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(p) = self.press {
                    let moved = p.column.abs_diff(event.column) > self.slop
                        || p.row.abs_diff(event.row) > self.slop;
                    if moved {
                        self.press = None;
                    }
                }
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let p = self.press.take()?;
                if p.long_fired {
                    None
                } else {
                    Some(PointerGesture::Tap {
                        column: p.column,
                        row: p.row,
                    })
                }
            }
            _ => None,
        }
    }

    /// Advance hold time; fires a long-press once per press.
    pub fn update(&mut self, elapsed_ms: u32) -> Option<PointerGesture> {
        let long_press_ms = self.long_press_ms;
        let p = self.press.as_mut()?;
        if p.long_fired {
            return None;
        }

        p.held_ms = p.held_ms.saturating_add(elapsed_ms);
        if p.held_ms >= long_press_ms {
            p.long_fired = true;
            return Some(PointerGesture::LongPress {
                column: p.column,
                row: p.row,
            });
        }
        None
    }

    pub fn reset(&mut self) {
        self.press = None;
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_short_press_is_tap_on_release() {
        let mut pt = PointerTracker::new();
        assert_eq!(
            pt.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 7)),
            None
        );
        assert_eq!(pt.update(100), None);
        assert_eq!(
            pt.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 5, 7)),
            Some(PointerGesture::Tap { column: 5, row: 7 })
        );
        assert!(!pt.is_pressed());
    }

    #[test]
    fn test_long_press_fires_once_while_held() {
        let mut pt = PointerTracker::with_config(500, 1);
        pt.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 1, 2));

        assert_eq!(pt.update(499), None);
        assert_eq!(
            pt.update(1),
            Some(PointerGesture::LongPress { column: 1, row: 2 })
        );
        assert_eq!(pt.update(1000), None);

        // Release after a long-press is not also a tap.
        assert_eq!(
            pt.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 1, 2)),
            None
        );
    }

    #[test]
    fn test_drag_beyond_slop_cancels() {
        let mut pt = PointerTracker::new();
        pt.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, 10));
        pt.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 11, 10));
        assert!(pt.is_pressed());
        pt.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 13, 10));
        assert!(!pt.is_pressed());
        assert_eq!(
            pt.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 13, 10)),
            None
        );
    }

    #[test]
    fn test_other_buttons_are_ignored() {
        let mut pt = PointerTracker::new();
        pt.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Right), 0, 0));
        assert!(!pt.is_pressed());
        assert_eq!(pt.update(1000), None);
    }
}
