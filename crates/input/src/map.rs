//! Key mapping from terminal events to game inputs.

use crate::types::Difficulty;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keyboard-level intent, resolved against the current screen by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Start button / result screen reset
    Start,
    /// Open the difficulty menu (keyboard stand-in for the long-press)
    OpenDifficultyMenu,
    /// Pick a preset from the open menu
    ChooseDifficulty(Difficulty),
    /// Close the menu without changing anything
    Cancel,
}

/// Map keyboard input to game inputs.
pub fn handle_key_event(key: KeyEvent) -> Option<KeyAction> {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => Some(KeyAction::Start),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(KeyAction::OpenDifficultyMenu),

        // Menu lines, in menu order
        KeyCode::Char('1') => Some(KeyAction::ChooseDifficulty(Difficulty::Fast)),
        KeyCode::Char('2') => Some(KeyAction::ChooseDifficulty(Difficulty::Normal)),
        KeyCode::Char('3') => Some(KeyAction::ChooseDifficulty(Difficulty::Slow)),

        KeyCode::Esc => Some(KeyAction::Cancel),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_start_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Enter)),
            Some(KeyAction::Start)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(KeyAction::Start)
        );
    }

    #[test]
    fn test_menu_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('D'))),
            Some(KeyAction::OpenDifficultyMenu)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('1'))),
            Some(KeyAction::ChooseDifficulty(Difficulty::Fast))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('3'))),
            Some(KeyAction::ChooseDifficulty(Difficulty::Slow))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Esc)),
            Some(KeyAction::Cancel)
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('4'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
