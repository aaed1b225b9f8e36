//! Key mapping from terminal events to logical buttons.

use crate::types::Button;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key to the logical button it holds, if any.
pub fn button_for_key(code: KeyCode) -> Option<Button> {
    match code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Button::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Button::MoveRight)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Button::SoftDrop)
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('x')
        | KeyCode::Char('X') => Some(Button::RotateCw),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(Button::RotateCcw),

        // Actions
        KeyCode::Char(' ') => Some(Button::HardDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Button::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Button::Restart),

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
    fn test_movement_keys() {
        assert_eq!(button_for_key(KeyCode::Left), Some(Button::MoveLeft));
        assert_eq!(button_for_key(KeyCode::Right), Some(Button::MoveRight));
        assert_eq!(button_for_key(KeyCode::Down), Some(Button::SoftDrop));

        assert_eq!(button_for_key(KeyCode::Char('H')), Some(Button::MoveLeft));
        assert_eq!(button_for_key(KeyCode::Char('l')), Some(Button::MoveRight));
        assert_eq!(button_for_key(KeyCode::Char('s')), Some(Button::SoftDrop));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(button_for_key(KeyCode::Up), Some(Button::RotateCw));
        assert_eq!(button_for_key(KeyCode::Char('x')), Some(Button::RotateCw));
        assert_eq!(button_for_key(KeyCode::Char('W')), Some(Button::RotateCw));
        assert_eq!(button_for_key(KeyCode::Char('z')), Some(Button::RotateCcw));
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(button_for_key(KeyCode::Char(' ')), Some(Button::HardDrop));
        assert_eq!(button_for_key(KeyCode::Char('P')), Some(Button::Pause));
        assert_eq!(button_for_key(KeyCode::Char('r')), Some(Button::Restart));
        assert_eq!(button_for_key(KeyCode::Char('c')), None);
        assert_eq!(button_for_key(KeyCode::Enter), None);
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
