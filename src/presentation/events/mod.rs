//! Event handling.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;

/// Result of event handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Continue processing.
    Continue,
    /// Exit application.
    Exit,
    /// Event was consumed.
    Consumed,
}

/// Returns true for key presses; repeats and releases are ignored.
#[must_use]
pub fn is_key_press(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
}

/// Checks if key is a quit event.
#[must_use]
pub fn is_quit_event(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('c' | 'q'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }
    )
}

/// Checks if key inserts text into an input.
#[must_use]
pub fn is_text_input(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char(_))
        && (key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT)
}

/// Returns the clicked position for a left button press.
#[must_use]
pub fn left_click(mouse: &MouseEvent) -> Option<Position> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Position::new(mouse.column, mouse.row)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new_with_kind(code, modifiers, KeyEventKind::Press)
    }

    fn make_mouse_event(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_quit_events() {
        assert!(is_quit_event(&make_key_event(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(is_quit_event(&make_key_event(
            KeyCode::Char('q'),
            KeyModifiers::CONTROL
        )));
    }

    #[test]
    fn test_plain_letters_are_not_quit() {
        assert!(!is_quit_event(&make_key_event(
            KeyCode::Char('q'),
            KeyModifiers::NONE
        )));
        assert!(!is_quit_event(&make_key_event(
            KeyCode::Esc,
            KeyModifiers::NONE
        )));
    }

    #[test]
    fn test_text_input_accepts_shifted_and_cyrillic() {
        assert!(is_text_input(&make_key_event(
            KeyCode::Char('Ж'),
            KeyModifiers::SHIFT
        )));
        assert!(is_text_input(&make_key_event(
            KeyCode::Char('ё'),
            KeyModifiers::NONE
        )));
        assert!(!is_text_input(&make_key_event(
            KeyCode::Char('u'),
            KeyModifiers::CONTROL
        )));
    }

    #[test]
    fn test_left_click_only() {
        let down = make_mouse_event(MouseEventKind::Down(MouseButton::Left), 4, 7);
        let right = make_mouse_event(MouseEventKind::Down(MouseButton::Right), 4, 7);
        let moved = make_mouse_event(MouseEventKind::Moved, 4, 7);

        assert_eq!(left_click(&down), Some(Position::new(4, 7)));
        assert_eq!(left_click(&right), None);
        assert_eq!(left_click(&moved), None);
    }
}
