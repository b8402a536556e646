//! Terminal key mapping for the chat input.
//!
//! Editing keys stay with the line editor; navigation and accept keys are
//! forwarded to the completion controller as [`InputEvent`]s.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use solchat_core::InputEvent;

/// What a key press means to the interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    /// Forward to the completion controller.
    Controller(InputEvent),
    /// Ctrl-C: drop the current line.
    ClearLine,
    /// Ctrl-D: end of input when the line is empty.
    Eof,
    Ignore,
}

/// Map a key event to an action.
pub fn map_key(event: &KeyEvent) -> KeyAction {
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    match event.code {
        KeyCode::Char('c') if ctrl => KeyAction::ClearLine,
        KeyCode::Char('d') if ctrl => KeyAction::Eof,
        KeyCode::Char('a') if ctrl => KeyAction::Home,
        KeyCode::Char('e') if ctrl => KeyAction::End,
        KeyCode::Char(_) if ctrl || event.modifiers.contains(KeyModifiers::ALT) => {
            KeyAction::Ignore
        }
        KeyCode::Char(c) => KeyAction::Insert(c),
        KeyCode::Backspace => KeyAction::Backspace,
        KeyCode::Delete => KeyAction::Delete,
        KeyCode::Left => KeyAction::Left,
        KeyCode::Right => KeyAction::Right,
        KeyCode::Home => KeyAction::Home,
        KeyCode::End => KeyAction::End,
        KeyCode::Up => KeyAction::Controller(InputEvent::ArrowUp),
        KeyCode::Down => KeyAction::Controller(InputEvent::ArrowDown),
        KeyCode::Tab => KeyAction::Controller(InputEvent::Tab),
        KeyCode::Esc => KeyAction::Controller(InputEvent::Escape),
        KeyCode::Enter => KeyAction::Controller(InputEvent::Enter {
            modified: !event.modifiers.is_empty(),
        }),
        _ => KeyAction::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    #[test]
    fn test_plain_char_inserts() {
        assert_eq!(map_key(&key(KeyCode::Char('/'))), KeyAction::Insert('/'));
    }

    #[test]
    fn test_shifted_char_inserts() {
        let event = KeyEvent::new(KeyCode::Char('T'), KeyModifiers::SHIFT);
        assert_eq!(map_key(&event), KeyAction::Insert('T'));
    }

    #[test]
    fn test_ctrl_c_clears() {
        assert_eq!(map_key(&ctrl(KeyCode::Char('c'))), KeyAction::ClearLine);
    }

    #[test]
    fn test_ctrl_d_eof() {
        assert_eq!(map_key(&ctrl(KeyCode::Char('d'))), KeyAction::Eof);
    }

    #[test]
    fn test_other_ctrl_chars_ignored() {
        assert_eq!(map_key(&ctrl(KeyCode::Char('x'))), KeyAction::Ignore);
    }

    #[test]
    fn test_tab_goes_to_controller() {
        assert_eq!(
            map_key(&key(KeyCode::Tab)),
            KeyAction::Controller(InputEvent::Tab)
        );
    }

    #[test]
    fn test_arrows_go_to_controller() {
        assert_eq!(
            map_key(&key(KeyCode::Up)),
            KeyAction::Controller(InputEvent::ArrowUp)
        );
        assert_eq!(
            map_key(&key(KeyCode::Down)),
            KeyAction::Controller(InputEvent::ArrowDown)
        );
    }

    #[test]
    fn test_enter_modified_flag() {
        assert_eq!(
            map_key(&key(KeyCode::Enter)),
            KeyAction::Controller(InputEvent::Enter { modified: false })
        );
        let shift_enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT);
        assert_eq!(
            map_key(&shift_enter),
            KeyAction::Controller(InputEvent::Enter { modified: true })
        );
    }

    #[test]
    fn test_escape_goes_to_controller() {
        assert_eq!(
            map_key(&key(KeyCode::Esc)),
            KeyAction::Controller(InputEvent::Escape)
        );
    }

    #[test]
    fn test_unknown_key_ignored() {
        assert_eq!(map_key(&key(KeyCode::F(5))), KeyAction::Ignore);
    }
}
