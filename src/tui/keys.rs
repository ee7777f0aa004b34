use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::action::Action;
use super::state::{EditorState, Mode};

/// Map a key event to an action, given the current input mode.
///
/// In edit mode, printable keys feed the buffer; everywhere else they are
/// commands.
pub fn key_to_action(key: KeyEvent, state: &EditorState) -> Option<Action> {
    match state.mode {
        Mode::Edit { .. } => match key.code {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::Commit),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::Quit)
            }
            KeyCode::Char(c) => Some(Action::InputChar(c)),
            _ => None,
        },
        Mode::Select { .. } => match key.code {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::Commit),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
            _ => None,
        },
        Mode::Browse => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Activate),
            KeyCode::Char('s') => Some(Action::Save),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_browse_keys() {
        let state = EditorState::default();
        assert_eq!(key_to_action(key(KeyCode::Char('q')), &state), Some(Action::Quit));
        assert_eq!(key_to_action(key(KeyCode::Char('j')), &state), Some(Action::MoveDown));
        assert_eq!(key_to_action(key(KeyCode::Enter), &state), Some(Action::Activate));
        assert_eq!(key_to_action(key(KeyCode::Char('s')), &state), Some(Action::Save));
        assert_eq!(key_to_action(key(KeyCode::F(5)), &state), None);
    }

    #[test]
    fn test_edit_mode_captures_printable_keys() {
        let mut state = EditorState::default();
        state.mode = Mode::Edit { buffer: String::new() };
        assert_eq!(
            key_to_action(key(KeyCode::Char('q')), &state),
            Some(Action::InputChar('q'))
        );
        assert_eq!(key_to_action(key(KeyCode::Esc), &state), Some(Action::Cancel));
        assert_eq!(key_to_action(key(KeyCode::Enter), &state), Some(Action::Commit));
        assert_eq!(
            key_to_action(key(KeyCode::Backspace), &state),
            Some(Action::Backspace)
        );
    }

    #[test]
    fn test_edit_mode_ctrl_c_quits() {
        let mut state = EditorState::default();
        state.mode = Mode::Edit { buffer: String::new() };
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_action(event, &state), Some(Action::Quit));
    }

    #[test]
    fn test_select_mode_keys() {
        let mut state = EditorState::default();
        state.mode = Mode::Select { options: Vec::new(), index: 0 };
        assert_eq!(key_to_action(key(KeyCode::Up), &state), Some(Action::MoveUp));
        assert_eq!(key_to_action(key(KeyCode::Enter), &state), Some(Action::Commit));
        assert_eq!(key_to_action(key(KeyCode::Char('q')), &state), None);
    }
}
