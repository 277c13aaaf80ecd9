use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Save,
    Quit,
    SwitchSchema(i32),
    CloseScreen,
    NextField,
    PrevField,
    SelectItem(i32),
    RemoveItem,
    Submit,
    ResetStatus,
    Edit(KeyEvent),
    None,
}

pub fn classify(key: &KeyEvent) -> KeyCommand {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('s') | KeyCode::Char('S') => KeyCommand::Save,
            KeyCode::Char('q') | KeyCode::Char('Q') => KeyCommand::Quit,
            KeyCode::Char('c') | KeyCode::Char('C') => KeyCommand::Quit,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Right => {
                KeyCommand::SwitchSchema(1)
            }
            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Left => {
                KeyCommand::SwitchSchema(-1)
            }
            KeyCode::Char('w') | KeyCode::Char('W') => KeyCommand::CloseScreen,
            KeyCode::Char('d') | KeyCode::Char('D') => KeyCommand::RemoveItem,
            _ => KeyCommand::None,
        };
    }

    match key.code {
        KeyCode::Tab | KeyCode::Down => KeyCommand::NextField,
        KeyCode::BackTab | KeyCode::Up => KeyCommand::PrevField,
        KeyCode::Left => KeyCommand::SelectItem(-1),
        KeyCode::Right => KeyCommand::SelectItem(1),
        KeyCode::Delete => KeyCommand::RemoveItem,
        KeyCode::Enter => KeyCommand::Submit,
        KeyCode::Esc => KeyCommand::ResetStatus,
        KeyCode::Char(_) | KeyCode::Backspace => KeyCommand::Edit(*key),
        _ => KeyCommand::None,
    }
}

/// Apply a text-editing key to `buffer`. Returns `true` when the buffer changed.
pub fn edit_buffer(buffer: &mut String, key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return false;
            }
            buffer.push(ch);
            true
        }
        KeyCode::Backspace => buffer.pop().is_some(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn control_shortcuts() {
        assert_eq!(
            classify(&key(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            KeyCommand::Save
        );
        assert_eq!(
            classify(&key(KeyCode::Char('n'), KeyModifiers::CONTROL)),
            KeyCommand::SwitchSchema(1)
        );
        assert_eq!(
            classify(&key(KeyCode::Left, KeyModifiers::CONTROL)),
            KeyCommand::SwitchSchema(-1)
        );
    }

    #[test]
    fn shift_tab_moves_back() {
        assert_eq!(
            classify(&key(KeyCode::BackTab, KeyModifiers::SHIFT)),
            KeyCommand::PrevField
        );
    }

    #[test]
    fn edit_buffer_appends_and_pops() {
        let mut buffer = String::from("4");
        assert!(edit_buffer(&mut buffer, &key(KeyCode::Char('2'), KeyModifiers::NONE)));
        assert_eq!(buffer, "42");
        assert!(edit_buffer(&mut buffer, &key(KeyCode::Backspace, KeyModifiers::NONE)));
        assert_eq!(buffer, "4");
        assert!(!edit_buffer(&mut buffer, &key(KeyCode::Char('a'), KeyModifiers::CONTROL)));
        buffer.clear();
        assert!(!edit_buffer(&mut buffer, &key(KeyCode::Backspace, KeyModifiers::NONE)));
    }
}
