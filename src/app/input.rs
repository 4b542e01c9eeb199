use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub const HELP_TEXT: &str =
    "Tab/Shift+Tab move • arrows pick • Space toggles • Enter commits • Ctrl+R defaults • Ctrl+S submit • Ctrl+Q quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Submit,
    Quit,
    ResetDefaults,
    NextField,
    PrevField,
    /// Everything else goes to the focused widget.
    Edit,
}

pub fn classify(key: &KeyEvent) -> KeyCommand {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('s') | KeyCode::Char('S') => KeyCommand::Submit,
            KeyCode::Char('q') | KeyCode::Char('Q') => KeyCommand::Quit,
            KeyCode::Char('c') | KeyCode::Char('C') => KeyCommand::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyCommand::ResetDefaults,
            _ => KeyCommand::Edit,
        };
    }

    match key.code {
        KeyCode::Tab => KeyCommand::NextField,
        KeyCode::BackTab => KeyCommand::PrevField,
        KeyCode::Esc => KeyCommand::Quit,
        _ => KeyCommand::Edit,
    }
}
