use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::model::{Direction, Mode, Model};
use super::update::Message;

/// Translate a terminal event into a message, honoring the current mode.
pub(super) fn handle_event(event: &Event, model: &Model) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(*key, model),
        Event::Resize(w, h) => Some(Message::Resize(*w, *h)),
        _ => None,
    }
}

fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
    match &model.mode {
        Mode::Edit => edit_key(key),
        Mode::Confirm(_) => confirm_key(key),
        Mode::Prompt { .. } => prompt_key(key),
    }
}

fn edit_key(key: KeyEvent) -> Option<Message> {
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('b') => Some(Message::ToggleBold),
            KeyCode::Char('i') => Some(Message::ToggleItalic),
            KeyCode::Char('u') => Some(Message::ToggleUnderline),
            KeyCode::Char('s') => Some(Message::Save),
            KeyCode::Char('o') => Some(Message::RequestOpen),
            KeyCode::Char('n') => Some(Message::RequestNew),
            KeyCode::Char('q') => Some(Message::RequestQuit),
            KeyCode::Char('a') => Some(Message::SelectAll),
            KeyCode::Char('f') => Some(Message::CycleFamily),
            // Ctrl+= is the common "bigger" binding; Ctrl++ for layouts
            // where = is shifted.
            KeyCode::Char('=' | '+') => Some(Message::NudgeSize(1)),
            KeyCode::Char('-') => Some(Message::NudgeSize(-1)),
            KeyCode::Home => Some(Message::DocStart(shift)),
            KeyCode::End => Some(Message::DocEnd(shift)),
            _ => None,
        };
    }

    if key.modifiers.contains(KeyModifiers::ALT) {
        return match key.code {
            KeyCode::Up => Some(Message::SizePreset { next: true }),
            KeyCode::Down => Some(Message::SizePreset { next: false }),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char(c) => Some(Message::Insert(c)),
        KeyCode::Enter => Some(Message::Insert('\n')),
        KeyCode::Backspace => Some(Message::Backspace),
        KeyCode::Delete => Some(Message::DeleteForward),
        KeyCode::Left => Some(Message::Move(Direction::Left, shift)),
        KeyCode::Right => Some(Message::Move(Direction::Right, shift)),
        KeyCode::Up => Some(Message::Move(Direction::Up, shift)),
        KeyCode::Down => Some(Message::Move(Direction::Down, shift)),
        KeyCode::Home => Some(Message::LineStart(shift)),
        KeyCode::End => Some(Message::LineEnd(shift)),
        KeyCode::PageUp => Some(Message::PageUp(shift)),
        KeyCode::PageDown => Some(Message::PageDown(shift)),
        KeyCode::Esc => Some(Message::Cancel),
        _ => None,
    }
}

fn confirm_key(key: KeyEvent) -> Option<Message> {
    match key.code {
        KeyCode::Char('y' | 'Y') => Some(Message::ConfirmSave),
        KeyCode::Char('n' | 'N') => Some(Message::ConfirmDiscard),
        KeyCode::Esc => Some(Message::Cancel),
        _ => None,
    }
}

fn prompt_key(key: KeyEvent) -> Option<Message> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        KeyCode::Char(c) => Some(Message::PromptInput(c)),
        KeyCode::Enter => Some(Message::PromptSubmit),
        KeyCode::Backspace => Some(Message::PromptBackspace),
        KeyCode::Esc => Some(Message::Cancel),
        _ => None,
    }
}
