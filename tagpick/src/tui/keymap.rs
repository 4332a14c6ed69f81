use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tagpick_lib::session::Key;

/// Maps a terminal key event to a session key. Releases and repeats are dropped.
pub fn translate(event: &KeyEvent) -> Option<Key> {
    if event.kind != KeyEventKind::Press {
        return None;
    }
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);

    let key = match event.code {
        KeyCode::Char('c') if ctrl => Key::Quit,
        KeyCode::Char('r') if ctrl => Key::Refresh,
        KeyCode::Char('d') if ctrl => Key::Download,
        KeyCode::Char('x') if ctrl => Key::CancelTasks,
        KeyCode::Char(_) if ctrl => return None,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Esc => Key::ClearBanner,
        KeyCode::Tab => Key::FocusNext,
        KeyCode::BackTab => Key::FocusPrev,
        KeyCode::Enter => Key::Confirm,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        _ => return None,
    };
    Some(key)
}
