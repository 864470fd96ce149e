use crate::app::actions::Action;
use crate::app::events::{Event, InputEvent};
use crate::app::state::{AppState, Focus};
use crossterm::event::{
    self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind,
};
use tokio::sync::mpsc;

pub fn spawn_input_task(tx: mpsc::Sender<Event>, mouse_enabled: bool) {
    tokio::task::spawn_blocking(move || {
        loop {
            if event::poll(std::time::Duration::from_millis(250)).unwrap_or(false) {
                let ev = match event::read() {
                    Ok(CtEvent::Key(k)) if k.kind == KeyEventKind::Press => InputEvent::Key(k),
                    Ok(CtEvent::Mouse(m)) if mouse_enabled => InputEvent::Mouse(m),
                    Ok(CtEvent::Resize(_, _)) => InputEvent::Resize,
                    Ok(_) | Err(_) => continue,
                };
                if tx.blocking_send(Event::Input(ev)).is_err() {
                    break;
                }
            } else if tx.is_closed() {
                break;
            }
        }
    });
}

pub fn map_input_to_action(state: &AppState, ev: InputEvent) -> Option<Action> {
    match ev {
        InputEvent::Resize => Some(Action::Resize),
        InputEvent::Mouse(m) => match m.kind {
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            _ => None,
        },
        InputEvent::Key(k) => map_key(state, k),
    }
}

fn map_key(state: &AppState, k: KeyEvent) -> Option<Action> {
    let ctrl = k.modifiers.contains(KeyModifiers::CONTROL);

    if state.show_help {
        return match k.code {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                Some(Action::ToggleHelp)
            }
            _ => None,
        };
    }

    // Global bindings
    match k.code {
        KeyCode::Char('c') if ctrl => return Some(Action::Quit),
        KeyCode::Char('o') if ctrl => return Some(Action::SetFocus(Focus::File)),
        KeyCode::Char('l') if ctrl => return Some(Action::Logout),
        KeyCode::Char('x') if ctrl => return Some(Action::ClearHistory),
        KeyCode::Esc => return Some(Action::Quit),
        KeyCode::F(1) => return Some(Action::ToggleHelp),
        KeyCode::Tab => return Some(Action::FocusNext),
        KeyCode::BackTab => return Some(Action::FocusPrev),
        KeyCode::PageUp => return Some(Action::ScrollUp),
        KeyCode::PageDown => return Some(Action::ScrollDown),
        KeyCode::End if ctrl => return Some(Action::ScrollBottom),
        KeyCode::Enter => return Some(Action::Activate),
        _ => {}
    }

    if state.focus.is_text() {
        return match k.code {
            KeyCode::Char('u') if ctrl => Some(Action::ClearInput),
            KeyCode::Char(c) if !ctrl => Some(Action::InputChar(c)),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::Down => Some(Action::ScrollDown),
            _ => None,
        };
    }

    // History sidebar - vim style
    match k.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::HistoryUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::HistoryDown),
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Char('/') | KeyCode::Char('i') => Some(Action::SetFocus(Focus::Song)),
        _ => None,
    }
}
