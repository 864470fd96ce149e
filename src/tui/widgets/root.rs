//! Root layout widget - orchestrates main layout structure

use crate::app::state::{AppState, ToastKind};
use crate::chat::Session;
use crate::tui::theme::get_theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use super::{chat, help, input_bar, sidebar};

/// Main layout structure:
/// ┌──────────┬─────────────────────────────────────────┐
/// │ History  │              Transcript                 │
/// │          │                                         │
/// │          ├────────────┬─────────────┬──────────────┤
/// │          │   Song     │   Artist    │  Audio file  │
/// ├──────────┴────────────┴─────────────┴──────────────┤
/// │ hints / toast                                      │
/// └────────────────────────────────────────────────────┘
/// Returns the transcript's scroll-back limit for this frame.
pub fn render(frame: &mut Frame, state: &AppState, session: &Session) -> u16 {
    let root = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // Sidebar + chat
            Constraint::Length(1), // Footer
        ])
        .split(root);

    let top_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(28), // History sidebar
            Constraint::Min(40),    // Chat
        ])
        .split(rows[0]);

    let chat_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Transcript
            Constraint::Length(3), // Input fields
        ])
        .split(top_cols[1]);

    sidebar::render(frame, state, session.history(), top_cols[0]);
    let max_scroll = chat::render(frame, state, session, chat_rows[0]);
    input_bar::render(frame, state, session, chat_rows[1]);
    render_footer(frame, state, rows[1]);

    if state.show_help {
        let area = centered(root, 64, 20);
        frame.render_widget(Clear, area);
        help::render(frame, area);
    }
    max_scroll
}

fn render_footer(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();

    let line = match &state.toast {
        Some(toast) => {
            let color = match toast.kind {
                ToastKind::Success => theme.palette.accent_alt,
                ToastKind::Error => theme.palette.error,
            };
            let icon = match toast.kind {
                ToastKind::Success => theme.icons.music,
                ToastKind::Error => theme.icons.error,
            };
            Line::from(Span::styled(
                format!(" {icon} {}", toast.message),
                Style::default().fg(color),
            ))
        }
        None => Line::from(Span::styled(
            " Tab focus · Enter send · Ctrl+o upload · F1 help · Esc quit   Powered by lyrics.ovh 🌸",
            Style::default().fg(theme.palette.fg_secondary),
        )),
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
