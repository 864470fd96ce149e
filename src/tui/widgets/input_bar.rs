//! Song / artist / audio file inputs

use crate::app::state::{AppState, Focus};
use crate::chat::Session;
use crate::tui::theme::{get_theme, LoadingSpinner};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(frame: &mut Frame, state: &AppState, session: &Session, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(35),
            Constraint::Percentage(30),
        ])
        .split(area);

    let theme = get_theme();
    let icons = &theme.icons;

    render_field(
        frame,
        state,
        Field {
            focus: Focus::Song,
            title: format!(" {} Song Name ", icons.search),
            value: &state.song_input,
            busy: session.is_loading(),
        },
        cols[0],
    );
    render_field(
        frame,
        state,
        Field {
            focus: Focus::Artist,
            title: format!(" {} Artist Name ", icons.user),
            value: &state.artist_input,
            busy: session.is_loading(),
        },
        cols[1],
    );
    render_field(
        frame,
        state,
        Field {
            focus: Focus::File,
            title: format!(" {} Upload Audio ", icons.file),
            value: &state.file_input,
            busy: session.is_uploading(),
        },
        cols[2],
    );
}

struct Field<'a> {
    focus: Focus,
    title: String,
    value: &'a str,
    busy: bool,
}

fn render_field(frame: &mut Frame, state: &AppState, field: Field<'_>, area: Rect) {
    let theme = get_theme();
    let is_focused = state.focus == field.focus;

    let block = theme.pane(field.title, is_focused);
    let inner = block.inner(area);

    let content = if field.busy {
        Line::from(Span::styled(
            LoadingSpinner::frame(state.tick),
            Style::default().fg(theme.palette.accent_alt),
        ))
    } else if field.value.is_empty() && !is_focused {
        Line::from(Span::styled(
            placeholder(field.focus),
            Style::default().fg(theme.palette.fg_secondary),
        ))
    } else {
        // Keep the tail visible while typing.
        let width = inner.width.saturating_sub(1) as usize;
        let skip = field.value.chars().count().saturating_sub(width);
        let visible: String = field.value.chars().skip(skip).collect();
        Line::from(Span::styled(visible, Style::default().fg(theme.palette.fg_primary)))
    };

    frame.render_widget(Paragraph::new(content).block(block), area);

    if is_focused && !field.busy && !state.show_help {
        let typed = field.value.chars().count().min(inner.width.saturating_sub(1) as usize) as u16;
        frame.set_cursor_position((inner.x + typed, inner.y));
    }
}

fn placeholder(focus: Focus) -> &'static str {
    match focus {
        Focus::Song => "Song Name",
        Focus::Artist => "Artist Name",
        Focus::File => "path/to/song.mp3",
        Focus::History => "",
    }
}
