//! History sidebar - past lookups, newest first

use crate::app::state::{AppState, Focus};
use crate::history::History;
use crate::tui::theme::get_theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, state: &AppState, history: &History, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;
    let is_focused = state.focus == Focus::History;

    let block = theme.pane(format!(" {} History ", icons.history), is_focused);

    if history.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No history yet...",
            Style::default()
                .fg(theme.palette.fg_secondary)
                .add_modifier(Modifier::ITALIC),
        )))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let max_width = area.width.saturating_sub(5) as usize;

    let items: Vec<ListItem> = history
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let is_selected = is_focused && i == state.history_selected;
            let prefix = if is_selected { icons.selected } else { icons.unselected };
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(prefix, Style::default().fg(theme.palette.accent)),
                    Span::raw(" "),
                    Span::styled(
                        truncate_str(&entry.song, max_width),
                        Style::default()
                            .fg(theme.palette.fg_primary)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("  {}", truncate_str(&entry.artist, max_width)),
                    Style::default().fg(theme.palette.fg_secondary),
                )),
            ])
        })
        .collect();

    let mut list_state = ListState::default();
    if is_focused {
        list_state.select(Some(state.history_selected));
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(theme.palette.bg_highlight));

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{truncated}…")
    }
}
