//! Help popup showing keybindings

use crate::tui::theme::{get_theme, Theme};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, area: Rect) {
    let theme = get_theme();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.accent))
        .title(format!(" {} Keybinds ", theme.icons.help))
        .title_style(Style::default().fg(theme.palette.accent))
        .style(Style::default().bg(theme.palette.bg_primary));

    let content = vec![
        section_header("Lyrics", theme),
        keybind("Tab / S-Tab", "Next / previous field", theme),
        keybind("Enter", "Find lyrics, upload, or open entry", theme),
        keybind("Ctrl+o", "Upload an audio file (type its path)", theme),
        keybind("Ctrl+u", "Clear input", theme),
        keybind("PgUp / PgDn", "Scroll transcript", theme),
        keybind("Ctrl+End", "Jump to latest message", theme),
        Line::default(),
        section_header("History", theme),
        keybind("j / Down", "Move down", theme),
        keybind("k / Up", "Move up", theme),
        keybind("/ or i", "Back to the song field", theme),
        keybind("Ctrl+x", "Clear history", theme),
        Line::default(),
        section_header("General", theme),
        keybind("F1", "Toggle this help", theme),
        keybind("Ctrl+l", "Log out", theme),
        keybind("Esc", "Quit", theme),
    ];

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn section_header(title: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![Span::styled(
        format!("━━ {} ━━", title),
        Style::default()
            .fg(theme.palette.accent)
            .add_modifier(Modifier::BOLD),
    )])
}

fn keybind(key: &str, desc: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled("  ", Style::default()),
        Span::styled(
            format!("{:14}", key),
            Style::default()
                .fg(theme.palette.accent_alt)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc.to_string(), Style::default().fg(theme.palette.fg_primary)),
    ])
}
