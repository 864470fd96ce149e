//! Transcript pane

use crate::app::state::AppState;
use crate::chat::{ChatMessage, Role, Session, IDENTIFIED_PREFIX};
use crate::tui::theme::{get_theme, LoadingSpinner, Theme};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Draw the transcript. Returns how many lines the view can scroll up.
pub fn render(frame: &mut Frame, state: &AppState, session: &Session, area: Rect) -> u16 {
    let theme = get_theme();

    let block = theme.pane(format!(" {} Lyrix ", theme.icons.lyrics), false);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let padded = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner)[1];

    let mut lines = transcript_lines(session.messages(), theme);

    let pending = if session.is_loading() {
        Some("Searching for lyrics... 🎵")
    } else if session.is_uploading() {
        Some("Processing audio file... ✨")
    } else {
        None
    };
    if let Some(text) = pending {
        lines.push(Line::from(Span::styled(
            format!("{} {text}", LoadingSpinner::frame(state.tick)),
            Style::default().fg(theme.palette.accent_alt),
        )));
    }

    let width = padded.width.max(1) as usize;
    let total: usize = lines.iter().map(|l| wrapped_height(l.width(), width)).sum();
    let (offset, max_scroll) = scroll_window(total, padded.height as usize, state.chat_scroll);

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((offset, 0));
    frame.render_widget(paragraph, padded);
    max_scroll
}

/// Top line to show and the largest useful scroll-back, given `scroll` lines
/// scrolled up from the bottom.
fn scroll_window(total: usize, height: usize, scroll: u16) -> (u16, u16) {
    let max_scroll = total.saturating_sub(height).min(u16::MAX as usize) as u16;
    let scroll = scroll.min(max_scroll);
    (max_scroll - scroll, max_scroll)
}

fn transcript_lines(messages: &[ChatMessage], theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for message in messages {
        let (label, icon, label_color, text_color) = match message.role {
            Role::User => ("You", theme.icons.user, theme.palette.accent, theme.palette.fg_primary),
            Role::Bot => ("Lyrix", theme.icons.music, theme.palette.accent_alt, theme.palette.fg_primary),
        };

        lines.push(Line::from(Span::styled(
            format!("{icon} {label}"),
            Style::default().fg(label_color).add_modifier(Modifier::BOLD),
        )));
        let style = Style::default().fg(text_color);
        for (i, raw) in message.content.lines().enumerate() {
            // Lyrics are shown verbatim, even when they contain `**`.
            if i == 0 && message.role == Role::Bot && raw.starts_with(IDENTIFIED_PREFIX) {
                lines.push(bold_markup(raw, style));
            } else {
                lines.push(Line::from(Span::styled(raw.to_string(), style)));
            }
        }
        lines.push(Line::default());
    }

    lines
}

/// Render `**bold**` runs; everything else is plain text.
fn bold_markup(text: &str, style: Style) -> Line<'static> {
    let spans: Vec<Span<'static>> = text
        .split("**")
        .enumerate()
        .filter(|(_, part)| !part.is_empty())
        .map(|(i, part)| {
            if i % 2 == 1 {
                Span::styled(part.to_string(), style.add_modifier(Modifier::BOLD))
            } else {
                Span::styled(part.to_string(), style)
            }
        })
        .collect();
    Line::from(spans)
}

fn wrapped_height(line_width: usize, width: usize) -> usize {
    line_width.div_ceil(width).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_markup() {
        let line = bold_markup("✨ Identified: **Yesterday** by **The Beatles**", Style::default());
        let parts: Vec<(&str, bool)> = line
            .spans
            .iter()
            .map(|s| (s.content.as_ref(), s.style.add_modifier.contains(Modifier::BOLD)))
            .collect();
        assert_eq!(
            parts,
            vec![
                ("✨ Identified: ", false),
                ("Yesterday", true),
                (" by ", false),
                ("The Beatles", true),
            ]
        );
    }

    #[test]
    fn test_only_identified_header_gets_markup() {
        let theme = get_theme();
        let messages = vec![
            ChatMessage::bot("✨ Identified: **Song** by **Band**\n\nsing **loud** now"),
            ChatMessage::bot("**not** a header"),
        ];
        let lines = transcript_lines(&messages, theme);
        let text = |line: &Line| -> String { line.spans.iter().map(|s| s.content.as_ref()).collect() };

        assert_eq!(text(&lines[1]), "✨ Identified: Song by Band");
        assert_eq!(text(&lines[3]), "sing **loud** now");
        assert!(lines[3].spans.iter().all(|s| !s.style.add_modifier.contains(Modifier::BOLD)));
        assert_eq!(text(&lines[6]), "**not** a header");
    }

    #[test]
    fn test_scroll_window_stops_at_top() {
        // 30 lines in a 10 line view: 20 lines of scroll-back.
        assert_eq!(scroll_window(30, 10, 0), (20, 20));
        assert_eq!(scroll_window(30, 10, 5), (15, 20));
        assert_eq!(scroll_window(30, 10, 500), (0, 20));
        assert_eq!(scroll_window(4, 10, 3), (0, 0));
    }

    #[test]
    fn test_wrapped_height() {
        assert_eq!(wrapped_height(0, 10), 1);
        assert_eq!(wrapped_height(10, 10), 1);
        assert_eq!(wrapped_height(11, 10), 2);
    }

    #[test]
    fn test_transcript_has_header_per_message() {
        let theme = get_theme();
        let messages = vec![ChatMessage::user("Yesterday by The Beatles"), ChatMessage::bot("line 1\nline 2")];
        let lines = transcript_lines(&messages, theme);
        // header + 1 line + blank, header + 2 lines + blank
        assert_eq!(lines.len(), 7);
    }
}
