#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Song,
    Artist,
    File,
    History,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Song => Focus::Artist,
            Focus::Artist => Focus::File,
            Focus::File => Focus::History,
            Focus::History => Focus::Song,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Song => Focus::History,
            Focus::Artist => Focus::Song,
            Focus::File => Focus::Artist,
            Focus::History => Focus::File,
        }
    }

    pub fn is_text(self) -> bool {
        !matches!(self, Focus::History)
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created_at: std::time::Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Success,
            created_at: std::time::Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Error,
            created_at: std::time::Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > std::time::Duration::from_secs(3)
    }
}

/// View state. The transcript and history themselves live in `chat::Session`.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub focus: Focus,
    pub song_input: String,
    pub artist_input: String,
    pub file_input: String,
    pub history_selected: usize,
    /// Lines scrolled up from the bottom of the transcript.
    pub chat_scroll: u16,
    /// Scroll-back available at the last draw.
    pub chat_scroll_max: u16,
    pub show_help: bool,
    pub toast: Option<Toast>,
    pub tick: u64,
    pub should_quit: bool,
    pub logged_out: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_input_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::Song => Some(&mut self.song_input),
            Focus::Artist => Some(&mut self.artist_input),
            Focus::File => Some(&mut self.file_input),
            Focus::History => None,
        }
    }

    pub fn clamp_history(&mut self, len: usize) {
        self.history_selected = self.history_selected.min(len.saturating_sub(1));
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.chat_scroll = self.chat_scroll.saturating_add(lines).min(self.chat_scroll_max);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.chat_scroll = self.chat_scroll.saturating_sub(lines);
    }

    pub fn set_chat_scroll_max(&mut self, max: u16) {
        self.chat_scroll_max = max;
        self.chat_scroll = self.chat_scroll.min(max);
    }
}
