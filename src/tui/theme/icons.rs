//! Icon sets. Emoji work in any terminal; the Nerd Font set needs a patched
//! font (https://www.nerdfonts.com).

#[derive(Debug, Clone)]
pub struct Icons {
    pub history: &'static str,
    pub search: &'static str,
    pub help: &'static str,
    pub music: &'static str,
    pub user: &'static str,
    pub lyrics: &'static str,
    pub file: &'static str,
    pub error: &'static str,
    pub selected: &'static str,
    pub unselected: &'static str,
}

impl Icons {
    pub const fn emoji() -> Self {
        Self {
            history: "🕘",
            search: "🔎",
            help: "❓",
            music: "🎵",
            user: "🙂",
            lyrics: "🎤",
            file: "📁",
            error: "💔",
            selected: "›",
            unselected: " ",
        }
    }

    pub const fn nerd() -> Self {
        Self {
            history: "\u{f1da}", // nf-fa-history
            search: "\u{f002}",  // nf-fa-search
            help: "\u{f059}",    // nf-fa-question_circle
            music: "\u{f001}",   // nf-fa-music
            user: "\u{f007}",    // nf-fa-user
            lyrics: "\u{f130}",  // nf-fa-microphone
            file: "\u{f1c7}",    // nf-fa-file_audio_o
            error: "\u{f00d}",   // nf-fa-times
            selected: "\u{f054}", // nf-fa-chevron_right
            unselected: " ",
        }
    }
}

impl Default for Icons {
    fn default() -> Self {
        Self::emoji()
    }
}

/// Spinner shown while a lookup or upload is in flight.
pub struct LoadingSpinner;

impl LoadingSpinner {
    const FRAMES: [&'static str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

    pub fn frame(tick: u64) -> &'static str {
        Self::FRAMES[(tick % Self::FRAMES.len() as u64) as usize]
    }
}
