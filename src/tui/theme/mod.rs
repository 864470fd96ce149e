//! Look shared by every widget: pink accents on near-black.
//!
//! The theme is picked once at startup (`init`) and read by widgets on every
//! frame through `get_theme`.

pub mod borders;
pub mod icons;
pub mod palette;

pub use borders::BorderStyle;
pub use icons::{Icons, LoadingSpinner};
pub use palette::Palette;

use crate::config::UiConfig;
use once_cell::sync::OnceCell;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};

static ACTIVE: OnceCell<Theme> = OnceCell::new();

#[derive(Debug, Clone)]
pub struct Theme {
    pub palette: Palette,
    pub icons: Icons,
}

impl Theme {
    pub fn new(ui: &UiConfig) -> Self {
        Self {
            palette: Palette::BLOSSOM,
            icons: if ui.nerd_font {
                Icons::nerd()
            } else {
                Icons::emoji()
            },
        }
    }

    pub fn border_set(&self) -> ratatui::symbols::border::Set<'static> {
        BorderStyle::to_border_set()
    }

    /// Bordered pane with a pink title; focused panes get a thick accent border.
    pub fn pane(&self, title: String, focused: bool) -> Block<'static> {
        let border = if focused {
            self.palette.accent
        } else {
            self.palette.border
        };
        Block::default()
            .borders(Borders::ALL)
            .border_set(BorderStyle::focused(focused))
            .border_style(Style::default().fg(border))
            .title(title)
            .title_style(Style::default().fg(self.palette.accent))
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(&UiConfig::default())
    }
}

/// Install the theme. Later calls are ignored.
pub fn init(ui: &UiConfig) {
    let _ = ACTIVE.set(Theme::new(ui));
}

pub fn get_theme() -> &'static Theme {
    ACTIVE.get_or_init(Theme::default)
}
