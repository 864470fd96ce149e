//! Color palette - pink on near-black

use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color,
    pub bg_highlight: Color,
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub accent: Color,
    pub accent_alt: Color,
    pub border: Color,
    pub error: Color,
}

impl Palette {
    pub const BLOSSOM: Self = Self {
        bg_primary: Color::Rgb(10, 10, 10),      // #0a0a0a
        bg_highlight: Color::Rgb(42, 16, 34),    // #2a1022 sidebar hover
        fg_primary: Color::Rgb(255, 255, 255),   // #ffffff
        fg_secondary: Color::Rgb(140, 140, 140), // #8c8c8c
        accent: Color::Rgb(236, 72, 153),        // #ec4899 pink-500
        accent_alt: Color::Rgb(249, 168, 212),   // #f9a8d4 pink-300
        border: Color::Rgb(74, 32, 60),          // #4a203c
        error: Color::Rgb(244, 114, 182),        // #f472b6 pink-400
    };
}

impl Default for Palette {
    fn default() -> Self {
        Self::BLOSSOM
    }
}
