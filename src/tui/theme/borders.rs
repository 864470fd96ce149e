//! Border styles

use ratatui::symbols::border;

/// Rounded borders, thick ones for the focused pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BorderStyle;

impl BorderStyle {
    pub fn to_border_set() -> border::Set<'static> {
        border::ROUNDED
    }

    pub fn focused(is_focused: bool) -> border::Set<'static> {
        if is_focused {
            border::THICK
        } else {
            border::ROUNDED
        }
    }
}
