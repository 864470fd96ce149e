use super::state::Focus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    FocusNext,
    FocusPrev,
    SetFocus(Focus),

    InputChar(char),
    Backspace,
    ClearInput,
    /// Enter: look up, upload or open history depending on focus.
    Activate,

    HistoryUp,
    HistoryDown,
    ClearHistory,

    ScrollUp,
    ScrollDown,
    ScrollBottom,

    ToggleHelp,
    Logout,
    Resize,
}
