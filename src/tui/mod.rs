use crate::app::state::AppState;
use crate::chat::Session;
use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};

pub mod theme;
pub mod widgets;

pub type TuiTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Raw mode + alternate screen for the lifetime of the guard.
pub struct TerminalGuard {
    terminal: TuiTerminal,
    mouse: bool,
}

impl TerminalGuard {
    /// `mouse` turns on mouse capture (wheel scrolling in the transcript).
    pub fn enter(mouse: bool) -> anyhow::Result<Self> {
        enable_raw_mode().context("enable raw mode")?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("enter alt screen")?;
        if mouse {
            execute!(stdout, EnableMouseCapture).context("enable mouse capture")?;
        }

        let terminal = Terminal::new(CrosstermBackend::new(stdout)).context("create terminal")?;
        Ok(Self { terminal, mouse })
    }

    pub fn terminal_mut(&mut self) -> &mut TuiTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        if self.mouse {
            let _ = execute!(stdout, DisableMouseCapture);
        }
        let _ = execute!(stdout, LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Render one frame, dropping the toast once it has been shown long enough.
pub fn draw(terminal: &mut TuiTerminal, state: &mut AppState, session: &Session) -> anyhow::Result<()> {
    if state.toast.as_ref().is_some_and(|t| t.is_expired()) {
        state.toast = None;
    }

    let mut max_scroll = 0;
    terminal
        .draw(|f| max_scroll = widgets::root::render(f, state, session))
        .context("terminal draw")?;
    state.set_chat_scroll_max(max_scroll);
    Ok(())
}
