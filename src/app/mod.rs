pub mod actions;
pub mod events;
pub mod state;

use crate::auth::Authenticator;
use crate::chat::Session;
use crate::config::Config;
use crate::input;
use crate::lyrics::{self, OvhClient};
use crate::pipeline::{self, Upload};
use crate::tui::{self, TuiTerminal};
use actions::Action;
use events::{Event, NetworkEvent};
use state::{AppState, Focus, Toast};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;

/// How the chat loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Quit,
    LoggedOut,
}

pub struct App {
    cfg: Config,
    state: AppState,
    session: Session,
    lyrics: OvhClient,
}

impl App {
    pub fn new(cfg: Config, session: Session) -> anyhow::Result<Self> {
        let lyrics = OvhClient::new(&cfg.lyrics)?;
        Ok(Self {
            cfg,
            state: AppState::new(),
            session,
            lyrics,
        })
    }

    pub async fn run(&mut self, terminal: &mut TuiTerminal) -> anyhow::Result<Exit> {
        let (tx, mut rx) = mpsc::channel::<Event>(256);

        input::spawn_input_task(tx.clone(), self.cfg.input.mouse);
        spawn_ticker(tx.clone());

        tui::draw(terminal, &mut self.state, &self.session)?;

        while let Some(ev) = rx.recv().await {
            let redraw = match ev {
                Event::Input(input_ev) => {
                    if let Some(action) = input::map_input_to_action(&self.state, input_ev) {
                        self.handle_action(action, &tx);
                    }
                    true
                }
                Event::Network(ne) => {
                    self.handle_network(ne);
                    true
                }
                // Ticks only animate the spinner and expire toasts.
                Event::Tick => {
                    self.state.tick = self.state.tick.wrapping_add(1);
                    self.session.is_busy() || self.state.toast.is_some()
                }
            };

            if self.state.should_quit {
                break;
            }
            if redraw {
                tui::draw(terminal, &mut self.state, &self.session)?;
            }
        }

        Ok(if self.state.logged_out {
            Exit::LoggedOut
        } else {
            Exit::Quit
        })
    }

    fn handle_action(&mut self, action: Action, tx: &mpsc::Sender<Event>) {
        match action {
            Action::Quit => self.state.should_quit = true,
            Action::FocusNext => self.state.focus = self.state.focus.next(),
            Action::FocusPrev => self.state.focus = self.state.focus.prev(),
            Action::SetFocus(focus) => self.state.focus = focus,
            Action::InputChar(c) => {
                if let Some(buf) = self.state.active_input_mut() {
                    buf.push(c);
                }
            }
            Action::Backspace => {
                if let Some(buf) = self.state.active_input_mut() {
                    buf.pop();
                }
            }
            Action::ClearInput => {
                if let Some(buf) = self.state.active_input_mut() {
                    buf.clear();
                }
            }
            Action::Activate => match self.state.focus {
                Focus::Song | Focus::Artist => self.spawn_lookup(tx),
                Focus::File => self.spawn_upload(tx),
                Focus::History => {
                    if self.session.open_history(self.state.history_selected) {
                        self.state.chat_scroll = 0;
                    }
                }
            },
            Action::HistoryUp => {
                self.state.history_selected = self.state.history_selected.saturating_sub(1);
            }
            Action::HistoryDown => {
                self.state.history_selected += 1;
                self.state.clamp_history(self.session.history().len());
            }
            Action::ClearHistory => match self.session.clear_history() {
                Ok(()) => {
                    self.state.history_selected = 0;
                    self.state.toast = Some(Toast::success("History cleared"));
                }
                Err(e) => self.state.toast = Some(Toast::error(format!("{e:#}"))),
            },
            Action::ScrollUp => self.state.scroll_up(3),
            Action::ScrollDown => self.state.scroll_down(3),
            Action::ScrollBottom => self.state.chat_scroll = 0,
            Action::ToggleHelp => self.state.show_help = !self.state.show_help,
            Action::Logout => {
                let auth = Authenticator::new(&self.cfg.auth.accounts, self.session.store());
                match auth.logout() {
                    Ok(()) => {
                        self.state.logged_out = true;
                        self.state.should_quit = true;
                    }
                    Err(e) => self.state.toast = Some(Toast::error(format!("{e:#}"))),
                }
            }
            Action::Resize => {}
        }
    }

    fn handle_network(&mut self, ne: NetworkEvent) {
        match ne {
            NetworkEvent::LyricsLoaded { query, outcome } => {
                self.session.finish_lookup(&query, outcome);
            }
            NetworkEvent::UploadProcessed { reply } => {
                self.session.finish_upload(reply);
            }
        }
        self.state.chat_scroll = 0;
        self.state.clamp_history(self.session.history().len());
    }

    fn spawn_lookup(&mut self, tx: &mpsc::Sender<Event>) {
        if self.session.is_busy() {
            return;
        }
        let Some(query) = self
            .session
            .begin_lookup(&self.state.song_input, &self.state.artist_input)
        else {
            self.state.toast = Some(Toast::error("Enter both a song and an artist"));
            return;
        };

        self.state.song_input.clear();
        self.state.artist_input.clear();
        self.state.focus = Focus::Song;
        self.state.chat_scroll = 0;

        let client = self.lyrics.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let outcome = lyrics::lookup(&client, &query.song, &query.artist).await;
            let _ = tx
                .send(Event::Network(NetworkEvent::LyricsLoaded { query, outcome }))
                .await;
        });
    }

    fn spawn_upload(&mut self, tx: &mpsc::Sender<Event>) {
        let raw = self.state.file_input.trim().to_string();
        if raw.is_empty() {
            self.state.toast = Some(Toast::error("Type the path of an audio file"));
            return;
        }
        let path = PathBuf::from(&raw);
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or(raw);

        if !self.session.begin_upload(&file_name) {
            return;
        }
        self.state.file_input.clear();
        self.state.chat_scroll = 0;

        let client = self.lyrics.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let reply = match tokio::fs::read(&path).await {
                Ok(bytes) => {
                    let upload = Upload {
                        bytes,
                        media_type: None,
                        file_name: Some(file_name),
                    };
                    Some(pipeline::extract_lyrics(&client, upload).await)
                }
                Err(e) => {
                    tracing::warn!("error uploading file {}: {e}", path.display());
                    None
                }
            };
            let _ = tx
                .send(Event::Network(NetworkEvent::UploadProcessed { reply }))
                .await;
        });
    }
}

fn spawn_ticker(tx: mpsc::Sender<Event>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(120));
        loop {
            interval.tick().await;
            if tx.send(Event::Tick).await.is_err() {
                break;
            }
        }
    });
}
