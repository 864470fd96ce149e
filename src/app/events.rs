use crate::chat::LookupQuery;
use crate::lyrics::LookupOutcome;
use crate::pipeline::ExtractReply;

#[derive(Debug, Clone)]
pub enum Event {
    Input(InputEvent),
    Network(NetworkEvent),
    Tick,
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Resize,
}

#[derive(Debug, Clone)]
pub enum NetworkEvent {
    LyricsLoaded {
        query: LookupQuery,
        outcome: LookupOutcome,
    },
    /// `reply` is `None` when the file could not be read.
    UploadProcessed { reply: Option<ExtractReply> },
}
