use super::{
    ChatMessage, Conversation, LookupQuery, HISTORY_INTRO, IDENTIFIED_PREFIX, LOOKUP_FAILED_TEXT, NOT_FOUND_TEXT,
    UPLOAD_FAILED_TEXT, UPLOAD_FALLBACK_TEXT,
};
use crate::history::{History, HistoryEntry};
use crate::lyrics::{self, LookupOutcome, OvhClient};
use crate::pipeline::{self, ExtractReply, Upload};
use crate::storage::StateStore;

/// Owns the transcript and the history for one user.
///
/// Each action is split into `begin_*` (validate, echo the user message, mark
/// busy) and `finish_*` (append the bot reply, record history, clear busy), so
/// an event loop can run the network part elsewhere. The async helpers do
/// both halves in place.
pub struct Session {
    conversation: Conversation,
    history: History,
    store: Box<dyn StateStore>,
    loading: bool,
    uploading: bool,
}

impl Session {
    pub fn open(store: Box<dyn StateStore>) -> anyhow::Result<Self> {
        let history = History::load(store.as_ref())?;
        Ok(Self {
            conversation: Conversation::new(),
            history,
            store,
            loading: false,
            uploading: false,
        })
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.conversation.messages()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn store(&self) -> &dyn StateStore {
        self.store.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn is_busy(&self) -> bool {
        self.loading || self.uploading
    }

    /// Start a typed lookup. Returns `None`, touching nothing, when a field is
    /// blank or another request is in flight.
    pub fn begin_lookup(&mut self, song: &str, artist: &str) -> Option<LookupQuery> {
        if self.is_busy() {
            return None;
        }
        let query = LookupQuery::new(song, artist)?;
        self.conversation.push(ChatMessage::user(query.echo()));
        self.loading = true;
        Some(query)
    }

    pub fn finish_lookup(&mut self, query: &LookupQuery, outcome: LookupOutcome) {
        let reply = match outcome {
            LookupOutcome::Found(lyrics) => {
                self.record(HistoryEntry::new(&query.song, &query.artist, &lyrics));
                lyrics
            }
            LookupOutcome::NotFound => NOT_FOUND_TEXT.to_string(),
            LookupOutcome::TransportFailure(_) => LOOKUP_FAILED_TEXT.to_string(),
        };
        self.conversation.push(ChatMessage::bot(reply));
        self.loading = false;
    }

    /// Typed lookup, start to finish. Returns whether a request was made.
    pub async fn submit(&mut self, client: &OvhClient, song: &str, artist: &str) -> bool {
        let Some(query) = self.begin_lookup(song, artist) else {
            return false;
        };
        let outcome = lyrics::lookup(client, &query.song, &query.artist).await;
        self.finish_lookup(&query, outcome);
        true
    }

    pub fn begin_upload(&mut self, file_name: &str) -> bool {
        if self.is_busy() {
            return false;
        }
        self.conversation
            .push(ChatMessage::user(format!("📁 Uploaded audio: {file_name}")));
        self.uploading = true;
        true
    }

    /// `None` means the upload never reached the pipeline (e.g. the file could not be read).
    pub fn finish_upload(&mut self, reply: Option<ExtractReply>) {
        let text = match reply {
            Some(ExtractReply::Found {
                song,
                artist,
                lyrics,
            }) => {
                let text = format!("{IDENTIFIED_PREFIX}**{song}** by **{artist}**\n\n{lyrics}");
                self.record(HistoryEntry::new(song, artist, lyrics));
                text
            }
            Some(other) => other
                .error_text()
                .unwrap_or_else(|| UPLOAD_FALLBACK_TEXT.to_string()),
            None => UPLOAD_FAILED_TEXT.to_string(),
        };
        self.conversation.push(ChatMessage::bot(text));
        self.uploading = false;
    }

    /// Upload, start to finish. Returns whether the upload was accepted.
    pub async fn upload(&mut self, client: &OvhClient, file_name: &str, upload: Upload) -> bool {
        if !self.begin_upload(file_name) {
            return false;
        }
        let reply = pipeline::extract_lyrics(client, upload).await;
        self.finish_upload(Some(reply));
        true
    }

    /// Show a past lookup. Replaces the transcript instead of appending.
    pub fn open_history(&mut self, index: usize) -> bool {
        let Some(entry) = self.history.get(index) else {
            return false;
        };
        let messages = vec![
            ChatMessage::bot(HISTORY_INTRO),
            ChatMessage::user(format!("{} by {}", entry.song, entry.artist)),
            ChatMessage::bot(entry.lyrics.clone()),
        ];
        self.conversation.replace(messages);
        true
    }

    pub fn clear_history(&mut self) -> anyhow::Result<()> {
        self.history.clear();
        self.history.save(self.store.as_ref())
    }

    fn record(&mut self, entry: HistoryEntry) {
        self.history.upsert(entry);
        // A storage failure should not cost the user the answer on screen.
        if let Err(e) = self.history.save(self.store.as_ref()) {
            tracing::warn!("failed to persist history: {e:#}");
        }
    }
}
