//! Chat transcript types and the session that owns transcript + history.

pub mod session;

pub use session::Session;

use serde::{Deserialize, Serialize};

pub const GREETING: &str =
    "Hello! I am your Lyrix Bot. Tell me a song and artist, and I'll find the lyrics for you! 🎶";
pub const NOT_FOUND_TEXT: &str = "Sorry, I couldn't find lyrics for that song. 😿";
pub const LOOKUP_FAILED_TEXT: &str = "Oops! Something went wrong. Please try again. 💔";
pub const UPLOAD_FALLBACK_TEXT: &str = "Sorry, I couldn't extract lyrics from this file. 😿";
pub const UPLOAD_FAILED_TEXT: &str = "Oops! Something went wrong during upload. 💔";
pub const HISTORY_INTRO: &str = "Here are the lyrics you looked up before! 🎵";
/// First line of the reply to an identified upload; the only text with `**bold**` markup.
pub const IDENTIFIED_PREFIX: &str = "✨ Identified: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            content: content.into(),
        }
    }
}

/// Song/artist typed by the user. Both fields are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupQuery {
    pub song: String,
    pub artist: String,
}

impl LookupQuery {
    /// `None` when either field is blank.
    pub fn new(song: &str, artist: &str) -> Option<Self> {
        let song = song.trim();
        let artist = artist.trim();
        if song.is_empty() || artist.is_empty() {
            return None;
        }
        Some(Self {
            song: song.to_string(),
            artist: artist.to_string(),
        })
    }

    /// How the query appears in the transcript.
    pub fn echo(&self) -> String {
        format!("{} by {}", self.song, self.artist)
    }
}

/// Ordered transcript. Append-only, except for a wholesale replace.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::bot(GREETING)],
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn replace(&mut self, messages: Vec<ChatMessage>) {
        self.messages = messages;
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_requires_both_fields() {
        assert!(LookupQuery::new("", "The Beatles").is_none());
        assert!(LookupQuery::new("Yesterday", "").is_none());
        assert!(LookupQuery::new("  ", "The Beatles").is_none());

        let q = LookupQuery::new(" Yesterday ", "The Beatles").unwrap();
        assert_eq!(q.echo(), "Yesterday by The Beatles");
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let raw = serde_json::to_string(&ChatMessage::bot("hi")).unwrap();
        assert_eq!(raw, r#"{"role":"bot","content":"hi"}"#);
    }

    #[test]
    fn test_conversation_starts_with_greeting() {
        let c = Conversation::new();
        assert_eq!(c.messages(), &[ChatMessage::bot(GREETING)]);
    }
}
