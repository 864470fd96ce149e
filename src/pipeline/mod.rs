//! Upload pipeline: audio tags -> lyrics lookup -> reply.
//!
//! The reply mirrors the `/api/extract-lyrics` JSON contract so the HTTP
//! server and the terminal client read the same outcomes.

use crate::audio::{self, Extraction};
use crate::lyrics::{self, LookupOutcome, OvhClient};
use serde_json::json;

pub const MANUAL_ENTRY_TEXT: &str =
    "Could not extract metadata from audio file. Please enter the song and artist manually. 🌸";
pub const NO_FILE_TEXT: &str = "No file uploaded";
pub const FAILED_TEXT: &str = "Failed to process audio file. 💔";

/// An uploaded audio file.
#[derive(Debug, Clone)]
pub struct Upload {
    pub bytes: Vec<u8>,
    pub media_type: Option<String>,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractReply {
    /// Tags lacked a title or artist.
    NeedsManualEntry,
    Found {
        song: String,
        artist: String,
        lyrics: String,
    },
    /// Tags resolved, but the lyrics service had nothing.
    LyricsMissing { song: String, artist: String },
    NoFile,
    /// Unreadable audio or a failed lyrics request.
    Failed,
}

impl ExtractReply {
    pub fn error_text(&self) -> Option<String> {
        match self {
            ExtractReply::NeedsManualEntry => Some(MANUAL_ENTRY_TEXT.to_string()),
            ExtractReply::Found { .. } => None,
            ExtractReply::LyricsMissing { song, artist } => Some(format!(
                "Found song details ({song} by {artist}), but couldn't find the lyrics. 😿"
            )),
            ExtractReply::NoFile => Some(NO_FILE_TEXT.to_string()),
            ExtractReply::Failed => Some(FAILED_TEXT.to_string()),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ExtractReply::NeedsManualEntry => json!({
                "error": MANUAL_ENTRY_TEXT,
                "needsManualEntry": true,
            }),
            ExtractReply::Found { song, artist, lyrics } => json!({
                "success": true,
                "song": song,
                "artist": artist,
                "lyrics": lyrics,
            }),
            ExtractReply::LyricsMissing { song, artist } => json!({
                "success": false,
                "song": song,
                "artist": artist,
                "error": self.error_text(),
            }),
            ExtractReply::NoFile | ExtractReply::Failed => json!({ "error": self.error_text() }),
        }
    }
}

/// Identify an upload and fetch its lyrics. Never fails; every problem is a reply.
pub async fn extract_lyrics(client: &OvhClient, upload: Upload) -> ExtractReply {
    let Upload {
        bytes,
        media_type,
        file_name,
    } = upload;
    tracing::info!(bytes = bytes.len(), ?media_type, ?file_name, "processing upload");

    let extraction = tokio::task::spawn_blocking(move || {
        audio::extract(&bytes, media_type.as_deref(), file_name.as_deref())
    })
    .await;

    let tags = match extraction {
        Ok(Extraction::Identified(tags)) => tags,
        Ok(Extraction::NeedsManualEntry) => return ExtractReply::NeedsManualEntry,
        Ok(Extraction::Unreadable(reason)) => {
            tracing::warn!("error processing audio: {reason}");
            return ExtractReply::Failed;
        }
        Err(e) => {
            tracing::error!("audio parse task failed: {e}");
            return ExtractReply::Failed;
        }
    };

    match lyrics::lookup(client, &tags.title, &tags.artist).await {
        LookupOutcome::Found(lyrics) => ExtractReply::Found {
            song: tags.title,
            artist: tags.artist,
            lyrics,
        },
        LookupOutcome::NotFound => ExtractReply::LyricsMissing {
            song: tags.title,
            artist: tags.artist,
        },
        LookupOutcome::TransportFailure(_) => ExtractReply::Failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{self, wav_with_info};

    fn beatles_upload() -> Upload {
        Upload {
            bytes: wav_with_info(&[(*b"INAM", "Yesterday"), (*b"IART", "The Beatles")]),
            media_type: Some("audio/wav".to_string()),
            file_name: Some("yesterday.wav".to_string()),
        }
    }

    #[tokio::test]
    async fn test_found() {
        let base = test_support::lyrics_found("All my troubles").await;
        let client = test_support::client_for(&base);

        let reply = extract_lyrics(&client, beatles_upload()).await;
        assert_eq!(
            reply,
            ExtractReply::Found {
                song: "Yesterday".to_string(),
                artist: "The Beatles".to_string(),
                lyrics: "All my troubles".to_string(),
            }
        );
        assert_eq!(reply.error_text(), None);
    }

    #[tokio::test]
    async fn test_lyrics_missing_names_the_song() {
        let base = test_support::lyrics_stub(serde_json::json!({})).await;
        let client = test_support::client_for(&base);

        let reply = extract_lyrics(&client, beatles_upload()).await;
        assert!(matches!(reply, ExtractReply::LyricsMissing { .. }));
        assert_eq!(
            reply.error_text().unwrap(),
            "Found song details (Yesterday by The Beatles), but couldn't find the lyrics. 😿"
        );
    }

    #[tokio::test]
    async fn test_incomplete_tags_skip_lookup() {
        // Nothing listens here, so reaching the network would turn this into Failed.
        let client = test_support::client_for(&test_support::dead_url().await);
        let upload = Upload {
            bytes: wav_with_info(&[(*b"INAM", "Yesterday")]),
            media_type: None,
            file_name: None,
        };

        assert_eq!(extract_lyrics(&client, upload).await, ExtractReply::NeedsManualEntry);
    }

    #[tokio::test]
    async fn test_unreadable_upload_fails() {
        let client = test_support::client_for(&test_support::dead_url().await);
        let upload = Upload {
            bytes: b"not audio".to_vec(),
            media_type: None,
            file_name: None,
        };

        assert_eq!(extract_lyrics(&client, upload).await, ExtractReply::Failed);
    }

    #[tokio::test]
    async fn test_transport_failure_fails() {
        let client = test_support::client_for(&test_support::dead_url().await);

        assert_eq!(extract_lyrics(&client, beatles_upload()).await, ExtractReply::Failed);
    }

    #[test]
    fn test_json_shapes() {
        let manual = ExtractReply::NeedsManualEntry.to_json();
        assert_eq!(manual["needsManualEntry"], true);
        assert_eq!(manual["error"], MANUAL_ENTRY_TEXT);

        let found = ExtractReply::Found {
            song: "S".to_string(),
            artist: "A".to_string(),
            lyrics: "L".to_string(),
        }
        .to_json();
        assert_eq!(
            found,
            json!({ "success": true, "song": "S", "artist": "A", "lyrics": "L" })
        );

        let missing = ExtractReply::LyricsMissing {
            song: "S".to_string(),
            artist: "A".to_string(),
        }
        .to_json();
        assert_eq!(missing["success"], false);
        assert_eq!(missing["song"], "S");
        assert!(missing.get("lyrics").is_none());

        assert_eq!(ExtractReply::NoFile.to_json(), json!({ "error": "No file uploaded" }));
        assert_eq!(ExtractReply::Failed.to_json(), json!({ "error": FAILED_TEXT }));
    }
}
