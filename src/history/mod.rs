//! Lookup history: deduplicated, most-recent-first, persisted as one JSON value.

use crate::storage::{HISTORY_KEY, StateStore};
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// A resolved lookup. Identity is the case-insensitive (song, artist) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub song: String,
    pub artist: String,
    pub lyrics: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl HistoryEntry {
    pub fn new(song: impl Into<String>, artist: impl Into<String>, lyrics: impl Into<String>) -> Self {
        Self {
            song: song.into(),
            artist: artist.into(),
            lyrics: lyrics.into(),
            timestamp: now_millis(),
        }
    }

    /// Same song, ignoring case on both fields.
    pub fn same_key(&self, song: &str, artist: &str) -> bool {
        self.song.to_lowercase() == song.to_lowercase()
            && self.artist.to_lowercase() == artist.to_lowercase()
    }
}

#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the stored list. A corrupt value is logged and treated as empty.
    pub fn load(store: &dyn StateStore) -> anyhow::Result<Self> {
        let Some(raw) = store.get(HISTORY_KEY).context("load history")? else {
            return Ok(Self::new());
        };

        match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
            Ok(entries) => Ok(Self { entries }),
            Err(e) => {
                tracing::warn!("discarding unreadable history: {e}");
                Ok(Self::new())
            }
        }
    }

    /// Write the whole list back in one step.
    pub fn save(&self, store: &dyn StateStore) -> anyhow::Result<()> {
        let raw = serde_json::to_string(&self.entries).context("serialize history")?;
        store.set(HISTORY_KEY, &raw).context("save history")
    }

    /// Insert at the front, dropping any earlier entry with the same key.
    pub fn upsert(&mut self, entry: HistoryEntry) {
        self.entries.retain(|h| !h.same_key(&entry.song, &entry.artist));
        self.entries.insert(0, entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn now_millis() -> i64 {
    (time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn entry(song: &str, artist: &str) -> HistoryEntry {
        HistoryEntry::new(song, artist, format!("lyrics of {song}"))
    }

    fn keys(history: &History) -> Vec<&str> {
        history.entries().iter().map(|h| h.song.as_str()).collect()
    }

    #[test]
    fn test_newest_first() {
        let mut history = History::new();
        history.upsert(entry("K1", "A"));
        history.upsert(entry("K2", "A"));
        assert_eq!(keys(&history), vec!["K2", "K1"]);

        history.upsert(entry("K1", "A"));
        assert_eq!(keys(&history), vec!["K1", "K2"]);
    }

    #[test]
    fn test_duplicate_key_kept_once() {
        let mut history = History::new();
        history.upsert(entry("Yesterday", "The Beatles"));
        history.upsert(entry("Help!", "The Beatles"));
        history.upsert(entry("YESTERDAY", "the beatles"));
        history.upsert(entry("yesterday", "The Beatles"));

        let matches = history
            .entries()
            .iter()
            .filter(|h| h.same_key("Yesterday", "The Beatles"))
            .count();
        assert_eq!(matches, 1);
        assert_eq!(history.len(), 2);
        // Casing of the latest lookup wins.
        assert_eq!(history.entries()[0].song, "yesterday");
    }

    #[test]
    fn test_same_song_other_artist_is_distinct() {
        let mut history = History::new();
        history.upsert(entry("Hallelujah", "Leonard Cohen"));
        history.upsert(entry("Hallelujah", "Jeff Buckley"));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_save_and_load() {
        let store = MemoryStore::new();
        let mut history = History::new();
        history.upsert(entry("K1", "A"));
        history.upsert(entry("K2", "B"));
        history.save(&store).unwrap();

        let loaded = History::load(&store).unwrap();
        assert_eq!(loaded.entries(), history.entries());
    }

    #[test]
    fn test_stored_shape() {
        let store = MemoryStore::new();
        let mut history = History::new();
        history.upsert(HistoryEntry {
            song: "Yesterday".to_string(),
            artist: "The Beatles".to_string(),
            lyrics: "...".to_string(),
            timestamp: 1_700_000_000_000,
        });
        history.save(&store).unwrap();

        let raw = store.get(HISTORY_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "song": "Yesterday",
                "artist": "The Beatles",
                "lyrics": "...",
                "timestamp": 1_700_000_000_000i64
            }])
        );
    }

    #[test]
    fn test_corrupt_value_loads_empty() {
        let store = MemoryStore::new();
        store.set(HISTORY_KEY, "{not json").unwrap();

        assert!(History::load(&store).unwrap().is_empty());
    }
}
