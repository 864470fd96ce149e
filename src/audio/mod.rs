//! Song identification from embedded audio tags, using Lofty.

use anyhow::Context;
use lofty::file::{FileType, TaggedFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::Accessor;
use std::io::Cursor;
use std::path::Path;

/// Title and artist read from a file's tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackTags {
    pub title: String,
    pub artist: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Both title and artist were present.
    Identified(TrackTags),
    /// The container parsed, but title or artist is missing.
    NeedsManualEntry,
    /// The bytes are not an audio container Lofty understands.
    Unreadable(String),
}

/// Identify a song from an in-memory upload.
///
/// `media_type` is the declared MIME type and `file_name` the client-side name;
/// both only steer container detection. Parsing is synchronous, so async
/// callers should run this on the blocking pool.
pub fn extract(bytes: &[u8], media_type: Option<&str>, file_name: Option<&str>) -> Extraction {
    let hint = media_type
        .and_then(file_type_for_media)
        .or_else(|| file_name.and_then(file_type_for_name));

    let tagged = match read_tagged(bytes, hint) {
        Ok(t) => t,
        Err(e) => {
            tracing::info!(bytes = bytes.len(), "unreadable audio: {e:#}");
            return Extraction::Unreadable(format!("{e:#}"));
        }
    };

    match track_tags(&tagged) {
        Some(tags) => {
            tracing::debug!(title = %tags.title, artist = %tags.artist, "identified upload");
            Extraction::Identified(tags)
        }
        None => Extraction::NeedsManualEntry,
    }
}

fn read_tagged(bytes: &[u8], hint: Option<FileType>) -> anyhow::Result<TaggedFile> {
    // A wrong declared type falls through to sniffing.
    if let Some(file_type) = hint {
        match Probe::new(Cursor::new(bytes)).set_file_type(file_type).read() {
            Ok(tagged) => return Ok(tagged),
            Err(e) => tracing::debug!(?file_type, "declared type did not parse: {e}"),
        }
    }

    let tagged = Probe::new(Cursor::new(bytes))
        .guess_file_type()
        .context("sniff audio container")?
        .read()
        .context("parse audio")?;
    Ok(tagged)
}

/// First non-blank title and artist, primary tag first.
fn track_tags(tagged: &TaggedFile) -> Option<TrackTags> {
    let mut title = None;
    let mut artist = None;

    for tag in tagged.primary_tag().into_iter().chain(tagged.tags()) {
        if title.is_none() {
            title = tag.title().map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
        }
        if artist.is_none() {
            artist = tag.artist().map(|a| a.trim().to_string()).filter(|a| !a.is_empty());
        }
    }

    Some(TrackTags {
        title: title?,
        artist: artist?,
    })
}

pub fn file_type_for_media(media_type: &str) -> Option<FileType> {
    let essence = media_type.split(';').next()?.trim().to_ascii_lowercase();
    let file_type = match essence.as_str() {
        "audio/mpeg" | "audio/mp3" | "audio/mpeg3" => FileType::Mpeg,
        "audio/flac" | "audio/x-flac" => FileType::Flac,
        "audio/ogg" | "audio/vorbis" => FileType::Vorbis,
        "audio/opus" => FileType::Opus,
        "audio/wav" | "audio/x-wav" | "audio/wave" | "audio/vnd.wave" => FileType::Wav,
        "audio/mp4" | "audio/x-m4a" | "audio/m4a" => FileType::Mp4,
        "audio/aac" => FileType::Aac,
        "audio/aiff" | "audio/x-aiff" => FileType::Aiff,
        _ => return None,
    };
    Some(file_type)
}

pub fn file_type_for_name(file_name: &str) -> Option<FileType> {
    Path::new(file_name)
        .extension()
        .and_then(FileType::from_ext)
}
