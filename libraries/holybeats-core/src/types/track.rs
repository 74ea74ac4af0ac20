/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Serialize};

/// A playable audio item as served by the API
///
/// Tracks are immutable from the client's point of view; the client only
/// associates them with playlists and favorites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Display title (may be long)
    pub title: String,

    /// Playable media locator
    pub url: String,

    /// Genre, used for filtering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,

    /// Language, used for filtering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Duration reported by the catalogue, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
}

impl Track {
    /// Create a track with no descriptive metadata
    pub fn new(id: TrackId, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            url: url.into(),
            genre: None,
            language: None,
            duration_seconds: None,
        }
    }

    /// Title shortened to at most `max_chars` characters, ending in an ellipsis
    /// when truncated. The stored title is left untouched.
    pub fn display_title(&self, max_chars: usize) -> String {
        if self.title.chars().count() <= max_chars {
            return self.title.clone();
        }
        if max_chars == 0 {
            return String::new();
        }
        let mut shortened: String = self.title.chars().take(max_chars - 1).collect();
        shortened.push('…');
        shortened
    }
}
