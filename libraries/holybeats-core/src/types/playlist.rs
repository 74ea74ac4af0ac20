/// Playlist domain type
use crate::error::{HolyBeatsError, Result};
use crate::types::PlaylistId;
use serde::{Deserialize, Serialize};

/// A named, user-owned grouping of tracks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Playlist name
    pub name: String,
}

impl Playlist {
    pub fn new(id: PlaylistId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Trim a playlist name and reject it when nothing is left
pub fn validate_playlist_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(HolyBeatsError::validation("Playlist name cannot be empty"));
    }
    Ok(trimmed.to_string())
}
