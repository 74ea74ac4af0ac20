//! Error types for playback tracking

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No track is current
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Media backend failed to carry out a command
    #[error("Media backend error: {0}")]
    Backend(String),

    /// Media session integration failed
    #[error("Media session error: {0}")]
    MediaSession(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
