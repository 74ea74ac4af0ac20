//! OS media session integration
//!
//! Best-effort: failures are logged by the tracker and never change playback.
//! Commands coming from the OS go through the same transitions as in-app
//! controls via [`crate::PlaybackTracker::handle_command`].

use crate::error::Result;
use crate::types::PlaybackState;
use holybeats_core::Track;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Publisher of now-playing information
pub trait MediaSession: Send {
    /// Current track metadata
    fn publish_track(&mut self, track: &Track) -> Result<()>;

    /// Current playback state
    fn publish_state(&mut self, state: PlaybackState) -> Result<()>;

    /// Position within a track whose duration is known
    fn publish_position(&mut self, elapsed: Duration, duration: Duration) -> Result<()>;

    /// Nothing is playing any more
    fn clear(&mut self) -> Result<()>;
}

/// Commands accepted from outside the app (media keys, lock screen, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaCommand {
    Play,
    Pause,
    Toggle,
    Next,
    Previous,
    Stop,
    SeekTo(Duration),
}
