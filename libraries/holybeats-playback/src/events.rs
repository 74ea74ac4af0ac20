//! Playback Events
//!
//! Two streams cross the tracker boundary:
//! - [`MediaEvent`]: pushed by the media backend, at irregular intervals
//! - [`PlaybackEvent`]: emitted by the tracker for UI synchronization

use crate::types::{PlaybackState, StopReason};
use holybeats_core::TrackId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Notifications from the media backend
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Media metadata is available; the duration is now trustworthy
    MetadataLoaded { duration: Duration },

    /// Periodic time update
    TimeUpdate {
        position: Duration,
        /// Some backends report the duration alongside the position
        duration: Option<Duration>,
    },

    /// Natural end of the track
    Ended,

    /// Output started (possibly by something other than the tracker)
    Play,

    /// Output paused (possibly by something other than the tracker)
    Pause,
}

impl MediaEvent {
    /// Build a time update from raw seconds as reported by media elements
    ///
    /// Non-finite or non-positive durations are treated as unknown.
    pub fn time_update_secs(position: f64, duration: f64) -> Self {
        Self::TimeUpdate {
            position: secs_to_duration(position).unwrap_or(Duration::ZERO),
            duration: secs_to_duration(duration).filter(|d| !d.is_zero()),
        }
    }
}

/// Convert reported seconds, rejecting NaN, infinity, negatives and overflow
pub(crate) fn secs_to_duration(secs: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(secs).ok()
}

/// Events emitted by the tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playback state changed
    StateChanged { state: PlaybackState },

    /// A different track became current
    TrackChanged {
        track_id: TrackId,
        previous_track_id: Option<TrackId>,
    },

    /// Position update, elapsed already clamped to the duration
    PositionUpdate { elapsed_ms: u64, duration_ms: u64 },

    /// Playback returned to idle
    Stopped { reason: StopReason },

    /// Media backend failure
    Error { message: String },
}
