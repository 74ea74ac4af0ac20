//! Core types for playback tracking

use holybeats_core::Track;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No current track
    Idle,

    /// Current track set, media duration not yet known
    Loading,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

/// Navigation direction within the active collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    /// Signed index offset
    pub fn offset(self) -> isize {
        match self {
            Direction::Next => 1,
            Direction::Previous => -1,
        }
    }

    /// Wrapped step from `index` in a collection of `len` tracks
    ///
    /// Returns `None` for an empty collection.
    pub fn step(self, index: usize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let len = len as isize;
        let index = (index as isize).rem_euclid(len);
        Some((index + self.offset()).rem_euclid(len) as usize)
    }
}

/// Why playback went back to idle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// Explicit close/stop
    Closed,
    /// The current track left its active collection
    TrackRemoved,
    /// Navigation over an empty collection
    CollectionEmpty,
}

/// Rendered view of the playback position
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSnapshot {
    pub state: PlaybackState,
    pub track: Option<Track>,
    /// Elapsed time, never beyond `duration`
    pub elapsed: Duration,
    /// Zero until the media backend reports it
    pub duration: Duration,
}

impl PlaybackSnapshot {
    /// Fraction of the track played, 0.0 when the duration is unknown
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 0.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0) as f32
    }
}

/// Configuration for the playback tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Minimum horizontal travel for a swipe to change track (default: 80px)
    pub swipe_threshold_px: f32,

    /// Media sessions only get a position once the duration exceeds this (default: 1s)
    pub min_session_duration: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            swipe_threshold_px: 80.0,
            min_session_duration: Duration::from_secs(1),
        }
    }
}
