//! HolyBeats - Playback Tracking
//!
//! Platform-agnostic playback state for HolyBeats.
//!
//! This crate provides:
//! - A single current track and the collection it was selected from
//! - Loading/Playing/Paused/Idle transitions driven by media notifications
//! - Wrapping next/previous navigation
//! - Clamped seeking and position snapshots for rendering
//! - Reconciliation with re-fetched collections
//! - OS media session publishing (optional `media-controls` feature)
//!
//! # Architecture
//!
//! The actual stream lives behind [`MediaBackend`]. The tracker issues
//! commands to it and learns what happened through [`MediaEvent`]s, which
//! may arrive at any time and in any order relative to user commands.
//!
//! # Example
//!
//! ```rust
//! use holybeats_core::{CollectionKey, Track, TrackId};
//! use holybeats_playback::{
//!     MediaEvent, NullBackend, PlaybackConfig, PlaybackState, PlaybackTracker,
//! };
//! use std::time::Duration;
//!
//! let tracks = vec![
//!     Track::new(TrackId::from(1), "Amazing Grace", "https://cdn.example/1.mp3"),
//!     Track::new(TrackId::from(2), "Oceans", "https://cdn.example/2.mp3"),
//! ];
//!
//! let mut tracker = PlaybackTracker::new(Box::new(NullBackend), PlaybackConfig::default());
//! tracker
//!     .select_track(tracks[1].clone(), CollectionKey::Library, tracks)
//!     .unwrap();
//! assert_eq!(tracker.state(), PlaybackState::Loading);
//!
//! tracker
//!     .handle_media_event(MediaEvent::MetadataLoaded {
//!         duration: Duration::from_secs(240),
//!     })
//!     .unwrap();
//! assert_eq!(tracker.state(), PlaybackState::Playing);
//!
//! // Wraps back to the first track
//! tracker.next().unwrap();
//! assert_eq!(tracker.current_track().unwrap().title, "Amazing Grace");
//! ```

pub mod backend;
pub mod error;
pub mod events;
pub mod gesture;
pub mod reconcile;
pub mod session;
pub mod tracker;
pub mod types;

#[cfg(feature = "media-controls")]
pub mod media_controls;

pub use backend::{MediaBackend, NullBackend};
pub use error::{PlaybackError, Result};
pub use events::{MediaEvent, PlaybackEvent};
pub use gesture::SwipeGesture;
pub use reconcile::Reconciliation;
pub use session::{MediaCommand, MediaSession};
pub use tracker::PlaybackTracker;
pub use types::{Direction, PlaybackConfig, PlaybackSnapshot, PlaybackState, StopReason};

#[cfg(feature = "media-controls")]
pub use media_controls::OsMediaControls;
