//! HolyBeats Core
//!
//! Platform-agnostic domain types, validation, and the service trait shared by
//! the HTTP client, the playback tracker and the screen controllers.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Playlist`, `TrackQuery`, `TrackPage`, ...
//! - **Service Trait**: `MusicService`, the remote API as seen by the screens
//! - **Error Handling**: Unified `HolyBeatsError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use holybeats_core::types::{Track, TrackId, TrackQuery};
//!
//! let track = Track::new(TrackId::new("7"), "Amazing Grace", "https://cdn.example.com/7.mp3");
//! assert_eq!(track.id.as_str(), "7");
//!
//! let query = TrackQuery::first_page(20).with_genre("rock");
//! assert_eq!(query.page, 1);
//! assert_eq!(query.genre.as_deref(), Some("rock"));
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{HolyBeatsError, Result};
pub use traits::MusicService;
pub use types::{
    validate_playlist_name, CollectionKey, Credentials, Playlist, PlaylistId, Registration,
    Track, TrackFilters, TrackId, TrackPage, TrackQuery, DEFAULT_PAGE_SIZE,
};
