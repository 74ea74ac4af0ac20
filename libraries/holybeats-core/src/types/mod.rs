mod account;
mod ids;
mod playlist;
mod query;
mod track;

pub use account::{Credentials, Registration};
pub use ids::{PlaylistId, TrackId};
pub use playlist::{validate_playlist_name, Playlist};
pub use query::{CollectionKey, TrackFilters, TrackPage, TrackQuery, DEFAULT_PAGE_SIZE};
pub use track::Track;
