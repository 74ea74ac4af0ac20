/// Core traits for HolyBeats
use crate::error::Result;
use crate::types::{
    Credentials, Playlist, PlaylistId, Registration, Track, TrackFilters, TrackId, TrackPage,
    TrackQuery,
};
use async_trait::async_trait;

/// The remote music API as consumed by the screens
///
/// Implementations are expected to be correct and are treated as an opaque
/// boundary. Calls made without a credential are still sent; gated endpoints
/// answer with [`crate::HolyBeatsError::Unauthorized`].
#[async_trait]
pub trait MusicService: Send + Sync {
    // === Authentication ===

    /// Whether a bearer credential is currently held
    async fn is_authenticated(&self) -> bool;

    /// Sign in and keep the returned credential
    async fn login(&self, credentials: &Credentials) -> Result<()>;

    /// Create an account, then sign in with the same credentials
    async fn register(&self, registration: &Registration) -> Result<()>;

    /// Drop the credential from memory and durable storage
    async fn logout(&self) -> Result<()>;

    // === Tracks ===

    /// One page of all tracks, optionally filtered
    async fn list_tracks(&self, query: &TrackQuery) -> Result<TrackPage>;

    /// Genres and languages available for filtering
    async fn list_track_filters(&self) -> Result<TrackFilters>;

    // === Favorites ===

    async fn list_favorites(&self) -> Result<Vec<Track>>;

    async fn add_favorite(&self, track_id: &TrackId) -> Result<()>;

    async fn remove_favorite(&self, track_id: &TrackId) -> Result<()>;

    // === Playlists ===

    async fn list_playlists(&self) -> Result<Vec<Playlist>>;

    /// Create a playlist; the name must already be validated
    async fn create_playlist(&self, name: &str) -> Result<()>;

    async fn delete_playlist(&self, playlist_id: &PlaylistId) -> Result<()>;

    async fn list_playlist_tracks(&self, playlist_id: &PlaylistId) -> Result<Vec<Track>>;

    async fn add_track_to_playlist(
        &self,
        playlist_id: &PlaylistId,
        track_id: &TrackId,
    ) -> Result<()>;

    async fn remove_track_from_playlist(
        &self,
        playlist_id: &PlaylistId,
        track_id: &TrackId,
    ) -> Result<()>;
}
