//! `MusicService` implementation over HTTP.

use crate::client::HolyBeatsClient;
use async_trait::async_trait;
use holybeats_core::{
    Credentials, MusicService, Playlist, PlaylistId, Registration, Result, Track, TrackFilters,
    TrackId, TrackPage, TrackQuery,
};

#[async_trait]
impl MusicService for HolyBeatsClient {
    async fn is_authenticated(&self) -> bool {
        HolyBeatsClient::is_authenticated(self).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<()> {
        Ok(HolyBeatsClient::login(self, credentials).await?)
    }

    async fn register(&self, registration: &Registration) -> Result<()> {
        Ok(HolyBeatsClient::register(self, registration).await?)
    }

    async fn logout(&self) -> Result<()> {
        Ok(HolyBeatsClient::logout(self).await?)
    }

    async fn list_tracks(&self, query: &TrackQuery) -> Result<TrackPage> {
        Ok(self.tracks().await.client().list(query).await?)
    }

    async fn list_track_filters(&self) -> Result<TrackFilters> {
        Ok(self.tracks().await.client().filters().await?)
    }

    async fn list_favorites(&self) -> Result<Vec<Track>> {
        Ok(self.favorites().await.client().list().await?)
    }

    async fn add_favorite(&self, track_id: &TrackId) -> Result<()> {
        Ok(self.favorites().await.client().add(track_id).await?)
    }

    async fn remove_favorite(&self, track_id: &TrackId) -> Result<()> {
        Ok(self.favorites().await.client().remove(track_id).await?)
    }

    async fn list_playlists(&self) -> Result<Vec<Playlist>> {
        Ok(self.playlists().await.client().list().await?)
    }

    async fn create_playlist(&self, name: &str) -> Result<()> {
        Ok(self.playlists().await.client().create(name).await?)
    }

    async fn delete_playlist(&self, playlist_id: &PlaylistId) -> Result<()> {
        Ok(self.playlists().await.client().delete(playlist_id).await?)
    }

    async fn list_playlist_tracks(&self, playlist_id: &PlaylistId) -> Result<Vec<Track>> {
        Ok(self.playlists().await.client().tracks(playlist_id).await?)
    }

    async fn add_track_to_playlist(
        &self,
        playlist_id: &PlaylistId,
        track_id: &TrackId,
    ) -> Result<()> {
        Ok(self
            .playlists()
            .await
            .client()
            .add_track(playlist_id, track_id)
            .await?)
    }

    async fn remove_track_from_playlist(
        &self,
        playlist_id: &PlaylistId,
        track_id: &TrackId,
    ) -> Result<()> {
        Ok(self
            .playlists()
            .await
            .client()
            .remove_track(playlist_id, track_id)
            .await?)
    }
}
