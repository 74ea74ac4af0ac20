//! Playlist operations for the HolyBeats API.

use crate::client::authorize;
use crate::error::{ClientError, Result};
use holybeats_core::{Playlist, PlaylistId, Track, TrackId};
use reqwest::Client;
use tracing::debug;

/// Playlist client.
pub struct PlaylistClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: Option<&'a str>,
}

impl<'a> PlaylistClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, access_token: Option<&'a str>) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// List the signed-in user's playlists.
    pub async fn list(&self) -> Result<Vec<Playlist>> {
        let url = format!("{}/api/playlists", self.base_url);
        debug!(url = %url, "Fetching playlists");

        let response = authorize(self.http.get(&url), self.access_token)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            let playlists: Vec<Playlist> = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse playlists: {}", e))
            })?;
            debug!(count = playlists.len(), "Fetched playlists");
            Ok(playlists)
        } else {
            Err(ClientError::from_response(response).await)
        }
    }

    /// Create a playlist. The API takes the bare name as a JSON string.
    pub async fn create(&self, name: &str) -> Result<()> {
        let url = format!("{}/api/playlists", self.base_url);
        debug!(url = %url, name = %name, "Creating playlist");

        let response = authorize(self.http.post(&url).json(name), self.access_token)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ClientError::from_response(response).await)
        }
    }

    /// Delete a playlist.
    pub async fn delete(&self, playlist_id: &PlaylistId) -> Result<()> {
        let url = format!("{}/api/playlists/{}", self.base_url, playlist_id);
        debug!(url = %url, playlist_id = %playlist_id, "Deleting playlist");

        let response = authorize(self.http.delete(&url), self.access_token)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else if status.as_u16() == 404 {
            // Already deleted, that's fine
            Ok(())
        } else {
            Err(ClientError::from_response(response).await)
        }
    }

    /// List the tracks of one playlist, in playlist order.
    pub async fn tracks(&self, playlist_id: &PlaylistId) -> Result<Vec<Track>> {
        let url = format!("{}/api/playlists/{}/tracks", self.base_url, playlist_id);
        debug!(url = %url, playlist_id = %playlist_id, "Fetching playlist tracks");

        let response = authorize(self.http.get(&url), self.access_token)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse playlist tracks: {}", e))
            })
        } else {
            Err(ClientError::from_response(response).await)
        }
    }

    /// Append a track to a playlist.
    pub async fn add_track(&self, playlist_id: &PlaylistId, track_id: &TrackId) -> Result<()> {
        let url = format!(
            "{}/api/playlists/{}/tracks/{}",
            self.base_url, playlist_id, track_id
        );
        debug!(url = %url, playlist_id = %playlist_id, track_id = %track_id, "Adding track to playlist");

        let response = authorize(self.http.post(&url), self.access_token)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ClientError::from_response(response).await)
        }
    }

    /// Remove a track from a playlist.
    pub async fn remove_track(&self, playlist_id: &PlaylistId, track_id: &TrackId) -> Result<()> {
        let url = format!(
            "{}/api/playlists/{}/tracks/{}",
            self.base_url, playlist_id, track_id
        );
        debug!(url = %url, playlist_id = %playlist_id, track_id = %track_id, "Removing track from playlist");

        let response = authorize(self.http.delete(&url), self.access_token)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let status = response.status();
        if status.is_success() || status.as_u16() == 404 {
            Ok(())
        } else {
            Err(ClientError::from_response(response).await)
        }
    }
}
