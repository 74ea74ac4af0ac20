//! Favorites for the HolyBeats API.

use crate::client::authorize;
use crate::error::{ClientError, Result};
use holybeats_core::{Track, TrackId};
use reqwest::Client;
use tracing::debug;

/// Favorites client.
pub struct FavoritesClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: Option<&'a str>,
}

impl<'a> FavoritesClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, access_token: Option<&'a str>) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// List the signed-in user's favorite tracks.
    pub async fn list(&self) -> Result<Vec<Track>> {
        let url = format!("{}/api/favorites", self.base_url);
        debug!(url = %url, "Fetching favorites");

        let response = authorize(self.http.get(&url), self.access_token)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            let tracks: Vec<Track> = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse favorites: {}", e))
            })?;
            debug!(count = tracks.len(), "Fetched favorites");
            Ok(tracks)
        } else {
            Err(ClientError::from_response(response).await)
        }
    }

    /// Mark a track as favorite.
    pub async fn add(&self, track_id: &TrackId) -> Result<()> {
        let url = format!("{}/api/favorites/{}", self.base_url, track_id);
        debug!(url = %url, track_id = %track_id, "Adding favorite");

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

    /// Remove a track from favorites.
    pub async fn remove(&self, track_id: &TrackId) -> Result<()> {
        let url = format!("{}/api/favorites/{}", self.base_url, track_id);
        debug!(url = %url, track_id = %track_id, "Removing favorite");

        let response = authorize(self.http.delete(&url), self.access_token)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else if status.as_u16() == 404 {
            // Already gone, that's fine
            Ok(())
        } else {
            Err(ClientError::from_response(response).await)
        }
    }
}
