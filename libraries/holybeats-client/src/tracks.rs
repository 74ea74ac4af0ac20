//! Track listing for the HolyBeats API.

use crate::client::authorize;
use crate::error::{ClientError, Result};
use holybeats_core::{TrackFilters, TrackPage, TrackQuery};
use reqwest::Client;
use tracing::debug;

/// Track catalogue client.
pub struct TrackClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: Option<&'a str>,
}

impl<'a> TrackClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, access_token: Option<&'a str>) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// Fetch one page of tracks, applying the query's filters.
    pub async fn list(&self, query: &TrackQuery) -> Result<TrackPage> {
        let url = format!("{}/api/tracks", self.base_url);

        let mut params = vec![
            ("page", query.page.to_string()),
            ("pageSize", query.page_size.to_string()),
        ];
        if let Some(genre) = &query.genre {
            params.push(("genre", genre.clone()));
        }
        if let Some(language) = &query.language {
            params.push(("language", language.clone()));
        }

        debug!(
            url = %url,
            page = query.page,
            page_size = query.page_size,
            genre = ?query.genre,
            language = ?query.language,
            "Fetching tracks"
        );

        let response = authorize(self.http.get(&url).query(&params), self.access_token)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            let page: TrackPage = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse track page: {}", e))
            })?;

            debug!(
                items = page.items.len(),
                has_more = page.has_more,
                total = ?page.total_count,
                "Fetched tracks"
            );

            Ok(page)
        } else {
            Err(ClientError::from_response(response).await)
        }
    }

    /// Fetch the genres and languages available for filtering.
    pub async fn filters(&self) -> Result<TrackFilters> {
        let url = format!("{}/api/tracks/filters", self.base_url);
        debug!(url = %url, "Fetching track filters");

        let response = authorize(self.http.get(&url), self.access_token)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse track filters: {}", e))
            })
        } else {
            Err(ClientError::from_response(response).await)
        }
    }
}
