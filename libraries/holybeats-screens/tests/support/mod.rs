//! In-memory music service for screen tests
//!
//! Mirrors the remote API closely enough for the screens: gated endpoints
//! answer `Unauthorized` without a token, deletes of missing entities are
//! `NotFound`, and track listings can be delayed per genre to force
//! responses out of order (use with paused tokio time).

#![allow(dead_code)]

use async_trait::async_trait;
use holybeats_core::{
    Credentials, HolyBeatsError, MusicService, Playlist, PlaylistId, Registration, Result, Track,
    TrackFilters, TrackId, TrackPage, TrackQuery,
};
use holybeats_playback::{NullBackend, PlaybackConfig, PlaybackTracker};
use holybeats_screens::SharedPlayer;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const EMAIL: &str = "listener@holybeats.test";
pub const PASSWORD: &str = "hallelujah";

/// Delay key for track listings without a genre filter
pub const UNFILTERED: &str = "*";

#[derive(Default)]
struct FakeState {
    token: Option<String>,
    accounts: HashMap<String, String>,
    tracks: Vec<Track>,
    favorites: Vec<TrackId>,
    playlists: Vec<(Playlist, Vec<TrackId>)>,
    next_playlist_id: i64,
    genre_delays: HashMap<String, Duration>,
    playlist_delays: HashMap<PlaylistId, Duration>,
    removal_delay: Option<Duration>,
    calls: Vec<String>,
}

pub struct FakeService {
    state: Mutex<FakeState>,
}

impl FakeService {
    /// Catalog of `count` tracks; even ids are "rock", odd ids "pop"
    pub fn with_catalog(count: i64) -> Arc<Self> {
        let tracks = (1..=count)
            .map(|id| {
                let mut track = Track::new(
                    TrackId::from(id),
                    format!("Track {id}"),
                    format!("https://cdn.holybeats.test/{id}.mp3"),
                );
                track.genre = Some(if id % 2 == 0 { "rock" } else { "pop" }.to_string());
                track.language = Some("en".to_string());
                track
            })
            .collect();

        let mut accounts = HashMap::new();
        accounts.insert(EMAIL.to_string(), PASSWORD.to_string());

        Arc::new(Self {
            state: Mutex::new(FakeState {
                tracks,
                accounts,
                next_playlist_id: 1,
                ..FakeState::default()
            }),
        })
    }

    pub fn signed_in(self: &Arc<Self>) -> Arc<Self> {
        self.state.lock().unwrap().token = Some("token-0".to_string());
        Arc::clone(self)
    }

    /// Server-side revocation: the client still holds its token
    pub fn revoke_token(&self) {
        self.state.lock().unwrap().token = Some("revoked".to_string());
    }

    pub fn delay_genre(&self, genre: &str, delay: Duration) {
        self.state
            .lock()
            .unwrap()
            .genre_delays
            .insert(genre.to_string(), delay);
    }

    pub fn delay_playlist(&self, playlist_id: &PlaylistId, delay: Duration) {
        self.state
            .lock()
            .unwrap()
            .playlist_delays
            .insert(playlist_id.clone(), delay);
    }

    /// Delay every removal of a track from a playlist
    pub fn delay_removals(&self, delay: Duration) {
        self.state.lock().unwrap().removal_delay = Some(delay);
    }

    pub fn seed_favorites(&self, ids: &[i64]) {
        self.state.lock().unwrap().favorites = ids.iter().map(|&id| TrackId::from(id)).collect();
    }

    pub fn seed_playlist(&self, name: &str, ids: &[i64]) -> PlaylistId {
        let mut state = self.state.lock().unwrap();
        let id = PlaylistId::from(state.next_playlist_id);
        state.next_playlist_id += 1;
        state.playlists.push((
            Playlist::new(id.clone(), name),
            ids.iter().map(|&id| TrackId::from(id)).collect(),
        ));
        id
    }

    pub fn favorite_ids(&self) -> Vec<TrackId> {
        self.state.lock().unwrap().favorites.clone()
    }

    pub fn playlist_track_ids(&self, playlist_id: &PlaylistId) -> Vec<TrackId> {
        self.state
            .lock()
            .unwrap()
            .playlists
            .iter()
            .find(|(p, _)| &p.id == playlist_id)
            .map(|(_, ids)| ids.clone())
            .unwrap_or_default()
    }

    pub fn playlist_names(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .playlists
            .iter()
            .map(|(p, _)| p.name.clone())
            .collect()
    }

    /// Names of the service methods called so far
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record(&self, call: &str) {
        self.state.lock().unwrap().calls.push(call.to_string());
    }

    fn authorize(&self) -> Result<()> {
        match self.state.lock().unwrap().token.as_deref() {
            Some(token) if token.starts_with("token-") => Ok(()),
            _ => Err(HolyBeatsError::Unauthorized),
        }
    }

    fn resolve(&self, ids: &[TrackId]) -> Vec<Track> {
        let state = self.state.lock().unwrap();
        ids.iter()
            .filter_map(|id| state.tracks.iter().find(|t| &t.id == id).cloned())
            .collect()
    }
}

/// A shared player with no audio output
pub fn player() -> SharedPlayer {
    SharedPlayer::new(PlaybackTracker::new(
        Box::new(NullBackend),
        PlaybackConfig::default(),
    ))
}

#[async_trait]
impl MusicService for FakeService {
    async fn is_authenticated(&self) -> bool {
        self.state.lock().unwrap().token.is_some()
    }

    async fn login(&self, credentials: &Credentials) -> Result<()> {
        self.record("login");
        let mut state = self.state.lock().unwrap();
        match state.accounts.get(&credentials.email) {
            Some(password) if password == &credentials.password => {
                let n = state.calls.len();
                state.token = Some(format!("token-{n}"));
                Ok(())
            }
            _ => Err(HolyBeatsError::AuthFailed(
                "Invalid email or password".to_string(),
            )),
        }
    }

    async fn register(&self, registration: &Registration) -> Result<()> {
        self.record("register");
        {
            let mut state = self.state.lock().unwrap();
            if state.accounts.contains_key(&registration.email) {
                return Err(HolyBeatsError::Server {
                    status: 400,
                    message: "Email already registered".to_string(),
                });
            }
            state
                .accounts
                .insert(registration.email.clone(), registration.password.clone());
        }
        self.login(&registration.credentials()).await
    }

    async fn logout(&self) -> Result<()> {
        self.record("logout");
        self.state.lock().unwrap().token = None;
        Ok(())
    }

    async fn list_tracks(&self, query: &TrackQuery) -> Result<TrackPage> {
        self.record("list_tracks");
        let (matching, delay) = {
            let state = self.state.lock().unwrap();
            let matching: Vec<Track> = state
                .tracks
                .iter()
                .filter(|t| query.genre.is_none() || t.genre == query.genre)
                .filter(|t| query.language.is_none() || t.language == query.language)
                .cloned()
                .collect();
            let genre = query.genre.as_deref().unwrap_or(UNFILTERED);
            let delay = state.genre_delays.get(genre).copied();
            (matching, delay)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let size = query.page_size as usize;
        let start = (query.page as usize - 1) * size;
        let items: Vec<Track> = matching.iter().skip(start).take(size).cloned().collect();
        Ok(TrackPage {
            has_more: start + items.len() < matching.len(),
            total_count: Some(matching.len() as u64),
            items,
        })
    }

    async fn list_track_filters(&self) -> Result<TrackFilters> {
        self.record("list_track_filters");
        Ok(TrackFilters {
            genres: vec!["pop".to_string(), "rock".to_string()],
            languages: vec!["en".to_string()],
        })
    }

    async fn list_favorites(&self) -> Result<Vec<Track>> {
        self.record("list_favorites");
        self.authorize()?;
        let ids = self.state.lock().unwrap().favorites.clone();
        Ok(self.resolve(&ids))
    }

    async fn add_favorite(&self, track_id: &TrackId) -> Result<()> {
        self.record("add_favorite");
        self.authorize()?;
        let mut state = self.state.lock().unwrap();
        if !state.favorites.contains(track_id) {
            state.favorites.push(track_id.clone());
        }
        Ok(())
    }

    async fn remove_favorite(&self, track_id: &TrackId) -> Result<()> {
        self.record("remove_favorite");
        self.authorize()?;
        self.state
            .lock()
            .unwrap()
            .favorites
            .retain(|id| id != track_id);
        Ok(())
    }

    async fn list_playlists(&self) -> Result<Vec<Playlist>> {
        self.record("list_playlists");
        self.authorize()?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .playlists
            .iter()
            .map(|(p, _)| p.clone())
            .collect())
    }

    async fn create_playlist(&self, name: &str) -> Result<()> {
        self.record("create_playlist");
        self.authorize()?;
        self.seed_playlist(name, &[]);
        Ok(())
    }

    async fn delete_playlist(&self, playlist_id: &PlaylistId) -> Result<()> {
        self.record("delete_playlist");
        self.authorize()?;
        let mut state = self.state.lock().unwrap();
        let before = state.playlists.len();
        state.playlists.retain(|(p, _)| &p.id != playlist_id);
        if state.playlists.len() == before {
            return Err(HolyBeatsError::not_found("Playlist", playlist_id.as_str()));
        }
        Ok(())
    }

    async fn list_playlist_tracks(&self, playlist_id: &PlaylistId) -> Result<Vec<Track>> {
        self.record("list_playlist_tracks");
        self.authorize()?;
        let (ids, delay) = {
            let state = self.state.lock().unwrap();
            let ids = state
                .playlists
                .iter()
                .find(|(p, _)| &p.id == playlist_id)
                .map(|(_, ids)| ids.clone())
                .ok_or_else(|| HolyBeatsError::not_found("Playlist", playlist_id.as_str()))?;
            (ids, state.playlist_delays.get(playlist_id).copied())
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.resolve(&ids))
    }

    async fn add_track_to_playlist(
        &self,
        playlist_id: &PlaylistId,
        track_id: &TrackId,
    ) -> Result<()> {
        self.record("add_track_to_playlist");
        self.authorize()?;
        let mut state = self.state.lock().unwrap();
        let (_, ids) = state
            .playlists
            .iter_mut()
            .find(|(p, _)| &p.id == playlist_id)
            .ok_or_else(|| HolyBeatsError::not_found("Playlist", playlist_id.as_str()))?;
        if !ids.contains(track_id) {
            ids.push(track_id.clone());
        }
        Ok(())
    }

    async fn remove_track_from_playlist(
        &self,
        playlist_id: &PlaylistId,
        track_id: &TrackId,
    ) -> Result<()> {
        self.record("remove_track_from_playlist");
        self.authorize()?;
        let delay = self.state.lock().unwrap().removal_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let mut state = self.state.lock().unwrap();
        if let Some((_, ids)) = state.playlists.iter_mut().find(|(p, _)| &p.id == playlist_id) {
            ids.retain(|id| id != track_id);
        }
        Ok(())
    }
}
