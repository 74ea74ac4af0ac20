//! Playlists screen: the user's playlists and the tracks of the selected one

use crate::gate::{AuthGate, GateDecision, PendingAction};
use crate::lock;
use crate::outcome::{Notice, Outcome};
use crate::player::SharedPlayer;
use crate::request::RequestGuard;
use crate::session::Session;
use holybeats_core::{
    validate_playlist_name, CollectionKey, HolyBeatsError, Playlist, PlaylistId, Track, TrackId,
};
use std::sync::{Arc, Mutex};

const PLAYLIST_GONE: &str = "Playlist no longer exists";

pub struct PlaylistScreen {
    session: Session,
    gate: Arc<AuthGate>,
    player: SharedPlayer,
    state: Mutex<PlaylistState>,
}

#[derive(Default)]
struct PlaylistState {
    playlists: Vec<Playlist>,
    selected: Option<Playlist>,
    tracks: Vec<Track>,
    // Playlist whose tracks are wanted
    guard: RequestGuard<PlaylistId>,
    notice: Option<Notice>,
}

impl PlaylistScreen {
    pub fn new(session: Session, gate: Arc<AuthGate>, player: SharedPlayer) -> Self {
        Self {
            session,
            gate,
            player,
            state: Mutex::new(PlaylistState::default()),
        }
    }

    /// Load the playlist list
    pub async fn load(&self) -> Outcome {
        if self.gate.check(PendingAction::OpenPlaylists) == GateDecision::PromptLogin {
            return Outcome::LoginRequired;
        }

        match self.session.service().list_playlists().await {
            Ok(playlists) => {
                let vanished = {
                    let mut state = lock(&self.state);
                    let vanished = state
                        .selected
                        .as_ref()
                        .filter(|selected| !playlists.iter().any(|p| p.id == selected.id))
                        .map(|selected| selected.id.clone());
                    state.playlists = playlists;
                    vanished
                };
                if let Some(id) = vanished {
                    self.forget_playlist(&id);
                }
                Outcome::Completed
            }
            Err(e) => self.fail_gated(e, PendingAction::OpenPlaylists),
        }
    }

    pub async fn create(&self, name: &str) -> Outcome {
        let name = match validate_playlist_name(name) {
            Ok(name) => name,
            Err(e) => return self.fail(e),
        };
        if self.gate.require_login() == GateDecision::PromptLogin {
            return Outcome::LoginRequired;
        }

        match self.session.service().create_playlist(&name).await {
            Ok(()) => {
                tracing::info!(name = %name, "Playlist created");
                self.load().await
            }
            Err(e) => self.fail(e),
        }
    }

    /// Select a playlist and load its tracks
    ///
    /// Selecting another playlist before this one's tracks arrive discards
    /// the earlier response.
    pub async fn select(&self, playlist_id: &PlaylistId) -> Outcome {
        if self.gate.require_login() == GateDecision::PromptLogin {
            return Outcome::LoginRequired;
        }

        {
            let mut state = lock(&self.state);
            let Some(playlist) = state.playlists.iter().find(|p| &p.id == playlist_id).cloned()
            else {
                return Outcome::Rejected(format!("Playlist {} not found", playlist_id));
            };
            state.selected = Some(playlist);
            state.tracks.clear();
        }

        self.fetch_tracks(playlist_id).await
    }

    /// Delete a playlist after the user confirmed it
    pub async fn delete(&self, playlist_id: &PlaylistId, confirmed: bool) -> Outcome {
        if !confirmed {
            return Outcome::Cancelled;
        }
        if self.gate.require_login() == GateDecision::PromptLogin {
            return Outcome::LoginRequired;
        }

        match self.session.service().delete_playlist(playlist_id).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                tracing::debug!(playlist_id = %playlist_id, "Playlist already deleted");
            }
            Err(e) => return self.fail(e),
        }

        tracing::info!(playlist_id = %playlist_id, "Playlist deleted");
        self.forget_playlist(playlist_id);
        lock(&self.state)
            .playlists
            .retain(|p| &p.id != playlist_id);
        self.load().await
    }

    /// Remove a track from the selected playlist
    pub async fn remove_track(&self, track_id: &TrackId) -> Outcome {
        if self.gate.require_login() == GateDecision::PromptLogin {
            return Outcome::LoginRequired;
        }
        let Some(playlist_id) = self.selected().map(|p| p.id) else {
            return Outcome::Rejected("Select playlist first".to_string());
        };

        let result = self
            .session
            .service()
            .remove_track_from_playlist(&playlist_id, track_id)
            .await;

        match result {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                tracing::debug!(track_id = %track_id, "Track already removed from playlist");
            }
            Err(e) => return self.fail(e),
        }

        if self.selected().map(|p| p.id).as_ref() != Some(&playlist_id) {
            tracing::debug!(playlist_id = %playlist_id, "Selection changed during track removal");
            self.reconcile_unselected(&playlist_id).await;
            return Outcome::Superseded;
        }

        self.fetch_tracks(&playlist_id).await
    }

    /// Play a track of the selected playlist
    pub fn play(&self, track_id: &TrackId) -> Outcome {
        let (track, key, tracks) = {
            let state = lock(&self.state);
            let Some(selected) = &state.selected else {
                return Outcome::Rejected("Select playlist first".to_string());
            };
            let Some(track) = state.tracks.iter().find(|t| &t.id == track_id).cloned() else {
                return Outcome::Rejected(format!("Track {} is not in this playlist", track_id));
            };
            (
                track,
                CollectionKey::Playlist(selected.id.clone()),
                state.tracks.clone(),
            )
        };
        self.player.play(&track, key, &tracks)
    }

    /// Drop everything that belonged to the signed-out user
    pub fn clear(&self) {
        *lock(&self.state) = PlaylistState::default();
    }

    // ===== Queries =====

    pub fn playlists(&self) -> Vec<Playlist> {
        lock(&self.state).playlists.clone()
    }

    pub fn selected(&self) -> Option<Playlist> {
        lock(&self.state).selected.clone()
    }

    pub fn tracks(&self) -> Vec<Track> {
        lock(&self.state).tracks.clone()
    }

    pub fn notice(&self) -> Option<Notice> {
        lock(&self.state).notice.clone()
    }

    // ===== Helpers =====

    async fn fetch_tracks(&self, playlist_id: &PlaylistId) -> Outcome {
        let playlist_id = lock(&self.state).guard.issue(playlist_id.clone());

        tracing::debug!(playlist_id = %playlist_id, "Loading playlist tracks");
        let result = self
            .session
            .service()
            .list_playlist_tracks(&playlist_id)
            .await;

        let mut state = lock(&self.state);
        if !state.guard.is_current(&playlist_id) {
            tracing::warn!(playlist_id = %playlist_id, "Discarding superseded playlist tracks");
            return Outcome::Superseded;
        }

        match result {
            Ok(tracks) => {
                state.tracks = tracks.clone();
                drop(state);
                self.player
                    .reconcile(&CollectionKey::Playlist(playlist_id), &tracks);
                Outcome::Completed
            }
            Err(e) if e.is_not_found() => {
                drop(state);
                tracing::info!(playlist_id = %playlist_id, "{}", PLAYLIST_GONE);
                self.forget_playlist(&playlist_id);
                self.notify(Notice::info(PLAYLIST_GONE));
                Outcome::Completed
            }
            Err(e) => self.record(&mut state, Outcome::from(e)),
        }
    }

    /// Re-fetch a playlist that is no longer on screen, for the player only
    async fn reconcile_unselected(&self, playlist_id: &PlaylistId) {
        match self.session.service().list_playlist_tracks(playlist_id).await {
            Ok(tracks) => {
                self.player
                    .reconcile(&CollectionKey::Playlist(playlist_id.clone()), &tracks);
            }
            Err(e) if e.is_not_found() => {
                self.player
                    .collection_deleted(&CollectionKey::Playlist(playlist_id.clone()));
            }
            Err(e) => {
                tracing::warn!(playlist_id = %playlist_id, error = %e, "Failed to refresh playlist after removal");
            }
        }
    }

    /// Clear selection-scoped state and stop playback from a deleted playlist
    fn forget_playlist(&self, playlist_id: &PlaylistId) {
        {
            let mut state = lock(&self.state);
            if state.selected.as_ref().is_some_and(|p| &p.id == playlist_id) {
                state.selected = None;
                state.tracks.clear();
                state.guard.clear();
            }
        }
        self.player
            .collection_deleted(&CollectionKey::Playlist(playlist_id.clone()));
    }

    fn notify(&self, notice: Notice) {
        lock(&self.state).notice = Some(notice);
    }

    fn record(&self, state: &mut PlaylistState, outcome: Outcome) -> Outcome {
        if let Some(notice) = Notice::for_outcome(&outcome) {
            tracing::warn!(message = %notice.message, "Playlist action failed");
            state.notice = Some(notice);
        }
        if outcome == Outcome::LoginRequired {
            self.session.credential_rejected();
        }
        outcome
    }

    fn fail(&self, error: HolyBeatsError) -> Outcome {
        self.record(&mut lock(&self.state), Outcome::from(error))
    }

    fn fail_gated(&self, error: HolyBeatsError, action: PendingAction) -> Outcome {
        if error.is_unauthorized() {
            self.gate.remember(action);
        }
        self.fail(error)
    }
}
