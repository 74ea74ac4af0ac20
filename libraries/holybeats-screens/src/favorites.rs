//! Favorites screen

use crate::gate::{AuthGate, GateDecision, PendingAction};
use crate::lock;
use crate::outcome::{Notice, Outcome};
use crate::player::SharedPlayer;
use crate::request::RequestGuard;
use crate::session::Session;
use holybeats_core::{CollectionKey, HolyBeatsError, Track, TrackId};
use std::sync::{Arc, Mutex};

pub struct FavoritesScreen {
    session: Session,
    gate: Arc<AuthGate>,
    player: SharedPlayer,
    state: Mutex<FavoritesState>,
}

#[derive(Default)]
struct FavoritesState {
    tracks: Vec<Track>,
    // Favorites take no parameters; each fetch gets a sequence number
    guard: RequestGuard<u64>,
    next_request: u64,
    notice: Option<Notice>,
}

impl FavoritesScreen {
    pub fn new(session: Session, gate: Arc<AuthGate>, player: SharedPlayer) -> Self {
        Self {
            session,
            gate,
            player,
            state: Mutex::new(FavoritesState::default()),
        }
    }

    pub async fn load(&self) -> Outcome {
        if self.gate.check(PendingAction::OpenFavorites) == GateDecision::PromptLogin {
            return Outcome::LoginRequired;
        }
        self.fetch().await
    }

    /// Remove a favorite, then reload and reconcile playback with the result
    pub async fn remove(&self, track_id: &TrackId) -> Outcome {
        if self.gate.require_login() == GateDecision::PromptLogin {
            return Outcome::LoginRequired;
        }

        match self.session.service().remove_favorite(track_id).await {
            Ok(()) => tracing::debug!(track_id = %track_id, "Removed favorite"),
            Err(e) if e.is_not_found() => {
                tracing::debug!(track_id = %track_id, "Favorite already removed");
            }
            Err(e) => return self.fail(e),
        }

        self.fetch().await
    }

    /// Play a favorite with the favorites list as navigation context
    pub fn play(&self, track_id: &TrackId) -> Outcome {
        let (track, tracks) = {
            let state = lock(&self.state);
            let Some(track) = state.tracks.iter().find(|t| &t.id == track_id).cloned() else {
                return Outcome::Rejected(format!("Track {} is not a favorite", track_id));
            };
            (track, state.tracks.clone())
        };
        self.player.play(&track, CollectionKey::Favorites, &tracks)
    }

    /// Drop everything that belonged to the signed-out user
    pub fn clear(&self) {
        let mut state = lock(&self.state);
        state.tracks.clear();
        state.guard.clear();
        state.notice = None;
    }

    pub fn tracks(&self) -> Vec<Track> {
        lock(&self.state).tracks.clone()
    }

    pub fn notice(&self) -> Option<Notice> {
        lock(&self.state).notice.clone()
    }

    async fn fetch(&self) -> Outcome {
        let request = {
            let mut state = lock(&self.state);
            state.next_request += 1;
            let request = state.next_request;
            state.guard.issue(request)
        };

        let result = self.session.service().list_favorites().await;

        let mut state = lock(&self.state);
        if !state.guard.is_current(&request) {
            tracing::warn!(request, "Discarding superseded favorites response");
            return Outcome::Superseded;
        }

        match result {
            Ok(tracks) => {
                state.tracks = tracks.clone();
                drop(state);
                self.player.reconcile(&CollectionKey::Favorites, &tracks);
                Outcome::Completed
            }
            Err(e) => {
                if e.is_unauthorized() {
                    self.gate.remember(PendingAction::OpenFavorites);
                }
                self.record(&mut state, Outcome::from(e))
            }
        }
    }

    fn record(&self, state: &mut FavoritesState, outcome: Outcome) -> Outcome {
        if let Some(notice) = Notice::for_outcome(&outcome) {
            tracing::warn!(message = %notice.message, "Favorites action failed");
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
}
