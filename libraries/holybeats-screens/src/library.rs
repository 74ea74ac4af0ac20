//! Library screen: all tracks with filters, favorites and playlist shortcuts

use crate::gate::{AuthGate, GateDecision, PendingAction};
use crate::lock;
use crate::outcome::{Notice, Outcome};
use crate::paged::PagedTracks;
use crate::player::SharedPlayer;
use crate::request::RequestGuard;
use crate::session::Session;
use holybeats_core::{
    validate_playlist_name, CollectionKey, HolyBeatsError, Playlist, PlaylistId, Track,
    TrackFilters, TrackId, TrackQuery,
};
use std::sync::{Arc, Mutex};

const ADDED_TO_FAVORITES: &str = "Added to favorites";
const ADDED_TO_PLAYLIST: &str = "Added to playlist";
const SELECT_PLAYLIST_FIRST: &str = "Select playlist first";

pub struct LibraryScreen {
    session: Session,
    gate: Arc<AuthGate>,
    player: SharedPlayer,
    state: Mutex<LibraryState>,
}

struct LibraryState {
    paged: PagedTracks,
    // First-page query the screen currently wants
    guard: RequestGuard<TrackQuery>,
    loading_more: bool,
    filters: TrackFilters,
    playlists: Vec<Playlist>,
    target_playlist: Option<PlaylistId>,
    notice: Option<Notice>,
}

impl LibraryScreen {
    pub fn new(session: Session, gate: Arc<AuthGate>, player: SharedPlayer, page_size: u32) -> Self {
        Self {
            session,
            gate,
            player,
            state: Mutex::new(LibraryState {
                paged: PagedTracks::new(page_size),
                guard: RequestGuard::new(),
                loading_more: false,
                filters: TrackFilters::default(),
                playlists: Vec::new(),
                target_playlist: None,
                notice: None,
            }),
        }
    }

    // ===== Loading =====

    /// Load the first page for the current filters, the filter options and,
    /// when signed in, the user's playlists
    pub async fn load(&self) -> Outcome {
        let query = self.desired_query();
        let outcome = self.fetch_first_page(query).await;
        if !outcome.is_completed() {
            return outcome;
        }

        match self.session.service().list_track_filters().await {
            Ok(filters) => lock(&self.state).filters = filters,
            Err(e) => tracing::warn!(error = %e, "Failed to load track filters"),
        }

        if self.session.is_authenticated() {
            return self.refresh_playlists().await;
        }
        Outcome::Completed
    }

    /// Filter by genre; empty means all genres
    pub async fn set_genre(&self, genre: &str) -> Outcome {
        let query = self.desired_query().reset_page().with_genre(genre);
        self.fetch_first_page(query).await
    }

    /// Filter by language; empty means all languages
    pub async fn set_language(&self, language: &str) -> Outcome {
        let query = self.desired_query().reset_page().with_language(language);
        self.fetch_first_page(query).await
    }

    /// Append the next page of the current filter
    ///
    /// Driven only by the server's continuation flag. A call made while
    /// another page is still loading is dropped as superseded.
    pub async fn load_more(&self) -> Outcome {
        let query = {
            let mut state = lock(&self.state);
            if state.loading_more {
                return Outcome::Superseded;
            }
            let Some(query) = state.paged.next_query() else {
                return Outcome::Completed;
            };
            state.loading_more = true;
            query
        };

        tracing::debug!(page = query.page, genre = ?query.genre, language = ?query.language, "Loading more tracks");
        let result = self.session.service().list_tracks(&query).await;

        let mut state = lock(&self.state);
        state.loading_more = false;
        let wanted = state
            .guard
            .desired()
            .is_some_and(|desired| desired.same_filter(&query));

        let page = match result {
            Ok(page) => page,
            Err(_) if !wanted => return Outcome::Superseded,
            Err(e) => return self.record(&mut state, Outcome::from(e)),
        };

        if !wanted || !state.paged.append(query.clone(), page) {
            tracing::warn!(page = query.page, "Discarding superseded page");
            return Outcome::Superseded;
        }

        let tracks = state.paged.tracks().to_vec();
        drop(state);
        self.player.reconcile(&CollectionKey::Library, &tracks);
        Outcome::Completed
    }

    async fn fetch_first_page(&self, query: TrackQuery) -> Outcome {
        let query = {
            let mut state = lock(&self.state);
            state.loading_more = false;
            state.guard.issue(query)
        };

        tracing::debug!(genre = ?query.genre, language = ?query.language, "Loading tracks");
        let result = self.session.service().list_tracks(&query).await;

        let mut state = lock(&self.state);
        if !state.guard.is_current(&query) {
            tracing::warn!(genre = ?query.genre, language = ?query.language, "Discarding superseded tracks response");
            return Outcome::Superseded;
        }

        match result {
            Ok(page) => {
                state.paged.replace(query, page);
                let tracks = state.paged.tracks().to_vec();
                drop(state);
                self.player.reconcile(&CollectionKey::Library, &tracks);
                Outcome::Completed
            }
            Err(e) => self.record(&mut state, Outcome::from(e)),
        }
    }

    fn desired_query(&self) -> TrackQuery {
        let state = lock(&self.state);
        state
            .guard
            .desired()
            .cloned()
            .unwrap_or_else(|| state.paged.query().reset_page())
    }

    /// Reload the signed-in user's playlists
    pub async fn refresh_playlists(&self) -> Outcome {
        match self.session.service().list_playlists().await {
            Ok(playlists) => {
                let mut state = lock(&self.state);
                if let Some(target) = &state.target_playlist {
                    if !playlists.iter().any(|p| &p.id == target) {
                        state.target_playlist = None;
                    }
                }
                state.playlists = playlists;
                Outcome::Completed
            }
            Err(e) => self.fail(e),
        }
    }

    // ===== Playback =====

    /// Play a listed track with the loaded library as navigation context
    pub fn play(&self, track_id: &TrackId) -> Outcome {
        let (track, tracks) = {
            let state = lock(&self.state);
            let tracks = state.paged.tracks().to_vec();
            match tracks.iter().find(|t| &t.id == track_id).cloned() {
                Some(track) => (track, tracks),
                None => return Outcome::Rejected(format!("Track {} is not listed", track_id)),
            }
        };
        self.player.play(&track, CollectionKey::Library, &tracks)
    }

    // ===== Favorites and playlists =====

    pub async fn add_favorite(&self, track_id: &TrackId) -> Outcome {
        let action = PendingAction::AddFavorite(track_id.clone());
        if self.gate.check(action.clone()) == GateDecision::PromptLogin {
            return Outcome::LoginRequired;
        }

        match self.session.service().add_favorite(track_id).await {
            Ok(()) => {
                tracing::debug!(track_id = %track_id, "Added favorite");
                self.notify(Notice::info(ADDED_TO_FAVORITES));
                Outcome::Completed
            }
            Err(e) => self.fail_gated(e, action),
        }
    }

    /// Pick the playlist that [`Self::add_to_target_playlist`] adds to
    pub fn choose_target_playlist(&self, playlist_id: Option<PlaylistId>) -> Outcome {
        let mut state = lock(&self.state);
        if let Some(id) = &playlist_id {
            if !state.playlists.iter().any(|p| &p.id == id) {
                return Outcome::Rejected(format!("Playlist {} not found", id));
            }
        }
        state.target_playlist = playlist_id;
        Outcome::Completed
    }

    /// Add a track to the chosen target playlist
    ///
    /// With a target chosen the add is gated like [`Self::add_to_playlist`],
    /// so it is replayed after a login.
    pub async fn add_to_target_playlist(&self, track_id: &TrackId) -> Outcome {
        let target = lock(&self.state).target_playlist.clone();
        match target {
            Some(playlist_id) => self.add_to_playlist(track_id, &playlist_id).await,
            None => {
                if self.gate.require_login() == GateDecision::PromptLogin {
                    return Outcome::LoginRequired;
                }
                let outcome = Outcome::Rejected(SELECT_PLAYLIST_FIRST.to_string());
                self.record(&mut lock(&self.state), outcome)
            }
        }
    }

    pub async fn add_to_playlist(&self, track_id: &TrackId, playlist_id: &PlaylistId) -> Outcome {
        let action = PendingAction::AddToPlaylist {
            track_id: track_id.clone(),
            playlist_id: playlist_id.clone(),
        };
        if self.gate.check(action.clone()) == GateDecision::PromptLogin {
            return Outcome::LoginRequired;
        }

        let result = self
            .session
            .service()
            .add_track_to_playlist(playlist_id, track_id)
            .await;

        match result {
            Ok(()) => {
                tracing::debug!(track_id = %track_id, playlist_id = %playlist_id, "Added track to playlist");
                self.notify(Notice::info(ADDED_TO_PLAYLIST));
                Outcome::Completed
            }
            Err(e) if e.is_not_found() => {
                tracing::info!(playlist_id = %playlist_id, "Playlist no longer exists");
                self.refresh_playlists().await
            }
            Err(e) => self.fail_gated(e, action),
        }
    }

    pub async fn create_playlist(&self, name: &str) -> Outcome {
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
                self.refresh_playlists().await
            }
            Err(e) => self.fail(e),
        }
    }

    /// Drop everything that belonged to the signed-out user
    pub fn on_signed_out(&self) {
        let mut state = lock(&self.state);
        state.playlists.clear();
        state.target_playlist = None;
        state.notice = None;
    }

    // ===== Queries =====

    pub fn tracks(&self) -> Vec<Track> {
        lock(&self.state).paged.tracks().to_vec()
    }

    pub fn query(&self) -> TrackQuery {
        lock(&self.state).paged.query().clone()
    }

    pub fn has_more(&self) -> bool {
        lock(&self.state).paged.has_more()
    }

    pub fn total_count(&self) -> Option<u64> {
        lock(&self.state).paged.total_count()
    }

    pub fn filters(&self) -> TrackFilters {
        lock(&self.state).filters.clone()
    }

    pub fn playlists(&self) -> Vec<Playlist> {
        lock(&self.state).playlists.clone()
    }

    pub fn target_playlist(&self) -> Option<PlaylistId> {
        lock(&self.state).target_playlist.clone()
    }

    pub fn notice(&self) -> Option<Notice> {
        lock(&self.state).notice.clone()
    }

    // ===== Helpers =====

    fn notify(&self, notice: Notice) {
        lock(&self.state).notice = Some(notice);
    }

    fn record(&self, state: &mut LibraryState, outcome: Outcome) -> Outcome {
        if let Some(notice) = Notice::for_outcome(&outcome) {
            tracing::warn!(message = %notice.message, "Library action failed");
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
