//! App shell: page navigation, login prompt lifecycle and action replay

use crate::favorites::FavoritesScreen;
use crate::gate::{AuthGate, GateDecision, PendingAction};
use crate::library::LibraryScreen;
use crate::outcome::Outcome;
use crate::player::SharedPlayer;
use crate::playlists::PlaylistScreen;
use crate::prompt::LoginPrompt;
use crate::session::Session;
use holybeats_core::{MusicService, PlaylistId, TrackId};
use std::sync::Arc;

/// Top-level pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Library,
    Playlists,
    Favorites,
}

/// Owns the session, the gate, the shared player and the three screens
///
/// Gated actions that need a login open the prompt; a successful
/// submission replays the action that triggered it.
pub struct App {
    session: Session,
    gate: Arc<AuthGate>,
    player: SharedPlayer,
    library: LibraryScreen,
    playlists: PlaylistScreen,
    favorites: FavoritesScreen,
    page: Page,
    prompt: Option<LoginPrompt>,
}

impl App {
    pub async fn new(service: Arc<dyn MusicService>, player: SharedPlayer, page_size: u32) -> Self {
        let session = Session::new(service).await;
        let gate = Arc::new(AuthGate::new(session.clone()));

        Self {
            library: LibraryScreen::new(session.clone(), gate.clone(), player.clone(), page_size),
            playlists: PlaylistScreen::new(session.clone(), gate.clone(), player.clone()),
            favorites: FavoritesScreen::new(session.clone(), gate.clone(), player.clone()),
            session,
            gate,
            player,
            page: Page::Library,
            prompt: None,
        }
    }

    // ===== Accessors =====

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn player(&self) -> &SharedPlayer {
        &self.player
    }

    pub fn library(&self) -> &LibraryScreen {
        &self.library
    }

    pub fn playlists(&self) -> &PlaylistScreen {
        &self.playlists
    }

    pub fn favorites(&self) -> &FavoritesScreen {
        &self.favorites
    }

    pub fn page(&self) -> Page {
        self.page
    }

    // ===== Navigation =====

    /// Switch page; gated pages open the login prompt when signed out
    pub async fn navigate(&mut self, page: Page) -> Outcome {
        let action = match page {
            Page::Library => None,
            Page::Playlists => Some(PendingAction::OpenPlaylists),
            Page::Favorites => Some(PendingAction::OpenFavorites),
        };
        if let Some(action) = action {
            if self.gate.check(action) == GateDecision::PromptLogin {
                return self.login_required();
            }
        }

        tracing::debug!(?page, "Navigating");
        let outcome = match page {
            Page::Library => self.library.load().await,
            Page::Playlists => self.playlists.load().await,
            Page::Favorites => self.favorites.load().await,
        };
        if outcome != Outcome::LoginRequired {
            self.page = page;
        }
        self.settle(outcome)
    }

    // ===== Gated actions =====

    pub async fn add_favorite(&mut self, track_id: &TrackId) -> Outcome {
        let outcome = self.library.add_favorite(track_id).await;
        self.settle(outcome)
    }

    pub async fn add_to_playlist(&mut self, track_id: &TrackId, playlist_id: &PlaylistId) -> Outcome {
        let outcome = self.library.add_to_playlist(track_id, playlist_id).await;
        self.settle(outcome)
    }

    pub async fn add_to_target_playlist(&mut self, track_id: &TrackId) -> Outcome {
        let outcome = self.library.add_to_target_playlist(track_id).await;
        self.settle(outcome)
    }

    /// Open the prompt for any outcome that asks for a login
    pub fn settle(&mut self, outcome: Outcome) -> Outcome {
        if outcome == Outcome::LoginRequired {
            return self.login_required();
        }
        outcome
    }

    fn login_required(&mut self) -> Outcome {
        if self.prompt.is_none() {
            self.prompt = Some(LoginPrompt::new());
        }
        Outcome::LoginRequired
    }

    // ===== Login prompt =====

    pub fn prompt(&self) -> Option<&LoginPrompt> {
        self.prompt.as_ref()
    }

    pub fn prompt_mut(&mut self) -> Option<&mut LoginPrompt> {
        self.prompt.as_mut()
    }

    /// Open the prompt without a gated action (explicit "sign in")
    pub fn open_prompt(&mut self) {
        self.prompt.get_or_insert_with(LoginPrompt::new);
    }

    /// Close the prompt; the action that opened it is dropped
    pub fn dismiss_prompt(&mut self) {
        self.prompt = None;
        self.gate.clear();
    }

    /// Submit the prompt and, on success, replay the pending action
    ///
    /// On failure the prompt stays open with its inline error and the
    /// error is returned as [`Outcome::Rejected`].
    pub async fn submit_login(&mut self) -> Outcome {
        let Some(prompt) = self.prompt.as_mut() else {
            return Outcome::Cancelled;
        };

        if !prompt.submit(&self.session).await {
            let message = prompt.error().unwrap_or_default().to_string();
            return Outcome::Rejected(message);
        }
        self.prompt = None;

        let refreshed = self.library.refresh_playlists().await;
        if !refreshed.is_completed() {
            tracing::warn!(?refreshed, "Playlists not refreshed after login");
        }

        match self.gate.take_pending() {
            Some(action) => {
                tracing::info!(?action, "Replaying action after login");
                self.replay(action).await
            }
            None => Outcome::Completed,
        }
    }

    async fn replay(&mut self, action: PendingAction) -> Outcome {
        match action {
            PendingAction::OpenPlaylists => self.navigate(Page::Playlists).await,
            PendingAction::OpenFavorites => self.navigate(Page::Favorites).await,
            PendingAction::AddFavorite(track_id) => self.add_favorite(&track_id).await,
            PendingAction::AddToPlaylist {
                track_id,
                playlist_id,
            } => self.add_to_playlist(&track_id, &playlist_id).await,
        }
    }

    /// Sign out and return to the library
    pub async fn logout(&mut self) -> Outcome {
        let result = self.session.logout().await;

        self.player.stop_if_private();
        self.library.on_signed_out();
        self.playlists.clear();
        self.favorites.clear();
        self.gate.clear();
        self.prompt = None;
        self.page = Page::Library;

        match result {
            Ok(()) => Outcome::Completed,
            Err(e) => Outcome::from(e),
        }
    }
}
