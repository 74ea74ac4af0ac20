//! Authentication gate
//!
//! Every action that needs a signed-in user goes through [`AuthGate::check`].
//! When the user is signed out the action is remembered instead of attempted,
//! and handed back after a successful login so it can be replayed.

use crate::lock;
use crate::session::Session;
use holybeats_core::{PlaylistId, TrackId};
use std::sync::Mutex;

/// A gated action waiting for the user to sign in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    OpenPlaylists,
    OpenFavorites,
    AddFavorite(TrackId),
    AddToPlaylist {
        track_id: TrackId,
        playlist_id: PlaylistId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Signed in, run the action
    Proceed,
    /// Show the login prompt instead
    PromptLogin,
}

pub struct AuthGate {
    session: Session,
    pending: Mutex<Option<PendingAction>>,
}

impl AuthGate {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            pending: Mutex::new(None),
        }
    }

    /// Let `action` through or remember it for after login
    pub fn check(&self, action: PendingAction) -> GateDecision {
        if self.session.is_authenticated() {
            return GateDecision::Proceed;
        }
        tracing::debug!(?action, "Sign-in required");
        self.remember(action);
        GateDecision::PromptLogin
    }

    /// Require sign-in for an action that has nothing to replay
    pub fn require_login(&self) -> GateDecision {
        if self.session.is_authenticated() {
            GateDecision::Proceed
        } else {
            GateDecision::PromptLogin
        }
    }

    /// Remember `action` after the server rejected it as unauthorized
    pub fn remember(&self, action: PendingAction) {
        *lock(&self.pending) = Some(action);
    }

    /// The action to replay now that the user signed in
    pub fn take_pending(&self) -> Option<PendingAction> {
        lock(&self.pending).take()
    }

    pub fn pending(&self) -> Option<PendingAction> {
        lock(&self.pending).clone()
    }

    /// The prompt was dismissed; forget the action
    pub fn clear(&self) {
        lock(&self.pending).take();
    }
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("session", &self.session)
            .field("pending", &self.pending())
            .finish()
    }
}
