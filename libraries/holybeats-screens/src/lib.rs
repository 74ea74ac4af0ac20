//! HolyBeats - Screens
//!
//! Screen controllers for browsing, favoriting and playlisting tracks,
//! wired to one shared [`holybeats_playback::PlaybackTracker`].
//!
//! This crate provides:
//! - [`Session`]: the process-wide authentication context with a watch channel
//! - [`AuthGate`] and [`LoginPrompt`]: gating with replay after login
//! - [`LibraryScreen`], [`PlaylistScreen`], [`FavoritesScreen`]
//! - [`App`]: page navigation over the three screens
//!
//! # Concurrency
//!
//! Screen methods take `&self` so several requests can be in flight at
//! once. Responses are applied only if their request parameters are still
//! the wanted ones ([`RequestGuard`]); late results come back as
//! [`Outcome::Superseded`]. Internal locks are never held across `.await`.
//!
//! # Reconciliation
//!
//! Every re-fetch of a collection is passed to
//! [`holybeats_playback::PlaybackTracker::reconcile`]. If the current track
//! is no longer in the collection it was started from, playback stops.

pub mod app;
pub mod favorites;
pub mod gate;
pub mod library;
pub mod outcome;
pub mod paged;
pub mod player;
pub mod playlists;
pub mod prompt;
pub mod request;
pub mod session;

pub use app::{App, Page};
pub use favorites::FavoritesScreen;
pub use gate::{AuthGate, GateDecision, PendingAction};
pub use library::LibraryScreen;
pub use outcome::{Notice, NoticeKind, Outcome};
pub use paged::PagedTracks;
pub use player::SharedPlayer;
pub use playlists::PlaylistScreen;
pub use prompt::{LoginPrompt, PromptMode};
pub use request::RequestGuard;
pub use session::{AuthState, Session};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a screen mutex, recovering the data if a holder panicked
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
