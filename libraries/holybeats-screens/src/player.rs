//! Shared handle to the one playback tracker

use crate::lock;
use crate::outcome::Outcome;
use holybeats_core::{CollectionKey, Track};
use holybeats_playback::{
    MediaCommand, MediaEvent, PlaybackEvent, PlaybackSnapshot, PlaybackTracker, Reconciliation,
};
use std::sync::{Arc, Mutex, MutexGuard};

/// Every screen drives the same tracker through this handle
///
/// The lock is only held for synchronous tracker calls, never across an
/// `.await`.
#[derive(Clone)]
pub struct SharedPlayer {
    tracker: Arc<Mutex<PlaybackTracker>>,
}

impl SharedPlayer {
    pub fn new(tracker: PlaybackTracker) -> Self {
        Self {
            tracker: Arc::new(Mutex::new(tracker)),
        }
    }

    /// Direct access for transport controls (toggle, seek, next, ...)
    pub fn lock(&self) -> MutexGuard<'_, PlaybackTracker> {
        lock(&self.tracker)
    }

    /// Start `track` with `tracks` as its navigation context
    pub fn play(&self, track: &Track, key: CollectionKey, tracks: &[Track]) -> Outcome {
        match self.lock().select_track(track.clone(), key, tracks.to_vec()) {
            Ok(()) => Outcome::Completed,
            Err(e) => Outcome::Failed(e.to_string()),
        }
    }

    /// Tell the tracker about a freshly loaded collection
    pub fn reconcile(&self, key: &CollectionKey, tracks: &[Track]) -> Reconciliation {
        let outcome = self.lock().reconcile(key, tracks);
        if outcome == Reconciliation::Stopped {
            tracing::info!(collection = %key, "Playback stopped, current track removed");
        }
        outcome
    }

    /// Tell the tracker a whole collection is gone
    pub fn collection_deleted(&self, key: &CollectionKey) -> Reconciliation {
        self.lock().collection_deleted(key)
    }

    /// Stop when playing from a collection that needs a signed-in user
    pub fn stop_if_private(&self) {
        let mut tracker = self.lock();
        if tracker.active_key().is_some_and(CollectionKey::requires_auth) {
            tracker.stop();
        }
    }

    pub fn handle_media_event(&self, event: MediaEvent) {
        if let Err(e) = self.lock().handle_media_event(event) {
            tracing::warn!(error = %e, "Media event could not be applied");
        }
    }

    pub fn handle_command(&self, command: MediaCommand) {
        if let Err(e) = self.lock().handle_command(command) {
            tracing::warn!(error = %e, ?command, "Media command failed");
        }
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.lock().snapshot()
    }

    pub fn drain_events(&self) -> Vec<PlaybackEvent> {
        self.lock().drain_events()
    }
}

impl std::fmt::Debug for SharedPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SharedPlayer").field(&*self.lock()).finish()
    }
}
