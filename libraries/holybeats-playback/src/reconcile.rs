//! Collection mutation reconciliation
//!
//! After a collection is re-fetched (favorite removed, playlist track
//! removed, library filter changed) the tracker is told about the fresh
//! list. Only the collection playback was started from is considered.

use crate::tracker::PlaybackTracker;
use crate::types::StopReason;
use holybeats_core::{CollectionKey, Track};

/// Outcome of reconciling a re-fetched collection with playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// The collection is not the one playback was started from
    NotActive,
    /// The current track survived; navigation now uses the fresh list
    Unaffected,
    /// The current track disappeared and playback stopped
    Stopped,
}

impl PlaybackTracker {
    /// Apply a fresh copy of the collection identified by `key`
    pub fn reconcile(&mut self, key: &CollectionKey, tracks: &[Track]) -> Reconciliation {
        if self.active_key() != Some(key) {
            return Reconciliation::NotActive;
        }

        let still_present = self
            .current_track()
            .is_some_and(|current| tracks.iter().any(|t| t.id == current.id));

        if still_present {
            self.replace_active_tracks(tracks.to_vec());
            Reconciliation::Unaffected
        } else {
            tracing::info!(collection = %key, "Current track left its collection, stopping");
            self.stop_with(StopReason::TrackRemoved);
            Reconciliation::Stopped
        }
    }

    /// Drop a deleted collection; stops playback if it was the active one
    pub fn collection_deleted(&mut self, key: &CollectionKey) -> Reconciliation {
        self.reconcile(key, &[])
    }
}
