//! Property-based tests for the playback tracker
//!
//! Uses proptest to check navigation and position invariants across random
//! collections and operation sequences.

use holybeats_core::{CollectionKey, Track, TrackId};
use holybeats_playback::{
    Direction, MediaEvent, NullBackend, PlaybackConfig, PlaybackState, PlaybackTracker,
};
use proptest::prelude::*;
use std::time::Duration;

// ===== Helpers =====

fn tracks(len: usize) -> Vec<Track> {
    (0..len as i64)
        .map(|id| Track::new(TrackId::from(id), format!("T{id}"), format!("u{id}")))
        .collect()
}

fn position_of(tracker: &PlaybackTracker) -> usize {
    let current = tracker.current_track().expect("track selected");
    tracker
        .active_tracks()
        .iter()
        .position(|t| t.id == current.id)
        .expect("current track in collection")
}

#[derive(Debug, Clone)]
enum Op {
    Next,
    Previous,
    Toggle,
    Seek(f64),
    Time(f64),
    Metadata(u64),
    Ended,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Next),
        Just(Op::Previous),
        Just(Op::Toggle),
        (-100.0f64..1000.0).prop_map(Op::Seek),
        (0.0f64..1000.0).prop_map(Op::Time),
        (1u64..600).prop_map(Op::Metadata),
        Just(Op::Ended),
    ]
}

// ===== Property Tests =====

proptest! {
    /// Property: next followed by previous returns to the same track
    #[test]
    fn next_then_previous_is_identity(len in 1usize..30, start in 0usize..30) {
        let start = start % len;
        let list = tracks(len);
        let mut tracker = PlaybackTracker::new(Box::new(NullBackend), PlaybackConfig::default());
        tracker.select_track(list[start].clone(), CollectionKey::Library, list).unwrap();

        tracker.next().unwrap();
        tracker.previous().unwrap();

        prop_assert_eq!(position_of(&tracker), start);
    }

    /// Property: len steps in one direction come back around
    #[test]
    fn full_cycle_returns_to_start(len in 1usize..20, start in 0usize..20, forward in any::<bool>()) {
        let start = start % len;
        let list = tracks(len);
        let mut tracker = PlaybackTracker::new(Box::new(NullBackend), PlaybackConfig::default());
        tracker.select_track(list[start].clone(), CollectionKey::Library, list).unwrap();

        let direction = if forward { Direction::Next } else { Direction::Previous };
        for _ in 0..len {
            tracker.advance(direction).unwrap();
        }

        prop_assert_eq!(position_of(&tracker), start);
    }

    /// Property: a seek always lands within [0, duration]
    #[test]
    fn seek_stays_in_bounds(duration in 1u64..3600, target in -10_000.0f64..10_000.0) {
        let list = tracks(1);
        let mut tracker = PlaybackTracker::new(Box::new(NullBackend), PlaybackConfig::default());
        tracker.select_track(list[0].clone(), CollectionKey::Library, list).unwrap();
        tracker.handle_media_event(MediaEvent::MetadataLoaded {
            duration: Duration::from_secs(duration),
        }).unwrap();

        tracker.seek_to_secs(target).unwrap();

        prop_assert!(tracker.elapsed() <= Duration::from_secs(duration));
    }

    /// Property: rendered position never passes the duration and a current
    /// track always exists outside Idle
    #[test]
    fn random_operations_keep_invariants(
        len in 1usize..10,
        ops in prop::collection::vec(op(), 1..60)
    ) {
        let list = tracks(len);
        let mut tracker = PlaybackTracker::new(Box::new(NullBackend), PlaybackConfig::default());
        tracker.select_track(list[0].clone(), CollectionKey::Library, list).unwrap();

        for op in ops {
            match op {
                Op::Next => tracker.next().unwrap(),
                Op::Previous => tracker.previous().unwrap(),
                Op::Toggle => tracker.toggle_play_pause().unwrap(),
                Op::Seek(secs) => tracker.seek_to_secs(secs).unwrap(),
                Op::Time(secs) => tracker
                    .handle_media_event(MediaEvent::TimeUpdate {
                        position: Duration::from_secs_f64(secs),
                        duration: None,
                    })
                    .unwrap(),
                Op::Metadata(secs) => tracker
                    .handle_media_event(MediaEvent::MetadataLoaded {
                        duration: Duration::from_secs(secs),
                    })
                    .unwrap(),
                Op::Ended => tracker.handle_media_event(MediaEvent::Ended).unwrap(),
            }

            let snapshot = tracker.snapshot();
            if !snapshot.duration.is_zero() {
                prop_assert!(snapshot.elapsed <= snapshot.duration);
            }
            prop_assert_ne!(tracker.state(), PlaybackState::Idle);
            prop_assert!(tracker.current_track().is_some());
            prop_assert_eq!(tracker.active_tracks().len(), len);
        }
    }
}
