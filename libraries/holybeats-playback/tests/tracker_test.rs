//! Integration tests for the playback tracker
//!
//! Scenarios cover the full select/metadata/navigate/seek/stop cycle as seen
//! from the outside, with a media session that records what it was told.

use holybeats_core::{CollectionKey, PlaylistId, Track, TrackId};
use holybeats_playback::{
    MediaCommand, MediaEvent, MediaSession, NullBackend, PlaybackConfig, PlaybackEvent,
    PlaybackState, PlaybackTracker, Reconciliation, Result, StopReason, SwipeGesture,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ===== Helpers =====

fn track(id: i64, title: &str) -> Track {
    Track::new(
        TrackId::from(id),
        title,
        format!("https://cdn.holybeats.test/{id}.mp3"),
    )
}

fn abc() -> Vec<Track> {
    vec![track(1, "A"), track(2, "B"), track(3, "C")]
}

fn tracker() -> PlaybackTracker {
    PlaybackTracker::new(Box::new(NullBackend), PlaybackConfig::default())
}

fn current_title(tracker: &PlaybackTracker) -> Option<String> {
    tracker.current_track().map(|t| t.title.clone())
}

fn loaded(tracker: &mut PlaybackTracker, secs: u64) {
    tracker
        .handle_media_event(MediaEvent::MetadataLoaded {
            duration: Duration::from_secs(secs),
        })
        .unwrap();
}

#[derive(Debug, Clone, PartialEq)]
enum Published {
    Track(String),
    State(PlaybackState),
    Position(Duration, Duration),
    Cleared,
}

#[derive(Clone, Default)]
struct RecordingSession {
    log: Arc<Mutex<Vec<Published>>>,
}

impl RecordingSession {
    fn entries(&self) -> Vec<Published> {
        self.log.lock().unwrap().clone()
    }
}

impl MediaSession for RecordingSession {
    fn publish_track(&mut self, track: &Track) -> Result<()> {
        self.log
            .lock()
            .unwrap()
            .push(Published::Track(track.title.clone()));
        Ok(())
    }

    fn publish_state(&mut self, state: PlaybackState) -> Result<()> {
        self.log.lock().unwrap().push(Published::State(state));
        Ok(())
    }

    fn publish_position(&mut self, elapsed: Duration, duration: Duration) -> Result<()> {
        self.log
            .lock()
            .unwrap()
            .push(Published::Position(elapsed, duration));
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.log.lock().unwrap().push(Published::Cleared);
        Ok(())
    }
}

// ===== State machine =====

#[test]
fn toggle_flips_between_playing_and_paused() {
    let mut tracker = tracker();
    let tracks = abc();
    tracker
        .select_track(tracks[0].clone(), CollectionKey::Library, tracks)
        .unwrap();
    loaded(&mut tracker, 180);
    assert_eq!(tracker.state(), PlaybackState::Playing);

    tracker.toggle_play_pause().unwrap();
    assert_eq!(tracker.state(), PlaybackState::Paused);

    tracker.toggle_play_pause().unwrap();
    assert_eq!(tracker.state(), PlaybackState::Playing);
}

#[test]
fn toggle_while_loading_is_remembered() {
    let mut tracker = tracker();
    let tracks = abc();
    tracker
        .select_track(tracks[0].clone(), CollectionKey::Library, tracks)
        .unwrap();

    tracker.toggle_play_pause().unwrap();
    assert_eq!(tracker.state(), PlaybackState::Loading);

    loaded(&mut tracker, 180);
    assert_eq!(tracker.state(), PlaybackState::Paused);
}

#[test]
fn toggle_while_idle_does_nothing() {
    let mut tracker = tracker();
    tracker.toggle_play_pause().unwrap();
    assert_eq!(tracker.state(), PlaybackState::Idle);
    assert!(!tracker.has_pending_events());
}

#[test]
fn external_pause_and_play_are_followed() {
    let mut tracker = tracker();
    let tracks = abc();
    tracker
        .select_track(tracks[0].clone(), CollectionKey::Library, tracks)
        .unwrap();
    loaded(&mut tracker, 180);

    tracker.handle_media_event(MediaEvent::Pause).unwrap();
    assert_eq!(tracker.state(), PlaybackState::Paused);

    tracker.handle_media_event(MediaEvent::Play).unwrap();
    assert_eq!(tracker.state(), PlaybackState::Playing);
}

#[test]
fn events_after_stop_are_ignored() {
    let mut tracker = tracker();
    let tracks = abc();
    tracker
        .select_track(tracks[0].clone(), CollectionKey::Library, tracks)
        .unwrap();
    tracker.stop();

    tracker
        .handle_media_event(MediaEvent::MetadataLoaded {
            duration: Duration::from_secs(100),
        })
        .unwrap();
    tracker.handle_media_event(MediaEvent::Ended).unwrap();

    assert_eq!(tracker.state(), PlaybackState::Idle);
    assert!(tracker.current_track().is_none());
    assert_eq!(tracker.duration(), None);
}

// ===== Navigation =====

#[test]
fn next_wraps_from_last_to_first() {
    let mut tracker = tracker();
    let tracks = abc();
    tracker
        .select_track(tracks[2].clone(), CollectionKey::Library, tracks)
        .unwrap();

    tracker.next().unwrap();
    assert_eq!(current_title(&tracker).as_deref(), Some("A"));
}

#[test]
fn previous_wraps_from_first_to_last() {
    let mut tracker = tracker();
    let tracks = abc();
    tracker
        .select_track(tracks[0].clone(), CollectionKey::Library, tracks)
        .unwrap();

    tracker.previous().unwrap();
    assert_eq!(current_title(&tracker).as_deref(), Some("C"));
}

#[test]
fn single_track_navigation_restarts_it() {
    let mut tracker = tracker();
    let only = vec![track(9, "Only")];
    tracker
        .select_track(only[0].clone(), CollectionKey::Favorites, only)
        .unwrap();
    loaded(&mut tracker, 60);
    tracker
        .handle_media_event(MediaEvent::time_update_secs(30.0, 60.0))
        .unwrap();

    tracker.next().unwrap();
    assert_eq!(current_title(&tracker).as_deref(), Some("Only"));
    assert_eq!(tracker.state(), PlaybackState::Loading);
    assert_eq!(tracker.elapsed(), Duration::ZERO);
}

#[test]
fn ended_advances_to_next_track() {
    let mut tracker = tracker();
    let tracks = abc();
    tracker
        .select_track(tracks[0].clone(), CollectionKey::Library, tracks)
        .unwrap();
    loaded(&mut tracker, 120);
    tracker.drain_events();

    tracker.handle_media_event(MediaEvent::Ended).unwrap();

    assert_eq!(current_title(&tracker).as_deref(), Some("B"));
    let events = tracker.drain_events();
    assert!(events.contains(&PlaybackEvent::TrackChanged {
        track_id: TrackId::from(2),
        previous_track_id: Some(TrackId::from(1)),
    }));
}

#[test]
fn navigation_from_missing_track_steps_from_start() {
    let mut tracker = tracker();
    let outsider = track(42, "Outsider");
    tracker
        .select_track(outsider, CollectionKey::Library, abc())
        .unwrap();

    tracker.next().unwrap();
    assert_eq!(current_title(&tracker).as_deref(), Some("B"));
}

#[test]
fn navigation_over_empty_collection_stops() {
    let mut tracker = tracker();
    let lone = track(5, "Lone");
    tracker
        .select_track(lone, CollectionKey::Library, Vec::new())
        .unwrap();

    tracker.next().unwrap();
    assert_eq!(tracker.state(), PlaybackState::Idle);
    assert!(tracker
        .drain_events()
        .contains(&PlaybackEvent::Stopped {
            reason: StopReason::CollectionEmpty
        }));
}

#[test]
fn swipes_drive_navigation() {
    let mut tracker = tracker();
    let tracks = abc();
    tracker
        .select_track(tracks[1].clone(), CollectionKey::Library, tracks)
        .unwrap();

    let mut gesture = SwipeGesture::new(tracker.config().swipe_threshold_px);
    gesture.begin(50.0);
    let direction = gesture.end(200.0).unwrap();
    tracker.advance(direction).unwrap();
    assert_eq!(current_title(&tracker).as_deref(), Some("A"));

    gesture.begin(200.0);
    assert!(gesture.end(150.0).is_none());
}

// ===== Seeking =====

#[test]
fn seek_clamps_to_track_bounds() {
    let mut tracker = tracker();
    let tracks = abc();
    tracker
        .select_track(tracks[0].clone(), CollectionKey::Library, tracks)
        .unwrap();
    loaded(&mut tracker, 200);

    tracker.seek_to_secs(-5.0).unwrap();
    assert_eq!(tracker.elapsed(), Duration::ZERO);

    tracker.seek_to_secs(500.0).unwrap();
    assert_eq!(tracker.elapsed(), Duration::from_secs(200));

    tracker.seek_to_secs(42.5).unwrap();
    assert_eq!(tracker.elapsed(), Duration::from_millis(42_500));
}

#[test]
fn seek_before_metadata_pins_to_start() {
    let mut tracker = tracker();
    let tracks = abc();
    tracker
        .select_track(tracks[0].clone(), CollectionKey::Library, tracks)
        .unwrap();

    tracker.seek_to_secs(30.0).unwrap();
    assert_eq!(tracker.elapsed(), Duration::ZERO);
}

#[test]
fn seek_while_idle_fails() {
    let mut tracker = tracker();
    assert!(tracker.seek_to_secs(10.0).is_err());
}

#[test]
fn time_updates_never_exceed_duration() {
    let mut tracker = tracker();
    let tracks = abc();
    tracker
        .select_track(tracks[0].clone(), CollectionKey::Library, tracks)
        .unwrap();
    loaded(&mut tracker, 100);

    tracker
        .handle_media_event(MediaEvent::TimeUpdate {
            position: Duration::from_secs(101),
            duration: None,
        })
        .unwrap();

    let snapshot = tracker.snapshot();
    assert_eq!(snapshot.elapsed, Duration::from_secs(100));
    assert_eq!(snapshot.duration, Duration::from_secs(100));
    assert_eq!(snapshot.progress(), 1.0);
}

#[test]
fn snapshot_reports_zero_duration_until_known() {
    let mut tracker = tracker();
    let tracks = abc();
    tracker
        .select_track(tracks[0].clone(), CollectionKey::Library, tracks)
        .unwrap();

    let snapshot = tracker.snapshot();
    assert_eq!(snapshot.state, PlaybackState::Loading);
    assert_eq!(snapshot.duration, Duration::ZERO);
    assert_eq!(snapshot.track.map(|t| t.title), Some("A".to_string()));
}

// ===== Reconciliation =====

#[test]
fn removing_current_favorite_stops_playback() {
    let mut tracker = tracker();
    let favorites = abc();
    tracker
        .select_track(favorites[1].clone(), CollectionKey::Favorites, favorites)
        .unwrap();
    loaded(&mut tracker, 200);

    let refreshed = vec![track(1, "A"), track(3, "C")];
    let outcome = tracker.reconcile(&CollectionKey::Favorites, &refreshed);

    assert_eq!(outcome, Reconciliation::Stopped);
    assert_eq!(tracker.state(), PlaybackState::Idle);
    assert!(tracker.current_track().is_none());
    assert!(tracker.active_key().is_none());
    assert!(tracker
        .drain_events()
        .contains(&PlaybackEvent::Stopped {
            reason: StopReason::TrackRemoved
        }));
}

#[test]
fn removing_other_track_keeps_playing_and_updates_navigation() {
    let mut tracker = tracker();
    let favorites = abc();
    tracker
        .select_track(favorites[0].clone(), CollectionKey::Favorites, favorites)
        .unwrap();
    loaded(&mut tracker, 200);

    let refreshed = vec![track(1, "A"), track(3, "C")];
    let outcome = tracker.reconcile(&CollectionKey::Favorites, &refreshed);

    assert_eq!(outcome, Reconciliation::Unaffected);
    assert_eq!(tracker.state(), PlaybackState::Playing);

    tracker.next().unwrap();
    assert_eq!(current_title(&tracker).as_deref(), Some("C"));
}

#[test]
fn library_filter_change_dropping_current_stops() {
    let mut tracker = tracker();
    let tracks = abc();
    tracker
        .select_track(tracks[0].clone(), CollectionKey::Library, tracks)
        .unwrap();

    let rock_only = vec![track(7, "Rock")];
    assert_eq!(
        tracker.reconcile(&CollectionKey::Library, &rock_only),
        Reconciliation::Stopped
    );
}

#[test]
fn playlist_edit_only_affects_that_playlist() {
    let mut tracker = tracker();
    let tracks = abc();
    let key = CollectionKey::Playlist(PlaylistId::from(3));
    tracker
        .select_track(tracks[0].clone(), key.clone(), tracks)
        .unwrap();

    assert_eq!(
        tracker.reconcile(&CollectionKey::Favorites, &[]),
        Reconciliation::NotActive
    );
    assert_eq!(tracker.state(), PlaybackState::Loading);

    assert_eq!(tracker.reconcile(&key, &[]), Reconciliation::Stopped);
}

// ===== Media session =====

#[test]
fn media_session_follows_playback() {
    let session = RecordingSession::default();
    let mut tracker = tracker().with_session(Box::new(session.clone()));
    let tracks = abc();

    tracker
        .select_track(tracks[0].clone(), CollectionKey::Library, tracks)
        .unwrap();
    loaded(&mut tracker, 90);
    tracker
        .handle_media_event(MediaEvent::time_update_secs(10.0, 90.0))
        .unwrap();
    tracker.stop();

    let log = session.entries();
    assert_eq!(log.first(), Some(&Published::Track("A".to_string())));
    assert!(log.contains(&Published::State(PlaybackState::Playing)));
    assert!(log.contains(&Published::Position(
        Duration::from_secs(10),
        Duration::from_secs(90)
    )));
    assert_eq!(log.last(), Some(&Published::Cleared));
}

#[test]
fn short_tracks_publish_no_position() {
    let session = RecordingSession::default();
    let mut tracker = tracker().with_session(Box::new(session.clone()));
    let tracks = abc();

    tracker
        .select_track(tracks[0].clone(), CollectionKey::Library, tracks)
        .unwrap();
    tracker
        .handle_media_event(MediaEvent::MetadataLoaded {
            duration: Duration::from_millis(800),
        })
        .unwrap();
    tracker
        .handle_media_event(MediaEvent::time_update_secs(0.5, 0.8))
        .unwrap();

    assert!(!session
        .entries()
        .iter()
        .any(|p| matches!(p, Published::Position(..))));
}

#[test]
fn media_commands_use_in_app_transitions() {
    let mut tracker = tracker();
    let tracks = abc();
    tracker
        .select_track(tracks[0].clone(), CollectionKey::Library, tracks)
        .unwrap();
    loaded(&mut tracker, 120);

    tracker.handle_command(MediaCommand::Pause).unwrap();
    assert_eq!(tracker.state(), PlaybackState::Paused);

    tracker.handle_command(MediaCommand::Toggle).unwrap();
    assert_eq!(tracker.state(), PlaybackState::Playing);

    tracker
        .handle_command(MediaCommand::SeekTo(Duration::from_secs(500)))
        .unwrap();
    assert_eq!(tracker.elapsed(), Duration::from_secs(120));

    tracker.handle_command(MediaCommand::Previous).unwrap();
    assert_eq!(current_title(&tracker).as_deref(), Some("C"));

    tracker.handle_command(MediaCommand::Stop).unwrap();
    assert_eq!(tracker.state(), PlaybackState::Idle);
}
