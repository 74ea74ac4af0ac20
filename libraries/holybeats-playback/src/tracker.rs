//! Playback position tracker
//!
//! Owns the single current track, the collection it was selected from and
//! the elapsed/duration pair, and reconciles them with notifications coming
//! back from the media backend.
//!
//! State machine:
//!
//! ```text
//! Idle --select--> Loading --metadata--> Playing <--toggle--> Paused
//!  ^                  |                     |                   |
//!  +------- stop / current track removed / empty collection ----+
//! ```

use crate::backend::MediaBackend;
use crate::error::{PlaybackError, Result};
use crate::events::{secs_to_duration, MediaEvent, PlaybackEvent};
use crate::session::{MediaCommand, MediaSession};
use crate::types::{Direction, PlaybackConfig, PlaybackSnapshot, PlaybackState, StopReason};
use holybeats_core::{CollectionKey, Track, TrackId};
use std::time::Duration;

/// Single source of truth for what is playing
pub struct PlaybackTracker {
    state: PlaybackState,
    current: Option<Track>,

    // Collection the current track was selected from
    active_key: Option<CollectionKey>,
    active_tracks: Vec<Track>,

    elapsed: Duration,
    duration: Option<Duration>,

    // Whether output should run once metadata arrives
    play_when_ready: bool,

    backend: Box<dyn MediaBackend>,
    session: Option<Box<dyn MediaSession>>,
    config: PlaybackConfig,

    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackTracker {
    /// Create an idle tracker driving `backend`
    pub fn new(backend: Box<dyn MediaBackend>, config: PlaybackConfig) -> Self {
        Self {
            state: PlaybackState::Idle,
            current: None,
            active_key: None,
            active_tracks: Vec::new(),
            elapsed: Duration::ZERO,
            duration: None,
            play_when_ready: false,
            backend,
            session: None,
            config,
            pending_events: Vec::new(),
        }
    }

    /// Attach an OS media session
    pub fn with_session(mut self, session: Box<dyn MediaSession>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn set_session(&mut self, session: Option<Box<dyn MediaSession>>) {
        self.session = session;
    }

    // ===== Selection =====

    /// Make `track` current, remembering the collection it came from
    ///
    /// Replaces any previous track and stream. Playback starts as soon as
    /// the backend reports metadata.
    pub fn select_track(
        &mut self,
        track: Track,
        key: CollectionKey,
        tracks: Vec<Track>,
    ) -> Result<()> {
        tracing::debug!(track_id = %track.id, collection = %key, "Selecting track");
        self.active_key = Some(key);
        self.active_tracks = tracks;
        self.start(track)
    }

    fn start(&mut self, track: Track) -> Result<()> {
        if self.current.is_some() {
            if let Err(e) = self.backend.pause() {
                tracing::warn!(error = %e, "Failed to pause previous stream");
            }
        }

        let previous_track_id = self.current.as_ref().map(|t| t.id.clone());
        let track_id = track.id.clone();
        let url = track.url.clone();

        self.current = Some(track);
        self.elapsed = Duration::ZERO;
        self.duration = None;
        self.play_when_ready = true;
        self.emit_track_changed(track_id, previous_track_id);
        self.publish_track();
        self.set_state(PlaybackState::Loading);

        let started = self.backend.load(&url).and_then(|()| self.backend.play());
        if let Err(e) = started {
            tracing::error!(error = %e, url = %url, "Failed to start track");
            self.emit_error(e.to_string());
            self.stop_with(StopReason::Closed);
            return Err(e);
        }

        Ok(())
    }

    // ===== Media backend notifications =====

    /// Apply a notification from the media backend
    ///
    /// Notifications arriving while idle belong to a stream that was already
    /// stopped and are ignored.
    pub fn handle_media_event(&mut self, event: MediaEvent) -> Result<()> {
        if self.state == PlaybackState::Idle {
            tracing::trace!(?event, "Ignoring media event while idle");
            return Ok(());
        }

        match event {
            MediaEvent::MetadataLoaded { duration } => {
                self.learn_duration(Some(duration));
                if self.state == PlaybackState::Loading {
                    let next = if self.play_when_ready {
                        PlaybackState::Playing
                    } else {
                        PlaybackState::Paused
                    };
                    self.set_state(next);
                }
                self.emit_position_update();
            }
            MediaEvent::TimeUpdate { position, duration } => {
                self.learn_duration(duration);
                self.elapsed = self.clamp_to_duration(position);
                self.emit_position_update();
            }
            MediaEvent::Ended => {
                tracing::debug!("Track ended, advancing");
                return self.advance(Direction::Next);
            }
            MediaEvent::Play => match self.state {
                PlaybackState::Loading => self.play_when_ready = true,
                PlaybackState::Paused => self.set_state(PlaybackState::Playing),
                _ => {}
            },
            MediaEvent::Pause => match self.state {
                PlaybackState::Loading => self.play_when_ready = false,
                PlaybackState::Playing => self.set_state(PlaybackState::Paused),
                _ => {}
            },
        }

        Ok(())
    }

    fn learn_duration(&mut self, duration: Option<Duration>) {
        if let Some(duration) = duration.filter(|d| !d.is_zero()) {
            self.duration = Some(duration);
            self.elapsed = self.elapsed.min(duration);
        }
    }

    fn clamp_to_duration(&self, position: Duration) -> Duration {
        match self.duration {
            Some(duration) => position.min(duration),
            None => position,
        }
    }

    // ===== Transport =====

    /// Playing <-> Paused; records the intent while loading
    pub fn toggle_play_pause(&mut self) -> Result<()> {
        match self.state {
            PlaybackState::Idle => Ok(()),
            PlaybackState::Loading => {
                if self.play_when_ready {
                    self.pause()
                } else {
                    self.play()
                }
            }
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused => self.play(),
        }
    }

    pub fn play(&mut self) -> Result<()> {
        match self.state {
            PlaybackState::Idle | PlaybackState::Playing => Ok(()),
            PlaybackState::Loading => {
                self.play_when_ready = true;
                self.backend.play()
            }
            PlaybackState::Paused => {
                self.backend.play()?;
                self.set_state(PlaybackState::Playing);
                Ok(())
            }
        }
    }

    pub fn pause(&mut self) -> Result<()> {
        match self.state {
            PlaybackState::Idle | PlaybackState::Paused => Ok(()),
            PlaybackState::Loading => {
                self.play_when_ready = false;
                self.backend.pause()
            }
            PlaybackState::Playing => {
                self.backend.pause()?;
                self.set_state(PlaybackState::Paused);
                Ok(())
            }
        }
    }

    /// Move to the neighbouring track of the active collection, wrapping
    ///
    /// If the current track is no longer in the collection the step is taken
    /// from index 0. An empty collection stops playback.
    pub fn advance(&mut self, direction: Direction) -> Result<()> {
        let len = self.active_tracks.len();
        let index = self
            .current
            .as_ref()
            .and_then(|current| self.active_tracks.iter().position(|t| t.id == current.id))
            .unwrap_or(0);

        let Some(next) = direction.step(index, len) else {
            if self.state != PlaybackState::Idle {
                self.stop_with(StopReason::CollectionEmpty);
            }
            return Ok(());
        };

        let track = self.active_tracks[next].clone();
        self.start(track)
    }

    pub fn next(&mut self) -> Result<()> {
        self.advance(Direction::Next)
    }

    pub fn previous(&mut self) -> Result<()> {
        self.advance(Direction::Previous)
    }

    /// Seek to a position given in seconds
    ///
    /// Negative or non-finite input seeks to 0; input past the duration
    /// seeks to the end. Before the duration is known the only valid
    /// position is 0.
    pub fn seek_to_secs(&mut self, secs: f64) -> Result<()> {
        self.seek_to(secs_to_duration(secs).unwrap_or(Duration::ZERO))
    }

    /// Seek to `position`, clamped to `[0, duration]`
    pub fn seek_to(&mut self, position: Duration) -> Result<()> {
        if self.state == PlaybackState::Idle {
            return Err(PlaybackError::NoTrackLoaded);
        }

        let target = position.min(self.duration.unwrap_or(Duration::ZERO));
        self.backend.seek(target)?;
        self.elapsed = target;
        self.emit_position_update();
        Ok(())
    }

    /// Close the player
    pub fn stop(&mut self) {
        self.stop_with(StopReason::Closed);
    }

    pub(crate) fn stop_with(&mut self, reason: StopReason) {
        if self.state == PlaybackState::Idle && self.current.is_none() {
            return;
        }

        tracing::debug!(?reason, "Stopping playback");
        if let Err(e) = self.backend.pause() {
            tracing::warn!(error = %e, "Failed to pause stream on stop");
        }
        self.backend.release();

        self.current = None;
        self.active_key = None;
        self.active_tracks.clear();
        self.elapsed = Duration::ZERO;
        self.duration = None;
        self.play_when_ready = false;

        self.pending_events.push(PlaybackEvent::Stopped { reason });
        self.set_state(PlaybackState::Idle);
        self.notify_session(|session| session.clear());
    }

    /// Route a command from the OS media session through the same transitions
    pub fn handle_command(&mut self, command: MediaCommand) -> Result<()> {
        tracing::debug!(?command, "Media session command");
        match command {
            MediaCommand::Play => self.play(),
            MediaCommand::Pause => self.pause(),
            MediaCommand::Toggle => self.toggle_play_pause(),
            MediaCommand::Next => self.next(),
            MediaCommand::Previous => self.previous(),
            MediaCommand::Stop => {
                self.stop();
                Ok(())
            }
            MediaCommand::SeekTo(position) => self.seek_to(position),
        }
    }

    // ===== Queries =====

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    pub fn active_key(&self) -> Option<&CollectionKey> {
        self.active_key.as_ref()
    }

    pub fn active_tracks(&self) -> &[Track] {
        &self.active_tracks
    }

    pub(crate) fn replace_active_tracks(&mut self, tracks: Vec<Track>) {
        self.active_tracks = tracks;
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Duration reported by the backend, `None` until metadata arrives
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// What the player should render right now
    pub fn snapshot(&self) -> PlaybackSnapshot {
        let duration = self.duration.unwrap_or(Duration::ZERO);
        let elapsed = if self.duration.is_some() {
            self.elapsed.min(duration)
        } else {
            self.elapsed
        };
        PlaybackSnapshot {
            state: self.state,
            track: self.current.clone(),
            elapsed,
            duration,
        }
    }

    // ===== Events =====

    /// Take all events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state == state {
            return;
        }
        self.state = state;
        self.pending_events.push(PlaybackEvent::StateChanged { state });
        if state != PlaybackState::Idle {
            self.notify_session(|session| session.publish_state(state));
        }
    }

    fn emit_track_changed(
        &mut self,
        track_id: TrackId,
        previous_track_id: Option<TrackId>,
    ) {
        self.pending_events.push(PlaybackEvent::TrackChanged {
            track_id,
            previous_track_id,
        });
    }

    fn emit_error(&mut self, message: String) {
        self.pending_events.push(PlaybackEvent::Error { message });
    }

    fn emit_position_update(&mut self) {
        let snapshot = self.snapshot();
        self.pending_events.push(PlaybackEvent::PositionUpdate {
            elapsed_ms: snapshot.elapsed.as_millis() as u64,
            duration_ms: snapshot.duration.as_millis() as u64,
        });

        if snapshot.duration > self.config.min_session_duration {
            self.notify_session(|session| {
                session.publish_position(snapshot.elapsed, snapshot.duration)
            });
        }
    }

    fn publish_track(&mut self) {
        if let Some(track) = self.current.clone() {
            self.notify_session(|session| session.publish_track(&track));
        }
    }

    fn notify_session(&mut self, f: impl FnOnce(&mut dyn MediaSession) -> Result<()>) {
        if let Some(session) = self.session.as_deref_mut() {
            if let Err(e) = f(session) {
                tracing::warn!(error = %e, "Media session update failed");
            }
        }
    }
}

impl std::fmt::Debug for PlaybackTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackTracker")
            .field("state", &self.state)
            .field("current", &self.current.as_ref().map(|t| &t.id))
            .field("active_key", &self.active_key)
            .field("active_tracks", &self.active_tracks.len())
            .field("elapsed", &self.elapsed)
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}
