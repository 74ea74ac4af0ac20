//! OS media controls via souvlaki (MPRIS, SMTC, Now Playing)

use crate::error::{PlaybackError, Result};
use crate::events::secs_to_duration;
use crate::session::{MediaCommand, MediaSession};
use crate::types::PlaybackState;
use holybeats_core::Track;
use souvlaki::{
    MediaControlEvent, MediaControls, MediaMetadata, MediaPlayback, MediaPosition, PlatformConfig,
};
use std::sync::mpsc::Sender;
use std::time::Duration;

const DBUS_NAME: &str = "holybeats";
const ARTIST: &str = "Holy Beats";

/// Media session backed by the platform's media controls
///
/// Commands from media keys or the lock screen are forwarded to `commands`;
/// the owner feeds them to [`crate::PlaybackTracker::handle_command`].
pub struct OsMediaControls {
    controls: MediaControls,
    state: PlaybackState,
}

impl OsMediaControls {
    pub fn new(display_name: &str, commands: Sender<MediaCommand>) -> Result<Self> {
        let config = PlatformConfig {
            dbus_name: DBUS_NAME,
            display_name,
            hwnd: None,
        };

        let mut controls = MediaControls::new(config).map_err(session_error)?;
        controls
            .attach(move |event| {
                if let Some(command) = map_event(event) {
                    if commands.send(command).is_err() {
                        tracing::debug!("Media command receiver dropped");
                    }
                }
            })
            .map_err(session_error)?;

        tracing::info!("OS media controls attached");
        Ok(Self {
            controls,
            state: PlaybackState::Idle,
        })
    }

    fn playback(&self, progress: Option<MediaPosition>) -> MediaPlayback {
        match self.state {
            PlaybackState::Idle => MediaPlayback::Stopped,
            PlaybackState::Paused => MediaPlayback::Paused { progress },
            PlaybackState::Loading | PlaybackState::Playing => MediaPlayback::Playing { progress },
        }
    }
}

impl MediaSession for OsMediaControls {
    fn publish_track(&mut self, track: &Track) -> Result<()> {
        self.controls
            .set_metadata(MediaMetadata {
                title: Some(&track.title),
                artist: Some(ARTIST),
                duration: track.duration_seconds.and_then(secs_to_duration),
                ..Default::default()
            })
            .map_err(session_error)
    }

    fn publish_state(&mut self, state: PlaybackState) -> Result<()> {
        self.state = state;
        let playback = self.playback(None);
        self.controls.set_playback(playback).map_err(session_error)
    }

    fn publish_position(&mut self, elapsed: Duration, _duration: Duration) -> Result<()> {
        let playback = self.playback(Some(MediaPosition(elapsed)));
        self.controls.set_playback(playback).map_err(session_error)
    }

    fn clear(&mut self) -> Result<()> {
        self.state = PlaybackState::Idle;
        self.controls
            .set_playback(MediaPlayback::Stopped)
            .map_err(session_error)
    }
}

fn map_event(event: MediaControlEvent) -> Option<MediaCommand> {
    match event {
        MediaControlEvent::Play => Some(MediaCommand::Play),
        MediaControlEvent::Pause => Some(MediaCommand::Pause),
        MediaControlEvent::Toggle => Some(MediaCommand::Toggle),
        MediaControlEvent::Next => Some(MediaCommand::Next),
        MediaControlEvent::Previous => Some(MediaCommand::Previous),
        MediaControlEvent::Stop => Some(MediaCommand::Stop),
        MediaControlEvent::SetPosition(MediaPosition(position)) => {
            Some(MediaCommand::SeekTo(position))
        }
        _ => None,
    }
}

fn session_error(error: souvlaki::Error) -> PlaybackError {
    PlaybackError::MediaSession(error.to_string())
}
