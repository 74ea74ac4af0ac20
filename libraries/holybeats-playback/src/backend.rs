//! Platform-agnostic media backend trait
//!
//! Abstracts the single playable stream (an `<audio>` element, a native
//! player, a test double). The tracker is its only caller.

use crate::error::Result;
use std::time::Duration;

/// One decodable/playable stream at a time
///
/// Commands are fire-and-forget: the backend reports their effect later
/// through [`crate::MediaEvent`]s (metadata loaded, time updates, end of
/// track).
#[cfg_attr(test, mockall::automock)]
pub trait MediaBackend: Send {
    /// Replace the current stream with the media at `url` and start loading it
    fn load(&mut self, url: &str) -> Result<()>;

    /// Start or resume output
    fn play(&mut self) -> Result<()>;

    /// Pause output, keeping the stream loaded
    fn pause(&mut self) -> Result<()>;

    /// Jump to `position` from the start of the stream
    fn seek(&mut self, position: Duration) -> Result<()>;

    /// Drop the stream and any resources held for it
    fn release(&mut self);
}

/// Backend that accepts every command and plays nothing
///
/// Used where no audio output exists (headless tools, CLI listings).
#[derive(Debug, Default)]
pub struct NullBackend;

impl MediaBackend for NullBackend {
    fn load(&mut self, _url: &str) -> Result<()> {
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        Ok(())
    }

    fn seek(&mut self, _position: Duration) -> Result<()> {
        Ok(())
    }

    fn release(&mut self) {}
}
