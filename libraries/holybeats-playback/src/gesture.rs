//! Swipe navigation for the full-screen player

use crate::types::Direction;

/// Horizontal swipe recognizer
///
/// Swiping right past the threshold goes back a track, swiping left goes
/// forward. Shorter movements are taps or scrolls and change nothing.
#[derive(Debug, Clone)]
pub struct SwipeGesture {
    threshold_px: f32,
    start_x: Option<f32>,
}

impl SwipeGesture {
    pub fn new(threshold_px: f32) -> Self {
        Self {
            threshold_px: threshold_px.abs(),
            start_x: None,
        }
    }

    /// Touch started at `x`
    pub fn begin(&mut self, x: f32) {
        self.start_x = Some(x);
    }

    /// Touch ended at `x`; returns the navigation it asks for, if any
    pub fn end(&mut self, x: f32) -> Option<Direction> {
        let start = self.start_x.take()?;
        let dx = x - start;
        if dx > self.threshold_px {
            Some(Direction::Previous)
        } else if dx < -self.threshold_px {
            Some(Direction::Next)
        } else {
            None
        }
    }
}

impl Default for SwipeGesture {
    fn default() -> Self {
        Self::new(crate::types::PlaybackConfig::default().swipe_threshold_px)
    }
}
