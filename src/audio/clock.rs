//! Playback position accounting.
//!
//! rodio does not report a position for sources built with `skip_duration`,
//! so the audio thread tracks elapsed time itself: time accumulated while
//! paused plus the time since the last resume.

use std::time::{Duration, Instant};

#[derive(Debug, Default, Clone)]
pub(crate) struct PlaybackClock {
    accumulated: Duration,
    started_at: Option<Instant>,
}

impl PlaybackClock {
    /// Stop the clock and set the position to `at`.
    pub fn reset(&mut self, at: Duration) {
        self.accumulated = at;
        self.started_at = None;
    }

    pub fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    pub fn pause(&mut self) {
        if let Some(st) = self.started_at.take() {
            self.accumulated += st.elapsed();
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }
}

/// Clamp a seek target into `[0, duration]`; unknown durations only bound below.
pub(crate) fn clamp_seek(to: Duration, duration: Option<Duration>) -> Duration {
    match duration {
        Some(d) => to.min(d),
        None => to,
    }
}
