//! Audio-related small types: commands, events and the media handle seam.
//!
//! The audio thread plays the role of a single media element. It is driven
//! by `AudioCmd`s and reports back with `MediaEvent`s tagged with the
//! `LoadId` of the load they belong to, so late events from a superseded
//! load can be told apart from current ones.

use std::path::PathBuf;
use std::time::Duration;

/// Monotonic id of a load request. Newer loads supersede older ones.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LoadId(pub u64);

impl LoadId {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[derive(Debug)]
pub enum AudioCmd {
    /// Bind `src`, reset the position to zero, apply `volume` and start playing.
    Load {
        load: LoadId,
        src: PathBuf,
        volume: f32,
    },
    /// Resume the bound source (restarts it if it already ended).
    Play,
    /// Pause the bound source.
    Pause,
    /// Jump to an absolute position; clamped to the source length.
    Seek(Duration),
    /// Set output volume in `[0, 1]`.
    SetVolume(f32),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Asynchronous notifications from the audio thread.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// The source was opened; `duration` is its total length when known.
    MetadataReady {
        load: LoadId,
        duration: Option<Duration>,
    },
    Playing { load: LoadId },
    Paused { load: LoadId },
    /// Periodic position report while playing, and after seeks.
    Position { load: LoadId, elapsed: Duration },
    /// The play request could not be honored.
    Rejected { load: LoadId, reason: String },
    /// Playback reached the end of the source.
    Ended { load: LoadId },
}

impl MediaEvent {
    pub fn load(&self) -> LoadId {
        match self {
            Self::MetadataReady { load, .. }
            | Self::Playing { load }
            | Self::Paused { load }
            | Self::Position { load, .. }
            | Self::Rejected { load, .. }
            | Self::Ended { load } => *load,
        }
    }
}

/// A single-track media handle. Requests are fire-and-forget; their outcome
/// arrives later as `MediaEvent`s.
pub trait MediaHandle {
    fn load(&self, load: LoadId, src: PathBuf, volume: f32);
    fn play(&self);
    fn pause(&self);
    fn seek(&self, to: Duration);
    fn set_volume(&self, volume: f32);
    /// Stop the handle for good; may block while fading out.
    fn shutdown(&self, _fade_out: Duration) {}
}
