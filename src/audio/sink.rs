//! Utilities for creating `rodio` sinks from audio locators.
//!
//! The helpers here encapsulate opening/decoding a file and preparing a
//! paused `Sink` at the requested start position.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::file::AudioFile;
use rodio::{Decoder, OutputStream, Sink, Source};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("no audio output device: {0}")]
    NoOutput(String),

    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
}

/// An opened source: a paused sink plus the total length when known.
pub(super) struct Opened {
    pub sink: Sink,
    pub duration: Option<Duration>,
}

/// Read the total length from the file's tags/properties.
pub(super) fn probe_duration(path: &Path) -> Option<Duration> {
    let tagged = lofty::read_from_path(path).ok()?;
    let d = tagged.properties().duration();
    if d.is_zero() { None } else { Some(d) }
}

/// Create a paused `Sink` for `src` that starts playback at `start_at`.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    src: &Path,
    start_at: Duration,
) -> Result<Opened, MediaError> {
    let file = File::open(src).map_err(|source| MediaError::Open {
        path: src.to_path_buf(),
        source,
    })?;

    let decoder = Decoder::new(BufReader::new(file)).map_err(|e| MediaError::Decode {
        path: src.to_path_buf(),
        reason: e.to_string(),
    })?;

    let duration = probe_duration(src).or_else(|| decoder.total_duration());
    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    let source = decoder.skip_duration(start_at);

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok(Opened { sink, duration })
}
