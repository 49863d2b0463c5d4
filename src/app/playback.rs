//! The playback controller: the single active-track cursor and the media
//! handle it drives.

use std::time::Duration;

use thiserror::Error;

use crate::audio::{LoadId, MediaEvent, MediaHandle};
use crate::catalog::{Catalog, Track, VisibleSet};
use crate::config::EndOfTrackSetting;

/// The playback state of the application.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing has been loaded yet.
    #[default]
    Idle,
    Paused,
    Playing,
}

/// Where the active track comes from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Slot {
    /// Position in the full catalog.
    Catalog(usize),
    Featured,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("\"{title}\" has no audio source")]
    MissingSource { title: String },
}

/// What happened to a media event handed to the controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reconciled {
    Applied,
    /// The event belongs to a superseded load and was dropped.
    Stale,
    /// The media handle refused to play the current load.
    Rejected(String),
}

pub struct PlaybackController {
    media: Box<dyn MediaHandle>,
    active: Option<Slot>,
    /// Navigation cursor into the full catalog, used by next/prev.
    cursor: Option<usize>,
    state: PlaybackState,
    volume: f32,
    position: Duration,
    duration: Option<Duration>,
    current_load: Option<LoadId>,
    last_load: LoadId,
    end_of_track: EndOfTrackSetting,
}

impl PlaybackController {
    pub fn new(media: Box<dyn MediaHandle>, volume: f32, end_of_track: EndOfTrackSetting) -> Self {
        Self {
            media,
            active: None,
            cursor: None,
            state: PlaybackState::Idle,
            volume: volume.clamp(0.0, 1.0),
            position: Duration::ZERO,
            duration: None,
            current_load: None,
            last_load: LoadId::default(),
            end_of_track,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn active(&self) -> Option<Slot> {
        self.active
    }

    pub fn current_load(&self) -> Option<LoadId> {
        self.current_load
    }

    pub fn active_track<'a>(&self, catalog: &'a Catalog) -> Option<&'a Track> {
        self.active.and_then(|s| resolve(catalog, s))
    }

    /// Play the track shown at row `index` of `visible`. Out-of-range rows
    /// are ignored.
    pub fn play_by_visible_index(
        &mut self,
        catalog: &Catalog,
        visible: &VisibleSet,
        index: usize,
    ) -> Result<(), PlaybackError> {
        let Some(pos) = visible.get(index).and_then(|id| catalog.position(id)) else {
            return Ok(());
        };
        self.cursor = Some(pos);
        self.load_and_play(catalog, Slot::Catalog(pos))
    }

    pub fn play_featured(&mut self, catalog: &Catalog) -> Result<(), PlaybackError> {
        self.load_and_play(catalog, Slot::Featured)
    }

    /// Bind the media handle to the slot's source and request playback.
    ///
    /// A track without a source leaves every piece of state untouched.
    pub fn load_and_play(&mut self, catalog: &Catalog, slot: Slot) -> Result<(), PlaybackError> {
        let Some(track) = resolve(catalog, slot) else {
            return Ok(());
        };
        let Some(src) = track.src.clone() else {
            return Err(PlaybackError::MissingSource {
                title: track.title.clone(),
            });
        };

        self.last_load = self.last_load.next();
        let load = self.last_load;
        tracing::debug!(?load, id = %track.id, "load and play");

        self.current_load = Some(load);
        self.active = Some(slot);
        self.state = PlaybackState::Paused;
        self.position = Duration::ZERO;
        self.duration = None;
        self.media.load(load, src, self.volume);
        Ok(())
    }

    /// Toggle the bound track, or start the first visible row when nothing
    /// has been loaded.
    pub fn toggle_play_pause(
        &mut self,
        catalog: &Catalog,
        visible: &VisibleSet,
    ) -> Result<(), PlaybackError> {
        if self.current_load.is_none() {
            return self.play_by_visible_index(catalog, visible, 0);
        }
        if self.is_playing() {
            self.media.pause();
        } else {
            self.media.play();
        }
        Ok(())
    }

    pub fn play(&mut self) {
        if self.current_load.is_some() && !self.is_playing() {
            self.media.play();
        }
    }

    pub fn pause(&mut self) {
        if self.is_playing() {
            self.media.pause();
        }
    }

    /// Step the cursor through the whole catalog, wrapping at both ends, and
    /// load the track it lands on.
    ///
    /// The cursor moves even when that track cannot be played, so a broken
    /// entry never traps next/prev.
    pub fn advance(&mut self, catalog: &Catalog, dir: Direction) -> Result<(), PlaybackError> {
        let len = catalog.len();
        if len == 0 {
            return Ok(());
        }
        let next = match (self.cursor, dir) {
            (None, Direction::Next) => 0,
            (None, Direction::Prev) => len - 1,
            (Some(c), Direction::Next) => (c + 1) % len,
            (Some(c), Direction::Prev) => (c + len - 1) % len,
        };
        self.cursor = Some(next);
        self.load_and_play(catalog, Slot::Catalog(next))
    }

    /// Jump to `to`, clamped to the known duration.
    pub fn seek(&mut self, to: Duration) {
        if self.current_load.is_none() {
            return;
        }
        let to = match self.duration {
            Some(d) => to.min(d),
            None => to,
        };
        self.position = to;
        self.media.seek(to);
    }

    /// Seek to `fraction` of the track (clamped to `[0, 1]`). Needs a known
    /// duration.
    pub fn seek_fraction(&mut self, fraction: f64) {
        if let Some(d) = self.duration {
            self.seek(d.mul_f64(fraction.clamp(0.0, 1.0)));
        }
    }

    /// Move the position by `delta` seconds in either direction.
    pub fn scrub(&mut self, delta: i64) {
        let step = Duration::from_secs(delta.unsigned_abs());
        let to = if delta < 0 {
            self.position.saturating_sub(step)
        } else {
            self.position.saturating_add(step)
        };
        self.seek(to);
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.media.set_volume(self.volume);
    }

    /// Fold a media event into the playback state. Events from any load but
    /// the latest are dropped.
    pub fn handle_event(
        &mut self,
        catalog: &Catalog,
        ev: MediaEvent,
    ) -> Result<Reconciled, PlaybackError> {
        if self.current_load != Some(ev.load()) {
            tracing::trace!(?ev, "stale media event");
            return Ok(Reconciled::Stale);
        }

        match ev {
            MediaEvent::MetadataReady { duration, .. } => {
                if duration.is_some() {
                    self.duration = duration;
                }
            }
            MediaEvent::Playing { .. } => self.state = PlaybackState::Playing,
            MediaEvent::Paused { .. } => self.state = PlaybackState::Paused,
            MediaEvent::Position { elapsed, .. } => self.position = elapsed,
            MediaEvent::Rejected { reason, .. } => {
                tracing::warn!("playback rejected: {reason}");
                self.state = PlaybackState::Paused;
                return Ok(Reconciled::Rejected(reason));
            }
            MediaEvent::Ended { .. } => match self.end_of_track {
                EndOfTrackSetting::Stop => {
                    self.state = PlaybackState::Paused;
                    if let Some(d) = self.duration {
                        self.position = d;
                    }
                }
                EndOfTrackSetting::Advance => {
                    self.state = PlaybackState::Paused;
                    self.advance(catalog, Direction::Next)?;
                }
                EndOfTrackSetting::Repeat => {
                    self.position = Duration::ZERO;
                    self.media.play();
                }
            },
        }
        Ok(Reconciled::Applied)
    }

    /// Stop the media handle, fading out over `fade_out`.
    pub fn shutdown(&self, fade_out: Duration) {
        self.media.shutdown(fade_out);
    }
}

fn resolve(catalog: &Catalog, slot: Slot) -> Option<&Track> {
    match slot {
        Slot::Catalog(pos) => catalog.track_at(pos),
        Slot::Featured => Some(&catalog.featured().track),
    }
}
