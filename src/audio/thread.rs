use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use super::clock::{PlaybackClock, clamp_seek};
use super::sink::{MediaError, create_sink_at};
use super::types::{AudioCmd, LoadId, MediaEvent};

/// How often position updates and end-of-track checks run.
const TICK: Duration = Duration::from_millis(200);

/// The source currently bound to the thread.
struct Bound {
    load: LoadId,
    src: PathBuf,
    duration: Option<Duration>,
    /// `None` when opening the source failed.
    sink: Option<Sink>,
    ended: bool,
}

struct AudioThread {
    stream: Result<OutputStream, String>,
    events: Sender<MediaEvent>,
    bound: Option<Bound>,
    clock: PlaybackClock,
    volume: f32,
}

impl AudioThread {
    fn emit(&self, ev: MediaEvent) {
        let _ = self.events.send(ev);
    }

    fn reject(&self, load: LoadId, err: MediaError) {
        tracing::warn!(?load, "playback rejected: {err}");
        self.emit(MediaEvent::Rejected {
            load,
            reason: err.to_string(),
        });
    }

    /// Replace the bound sink with a fresh one positioned at `at`, paused.
    fn reopen_at(&mut self, at: Duration) -> Result<(), MediaError> {
        let stream = self
            .stream
            .as_ref()
            .map_err(|e| MediaError::NoOutput(e.clone()))?;
        let Some(b) = self.bound.as_mut() else {
            return Ok(());
        };

        if let Some(old) = b.sink.take() {
            old.stop();
        }
        let opened = create_sink_at(stream, &b.src, at)?;
        opened.sink.set_volume(self.volume);
        if b.duration.is_none() {
            b.duration = opened.duration;
        }
        b.sink = Some(opened.sink);
        b.ended = false;
        self.clock.reset(at);
        Ok(())
    }

    fn resume(&mut self) {
        let Some(load) = self.bound.as_ref().map(|b| b.load) else {
            return;
        };
        if let Some(b) = self.bound.as_ref() {
            if let (Some(s), false) = (b.sink.as_ref(), b.ended) {
                s.play();
                self.clock.start();
                self.emit(MediaEvent::Playing { load });
                return;
            }
        }

        // Nothing playable is bound (previous open failed, or the track ended):
        // start over from the beginning.
        match self.reopen_at(Duration::ZERO) {
            Ok(()) => {
                if let Some(s) = self.bound.as_ref().and_then(|b| b.sink.as_ref()) {
                    s.play();
                }
                self.clock.start();
                self.emit(MediaEvent::Playing { load });
            }
            Err(e) => self.reject(load, e),
        }
    }

    fn handle(&mut self, cmd: AudioCmd) -> bool {
        match cmd {
            AudioCmd::Load { load, src, volume } => {
                if let Some(old) = self.bound.take().and_then(|b| b.sink) {
                    old.stop();
                }
                self.volume = volume.clamp(0.0, 1.0);
                self.clock.reset(Duration::ZERO);
                tracing::info!(?load, src = %src.display(), "loading");
                self.bound = Some(Bound {
                    load,
                    src,
                    duration: None,
                    sink: None,
                    ended: false,
                });

                match self.reopen_at(Duration::ZERO) {
                    Ok(()) => {
                        let duration = self.bound.as_ref().and_then(|b| b.duration);
                        self.emit(MediaEvent::MetadataReady { load, duration });
                        if let Some(s) = self.bound.as_ref().and_then(|b| b.sink.as_ref()) {
                            s.play();
                        }
                        self.clock.start();
                        self.emit(MediaEvent::Playing { load });
                    }
                    Err(e) => self.reject(load, e),
                }
            }

            AudioCmd::Play => self.resume(),

            AudioCmd::Pause => {
                if let Some(b) = self.bound.as_ref() {
                    if let Some(s) = b.sink.as_ref() {
                        s.pause();
                    }
                    let load = b.load;
                    self.clock.pause();
                    self.emit(MediaEvent::Paused { load });
                }
            }

            AudioCmd::Seek(to) => {
                let Some((load, duration, has_sink)) = self
                    .bound
                    .as_ref()
                    .map(|b| (b.load, b.duration, b.sink.is_some()))
                else {
                    return true;
                };
                if !has_sink {
                    return true;
                }

                let to = clamp_seek(to, duration);
                let was_playing = self.clock.is_running();
                // Scrubbing: rebuild the current sink and skip into the file.
                match self.reopen_at(to) {
                    Ok(()) => {
                        if was_playing {
                            if let Some(s) = self.bound.as_ref().and_then(|b| b.sink.as_ref()) {
                                s.play();
                            }
                            self.clock.start();
                        }
                        self.emit(MediaEvent::Position { load, elapsed: to });
                    }
                    Err(e) => self.reject(load, e),
                }
            }

            AudioCmd::SetVolume(v) => {
                self.volume = v.clamp(0.0, 1.0);
                if let Some(s) = self.bound.as_ref().and_then(|b| b.sink.as_ref()) {
                    s.set_volume(self.volume);
                }
            }

            AudioCmd::Quit { fade_out_ms } => {
                if let Some(s) = self.bound.as_ref().and_then(|b| b.sink.as_ref()) {
                    // Fade out gently before stopping.
                    fade_out_sink(s, self.volume, fade_out_ms);
                    s.stop();
                }
                return false;
            }
        }
        true
    }

    fn tick(&mut self) {
        if !self.clock.is_running() {
            return;
        }
        let Some(b) = self.bound.as_mut() else {
            return;
        };
        let Some(s) = b.sink.as_ref() else {
            return;
        };

        let load = b.load;
        if s.empty() {
            b.ended = true;
            let end = b.duration.unwrap_or_else(|| self.clock.elapsed());
            self.clock.pause();
            self.clock.reset(end);
            self.emit(MediaEvent::Position { load, elapsed: end });
            self.emit(MediaEvent::Ended { load });
        } else {
            let elapsed = clamp_seek(self.clock.elapsed(), b.duration);
            self.emit(MediaEvent::Position { load, elapsed });
        }
    }
}

fn fade_out_sink(sink: &Sink, from: f32, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(from * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<MediaEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut s) => {
                // rodio logs to stderr when OutputStream is dropped. That's useful in
                // debugging, but noisy for a TUI app.
                s.log_on_drop(false);
                Ok(s)
            }
            Err(e) => {
                tracing::error!("no audio output device: {e}");
                Err(e.to_string())
            }
        };

        let mut state = AudioThread {
            stream,
            events,
            bound: None,
            clock: PlaybackClock::default(),
            volume: 1.0,
        };

        loop {
            match rx.recv_timeout(TICK) {
                Ok(cmd) => {
                    if !state.handle(cmd) {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => state.tick(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
