use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, LoadId, MediaEvent, MediaHandle};

/// Whole milliseconds of `d`, saturating at `u64::MAX`.
pub(super) fn fade_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Command side of the audio thread.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    /// Spawn the audio thread. Events come back on the returned receiver.
    pub fn new() -> (Self, Receiver<MediaEvent>) {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (event_tx, event_rx) = mpsc::channel::<MediaEvent>();

        let audio_handle = spawn_audio_thread(rx, event_tx);

        (
            Self {
                tx,
                join: Mutex::new(Some(audio_handle)),
            },
            event_rx,
        )
    }

    pub fn send(&self, cmd: AudioCmd) -> Result<(), mpsc::SendError<AudioCmd>> {
        self.tx.send(cmd)
    }

    fn send_or_log(&self, cmd: AudioCmd) {
        if let Err(e) = self.send(cmd) {
            tracing::warn!("audio thread is gone, dropping {:?}", e.0);
        }
    }

    pub fn quit_softly(&self, fade_out: Duration) {
        self.send_or_log(AudioCmd::Quit {
            fade_out_ms: fade_millis(fade_out),
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl MediaHandle for AudioPlayer {
    fn load(&self, load: LoadId, src: PathBuf, volume: f32) {
        self.send_or_log(AudioCmd::Load { load, src, volume });
    }

    fn play(&self) {
        self.send_or_log(AudioCmd::Play);
    }

    fn pause(&self) {
        self.send_or_log(AudioCmd::Pause);
    }

    fn seek(&self, to: Duration) {
        self.send_or_log(AudioCmd::Seek(to));
    }

    fn set_volume(&self, volume: f32) {
        self.send_or_log(AudioCmd::SetVolume(volume));
    }

    fn shutdown(&self, fade_out: Duration) {
        self.quit_softly(fade_out);
    }
}
