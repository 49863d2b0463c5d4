use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/beatstand/config.toml` or `~/.config/beatstand/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `BEATSTAND__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub controls: ControlsSettings,
    pub playback: PlaybackSettings,
    pub catalog: CatalogSettings,
    pub contact: ContactSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Initial volume in `[0, 1]`.
    pub volume: f32,
    /// Volume change per `+` / `-` key press.
    pub volume_step: f32,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            volume: 1.0,
            volume_step: 0.05,
            quit_fade_out_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// How long transient notices stay on screen.
    pub notice_seconds: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " JayNoMore • beats for sale ".to_string(),
            notice_seconds: 4,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
    /// Register with the desktop's media keys (MPRIS on the session bus).
    pub media_keys: bool,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            scrub_seconds: 5,
            media_keys: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// What happens when the active track plays to its end.
    pub end_of_track: EndOfTrackSetting,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndOfTrackSetting {
    /// Stay on the finished track, paused at its end.
    #[default]
    Stop,
    /// Load the next catalog track.
    #[serde(alias = "next", alias = "auto-advance")]
    Advance,
    /// Start the same track again.
    #[serde(alias = "loop", alias = "repeat-one")]
    Repeat,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// TOML catalog to load instead of the built-in sample catalog.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContactSettings {
    /// Recipient for purchase and contact messages.
    pub recipient: String,
    /// Recipient for featured-beat purchases; falls back to `recipient`.
    pub featured_recipient: Option<String>,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            recipient: "orders@jaynomore.example".to_string(),
            featured_recipient: Some("beats@jaynomore.example".to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive used when `RUST_LOG` is not set.
    pub filter: String,
    /// Log file; defaults to `$XDG_STATE_HOME/beatstand/beatstand.log`.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "beatstand=info".to_string(),
            file: None,
        }
    }
}
