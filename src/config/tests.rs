use super::load::{default_config_path, default_log_path, resolve_config_path};
use super::schema::*;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_beatstand_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("BEATSTAND_CONFIG_PATH", "/tmp/beatstand-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/beatstand-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/xdg-config-home")
            .join("beatstand")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/home-dir/.config/beatstand/config.toml")
    );
}

#[test]
fn default_log_path_uses_xdg_state_home_then_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_STATE_HOME", "/tmp/state");
    assert_eq!(
        default_log_path().unwrap(),
        PathBuf::from("/tmp/state/beatstand/beatstand.log")
    );
    drop(_g1);

    let _g2 = EnvGuard::remove("XDG_STATE_HOME");
    let _g3 = EnvGuard::set("HOME", "/tmp/home-dir");
    assert_eq!(
        default_log_path().unwrap(),
        PathBuf::from("/tmp/home-dir/.local/state/beatstand/beatstand.log")
    );
}

#[test]
fn defaults_are_valid() {
    let s = Settings::default();
    assert!(s.validate().is_ok());
    assert_eq!(s.audio.volume, 1.0);
    assert_eq!(s.playback.end_of_track, EndOfTrackSetting::Stop);
    assert!(s.catalog.path.is_none());
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.audio.volume = 1.5;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.volume_step = 0.0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.contact.recipient = "nobody".into();
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.contact.featured_recipient = Some("still nobody".into());
    assert!(s.validate().is_err());
}

#[test]
fn load_reads_all_sections_from_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
volume = 0.4
volume_step = 0.1
quit_fade_out_ms = 0

[controls]
scrub_seconds = 9
media_keys = false

[playback]
end_of_track = "auto-advance"

[catalog]
path = "/srv/beats/catalog.toml"

[contact]
recipient = "shop@example.com"

[ui]
header_text = "hello"
notice_seconds = 2

[logging]
filter = "beatstand=debug"
file = "/tmp/beatstand-test.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::remove("BEATSTAND__AUDIO__VOLUME");

    let s = Settings::load_from(Some(&cfg_path)).unwrap();
    assert!((s.audio.volume - 0.4).abs() < f32::EPSILON);
    assert!((s.audio.volume_step - 0.1).abs() < f32::EPSILON);
    assert_eq!(s.audio.quit_fade_out_ms, 0);
    assert_eq!(s.controls.scrub_seconds, 9);
    assert!(!s.controls.media_keys);
    assert_eq!(s.playback.end_of_track, EndOfTrackSetting::Advance);
    assert_eq!(
        s.catalog.path.as_deref(),
        Some(std::path::Path::new("/srv/beats/catalog.toml"))
    );
    assert_eq!(s.contact.recipient, "shop@example.com");
    // Untouched keys keep their defaults.
    assert_eq!(
        s.contact.featured_recipient.as_deref(),
        Some("beats@jaynomore.example")
    );
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.notice_seconds, 2);
    assert_eq!(s.logging.filter, "beatstand=debug");
    assert_eq!(
        s.logging.file,
        Some(PathBuf::from("/tmp/beatstand-test.log"))
    );
    assert!(s.validate().is_ok());
}

#[test]
fn missing_config_file_yields_defaults() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let s = Settings::load_from(Some(&dir.path().join("absent.toml"))).unwrap();
    assert_eq!(s.controls.scrub_seconds, 5);
    assert_eq!(s.playback.end_of_track, EndOfTrackSetting::Stop);
}

#[test]
fn env_overrides_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[controls]
scrub_seconds = 30
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("BEATSTAND__CONTROLS__SCRUB_SECONDS", "2");

    let s = Settings::load_from(Some(&cfg_path)).unwrap();
    assert_eq!(s.controls.scrub_seconds, 2);
}
