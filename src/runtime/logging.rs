use std::fs::{self, File};
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

use crate::config::{self, LoggingSettings};

/// Install the global subscriber, writing to the log file.
///
/// The terminal belongs to the UI, so nothing is logged when no log file can
/// be opened.
pub fn init(settings: &LoggingSettings) {
    let Some(path) = settings.file.clone().or_else(config::default_log_path) else {
        return;
    };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    let Ok(file) = File::create(&path) else {
        return;
    };

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .unwrap_or_else(|_| EnvFilter::new("beatstand=info"));

    let _ = tracing_subscriber::registry()
        .with(file_layer)
        .with(filter)
        .try_init();
}
