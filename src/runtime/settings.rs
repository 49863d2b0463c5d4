use std::path::Path;

use crate::config;

/// Load and validate settings. The error describes why the defaults should
/// be used instead.
pub fn load_settings(explicit: Option<&Path>) -> Result<config::Settings, String> {
    let loaded = match explicit {
        Some(path) => config::Settings::load_from(Some(path)),
        None => config::Settings::load(),
    };
    let settings = loaded.map_err(|e| format!("failed to load config: {e}"))?;
    settings
        .validate()
        .map_err(|msg| format!("invalid config: {msg}"))?;
    Ok(settings)
}
