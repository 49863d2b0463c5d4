//! Application module: the app model used by the TUI and runtime.
//!
//! `App` lives in `app::model` and holds the catalog view, filters and the
//! contact overlay; `app::playback` owns the active track and the media
//! handle.

mod model;
mod notice;
mod playback;

pub use model::*;
pub use notice::*;
pub use playback::*;
