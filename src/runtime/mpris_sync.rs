use crate::app::App;
use crate::audio::LoadId;
use crate::mpris::MprisHandle;

/// Push the active track and playback state to MPRIS.
pub fn update_mpris(mpris: &MprisHandle, app: &App) {
    mpris.set_track_metadata(app.active_track(), app.player.duration());
    mpris.set_playback(app.player.state());
}

/// What was last published, so unchanged state is not pushed every frame.
#[derive(Debug, Default, PartialEq)]
pub struct MprisSnapshot {
    load: Option<LoadId>,
    state: crate::app::PlaybackState,
    has_duration: bool,
}

impl MprisSnapshot {
    pub fn of(app: &App) -> Self {
        Self {
            load: app.player.current_load(),
            state: app.player.state(),
            has_duration: app.player.duration().is_some(),
        }
    }
}
