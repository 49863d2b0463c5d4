//! Application model: `App` ties the catalog, the filters, the playback
//! controller and the contact overlay together for the UI and runtime.

use std::time::{Duration, Instant};

use thiserror::Error;

use super::notice::Notices;
use super::playback::{Direction, PlaybackController, Reconciled, Slot};
use crate::audio::MediaEvent;
use crate::catalog::{Catalog, GenreFilter, Track, VisibleSet, fold_genre};
use crate::config::Settings;
use crate::contact::{Composer, ContactModal, Handoff, HandoffError, OutboundMessage};

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("nothing is selected")]
    NothingSelected,

    #[error(transparent)]
    Handoff(#[from] HandoffError),
}

/// Where key presses go.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Browse,
    /// Typing into the search field.
    Search,
    /// Typing into the contact form.
    Contact,
}

/// The main application model.
pub struct App {
    pub catalog: Catalog,
    visible: VisibleSet,
    query: String,
    genre: GenreFilter,
    genres: Vec<GenreFilter>,

    /// Highlighted row in the visible set.
    pub selected: usize,
    pub mode: InputMode,
    pub metadata_window: bool,

    pub player: PlaybackController,
    pub modal: ContactModal,
    pub notices: Notices,

    composer: Composer,
    handoff: Box<dyn Handoff>,
    scrub_seconds: i64,
    volume_step: f32,
}

impl App {
    pub fn new(
        catalog: Catalog,
        player: PlaybackController,
        handoff: Box<dyn Handoff>,
        settings: &Settings,
    ) -> Self {
        let visible = catalog.filter_by_text("");
        let genres = std::iter::once(GenreFilter::All)
            .chain(catalog.genres().into_iter().map(GenreFilter::Genre))
            .collect();
        let composer = Composer::new(
            settings.contact.recipient.clone(),
            settings.contact.featured_recipient.clone(),
        );

        Self {
            catalog,
            visible,
            query: String::new(),
            genre: GenreFilter::All,
            genres,
            selected: 0,
            mode: InputMode::Browse,
            metadata_window: false,
            player,
            modal: ContactModal::default(),
            notices: Notices::new(Duration::from_secs(settings.ui.notice_seconds)),
            composer,
            handoff,
            scrub_seconds: settings.controls.scrub_seconds as i64,
            volume_step: settings.audio.volume_step,
        }
    }

    pub fn visible(&self) -> &VisibleSet {
        &self.visible
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn genre(&self) -> &GenreFilter {
        &self.genre
    }

    /// Genre selectors in display order, `all` first.
    pub fn genres(&self) -> &[GenreFilter] {
        &self.genres
    }

    pub fn active_track(&self) -> Option<&Track> {
        self.player.active_track(&self.catalog)
    }

    pub fn toggle_metadata_window(&mut self) {
        self.metadata_window = !self.metadata_window;
    }

    // Search

    pub fn enter_search(&mut self) {
        self.mode = InputMode::Search;
    }

    pub fn leave_search(&mut self) {
        self.mode = InputMode::Browse;
    }

    /// Replace the query; the genre selector falls back to `all`.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.genre = GenreFilter::All;
        self.visible = self.catalog.filter_by_text(&self.query);
        self.clamp_selection();
    }

    pub fn push_query_char(&mut self, c: char) {
        let mut q = std::mem::take(&mut self.query);
        q.push(c);
        self.set_query(q);
    }

    pub fn pop_query_char(&mut self) {
        let mut q = std::mem::take(&mut self.query);
        q.pop();
        self.set_query(q);
    }

    pub fn clear_query(&mut self) {
        self.set_query(String::new());
    }

    // Genre

    /// Show only `genre`; the search query is cleared.
    pub fn select_genre(&mut self, genre: GenreFilter) {
        self.query.clear();
        self.visible = self.catalog.filter_by_genre(&genre);
        self.genre = genre;
        self.clamp_selection();
    }

    /// Position of the current selection in `genres()`, ignoring case.
    pub fn genre_index(&self) -> Option<usize> {
        let current = fold_genre(self.genre.label());
        self.genres
            .iter()
            .position(|g| fold_genre(g.label()) == current)
    }

    pub fn cycle_genre(&mut self, forward: bool) {
        let len = self.genres.len();
        if len == 0 {
            return;
        }
        let cur = self.genre_index().unwrap_or(0);
        let next = if forward {
            (cur + 1) % len
        } else {
            (cur + len - 1) % len
        };
        self.select_genre(self.genres[next].clone());
    }

    // Selection

    fn clamp_selection(&mut self) {
        if self.visible.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.visible.len() {
            self.selected = self.visible.len() - 1;
        }
    }

    /// Move the highlighted row, wrapping around.
    pub fn next(&mut self) {
        if !self.visible.is_empty() {
            self.selected = (self.selected + 1) % self.visible.len();
        }
    }

    pub fn prev(&mut self) {
        let len = self.visible.len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    // Playback

    /// Highlight and play row `index` of the visible set.
    pub fn activate_row(&mut self, index: usize) {
        if index < self.visible.len() {
            self.selected = index;
        }
        let r = self
            .player
            .play_by_visible_index(&self.catalog, &self.visible, index);
        self.report(r);
    }

    pub fn activate_selected(&mut self) {
        self.activate_row(self.selected);
    }

    pub fn toggle_play_pause(&mut self) {
        let r = self.player.toggle_play_pause(&self.catalog, &self.visible);
        self.report(r);
    }

    pub fn advance(&mut self, dir: Direction) {
        let r = self.player.advance(&self.catalog, dir);
        self.follow_cursor();
        self.report(r);
    }

    /// Highlight the cursor's row when it is visible.
    fn follow_cursor(&mut self) {
        let row = self
            .player
            .cursor()
            .and_then(|c| self.catalog.track_at(c))
            .and_then(|t| self.visible.index_of(&t.id));
        if let Some(row) = row {
            self.selected = row;
        }
    }

    pub fn play_featured(&mut self) {
        let r = self.player.play_featured(&self.catalog);
        self.report(r);
    }

    pub fn scrub(&mut self, forward: bool) {
        let delta = if forward {
            self.scrub_seconds
        } else {
            -self.scrub_seconds
        };
        self.player.scrub(delta);
    }

    /// Seek to `tenths`/10 of the track (`0`–`9` keys).
    pub fn seek_tenths(&mut self, tenths: u8) {
        self.player.seek_fraction(f64::from(tenths.min(10)) / 10.0);
    }

    pub fn adjust_volume(&mut self, up: bool) {
        let step = if up {
            self.volume_step
        } else {
            -self.volume_step
        };
        self.player.set_volume(self.player.volume() + step);
    }

    pub fn on_media_event(&mut self, ev: MediaEvent) {
        match self.player.handle_event(&self.catalog, ev) {
            Ok(Reconciled::Rejected(reason)) => {
                let title = self
                    .active_track()
                    .map(|t| t.title.clone())
                    .unwrap_or_default();
                self.notices.warning(format!("Could not play {title}: {reason}"));
            }
            Ok(_) => {}
            Err(e) => self.notices.warning(e.to_string()),
        }
    }

    // Buying and contact

    pub fn buy_featured(&mut self) {
        let msg = self.composer.featured_purchase(self.catalog.featured());
        let r = self.send(msg);
        self.report(r);
    }

    /// Purchase inquiry for whatever is loaded, featured beat included.
    pub fn buy_active(&mut self) {
        let r = self.try_buy_active();
        self.report(r);
    }

    fn try_buy_active(&mut self) -> Result<(), ContactError> {
        let msg = match self.player.active() {
            None => return Err(ContactError::NothingSelected),
            Some(Slot::Featured) => self.composer.featured_purchase(self.catalog.featured()),
            Some(slot @ Slot::Catalog(_)) => {
                let track = self
                    .player
                    .active_track(&self.catalog)
                    .ok_or(ContactError::NothingSelected)?;
                tracing::debug!(?slot, id = %track.id, "buy active track");
                self.composer.purchase(track)
            }
        };
        self.send(msg)
    }

    fn send(&self, msg: OutboundMessage) -> Result<(), ContactError> {
        self.handoff.hand_off(&msg)?;
        Ok(())
    }

    pub fn open_contact(&mut self) {
        self.modal.show();
        self.mode = InputMode::Contact;
    }

    pub fn close_contact(&mut self) {
        self.modal.hide();
        self.mode = InputMode::Browse;
    }

    pub fn submit_contact(&mut self) {
        let r = self.modal.submit(&self.composer, self.handoff.as_ref());
        self.mode = InputMode::Browse;
        match r {
            Ok(()) => self.notices.info("Opening your mail app…"),
            Err(e) => self.notices.error(e.to_string()),
        }
    }

    /// Expire old notices.
    pub fn tick(&mut self, now: Instant) {
        self.notices.expire(now);
    }

    fn report<E: std::fmt::Display>(&mut self, r: Result<(), E>) {
        if let Err(e) = r {
            tracing::info!("{e}");
            self.notices.warning(e.to_string());
        }
    }
}
