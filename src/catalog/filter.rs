use std::fmt;

use super::model::{Catalog, Track, TrackId};

/// Sentinel genre name that selects the whole catalog.
pub const ALL_GENRES: &str = "all";

/// Comparison key for genre names: surrounding whitespace dropped, Unicode
/// lowercase.
pub fn fold_genre(genre: &str) -> String {
    genre.trim().to_lowercase()
}

/// The currently displayed subset of the catalog, in catalog order.
///
/// Holds ids only; positions are presentation details and are resolved back
/// to the catalog by id whenever playback needs a track.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibleSet {
    ids: Vec<TrackId>,
}

impl VisibleSet {
    fn from_tracks<'a>(tracks: impl Iterator<Item = &'a Track>) -> Self {
        Self {
            ids: tracks.map(|t| t.id.clone()).collect(),
        }
    }

    pub fn get(&self, index: usize) -> Option<&TrackId> {
        self.ids.get(index)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[TrackId] {
        &self.ids
    }

    /// Row position of `id`, if it is visible.
    pub fn index_of(&self, id: &TrackId) -> Option<usize> {
        self.ids.iter().position(|i| i == id)
    }
}

/// Genre selector state. `All` corresponds to the `"all"` sentinel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GenreFilter {
    #[default]
    All,
    Genre(String),
}

impl GenreFilter {
    /// Parse a selector value; `"all"` in any case maps to `All`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case(ALL_GENRES) {
            Self::All
        } else {
            Self::Genre(raw.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_GENRES,
            Self::Genre(g) => g,
        }
    }
}

impl fmt::Display for GenreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Catalog {
    /// Keep tracks whose title, tags, artist or id contains the trimmed,
    /// case-folded `query`. A blank query returns the whole catalog.
    pub fn filter_by_text(&self, query: &str) -> VisibleSet {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return VisibleSet::from_tracks(self.tracks().iter());
        }

        VisibleSet::from_tracks(self.tracks().iter().filter(|t| {
            [t.title.as_str(), t.tags.as_str(), t.artist.as_str(), t.id.as_str()]
                .iter()
                .any(|field| field.to_lowercase().contains(&q))
        }))
    }

    /// Keep tracks whose genre equals `genre` case-insensitively.
    pub fn filter_by_genre(&self, genre: &GenreFilter) -> VisibleSet {
        match genre {
            GenreFilter::All => VisibleSet::from_tracks(self.tracks().iter()),
            GenreFilter::Genre(g) => {
                let g = fold_genre(g);
                VisibleSet::from_tracks(self.tracks().iter().filter(|t| fold_genre(&t.genre) == g))
            }
        }
    }
}
