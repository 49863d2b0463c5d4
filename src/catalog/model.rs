use std::fmt;
use std::path::PathBuf;

use super::filter::fold_genre;

/// Unique identifier of a catalog entry (e.g. `B001`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(String);

impl TrackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One purchasable, playable beat.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    /// Free-form delimited display string, e.g. `trap • melodic`.
    pub tags: String,
    pub price: String,
    /// Display-only length; playback uses the decoder's duration.
    pub length: String,
    pub src: Option<PathBuf>,
    pub cover: Option<PathBuf>,
    pub artist: String,
    pub genre: String,
}

impl Track {
    /// Text stand-in for cover art: the first word of the title.
    pub fn cover_text(&self) -> &str {
        self.title.split_whitespace().next().unwrap_or("")
    }
}

/// The single highlighted beat shown above the catalog list.
///
/// It is not required to appear in the catalog list itself.
#[derive(Clone, Debug, PartialEq)]
pub struct FeaturedTrack {
    pub track: Track,
    /// Display form of the genre, e.g. `Emotional Trap`.
    pub genre_label: String,
}

/// The canonical, immutable track list plus the featured beat.
#[derive(Clone, Debug)]
pub struct Catalog {
    tracks: Vec<Track>,
    featured: FeaturedTrack,
}

impl Catalog {
    /// Build a catalog from already validated parts. See `Catalog::from_parts`
    /// in `load` for the checked constructor.
    pub(super) fn new_unchecked(tracks: Vec<Track>, featured: FeaturedTrack) -> Self {
        Self { tracks, featured }
    }

    /// All tracks in authoring order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn featured(&self) -> &FeaturedTrack {
        &self.featured
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn track_at(&self, position: usize) -> Option<&Track> {
        self.tracks.get(position)
    }

    /// Catalog position of the track with `id`.
    pub fn position(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }

    pub fn get(&self, id: &TrackId) -> Option<&Track> {
        self.position(id).map(|p| &self.tracks[p])
    }

    /// Distinct genre labels in order of first appearance.
    pub fn genres(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for t in &self.tracks {
            let g = t.genre.trim();
            if g.is_empty() {
                continue;
            }
            let key = fold_genre(g);
            if !out.iter().any(|seen| fold_genre(seen) == key) {
                out.push(g.to_string());
            }
        }
        out
    }
}
