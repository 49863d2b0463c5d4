use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::model::{Catalog, FeaturedTrack, Track, TrackId};

/// Sample catalog used when no catalog file is configured.
///
/// Audio paths are relative to the working directory.
const BUILTIN_CATALOG: &str = r#"
[featured]
id = "F001"
title = "Broken Strings"
genre = "emotional trap"
genre_label = "Emotional Trap"
tags = "melodic • emotional"
cover = "images/broken-strings.jpg"
src = "audio/countrytrap.mp3"
price = "$5"
artist = "JayNoMore"

[[tracks]]
id = "B001"
title = "Afterglow"
tags = "trap • melodic • emotional"
price = "$5"
length = "2:10"
src = "audio/midnighttrap.mp3"
cover = "images/afterglow.jpg"
artist = "JayNoMore"
genre = "emotional trap"

[[tracks]]
id = "B002"
title = "Sunset Drive"
tags = "trap • melodic • hype"
price = "$5"
length = "2:09"
src = "audio/drilltrap.mp3"
cover = ""
artist = "JayNoMore"
genre = "hype trap"

[[tracks]]
id = "B003"
title = "Cold Season"
tags = "hip-hop • drill • upbeat"
price = "$5"
length = "2:04"
src = "audio/drill.mp3"
cover = ""
artist = "JayNoMore"
genre = "drill"

[[tracks]]
id = "B004"
title = "Heart.exe"
tags = "hyperpop • trap • upbeat"
price = "$5"
length = "1:55"
src = "audio/hyperpop.mp3"
cover = ""
artist = "JayNoMore"
genre = "hyperpop"
"#;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("duplicate track id: {0}")]
    DuplicateId(String),

    #[error("track \"{0}\" has an empty id")]
    EmptyId(String),
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    featured: FeaturedEntry,
    #[serde(default)]
    tracks: Vec<TrackEntry>,
}

#[derive(Debug, Deserialize)]
struct TrackEntry {
    id: String,
    title: String,
    #[serde(default)]
    tags: String,
    #[serde(default)]
    price: String,
    #[serde(default)]
    length: String,
    src: Option<String>,
    cover: Option<String>,
    #[serde(default)]
    artist: String,
    #[serde(default)]
    genre: String,
}

#[derive(Debug, Deserialize)]
struct FeaturedEntry {
    #[serde(flatten)]
    track: TrackEntry,
    genre_label: Option<String>,
}

/// Turn an optional locator into a path, treating blank strings as absent and
/// resolving relative paths against `base`.
fn locator(raw: Option<String>, base: Option<&Path>) -> Option<PathBuf> {
    let raw = raw?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let p = PathBuf::from(raw);
    match base {
        Some(b) if p.is_relative() => Some(b.join(p)),
        _ => Some(p),
    }
}

impl TrackEntry {
    fn into_track(self, base: Option<&Path>) -> Track {
        Track {
            id: TrackId::new(self.id.trim()),
            title: self.title,
            tags: self.tags,
            price: self.price,
            length: self.length,
            src: locator(self.src, base),
            cover: locator(self.cover, base),
            artist: self.artist,
            genre: self.genre.trim().to_string(),
        }
    }
}

impl Catalog {
    /// Build a catalog, enforcing non-empty and unique track ids.
    pub fn from_parts(tracks: Vec<Track>, featured: FeaturedTrack) -> Result<Self, CatalogError> {
        let mut seen: HashSet<&TrackId> = HashSet::new();
        for t in &tracks {
            if t.id.as_str().is_empty() {
                return Err(CatalogError::EmptyId(t.title.clone()));
            }
            if !seen.insert(&t.id) {
                return Err(CatalogError::DuplicateId(t.id.to_string()));
            }
        }
        Ok(Self::new_unchecked(tracks, featured))
    }

    /// Parse a TOML catalog. Relative `src`/`cover` locators are resolved
    /// against `base` when given.
    pub fn from_toml_str(text: &str, base: Option<&Path>) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(text)?;

        let genre_label = file
            .featured
            .genre_label
            .clone()
            .unwrap_or_else(|| file.featured.track.genre.clone());
        let featured = FeaturedTrack {
            track: file.featured.track.into_track(base),
            genre_label,
        };

        let tracks = file
            .tracks
            .into_iter()
            .map(|e| e.into_track(base))
            .collect();

        Self::from_parts(tracks, featured)
    }

    /// Load a catalog file from disk.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path.parent())
    }

    /// The built-in sample catalog.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG, None)
    }
}
