use super::*;
use std::path::{Path, PathBuf};

fn t(id: &str, title: &str, genre: &str) -> Track {
    Track {
        id: TrackId::new(id),
        title: title.into(),
        tags: String::new(),
        price: "$5".into(),
        length: "2:00".into(),
        src: Some(PathBuf::from(format!("/tmp/{id}.mp3"))),
        cover: None,
        artist: "JayNoMore".into(),
        genre: genre.into(),
    }
}

fn featured() -> FeaturedTrack {
    FeaturedTrack {
        track: t("F001", "Broken Strings", "emotional trap"),
        genre_label: "Emotional Trap".into(),
    }
}

fn ids(v: &VisibleSet) -> Vec<&str> {
    v.ids().iter().map(|i| i.as_str()).collect()
}

#[test]
fn builtin_catalog_has_four_sample_beats_and_a_featured_one() {
    let c = Catalog::builtin().unwrap();
    assert_eq!(c.len(), 4);
    assert_eq!(
        c.tracks().iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
        vec!["B001", "B002", "B003", "B004"]
    );
    assert_eq!(c.featured().track.title, "Broken Strings");
    assert_eq!(c.featured().genre_label, "Emotional Trap");
    // Blank cover strings are treated as absent.
    assert_eq!(c.tracks()[1].cover, None);
    assert_eq!(
        c.tracks()[0].cover.as_deref(),
        Some(Path::new("images/afterglow.jpg"))
    );
}

#[test]
fn text_filter_matches_artist_case_insensitively_in_catalog_order() {
    let c = Catalog::builtin().unwrap();
    let v = c.filter_by_text("jay");
    assert_eq!(ids(&v), vec!["B001", "B002", "B003", "B004"]);
}

#[test]
fn text_filter_blank_query_returns_everything() {
    let c = Catalog::builtin().unwrap();
    assert_eq!(c.filter_by_text("").len(), 4);
    assert_eq!(c.filter_by_text("   ").len(), 4);
}

#[test]
fn text_filter_searches_title_tags_and_id() {
    let c = Catalog::builtin().unwrap();
    assert_eq!(ids(&c.filter_by_text("  SUNSET ")), vec!["B002"]);
    assert_eq!(ids(&c.filter_by_text("hyperpop")), vec!["B004"]);
    assert_eq!(ids(&c.filter_by_text("b003")), vec!["B003"]);
    assert_eq!(ids(&c.filter_by_text("upbeat")), vec!["B003", "B004"]);
    assert!(c.filter_by_text("polka").is_empty());
}

#[test]
fn text_filter_does_not_search_genre_or_price() {
    let c = Catalog::builtin().unwrap();
    // "hype trap" is only a genre label; tags say "hype" without "trap" after it.
    assert!(c.filter_by_text("hype trap").is_empty());
    assert!(c.filter_by_text("$5").is_empty());
}

#[test]
fn text_filter_results_always_contain_the_query() {
    let c = Catalog::builtin().unwrap();
    for q in ["a", "tr", "e", "MEL", "x", "2"] {
        let folded = q.to_lowercase();
        for id in c.filter_by_text(q).ids() {
            let track = c.get(id).unwrap();
            let hit = [&track.title, &track.tags, &track.artist]
                .iter()
                .any(|f| f.to_lowercase().contains(&folded))
                || track.id.as_str().to_lowercase().contains(&folded);
            assert!(hit, "{id} should not match {q:?}");
        }
    }
}

#[test]
fn genre_filter_exact_match() {
    let c = Catalog::from_parts(
        vec![t("B001", "Afterglow", "emotional trap"), t("B003", "Cold Season", "drill")],
        featured(),
    )
    .unwrap();
    assert_eq!(ids(&c.filter_by_genre(&GenreFilter::parse("drill"))), vec!["B003"]);
    assert_eq!(ids(&c.filter_by_genre(&GenreFilter::parse("DRILL"))), vec!["B003"]);
    // Substrings of a genre are not a match.
    assert!(c.filter_by_genre(&GenreFilter::parse("trap")).is_empty());
}

#[test]
fn genre_filter_all_sentinel_any_case() {
    let c = Catalog::builtin().unwrap();
    for raw in ["all", "ALL", "All"] {
        let g = GenreFilter::parse(raw);
        assert_eq!(g, GenreFilter::All);
        assert_eq!(ids(&c.filter_by_genre(&g)), vec!["B001", "B002", "B003", "B004"]);
    }
}

#[test]
fn genres_are_distinct_in_first_appearance_order() {
    let c = Catalog::from_parts(
        vec![
            t("A", "a", "drill"),
            t("B", "b", "trap"),
            t("C", "c", "Drill"),
            t("D", "d", ""),
        ],
        featured(),
    )
    .unwrap();
    assert_eq!(c.genres(), vec!["drill".to_string(), "trap".to_string()]);
}

#[test]
fn padded_genre_tab_shows_its_own_track() {
    let c = Catalog::from_toml_str(
        r#"
[featured]
id = "F1"
title = "Feature"

[[tracks]]
id = "X1"
title = "First"
genre = "drill "
"#,
        None,
    )
    .unwrap();
    assert_eq!(c.tracks()[0].genre, "drill");
    let tab = c.genres().remove(0);
    assert_eq!(tab, "drill");
    assert_eq!(ids(&c.filter_by_genre(&GenreFilter::Genre(tab))), vec!["X1"]);
}

#[test]
fn genre_tabs_fold_non_ascii_case() {
    let c = Catalog::from_parts(
        vec![t("A", "a", "Électro"), t("B", "b", "électro"), t("C", "c", "drill")],
        featured(),
    )
    .unwrap();
    assert_eq!(c.genres(), vec!["Électro".to_string(), "drill".to_string()]);
    assert_eq!(
        ids(&c.filter_by_genre(&GenreFilter::parse("ÉLECTRO"))),
        vec!["A", "B"]
    );
    assert_eq!(fold_genre(" Électro "), "électro");
}

#[test]
fn duplicate_ids_are_rejected() {
    let err = Catalog::from_parts(
        vec![t("B001", "one", "drill"), t("B001", "two", "drill")],
        featured(),
    )
    .unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateId(ref id) if id == "B001"));
}

#[test]
fn empty_ids_are_rejected() {
    let err = Catalog::from_parts(vec![t("", "nameless", "drill")], featured()).unwrap_err();
    assert!(matches!(err, CatalogError::EmptyId(_)));
}

#[test]
fn position_and_get_resolve_by_id() {
    let c = Catalog::builtin().unwrap();
    let id = TrackId::new("B003");
    assert_eq!(c.position(&id), Some(2));
    assert_eq!(c.get(&id).unwrap().title, "Cold Season");
    assert_eq!(c.position(&TrackId::new("nope")), None);
}

#[test]
fn load_resolves_relative_locators_against_catalog_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.toml");
    std::fs::write(
        &path,
        r#"
[featured]
id = "F1"
title = "Feature"
genre = "drill"
src = "audio/feature.mp3"

[[tracks]]
id = "X1"
title = "First"
src = "audio/first.mp3"
cover = "/abs/cover.png"
genre = "drill"

[[tracks]]
id = "X2"
title = "No Source"
src = ""
"#,
    )
    .unwrap();

    let c = Catalog::load(&path).unwrap();
    assert_eq!(c.len(), 2);
    assert_eq!(
        c.tracks()[0].src.as_deref(),
        Some(dir.path().join("audio/first.mp3").as_path())
    );
    assert_eq!(c.tracks()[0].cover.as_deref(), Some(Path::new("/abs/cover.png")));
    assert_eq!(c.tracks()[1].src, None);
    // genre_label falls back to the genre.
    assert_eq!(c.featured().genre_label, "drill");
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Catalog::load(&dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}

#[test]
fn load_reports_malformed_toml() {
    let err = Catalog::from_toml_str("[[tracks]]\nid = ", None).unwrap_err();
    assert!(matches!(err, CatalogError::Parse(_)));
}

#[test]
fn cover_text_is_first_title_word() {
    assert_eq!(t("A", "Sunset Drive", "").cover_text(), "Sunset");
    assert_eq!(t("A", "", "").cover_text(), "");
}
