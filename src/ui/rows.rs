use std::time::Duration;

use crate::catalog::{Catalog, TrackId, VisibleSet};

/// One rendered catalog row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row<'a> {
    /// 1-based position in the visible set.
    pub position: usize,
    pub id: &'a TrackId,
    pub title: &'a str,
    pub artist: &'a str,
    pub tags: &'a str,
    pub price: &'a str,
    pub length: &'a str,
}

impl Row<'_> {
    pub fn line(&self) -> String {
        format!(
            "{:>2}. {:<18} {:<12} {:<28} {:>5} {:>5}",
            self.position, self.title, self.artist, self.tags, self.length, self.price
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListView<'a> {
    Rows(Vec<Row<'a>>),
    NoResults,
}

/// Project the visible ids into rows, in visible order.
pub fn project<'a>(catalog: &'a Catalog, visible: &VisibleSet) -> ListView<'a> {
    let rows: Vec<Row<'a>> = visible
        .ids()
        .iter()
        .filter_map(|id| catalog.get(id))
        .enumerate()
        .map(|(i, t)| Row {
            position: i + 1,
            id: &t.id,
            title: &t.title,
            artist: &t.artist,
            tags: &t.tags,
            price: &t.price,
            length: &t.length,
        })
        .collect();

    if rows.is_empty() {
        ListView::NoResults
    } else {
        ListView::Rows(rows)
    }
}

/// Format as `m:ss`.
pub fn format_time(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Like `format_time`, with `0:00` standing in for an unknown length.
pub fn format_total(d: Option<Duration>) -> String {
    format_time(d.unwrap_or_default())
}

/// First and one-past-last row of a `height`-row window that keeps
/// `selected` centered when the list is longer than the window.
pub fn window(total: usize, height: usize, selected: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}
