//! UI rendering for the terminal storefront.
//!
//! `draw` renders the whole screen from `App` state with `ratatui` and
//! reports where the catalog rows ended up so mouse clicks can be mapped
//! back to rows.

mod rows;

pub use rows::*;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Padding, Paragraph, Tabs, Wrap},
};

use crate::app::{App, InputMode, PlaybackState, Severity};
use crate::catalog::Track;
use crate::config::{ControlsSettings, UiSettings};
use crate::contact::FormField;

/// Where the catalog rows were drawn in the last frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct UiLayout {
    pub list_area: Rect,
    /// Visible-set index of the first drawn row.
    pub first_row: usize,
    /// One past the last drawn row.
    pub end_row: usize,
}

impl UiLayout {
    /// Visible-set index of the row under the terminal cell, if any.
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let inner = self.list_area.inner(ratatui::layout::Margin {
            horizontal: 1,
            vertical: 1,
        });
        if column < inner.x
            || column >= inner.x + inner.width
            || row < inner.y
            || row >= inner.y + inner.height
        {
            return None;
        }
        let idx = self.first_row + usize::from(row - inner.y);
        (idx < self.end_row).then_some(idx)
    }
}

fn controls_text(scrub_seconds: u64) -> String {
    [
        "[j/k] up/down".to_string(),
        "[enter/click] play".to_string(),
        "[space/p] play/pause".to_string(),
        "[h/l] prev/next".to_string(),
        format!("[H/L] scrub -/+{scrub_seconds}s"),
        "[0-9] seek".to_string(),
        "[+/-] volume".to_string(),
        "[/] search".to_string(),
        "[tab] genre".to_string(),
        "[f/F] featured play/buy".to_string(),
        "[b] buy playing".to_string(),
        "[c] contact".to_string(),
        "[K] details".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn left_pad() -> Padding {
    Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    }
}

/// Render the entire UI into `frame`.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) -> UiLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(5),
            Constraint::Length(4),
        ])
        .split(frame.area());

    draw_featured(frame, app, ui_settings, chunks[0]);
    draw_filters(frame, app, chunks[1]);
    let layout = draw_list(frame, app, chunks[2]);
    draw_player(frame, app, chunks[3]);

    let footer = Paragraph::new(controls_text(controls_settings.scrub_seconds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(left_pad()),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);

    if app.metadata_window {
        draw_details(frame, app, chunks[2]);
    }
    if app.modal.is_visible() {
        draw_contact(frame, app, frame.area());
    }
    draw_notices(frame, app, frame.area());

    layout
}

fn draw_featured(frame: &mut Frame, app: &App, ui: &UiSettings, area: Rect) {
    let featured = app.catalog.featured();
    let t = &featured.track;
    let lines = vec![
        Line::from(vec![
            Span::styled(format!("[{}] ", t.cover_text()), Style::default().fg(Color::Yellow)),
            Span::from("Featured: ").bold(),
            Span::from(t.title.as_str()).bold(),
            Span::from(format!(" • {} • {}", featured.genre_label, t.price)),
        ]),
        Line::from(Span::from("[f] play featured   [F] buy featured").dim()),
    ];
    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(ui.header_text.as_str())
            .title_alignment(Alignment::Center)
            .padding(left_pad()),
    );
    frame.render_widget(panel, area);
}

fn draw_filters(frame: &mut Frame, app: &App, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let searching = app.mode == InputMode::Search;
    let mut search = app.query().to_string();
    if searching {
        search.push('▏');
    }
    let search_style = if searching {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let search_box = Paragraph::new(search).style(search_style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" search (/) ")
            .padding(left_pad()),
    );
    frame.render_widget(search_box, halves[0]);

    let titles: Vec<String> = app.genres().iter().map(|g| g.label().to_string()).collect();
    let selected = app.genre_index().unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .block(Block::default().borders(Borders::ALL).title(" genre (tab) "));
    frame.render_widget(tabs, halves[1]);
}

fn draw_list(frame: &mut Frame, app: &App, area: Rect) -> UiLayout {
    let block = Block::default().borders(Borders::ALL).title(" beats ");

    let rows = match project(&app.catalog, app.visible()) {
        ListView::NoResults => {
            let empty = Paragraph::new("No results")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return UiLayout {
                list_area: area,
                first_row: 0,
                end_row: 0,
            };
        }
        ListView::Rows(rows) => rows,
    };

    let active_id = app.active_track().map(|t| &t.id);
    let height = usize::from(area.height.saturating_sub(2));
    let (start, end) = window(rows.len(), height, app.selected);

    let items: Vec<ListItem> = rows[start..end]
        .iter()
        .map(|r| {
            let item = ListItem::new(r.line());
            if Some(r.id) == active_id {
                item.style(Style::default().fg(Color::Green))
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ratatui::widgets::ListState::default();
    state.select(Some(app.selected.saturating_sub(start)));
    frame.render_stateful_widget(list, area, &mut state);

    UiLayout {
        list_area: area,
        first_row: start,
        end_row: end,
    }
}

fn draw_player(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" player ")
        .padding(left_pad());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let player = &app.player;
    let glyph = match player.state() {
        PlaybackState::Playing => "⏸",
        PlaybackState::Paused | PlaybackState::Idle => "▶",
    };

    let (title, subtitle, cover) = match app.active_track() {
        Some(t) => (t.title.as_str(), track_subtitle(t), t.cover_text()),
        None => ("Nothing playing", String::new(), "♪"),
    };
    let head = Line::from(vec![
        Span::styled(format!("[{cover}] "), Style::default().fg(Color::Yellow)),
        Span::from(format!("{glyph} ")),
        Span::from(title).bold(),
        Span::from(format!("   vol {:>3.0}%", player.volume() * 100.0)).dim(),
    ]);
    frame.render_widget(Paragraph::new(head), parts[0]);
    frame.render_widget(Paragraph::new(subtitle).dim(), parts[1]);

    let ratio = match player.duration() {
        Some(d) if !d.is_zero() => (player.position().as_secs_f64() / d.as_secs_f64()).clamp(0.0, 1.0),
        _ => 0.0,
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(ratio)
        .label(format!(
            "{} / {}",
            format_time(player.position()),
            format_total(player.duration())
        ));
    frame.render_widget(gauge, parts[2]);
}

fn track_subtitle(t: &Track) -> String {
    match (t.artist.trim(), t.tags.trim()) {
        ("", tags) => tags.to_string(),
        (artist, "") => artist.to_string(),
        (artist, tags) => format!("{artist} • {tags}"),
    }
}

fn draw_details(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_sized(72, 12, area);
    frame.render_widget(Clear, popup_area);

    let selected = app
        .visible()
        .get(app.selected)
        .and_then(|id| app.catalog.get(id));
    let text = match selected {
        Some(t) => {
            let locator = |p: &Option<std::path::PathBuf>| {
                p.as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "-".to_string())
            };
            format!(
                "ID: {}\nTitle: {}\nArtist: {}\nGenre: {}\nTags: {}\nPrice: {}\nLength: {}\nSource: {}\nCover: {}",
                t.id,
                t.title,
                t.artist,
                t.genre,
                t.tags,
                t.price,
                t.length,
                locator(&t.src),
                locator(&t.cover),
            )
        }
        None => "No track selected".to_string(),
    };
    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .padding(left_pad())
                .borders(Borders::ALL)
                .title(" details (K closes) "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup_area);
}

fn draw_contact(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_sized(64, 11, area);
    frame.render_widget(Clear, popup_area);

    let form = &app.modal.form;
    let field = |label: &str, value: &str, which: FormField| {
        let focused = app.modal.focus == which;
        let marker = if focused { "▏" } else { "" };
        let style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::from(format!("{label:<9}")).bold(),
            Span::styled(format!("{value}{marker}"), style),
        ])
    };

    let lines = vec![
        field("Name", &form.name, FormField::Name),
        field("Email", &form.email, FormField::Email),
        field("Message", &form.message, FormField::Message),
        Line::from(""),
        Line::from(Span::from("[tab] next field  [enter] send  [esc] cancel").dim()),
    ];
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .padding(left_pad())
                .borders(Borders::ALL)
                .title(" contact "),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, popup_area);
}

/// Notices stack in the top-right corner, newest first.
fn draw_notices(frame: &mut Frame, app: &App, area: Rect) {
    let max_width = (area.width / 2).clamp(20, 60);
    let mut y = area.y + 1;

    for notice in app.notices.iter() {
        if y >= area.y + area.height {
            break;
        }
        let (icon, color) = match notice.severity {
            Severity::Info => ("·", Color::Cyan),
            Severity::Warning => ("!", Color::Yellow),
            Severity::Error => ("✗", Color::Red),
        };
        let len = notice.message.chars().count() as u16;
        let w = (len + 5).min(max_width).min(area.width);
        let rect = Rect {
            x: area.x + area.width.saturating_sub(w + 1),
            y,
            width: w,
            height: 1,
        };
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!(" {icon} {} ", notice.message),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))),
            rect,
        );
        y += 1;
    }
}
