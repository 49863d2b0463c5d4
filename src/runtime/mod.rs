use std::sync::mpsc;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, PlaybackController};
use crate::audio::AudioPlayer;
use crate::catalog::{Catalog, CatalogError, GenreFilter};
use crate::config::Settings;
use crate::contact::MailtoHandoff;
use crate::mpris::ControlCmd;

mod cli;
mod event_loop;
mod logging;
mod mpris_sync;
mod settings;

use cli::Args;

/// The `--catalog` flag wins over `catalog.path`; with neither, the built-in
/// sample catalog is used.
fn load_catalog(args: &Args, settings: &Settings) -> Result<Catalog, CatalogError> {
    match args.catalog.as_ref().or(settings.catalog.path.as_ref()) {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading catalog");
            Catalog::load(path)
        }
        None => Catalog::builtin(),
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let loaded = settings::load_settings(args.config.as_deref());
    let settings = loaded.clone().unwrap_or_default();
    logging::init(&settings.logging);
    if let Err(msg) = &loaded {
        tracing::warn!("{msg}; using defaults");
    }

    // A broken catalog is reported before the terminal is taken over.
    let catalog = load_catalog(&args, &settings)?;
    tracing::info!(tracks = catalog.len(), "catalog ready");

    let (audio_player, media_rx) = AudioPlayer::new();
    let player = PlaybackController::new(
        Box::new(audio_player),
        settings.audio.volume,
        settings.playback.end_of_track,
    );
    let mut app = App::new(catalog, player, Box::new(MailtoHandoff), &settings);
    if let Some(g) = &args.genre {
        app.select_genre(GenreFilter::parse(g));
    }

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = settings
        .controls
        .media_keys
        .then(|| crate::mpris::spawn_mpris(control_tx.clone()));
    if let Some(m) = &mpris {
        mpris_sync::update_mpris(m, &app);
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut app,
        &media_rx,
        mpris.as_ref(),
        &control_rx,
    );

    app.player
        .shutdown(Duration::from_millis(settings.audio.quit_fade_out_ms));

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    run_result
}
