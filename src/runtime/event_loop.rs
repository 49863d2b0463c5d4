use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Direction, InputMode};
use crate::audio::MediaEvent;
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::mpris_sync::{MprisSnapshot, update_mpris};
use crate::ui::{self, UiLayout};

/// Main terminal event loop: handles input, UI drawing, media events and
/// MPRIS. Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    media_rx: &Receiver<MediaEvent>,
    mpris: Option<&MprisHandle>,
    control_rx: &Receiver<ControlCmd>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut published = MprisSnapshot::default();
    let mut layout = UiLayout::default();

    loop {
        while let Ok(ev) = media_rx.try_recv() {
            app.on_media_event(ev);
        }
        app.tick(Instant::now());

        if let Some(m) = mpris {
            let now = MprisSnapshot::of(app);
            if now != published {
                update_mpris(m, app);
                published = now;
            }
        }

        terminal.draw(|f| layout = ui::draw(f, app, &settings.ui, &settings.controls))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, app) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(key, app) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(mouse, app, &layout),
                _ => {}
            }
        }
    }
}

/// Returns `true` when the app should quit.
fn handle_control_cmd(cmd: ControlCmd, app: &mut App) -> bool {
    tracing::debug!(?cmd, "media key");
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => app.player.play(),
        ControlCmd::Pause => app.player.pause(),
        ControlCmd::PlayPause => app.toggle_play_pause(),
        ControlCmd::Next => app.advance(Direction::Next),
        ControlCmd::Prev => app.advance(Direction::Prev),
    }
    false
}

fn handle_mouse_event(mouse: MouseEvent, app: &mut App, layout: &UiLayout) {
    if app.mode == InputMode::Contact {
        return;
    }
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(row) = layout.row_at(mouse.column, mouse.row) {
                app.activate_row(row);
            }
        }
        MouseEventKind::ScrollDown => app.next(),
        MouseEventKind::ScrollUp => app.prev(),
        _ => {}
    }
}

/// Returns `true` when the app should quit.
fn handle_key_event(key: KeyEvent, app: &mut App) -> bool {
    match app.mode {
        InputMode::Search => {
            handle_search_key(key, app);
            false
        }
        InputMode::Contact => {
            handle_contact_key(key, app);
            false
        }
        InputMode::Browse => handle_browse_key(key, app),
    }
}

fn handle_search_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => {
            app.clear_query();
            app.leave_search();
        }
        KeyCode::Enter => app.leave_search(),
        KeyCode::Backspace => app.pop_query_char(),
        KeyCode::Down => app.next(),
        KeyCode::Up => app.prev(),
        KeyCode::Char(c) if !c.is_control() => app.push_query_char(c),
        _ => {}
    }
}

fn handle_contact_key(key: KeyEvent, app: &mut App) {
    use crate::contact::FormField;

    match key.code {
        KeyCode::Esc => app.close_contact(),
        KeyCode::Tab => app.modal.focus_next(),
        KeyCode::BackTab => app.modal.focus_prev(),
        KeyCode::Enter if app.modal.focus == FormField::Message => app.submit_contact(),
        KeyCode::Enter => app.modal.focus_next(),
        KeyCode::Backspace => app.modal.pop_char(),
        KeyCode::Char(c) if !c.is_control() => app.modal.push_char(c),
        _ => {}
    }
}

fn handle_browse_key(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('/') => app.enter_search(),
        KeyCode::Tab => app.cycle_genre(true),
        KeyCode::BackTab => app.cycle_genre(false),
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Enter => app.activate_selected(),
        KeyCode::Char('p') | KeyCode::Char(' ') => app.toggle_play_pause(),
        KeyCode::Char('l') => app.advance(Direction::Next),
        KeyCode::Char('h') => app.advance(Direction::Prev),
        KeyCode::Char('L') => app.scrub(true),
        KeyCode::Char('H') => app.scrub(false),
        KeyCode::Char(c @ '0'..='9') => {
            if let Some(d) = c.to_digit(10) {
                app.seek_tenths(d as u8);
            }
        }
        KeyCode::Char('+') | KeyCode::Char('=') => app.adjust_volume(true),
        KeyCode::Char('-') => app.adjust_volume(false),
        KeyCode::Char('f') => app.play_featured(),
        KeyCode::Char('F') => app.buy_featured(),
        KeyCode::Char('b') => app.buy_active(),
        KeyCode::Char('c') => app.open_contact(),
        KeyCode::Char('K') => app.toggle_metadata_window(),
        KeyCode::Esc if app.metadata_window => app.toggle_metadata_window(),
        _ => {}
    }
    false
}
