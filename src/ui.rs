// src/ui.rs

pub mod chat;
pub mod file_picker;
pub mod footer;
pub mod header;
pub mod quit_confirm;

use crate::chat_log::ChatLog;
use crate::key_handlers::handle_key;
use crate::{App, AppState};
use crossterm::{
    event::{self, Event as CEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::{
    io,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;

const TICK_RATE: Duration = Duration::from_millis(100);

/// Events fed to the main loop.
enum Event {
    Input(CEvent),
    Tick,
}

/// Runs the terminal UI until the user quits.
pub async fn run_ui(app: App) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!("UI loop failed: {}", err);
    }
    res
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> io::Result<()> {
    let (tx, mut rx) = mpsc::channel::<Event>(100);

    // crossterm polling blocks, so it gets its own thread.
    tokio::task::spawn_blocking(move || {
        let mut last_tick = Instant::now();
        loop {
            match event::poll(TICK_RATE) {
                Ok(true) => {
                    if let Ok(event) = event::read() {
                        if tx.blocking_send(Event::Input(event)).is_err() {
                            return;
                        }
                    }
                }
                Ok(false) => {}
                Err(e) => {
                    error!("failed to poll terminal events: {}", e);
                    return;
                }
            }

            if last_tick.elapsed() >= TICK_RATE {
                if tx.blocking_send(Event::Tick).is_err() {
                    return;
                }
                last_tick = Instant::now();
            }
        }
    });

    let chat_log = app.chat_log.clone();
    loop {
        app.refresh_status();
        {
            let mut log = chat_log.lock().await;
            terminal.draw(|f| draw(f, &app, &mut log))?;
        }

        match rx.recv().await {
            Some(Event::Input(CEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                handle_key(key, &mut app).await;
            }
            Some(Event::Input(_)) => {}
            Some(Event::Tick) => app.status_indicator.update_spinner(),
            None => break,
        }

        if app.state == AppState::Quit {
            info!("quit requested");
            break;
        }
    }

    Ok(())
}

/// Draws one frame.
pub fn draw(f: &mut Frame<'_>, app: &App, log: &mut ChatLog) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1), // Header
                Constraint::Min(5),    // Body
                Constraint::Length(1), // Footer
            ]
            .as_ref(),
        )
        .split(f.area());

    header::draw_header(f, chunks[0], &app.base_url);

    match app.state {
        AppState::FilePicker => app.file_picker.render(f, chunks[1]),
        _ => chat::draw_chat(f, chunks[1], app, log),
    }

    if app.state == AppState::QuitConfirm {
        quit_confirm::draw_quit_confirm(f, chunks[1]);
    }

    footer::draw_footer(f, chunks[2], app);
}
