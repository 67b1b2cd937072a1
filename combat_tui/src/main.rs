//! combat_tui - Interactive terminal arena for the turn-based combat engine

mod app;
mod simulation;
mod ui;

use app::{App, Tab};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Route tracing output to a log file; the terminal belongs to the UI
fn setup_logging() -> io::Result<WorkerGuard> {
    let log_dir = std::env::var_os("COMBAT_TUI_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("logs"));
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "combat_tui.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!(dir = %log_dir.display(), "logging initialized");
    Ok(guard)
}

fn main() -> io::Result<()> {
    let _guard = setup_logging()?;

    // Create app before touching the terminal so config errors print normally
    let mut app = App::new().map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match (key.code, key.modifiers) {
                    (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => break,
                    (KeyCode::Tab, _) => app.next_tab(),
                    (KeyCode::BackTab, _) => app.prev_tab(),
                    (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.on_up(),
                    (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.on_down(),
                    (KeyCode::Char('m'), _) => app.melee(),
                    (KeyCode::Char('r'), _) => app.ranged(),
                    (KeyCode::Char('d'), _) => app.defend(),
                    (KeyCode::Char('w'), _) => app.wait(),
                    (KeyCode::Char('u'), _) | (KeyCode::Enter, _) => app.use_selected_item(),
                    (KeyCode::Char('n'), _) => app.new_encounter(),
                    (KeyCode::Char('c'), _) => app.cycle_class(),
                    (KeyCode::Char('s'), _) => app.run_simulation(),
                    (KeyCode::Char('x'), _) => {
                        if let Err(e) = app.export_history() {
                            app.status_message = Some(format!("Export failed: {}", e));
                        }
                    }
                    (KeyCode::Char('?'), _) => app.set_tab(Tab::Help),
                    (KeyCode::Char(c @ '1'..='9'), _) => {
                        app.choose_npc(c as usize - '1' as usize);
                    }
                    _ => {}
                }
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
