//! SNAP & STACK - terminal front-end
//!
//! Drop all three pieces, fill rows and columns, keep going.

mod app;
mod input;
mod settings;
mod ui;

use app::App;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use input::KeyBindings;
use ratatui::{backend::CrosstermBackend, Terminal};
use settings::Settings;
use snapstack::mode::is_daily_key;
use snapstack::{FileStore, Game, PlayMode, Profile};
use std::{
    io::{self, stdout},
    time::Duration,
};
use tracing_subscriber::EnvFilter;

/// How long to wait for input before redrawing
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Get the snapstack temp directory, creating it if needed
fn snapstack_temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("snapstack");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Today's and yesterday's daily keys in local time
fn daily_keys() -> (String, String) {
    let today = chrono::Local::now().date_naive();
    let yesterday = today.pred_opt().unwrap_or(today);
    (
        today.format("%Y-%m-%d").to_string(),
        yesterday.format("%Y-%m-%d").to_string(),
    )
}

/// Parse `--daily` (today) or `--daily=YYYY-MM-DD` (a specific day)
fn daily_arg(args: impl Iterator<Item = String>) -> Option<Option<String>> {
    let mut daily = None;
    for arg in args {
        if arg == "--daily" {
            daily = Some(None);
        } else if let Some(key) = arg.strip_prefix("--daily=") {
            if is_daily_key(key) {
                daily = Some(Some(key.to_string()));
            } else {
                eprintln!("Ignoring daily key {:?}, expected YYYY-MM-DD", key);
            }
        }
    }
    daily
}

fn main() -> io::Result<()> {
    let daily = daily_arg(std::env::args().skip(1));

    // Setup tracing to log file; the terminal belongs to the UI
    let log_dir = snapstack_temp_dir();
    let file_appender = tracing_appender::rolling::never(&log_dir, "snapstack.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("snapstack=debug")),
        )
        .with_ansi(false)
        .init();

    let settings = Settings::load();

    let store = FileStore::platform().unwrap_or_else(|| {
        tracing::warn!("no platform data directory, keeping the profile in the temp dir");
        FileStore::new(snapstack_temp_dir())
    });
    let profile = Profile::load(&store);

    let (today, yesterday) = daily_keys();
    let mode = match daily {
        Some(Some(key)) => PlayMode::Daily(key),
        Some(None) => PlayMode::Daily(today.clone()),
        None => PlayMode::Free,
    };
    // replaying an older day does not count toward the streak
    let todays_daily = mode == PlayMode::Daily(today);
    tracing::info!("SNAP & STACK starting up, mode={}", mode.description());

    let mut game = Game::with_board_size(mode, settings.board.clamped_size(), profile, store);
    if todays_daily {
        game.record_daily(&yesterday);
    }
    let mut app = App::new(
        game,
        KeyBindings::from_settings(&settings),
        settings.visual.show_preview,
    );

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app, &settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    // Writes defaults on first run so there is a file to edit
    if let Err(e) = settings.save() {
        eprintln!("Warning: Could not save settings: {}", e);
    }

    if result.is_ok() {
        println!("\nThanks for playing SNAP & STACK!");
        println!("Mode: {}", app.game.mode().name());
        println!("Final Score: {}", app.game.score().points);
        println!(
            "Best: {} | Coins: {}",
            app.game.profile().best,
            app.game.profile().coins
        );
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<FileStore>,
    settings: &Settings,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| ui::render_game(frame, app, settings))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(action) = app.bindings.action(key) {
                if !app.handle(action) {
                    return Ok(());
                }
            }
        }
    }
}
