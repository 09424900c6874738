//! blockfall - terminal front end
//!
//! Draws the engine state with ratatui, feeds key presses to the engine and
//! runs the gravity timer.

use blockfall::input::{Command, InputHandler};
use blockfall::settings::Settings;
use blockfall::store::FileStore;
use blockfall::{ui, GameEngine, TickOutcome};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, stdout},
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing_subscriber::EnvFilter;

/// Get the blockfall temp directory, creating it if needed
fn blockfall_temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    let session_id: u32 = rand::random();

    // The terminal belongs to the UI, so logs go to a file
    let log_dir = blockfall_temp_dir();
    let log_file = format!("{:08x}.log", session_id);
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("blockfall=debug")),
        )
        .with_ansi(false)
        .init();

    tracing::info!(
        "blockfall starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let settings = Settings::load();
    let store = FileStore::open().unwrap_or_else(|| {
        tracing::warn!("No data directory, keeping high score in the temp dir");
        FileStore::at(log_dir.join("highscore.toml"))
    });
    tracing::info!("High score file {}", store.path().display());

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &settings, store);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    // Writes the defaults on first run so the file can be edited
    if let Err(e) = settings.save() {
        tracing::warn!("Could not save settings: {}", e);
    }

    if let Ok(game) = &result {
        println!("Final Score: {} | Lines: {}", game.score(), game.lines());
        println!("High Score: {}", game.high_score());
    }

    result.map(|_| ())
}

/// Event loop: input, gravity ticks and redraws. Returns the last game played.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    settings: &Settings,
    store: FileStore,
) -> io::Result<GameEngine<FileStore>> {
    let input = InputHandler::new(settings);
    let drop_interval = Duration::from_millis(settings.gameplay.drop_interval_ms.max(1));

    let mut game = GameEngine::new(store);
    game.spawn_piece();
    let mut next_tick = Instant::now() + drop_interval;

    loop {
        terminal.draw(|frame| ui::render_game(frame, &game, settings))?;

        // Gravity stops once the game is over; then we only wait for keys
        let event = if game.is_game_over() {
            Some(event::read()?)
        } else {
            let timeout = next_tick.saturating_duration_since(Instant::now());
            if event::poll(timeout)? {
                Some(event::read()?)
            } else {
                None
            }
        };

        if let Some(Event::Key(key)) = event {
            match input.key_down(key) {
                Some(Command::Game(action)) => game.process_action(action),
                Some(Command::Restart) => {
                    tracing::info!("Restarting after score {}", game.score());
                    game = GameEngine::new(game.into_store());
                    game.spawn_piece();
                    next_tick = Instant::now() + drop_interval;
                }
                Some(Command::Quit) => return Ok(game),
                None => {}
            }
        }

        if !game.is_game_over() && Instant::now() >= next_tick {
            if game.tick() == TickOutcome::GameOver {
                tracing::info!("Gravity stopped");
            }
            next_tick = Instant::now() + drop_interval;
        }
    }
}
