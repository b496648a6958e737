mod app;
mod chat;
mod cli;
mod config;
mod input;
mod logging;
mod starfield;
mod types;
mod ui;

use app::App;
use chat::ChatClient;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

const FRAME_INTERVAL: Duration = Duration::from_millis(16); // ~60 fps
const TICK_RATE: Duration = Duration::from_millis(33); // UI animations, ~30 Hz

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::Args::parse();
    let config_path = args.config.clone().unwrap_or_else(config::config_path);
    let (mut cfg, config_problem) = config::load_or_init(&config_path);
    args.apply(&mut cfg);

    if let Some(path) = logging::init(cfg.log_level.as_deref()) {
        log::info!(
            "stellar-chat {} starting; config {}, log {}",
            env!("CARGO_PKG_VERSION"),
            config_path.display(),
            path.display()
        );
    }
    if let Some(e) = config_problem {
        log::warn!("{}; using defaults", e);
    }

    let client = ChatClient::new(
        cfg.endpoint.clone(),
        Duration::from_secs(cfg.request_timeout_secs),
    )?;
    let mut app = App::new(&cfg, client);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app).await;
    app.quit();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();

        // Pick up any chat replies that finished since the last frame.
        app.poll_replies();

        // Render; this is also where the starfield advances.
        terminal.draw(|f| ui::draw(f, app))?;

        // Wait for input until the next frame is due
        let timeout = FRAME_INTERVAL
            .checked_sub(frame_start.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events, ignore release/repeat
                    if key.kind == KeyEventKind::Press {
                        // Ctrl+C always quits
                        if key.modifiers.contains(KeyModifiers::CONTROL)
                            && key.code == KeyCode::Char('c')
                        {
                            app.quit();
                        } else {
                            input::handle_key(app, key);
                        }
                    }
                }
                // The next draw hands the new size to the starfield.
                Event::Resize(width, height) => {
                    log::debug!("terminal resized to {}x{}", width, height);
                }
                _ => {}
            }
        }

        // Tick update
        if last_tick.elapsed() >= TICK_RATE {
            app.tick = app.tick.wrapping_add(1);
            last_tick = Instant::now();
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
