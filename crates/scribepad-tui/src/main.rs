//! Scribepad - a keyboard-driven terminal client for an article service.
//!
//! Log in, browse articles, and write, edit or delete your own, without
//! leaving the terminal.

mod app;
mod ui;

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use scribepad_core::validation::validate_login;
use scribepad_core::{ApiClient, Config, Route, SessionStore};

use app::{open_storage, App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log files are named `scribepad.log.<date>` in the data directory
const LOG_FILE_PREFIX: &str = "scribepad.log";

#[derive(Parser)]
#[command(name = "scribepad")]
#[command(version)]
#[command(about = "Read and write articles from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Route or link to open on start, e.g. an emailed set-password URL
    #[arg(long, value_name = "PATH_OR_URL")]
    route: Option<String>,

    /// Keep the session in memory only
    #[arg(long)]
    ephemeral: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in without starting the interface
    Login {
        /// Account email (defaults to the last one used)
        #[arg(long)]
        email: Option<String>,
    },
    /// Clear the saved session
    Logout,
}

/// Initialize the tracing subscriber.
///
/// The terminal is in raw mode while the UI runs, so logs go to a daily file
/// in the data directory. Use RUST_LOG to control the level (e.g. RUST_LOG=debug).
fn init_tracing() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let log_dir = Config::data_dir()
        .ok()
        .filter(|dir| std::fs::create_dir_all(dir).is_ok());

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .with(filter)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::sink))
                .with(filter)
                .init();
            None
        }
    }
}

fn load_config() -> Config {
    match Config::load() {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let _log_guard = init_tracing();
    let config = load_config();

    match cli.command {
        Some(Commands::Login { email }) => return login_command(config, email, cli.ephemeral).await,
        Some(Commands::Logout) => return logout_command(&config),
        None => {}
    }

    // Parse before touching the terminal so a bad link is reported plainly
    let start_route = match cli.route.as_deref() {
        Some(input) => Route::parse(input).with_context(|| format!("Cannot open '{}'", input))?,
        None => Route::Home,
    };

    info!("Scribepad starting");

    let storage = open_storage(&config, cli.ephemeral)?;
    let mut app = App::new(config, storage)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Resolve the start route while the session is still unknown, show that
    // frame, then restore the session
    app.open(start_route);
    let result = match terminal.draw(|f| render(f, &app)) {
        Ok(_) => {
            app.initialize_session();
            run_app(&mut terminal, &mut app).await
        }
        Err(e) => Err(e.into()),
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("Scribepad shutting down");
    Ok(())
}

/// Interactive login outside the UI
async fn login_command(config: Config, email: Option<String>, ephemeral: bool) -> Result<()> {
    let email = match email.or_else(|| config.last_email.clone()) {
        Some(last) => {
            let input = prompt(&format!("Email [{}]: ", last))?;
            if input.is_empty() {
                last
            } else {
                input
            }
        }
        None => prompt("Email: ")?,
    };
    let password = rpassword::prompt_password("Password: ")?;

    if let Err(field) = validate_login(&email, &password) {
        anyhow::bail!("{}", field.message);
    }

    println!("\nAuthenticating...");
    let api = ApiClient::new(&config.api_base_url)?;
    let response = api
        .login(&email, &password)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    let mut store = SessionStore::new(open_storage(&config, ephemeral)?);
    store.initialize();
    store
        .login(&response.token, response.user)
        .context("Logged in, but the session could not be saved")?;

    // Only the email is written back, not environment overrides
    let path = Config::config_path()?;
    let mut on_disk = Config::load_from(&path)?;
    on_disk.last_email = Some(email.trim().to_string());
    if let Err(e) = on_disk.save_to(&path) {
        warn!(error = %e, "Failed to save config");
    }

    if response.message.is_empty() {
        println!("Login successful!");
    } else {
        println!("{}", response.message);
    }
    Ok(())
}

fn logout_command(config: &Config) -> Result<()> {
    let mut store = SessionStore::new(open_storage(config, false)?);
    store.initialize();
    store.logout().context("Failed to clear the saved session")?;
    println!("Logged out.");
    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout to allow background updates
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Windows reports releases too
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                if handle_input(app, key)? {
                    return Ok(());
                }
            }
        }

        // Check for completed background tasks
        app.check_background_tasks();

        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
