use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use migration_showcase::config::AppConfig;
use migration_showcase::core::error::ShowcaseError;
use migration_showcase::core::logging;
use migration_showcase::core::script::Script;
use migration_showcase::tui::app::AppState;

/// Step-by-step walkthrough of a legacy UniBasic order entry system
/// migrating to a modern C# / EF Core stack
#[derive(Parser, Debug)]
#[command(name = "migration-showcase")]
#[command(version)]
struct Args {
    /// Script file to play instead of the built-in walkthrough
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Step to open at (1-based; clamped to the script)
    #[arg(long, value_name = "N")]
    step: Option<usize>,

    /// Start auto-advancing immediately
    #[arg(long)]
    autoplay: bool,

    /// Show every step's text at once instead of typing it out
    #[arg(long)]
    no_animation: bool,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let args = Args::parse();

    let (mut config, config_error) = AppConfig::load_or_default(args.config.as_deref());
    if args.autoplay {
        config.playback.autoplay = true;
    }
    if args.no_animation {
        config.reveal.animate = false;
    }
    if args.script.is_some() {
        config.script.path = args.script;
    }

    let _log_guard = logging::init(&config.data_dir());
    log::info!(
        "{} v{} starting",
        migration_showcase::NAME,
        migration_showcase::VERSION
    );
    if let Some(e) = config_error {
        log::warn!("{e}; using defaults");
    }

    let script = match config.script.path.as_deref() {
        Some(path) => Script::load(path),
        None => Script::builtin(),
    }
    .map_err(ShowcaseError::from)?;

    let start_step = args.step.unwrap_or(1).saturating_sub(1);
    run(Arc::new(script), &config, start_step)
        .await
        .map_err(ShowcaseError::from)?;

    log::info!("Shutting down");
    Ok(())
}

async fn run(script: Arc<Script>, config: &AppConfig, start_step: usize) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let mut app = AppState::new(script, config, event_rx, event_tx);
    app.start(start_step);

    let result = app.run(&mut terminal).await;

    // Reveal tasks are cancelled when the panes drop
    drop(app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        log::error!("Event loop failed: {e}");
    }
    result
}
