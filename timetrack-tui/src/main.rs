mod api;
mod app;
mod cli;
mod clock;
mod config;
mod logging;
mod runtime;
mod time_utils;
mod timer;
mod ui;

use anyhow::{Context, Result};
use api::ApiClient;
use app::App;
use clap::Parser;
use clock::SystemClock;
use config::TrackerConfig;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment overrides from .env.timetrack if present
    dotenvy::from_filename(".env.timetrack").ok();

    let cli = cli::Cli::parse();
    let cfg = TrackerConfig::load()?;
    let clock = Arc::new(SystemClock);

    match cli.command {
        cli::Commands::ConfigPath => {
            let path = TrackerConfig::config_path()?;
            if !path.exists() {
                TrackerConfig::default().save()?;
                println!("Created default config at: {}", path.display());
            } else {
                println!("{}", path.display());
            }
            Ok(())
        }
        cli::Commands::Dev => {
            init_logging(&cfg)?;
            tracing::info!("Starting in dev mode");
            let client = ApiClient::dev(clock.clone()).context("Failed to build dev client")?;
            let mut app = App::new(clock, "dev mode");
            run(&mut app, &client).await
        }
        cli::Commands::Run => {
            init_logging(&cfg)?;
            let client = ApiClient::new(&cfg.api_url)
                .with_context(|| format!("Invalid api_url in config: {}", cfg.api_url))?;
            tracing::info!(api_url = client.base_url(), "Starting");
            let mut app = App::new(clock, client.base_url());
            run(&mut app, &client).await
        }
    }
}

fn init_logging(cfg: &TrackerConfig) -> Result<()> {
    let log_path = TrackerConfig::log_path()?;
    logging::init_to_file(&cfg.log_level, &log_path)
}

async fn run(app: &mut App, client: &ApiClient) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, app, client).await;

    // Restore the terminal even if the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = %err, "Event loop exited with error");
    }
    res
}
