use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "timetrack-tui")]
#[command(about = "Terminal UI for tracking time on activities and tasks")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run against the configured API server
    Run,
    /// Run in dev mode with local in-memory data
    Dev,
    /// Print config path and create default file if missing
    ConfigPath,
}
