//! Development tasks for the realm workspace
//!
//! This binary provides content tooling using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod utils;

use anyhow::Result;
use clap::Parser;
use commands::{Action, Activity, Encounters, Verify};
use tracing_subscriber::EnvFilter;

/// Development tasks for the realm workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Content tools for the realm simulation", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Check a content directory for structural errors and dangling references
    Verify(Verify),

    /// Roll a sequence of encounters in a combat zone
    Encounters(Encounters),

    /// Resolve a gated action many times and report the outcome mix
    Action(Action),

    /// Print an activity's efficiency across skill levels
    Activity(Activity),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for CONTENT_DATA_DIR and GAME_SEED)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Verify(cmd) => cmd.execute(),
        Command::Encounters(cmd) => cmd.execute(),
        Command::Action(cmd) => cmd.execute(),
        Command::Activity(cmd) => cmd.execute(),
    }
}
