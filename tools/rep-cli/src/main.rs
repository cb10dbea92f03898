//! rep - StarCraft: Brood War replay inspector
//!
//! # Commands
//!
//! - `rep info` - Header summary with per-player APM
//! - `rep actions` - Decoded player actions
//! - `rep chat` - In-game chat transcript
//! - `rep map` - Map size, tile set, resources and start locations
//! - `rep dump` - Whole replay as JSON
//!
//! # Configuration (rep.toml)
//!
//! ```toml
//! [parse]
//! chat = false
//! tiles = false
//!
//! [output]
//! pretty_json = true
//! show_unknown = false
//! ```

mod actions;
mod chat;
mod config;
mod dump;
mod info;
mod map;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rep_parser::{ParseOptions, Replay, try_parse_replay_file};
use tracing_subscriber::EnvFilter;

/// rep - StarCraft: Brood War replay inspector
#[derive(Parser)]
#[command(name = "rep")]
#[command(about = "Inspect StarCraft: Brood War replays")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to rep.toml in the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show game, map and player summary
    Info(info::InfoArgs),

    /// List player actions
    Actions(actions::ActionsArgs),

    /// Print the chat transcript
    Chat(chat::ChatArgs),

    /// Show map data
    Map(map::MapArgs),

    /// Dump the decoded replay as JSON
    Dump(dump::DumpArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Info(args) => info::execute(args, &config),
        Commands::Actions(args) => actions::execute(args, &config),
        Commands::Chat(args) => chat::execute(args, &config),
        Commands::Map(args) => map::execute(args, &config),
        Commands::Dump(args) => dump::execute(args, &config),
    }
}

/// Parse a replay file, turning failures into a readable error
pub(crate) fn open_replay(path: &Path, options: &ParseOptions) -> Result<Replay> {
    tracing::debug!(path = %path.display(), ?options, "parsing replay");
    try_parse_replay_file(path, options)
        .with_context(|| format!("Failed to parse replay {}", path.display()))
}
