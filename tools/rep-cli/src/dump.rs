//! Dump command - whole replay as JSON

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rep_parser::Replay;

use crate::config::CliConfig;

/// Arguments for the dump command
#[derive(Args)]
pub struct DumpArgs {
    /// Replay file (.rep)
    pub replay: PathBuf,

    /// Indent the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Include the map tile grid
    #[arg(long)]
    pub tiles: bool,
}

/// Execute the dump command
pub fn execute(args: DumpArgs, config: &CliConfig) -> Result<()> {
    let mut options = config.parse;
    options.tiles |= args.tiles;

    let replay = crate::open_replay(&args.replay, &options)?;
    println!(
        "{}",
        to_json(&replay, args.pretty || config.output.pretty_json)?
    );
    Ok(())
}

pub(crate) fn to_json(replay: &Replay, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(replay)
    } else {
        serde_json::to_string(replay)
    };
    json.context("Failed to serialize replay")
}
