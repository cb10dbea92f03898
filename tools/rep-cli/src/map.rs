//! Map command - dimensions, tile set, resources and start locations

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use rep_parser::Replay;

use crate::config::CliConfig;

/// Arguments for the map command
#[derive(Args)]
pub struct MapArgs {
    /// Replay file (.rep)
    pub replay: PathBuf,

    /// Also print the tile grid
    #[arg(long)]
    pub tiles: bool,
}

/// Execute the map command
pub fn execute(args: MapArgs, config: &CliConfig) -> Result<()> {
    let mut options = config.parse;
    options.commands = true;
    options.map_data = true;
    options.tiles = true;
    options.chat = false;
    options.action_lists = false;

    let replay = crate::open_replay(&args.replay, &options)?;
    if replay.map.is_none() {
        bail!("Replay has no map data");
    }
    print!("{}", render(&replay, args.tiles));
    Ok(())
}

pub(crate) fn render(replay: &Replay, with_tiles: bool) -> String {
    let header = &replay.header;
    let mut out = String::new();
    out.push_str(&format!(
        "{} ({}x{})\n",
        header.map_name, header.map_width, header.map_height
    ));

    let Some(map) = &replay.map else {
        return out;
    };

    match map.tile_set {
        Some(tile_set) => out.push_str(&format!("Tile set:        {tile_set}\n")),
        None => out.push_str("Tile set:        -\n"),
    }
    out.push_str(&format!("Mineral fields:  {}\n", map.mineral_fields.len()));
    out.push_str(&format!("Geysers:         {}\n", map.geysers.len()));
    out.push_str(&format!("Start locations: {}\n", map.start_locations.len()));
    for start in &map.start_locations {
        out.push_str(&format!(
            "  player {:>2} at ({}, {})\n",
            start.owner, start.x, start.y
        ));
    }

    if let Some(tiles) = map.tiles.as_ref().filter(|_| with_tiles) {
        let width = (header.map_width as usize).max(1);
        for row in tiles.chunks(width) {
            let line: Vec<_> = row.iter().map(|tile| format!("{tile:04X}")).collect();
            out.push_str(&format!("{}\n", line.join(" ")));
        }
    }
    out
}
