//! Info command - header summary and per-player statistics

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rep_parser::Replay;

use crate::config::CliConfig;

/// Arguments for the info command
#[derive(Args)]
pub struct InfoArgs {
    /// Replay file (.rep)
    pub replay: PathBuf,
}

/// Execute the info command
pub fn execute(args: InfoArgs, config: &CliConfig) -> Result<()> {
    // Counts come from the command stream; lists are not needed
    let mut options = config.parse;
    options.commands = true;
    options.chat = false;
    options.action_lists = false;

    let replay = crate::open_replay(&args.replay, &options)?;
    print!("{}", render(&replay));
    Ok(())
}

pub(crate) fn render(replay: &Replay) -> String {
    let header = &replay.header;
    let mut out = String::new();

    out.push_str(&format!("Game:     {}\n", header.game_name));
    out.push_str(&format!("Creator:  {}\n", header.creator_name));
    out.push_str(&format!(
        "Map:      {} ({}x{})\n",
        header.map_name, header.map_width, header.map_height
    ));
    out.push_str(&format!(
        "Engine:   {:?}, {:?}, {:?} speed\n",
        header.engine(),
        header.game_type_kind(),
        header.game_speed_kind()
    ));
    if let Some(saved) = header.save_time() {
        out.push_str(&format!("Saved:    {}\n", saved.format("%Y-%m-%d %H:%M:%S UTC")));
    }
    out.push_str(&format!(
        "Duration: {} ({} frames)\n",
        header.formatted_duration(),
        header.frame_count
    ));

    out.push_str("\nPlayers:\n");
    for slot in header.slots() {
        let Some(name) = slot.name else {
            continue;
        };
        if slot.is_computer() {
            out.push_str(&format!("  {:<24} {:<8} computer\n", name, slot.race.name()));
            continue;
        }
        let actions = header.player_action_count(name).unwrap_or(0);
        let apm = header.player_apm(name).unwrap_or(0);
        out.push_str(&format!(
            "  {:<24} {:<8} {:>6} actions  {:>4} APM\n",
            name,
            slot.race.name(),
            actions,
            apm
        ));
    }

    out
}
