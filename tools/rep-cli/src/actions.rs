//! Actions command - list decoded player actions

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use rep_parser::{ActionKind, ReplayActions};

use crate::config::CliConfig;

/// Arguments for the actions command
#[derive(Args)]
pub struct ActionsArgs {
    /// Replay file (.rep)
    pub replay: PathBuf,

    /// Only list actions of this player
    #[arg(short, long)]
    pub player: Option<String>,

    /// Maximum number of actions per player
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Execute the actions command
pub fn execute(args: ActionsArgs, config: &CliConfig) -> Result<()> {
    let mut options = config.parse;
    options.commands = true;
    options.action_lists = true;

    let replay = crate::open_replay(&args.replay, &options)?;
    let Some(actions) = &replay.actions else {
        bail!("Replay has no action lists");
    };

    if let Some(player) = args.player.as_deref().filter(|p| actions.get(p).is_none()) {
        let mut known: Vec<_> = actions.players().collect();
        known.sort_unstable();
        bail!("No player named '{}' (players: {})", player, known.join(", "));
    }

    print!(
        "{}",
        render(
            actions,
            args.player.as_deref(),
            args.limit,
            config.output.show_unknown
        )
    );
    Ok(())
}

pub(crate) fn render(
    actions: &ReplayActions,
    player: Option<&str>,
    limit: Option<usize>,
    show_unknown: bool,
) -> String {
    let mut players: Vec<_> = actions
        .iter()
        .filter(|(name, _)| player.is_none_or(|p| p == *name))
        .collect();
    players.sort_unstable_by_key(|(name, _)| *name);

    let mut out = String::new();
    for (name, list) in players {
        out.push_str(&format!("{name} ({} actions)\n", list.len()));
        list.iter()
            .filter(|action| show_unknown || action.kind != ActionKind::Unknown)
            .take(limit.unwrap_or(usize::MAX))
            .for_each(|action| {
                out.push_str(&format!("{action}\n"));
            });
    }
    out
}
