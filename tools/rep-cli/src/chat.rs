//! Chat command - print the in-game chat transcript

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::config::CliConfig;

/// Arguments for the chat command
#[derive(Args)]
pub struct ChatArgs {
    /// Replay file (.rep)
    pub replay: PathBuf,
}

/// Execute the chat command
pub fn execute(args: ChatArgs, config: &CliConfig) -> Result<()> {
    let mut options = config.parse;
    options.commands = true;
    options.chat = true;
    options.action_lists = false;

    let replay = crate::open_replay(&args.replay, &options)?;
    match replay.chat.as_deref() {
        Some(chat) if !chat.is_empty() => {
            // Transcript lines are CRLF separated
            for line in chat.lines() {
                println!("{line}");
            }
        }
        _ => println!("(no chat)"),
    }
    Ok(())
}
