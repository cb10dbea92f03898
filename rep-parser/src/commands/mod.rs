//! Player command stream decoder
//!
//! The commands section is a sequence of frame records:
//!
//! ```text
//! frame u32 | block length u8 | { player id u8 | opcode u8 | payload }*
//! ```
//!
//! - `read` - Per-opcode payload decoding into [`Action`]s
//! - `tests` - Command stream tests
//!
//! Decoding state (name tables, chat log, per-player tallies) lives in a
//! [`DecodeContext`] that the caller threads through [`decode_commands`] and
//! turns into a [`CommandSummary`] once the stream is consumed.

mod read;


use hashbrown::HashMap;
use tracing::trace;

use crate::action::{Action, opcodes};
use crate::cursor::{BinaryCursor, zero_padded_string};
use crate::error::ReplayError;
use crate::header::ReplayHeader;
use crate::names::NameTables;
use crate::time::{FRAMES_IN_TWO_MINUTES, format_frames};
use crate::{COMPUTER_PLAYER_ID, MAX_PLAYER_SLOTS};

pub use read::hex_dump;

/// Width of the chat message window
pub const CHAT_MESSAGE_LEN: usize = 80;

/// Mutable state threaded through command decoding
#[derive(Debug)]
pub struct DecodeContext<'a> {
    names: &'a NameTables,
    chat: Option<ChatLog>,
    action_lists: Option<[Vec<Action>; MAX_PLAYER_SLOTS]>,
    action_counts: [u32; MAX_PLAYER_SLOTS],
    early_action_counts: [u32; MAX_PLAYER_SLOTS],
    last_action_frames: [Option<u32>; MAX_PLAYER_SLOTS],
}

#[derive(Debug)]
struct ChatLog {
    /// Slot index → sender name (humans only)
    senders: HashMap<u8, String>,
    text: String,
}

impl<'a> DecodeContext<'a> {
    /// Context that only tallies action counts
    pub fn new(names: &'a NameTables) -> Self {
        Self {
            names,
            chat: None,
            action_lists: None,
            action_counts: [0; MAX_PLAYER_SLOTS],
            early_action_counts: [0; MAX_PLAYER_SLOTS],
            last_action_frames: [None; MAX_PLAYER_SLOTS],
        }
    }

    /// Collect chat, attributing messages through the header's slots
    ///
    /// Empty slots and computer players cannot send messages.
    pub fn with_chat(mut self, header: &ReplayHeader) -> Self {
        let senders = header
            .player_names
            .iter()
            .zip(header.player_ids)
            .enumerate()
            .filter_map(|(slot, (name, id))| match name {
                Some(name) if id != COMPUTER_PLAYER_ID => Some((slot as u8, name.clone())),
                _ => None,
            })
            .collect();
        self.chat = Some(ChatLog {
            senders,
            text: String::new(),
        });
        self
    }

    /// Keep every decoded action, not only the tallies
    pub fn with_action_lists(mut self) -> Self {
        self.action_lists = Some(Default::default());
        self
    }

    fn record(&mut self, player_id: u8, action: Action) {
        let id = player_id as usize;
        self.action_counts[id] += 1;
        if action.frame < FRAMES_IN_TWO_MINUTES {
            self.early_action_counts[id] += 1;
        }
        self.last_action_frames[id] = Some(action.frame);
        if let Some(lists) = &mut self.action_lists {
            lists[id].push(action);
        }
    }

    fn record_chat(&mut self, frame: u32, sender: u8, message: &[u8]) {
        let Some(chat) = &mut self.chat else {
            return;
        };
        let Some(name) = chat.senders.get(&sender) else {
            trace!(frame, sender, "dropping chat from unknown sender");
            return;
        };
        if !chat.text.is_empty() {
            chat.text.push_str("\r\n");
        }
        chat.text.push_str(&format!(
            "{} - {}: {}",
            format_frames(frame, false),
            name,
            zero_padded_string(message)
        ));
    }

    /// Consume the context into its results
    pub fn finish(self) -> CommandSummary {
        CommandSummary {
            action_counts: self.action_counts,
            early_action_counts: self.early_action_counts,
            last_action_frames: self.last_action_frames,
            actions: self.action_lists,
            chat: self.chat.map(|chat| chat.text),
        }
    }
}

/// Result of decoding a commands section, indexed by player id
#[derive(Debug, Clone, Default)]
pub struct CommandSummary {
    pub action_counts: [u32; MAX_PLAYER_SLOTS],
    pub early_action_counts: [u32; MAX_PLAYER_SLOTS],
    pub last_action_frames: [Option<u32>; MAX_PLAYER_SLOTS],
    /// Actions per player id, if lists were collected
    pub actions: Option<[Vec<Action>; MAX_PLAYER_SLOTS]>,
    /// CRLF-joined chat transcript, if chat was collected
    pub chat: Option<String>,
}

impl CommandSummary {
    /// Copy the per-player tallies into the header
    pub fn apply_to(&self, header: &mut ReplayHeader) {
        header.player_id_action_counts = self.action_counts;
        header.player_id_early_action_counts = self.early_action_counts;
        header.player_id_last_action_frames = self.last_action_frames;
    }

    /// Sum of all players' action counts
    pub fn total_actions(&self) -> u64 {
        self.action_counts.iter().map(|&count| count as u64).sum()
    }
}

/// Decode a commands section into `ctx`
///
/// Unknown opcodes end the current frame block: the rest of the block is
/// skipped and decoding resumes at the next frame. A command attributed to
/// a player id outside `0..12` fails the whole stream.
pub fn decode_commands(data: &[u8], ctx: &mut DecodeContext<'_>) -> Result<(), ReplayError> {
    let mut cursor = BinaryCursor::new(data);

    while cursor.remaining() > 0 {
        let frame = cursor.read_u32()?;
        let block_len = cursor.read_u8()? as usize;
        let block_end = cursor.position() + block_len;

        while cursor.position() < block_end {
            let player_id = cursor.read_u8()?;
            let opcode = cursor.read_u8()?;

            // Chat names its sender by slot inside the payload
            if opcode == opcodes::CHAT {
                if ctx.chat.is_some() {
                    let sender = cursor.read_u8()?;
                    let message = cursor.read_bytes(CHAT_MESSAGE_LEN)?;
                    ctx.record_chat(frame, sender, message);
                } else {
                    cursor.skip_exact(1 + CHAT_MESSAGE_LEN)?;
                }
                continue;
            }

            if player_id as usize >= MAX_PLAYER_SLOTS {
                return Err(ReplayError::InvalidPlayerAttribution { player_id, frame });
            }

            match read::read_action(&mut cursor, frame, opcode, ctx.names)? {
                Some(action) => ctx.record(player_id, action),
                None => {
                    trace!(
                        frame,
                        opcode,
                        skipped = cursor.remaining_before(block_end),
                        "unknown opcode, skipping rest of block"
                    );
                    cursor.seek(block_end);
                }
            }
        }
    }

    Ok(())
}
