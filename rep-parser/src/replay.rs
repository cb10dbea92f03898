//! Replay assembly
//!
//! Drives a [`SectionUnpacker`] through the fixed section order
//! (magic, header, commands, map data) and combines the decoder outputs
//! into a [`Replay`].

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::action::Action;
use crate::commands::{DecodeContext, decode_commands};
use crate::cursor::BinaryCursor;
use crate::error::ReplayError;
use crate::header::{ReplayHeader, decode_header};
use crate::map::{MapData, decode_map_data};
use crate::names::NameTables;
use crate::unpack::{ChunkedUnpacker, SectionUnpacker};
use crate::{COMPUTER_PLAYER_ID, HEADER_SIZE, MAX_PLAYER_SLOTS, REPLAY_MAGIC};

/// Which parts of a replay to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Decode the commands section (action counts, action lists)
    pub commands: bool,
    /// Collect the chat transcript (requires `commands`)
    pub chat: bool,
    /// Read the map data section for its dimensions
    pub map_data: bool,
    /// Collect tiles, tile set and unit placements from the map data
    pub tiles: bool,
    /// Keep per-player action lists; counts are computed either way
    pub action_lists: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            commands: true,
            chat: true,
            map_data: true,
            tiles: false,
            action_lists: true,
        }
    }
}

impl ParseOptions {
    pub fn new(commands: bool, chat: bool, map_data: bool, tiles: bool) -> Self {
        Self {
            commands,
            chat,
            map_data,
            tiles,
            action_lists: true,
        }
    }

    /// Only the header
    pub fn header_only() -> Self {
        Self::new(false, false, false, false)
    }

    /// Every section, including tiles
    pub fn everything() -> Self {
        Self::new(true, true, true, true)
    }
}

/// Player name → actions in frame order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReplayActions {
    by_player: HashMap<String, Vec<Action>>,
}

impl ReplayActions {
    /// Map human player slots to the action lists of their player ids
    ///
    /// Computer slots are left out. A named slot whose id has no list is
    /// [`ReplayError::InvalidPlayerAttribution`].
    pub fn from_lists(
        header: &ReplayHeader,
        lists: &[Vec<Action>; MAX_PLAYER_SLOTS],
    ) -> Result<Self, ReplayError> {
        let mut by_player = HashMap::new();
        for (name, &id) in header.player_names.iter().zip(&header.player_ids) {
            let Some(name) = name.as_ref().filter(|_| id != COMPUTER_PLAYER_ID) else {
                continue;
            };
            let list = lists
                .get(id as usize)
                .ok_or(ReplayError::InvalidPlayerAttribution {
                    player_id: id,
                    frame: 0,
                })?;
            by_player.insert(name.clone(), list.clone());
        }
        Ok(Self { by_player })
    }

    pub fn get(&self, player: &str) -> Option<&[Action]> {
        self.by_player.get(player).map(Vec::as_slice)
    }

    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.by_player.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Action])> {
        self.by_player
            .iter()
            .map(|(name, actions)| (name.as_str(), actions.as_slice()))
    }

    pub fn total_actions(&self) -> usize {
        self.by_player.values().map(Vec::len).sum()
    }

    /// Number of players
    pub fn len(&self) -> usize {
        self.by_player.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_player.is_empty()
    }
}

/// A decoded replay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Replay {
    pub header: ReplayHeader,
    /// Present when commands and action lists were decoded
    pub actions: Option<ReplayActions>,
    /// Present when chat was collected
    pub chat: Option<String>,
    /// Present when tiles were requested
    pub map: Option<MapData>,
}

/// Parse a replay, reporting why it failed
pub fn try_parse_replay<U: SectionUnpacker>(
    mut unpacker: U,
    options: &ParseOptions,
) -> Result<Replay, ReplayError> {
    let magic = read_u32_section(&mut unpacker)?;
    if magic != REPLAY_MAGIC {
        return Err(ReplayError::NotAReplay { magic });
    }

    let mut header = decode_header(&unpacker.unpack_section(HEADER_SIZE)?)?;
    debug!(
        frames = header.frame_count,
        map = %header.map_name,
        "decoded replay header"
    );

    if !options.commands {
        return Ok(Replay {
            header,
            actions: None,
            chat: None,
            map: None,
        });
    }

    let commands_len = read_u32_section(&mut unpacker)? as usize;
    debug!(len = commands_len, "commands section");
    let commands = unpacker.unpack_section(commands_len)?;

    let mut ctx = DecodeContext::new(NameTables::standard());
    if options.chat {
        ctx = ctx.with_chat(&header);
    }
    if options.action_lists {
        ctx = ctx.with_action_lists();
    }
    decode_commands(&commands, &mut ctx)?;

    let summary = ctx.finish();
    summary.apply_to(&mut header);
    let actions = summary
        .actions
        .as_ref()
        .map(|lists| ReplayActions::from_lists(&header, lists))
        .transpose()?;

    let map = if options.map_data || options.tiles {
        let map_len = read_u32_section(&mut unpacker)? as usize;
        debug!(len = map_len, "map data section");
        let data = unpacker.unpack_section(map_len)?;
        decode_map_data(&data, &mut header, options.tiles)?
    } else {
        None
    };

    Ok(Replay {
        header,
        actions,
        chat: summary.chat,
        map,
    })
}

/// Parse a replay, or `None` if it cannot be decoded
///
/// Failures are logged; use [`try_parse_replay`] to inspect them.
pub fn parse_replay<U: SectionUnpacker>(unpacker: U, options: &ParseOptions) -> Option<Replay> {
    match try_parse_replay(unpacker, options) {
        Ok(replay) => Some(replay),
        Err(ReplayError::NotAReplay { magic }) => {
            debug!(magic = format_args!("{magic:#010X}"), "not a replay");
            None
        }
        Err(e) => {
            warn!(error = %e, kind = e.kind(), "failed to parse replay");
            None
        }
    }
}

/// Open and parse a replay file
pub fn try_parse_replay_file(
    path: impl AsRef<Path>,
    options: &ParseOptions,
) -> Result<Replay, ReplayError> {
    let file = File::open(path.as_ref())?;
    try_parse_replay(ChunkedUnpacker::new(BufReader::new(file)), options)
}

/// Open and parse a replay file, or `None` if it cannot be decoded
pub fn parse_replay_file(path: impl AsRef<Path>, options: &ParseOptions) -> Option<Replay> {
    let path = path.as_ref();
    match try_parse_replay_file(path, options) {
        Ok(replay) => Some(replay),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to parse replay file");
            None
        }
    }
}

fn read_u32_section(unpacker: &mut impl SectionUnpacker) -> Result<u32, ReplayError> {
    let bytes = unpacker.unpack_section(4)?;
    BinaryCursor::new(&bytes).read_u32()
}
