//! rep-parser: StarCraft: Brood War replay decoder
//!
//! Decodes `.rep` files into structured data for replay viewers and
//! analytics (APM statistics, hack detection). Only decoding is supported;
//! replays are never written back.
//!
//! # Replay Layout
//!
//! A replay is a sequence of independently compressed sections. The length
//! of each section is only known once the previous one has been consumed:
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ Replay ID       4 bytes  "reRS"          │
//! │ Header          0x279 bytes (fixed)      │
//! │ Commands length 4 bytes                  │
//! │ Commands        frame-tagged blocks      │
//! │ Map data length 4 bytes                  │
//! │ Map data        tagged chunks (CHK)      │
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use rep_parser::{ParseOptions, parse_replay_file};
//!
//! let options = ParseOptions::new(true, true, false, false);
//! if let Some(replay) = parse_replay_file("game.rep", &options) {
//!     println!("{} on {}", replay.header.game_name, replay.header.map_name);
//!     if let Some(chat) = &replay.chat {
//!         println!("{chat}");
//!     }
//! }
//! ```
//!
//! Any failure inside the pipeline (truncated data, an action attributed
//! to an invalid player id, broken section framing) yields `None` from
//! [`parse_replay`]. Use [`try_parse_replay`] to see the failure kind.

pub mod action;
pub mod commands;
pub mod cursor;
mod error;
pub mod header;
pub mod map;
pub mod names;
pub mod replay;
pub mod time;
pub mod unpack;

pub use action::{Action, ActionKind, Position};
pub use commands::{CommandSummary, DecodeContext, decode_commands};
pub use cursor::BinaryCursor;
pub use error::ReplayError;
pub use header::{Engine, GameSpeed, GameType, PlayerSlot, Race, ReplayHeader, decode_header};
pub use map::{MapData, StartLocation, decode_map_data};
pub use names::NameTables;
pub use replay::{
    ParseOptions, Replay, ReplayActions, parse_replay, parse_replay_file, try_parse_replay,
    try_parse_replay_file,
};
pub use unpack::{ChunkedUnpacker, RawUnpacker, SectionUnpacker, UnpackLimits};

// =============================================================================
// Constants
// =============================================================================

/// Replay ID section read as a little-endian u32 (bytes `reRS`)
pub const REPLAY_MAGIC: u32 = 0x5352_6572;

/// Size of the replay header section
pub const HEADER_SIZE: usize = 0x279;

/// Number of player slots in the header
pub const MAX_PLAYER_SLOTS: usize = 12;

/// Player id used for computer players and unused slots
pub const COMPUTER_PLAYER_ID: u8 = 0xFF;

/// Size of one player record in the header
pub const PLAYER_RECORD_SIZE: usize = 36;

/// Size of the whole player record block (12 × 36)
pub const PLAYER_RECORDS_SIZE: usize = MAX_PLAYER_SLOTS * PLAYER_RECORD_SIZE;

/// Number of player colors / spot indices stored in the header
pub const COLOR_SLOTS: usize = 8;

// =============================================================================
// Tests
// =============================================================================
