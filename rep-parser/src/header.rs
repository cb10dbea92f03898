//! Replay header section (fixed 0x279-byte layout)
//!
//! Every field sits at a fixed offset. Besides the raw fields, the 432-byte
//! player record block is split into per-slot name, race and player id.
//! Per-player action statistics live here too; they are indexed by
//! **player id** (the byte commands are attributed to), not by slot.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cursor::{BinaryCursor, zero_padded_string};
use crate::error::ReplayError;
use crate::time::{FRAMES_IN_TWO_MINUTES, format_frames, frames_to_seconds};
use crate::{
    COLOR_SLOTS, COMPUTER_PLAYER_ID, HEADER_SIZE, MAX_PLAYER_SLOTS, PLAYER_RECORD_SIZE,
    PLAYER_RECORDS_SIZE,
};

/// Field offsets within the header section
pub mod offsets {
    pub const ENGINE: usize = 0x00;
    pub const FRAME_COUNT: usize = 0x01;
    pub const SAVE_TIME: usize = 0x08;
    pub const GAME_NAME: usize = 0x18;
    pub const MAP_WIDTH: usize = 0x34;
    pub const MAP_HEIGHT: usize = 0x36;
    pub const GAME_SPEED: usize = 0x3A;
    pub const GAME_TYPE: usize = 0x3C;
    pub const GAME_SUB_TYPE: usize = 0x3E;
    pub const CREATOR_NAME: usize = 0x48;
    pub const MAP_NAME: usize = 0x61;
    pub const PLAYER_RECORDS: usize = 0xA1;
    pub const PLAYER_COLORS: usize = 0x251;
    pub const PLAYER_SPOTS: usize = 0x271;

    pub const GAME_NAME_LEN: usize = 28;
    pub const CREATOR_NAME_LEN: usize = 24;
    pub const MAP_NAME_LEN: usize = 26;

    /// Offsets within one 36-byte player record
    pub const RECORD_PLAYER_ID: usize = 4;
    pub const RECORD_RACE: usize = 9;
    pub const RECORD_NAME: usize = 11;
    pub const RECORD_NAME_LEN: usize = 25;
}

/// Decoded replay header
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayHeader {
    /// Engine byte (0 = StarCraft, 1 = Brood War)
    pub engine: u8,
    /// Number of frames the game lasted
    pub frame_count: u32,
    /// Save time as unix seconds
    pub save_time: u32,
    pub game_name: String,
    /// Map width in tiles (may be corrected by the map data `DIM ` chunk)
    pub map_width: u16,
    /// Map height in tiles (may be corrected by the map data `DIM ` chunk)
    pub map_height: u16,
    pub game_speed: u16,
    pub game_type: u16,
    pub game_sub_type: u16,
    pub creator_name: String,
    pub map_name: String,
    /// Raw 12 × 36 byte player record block
    #[serde(skip)]
    pub player_records: [u8; PLAYER_RECORDS_SIZE],
    pub player_colors: [u32; COLOR_SLOTS],
    pub player_spot_indices: [u8; COLOR_SLOTS],

    /// Player name per slot (`None` for empty slots)
    pub player_names: [Option<String>; MAX_PLAYER_SLOTS],
    /// Race byte per slot
    pub player_races: [u8; MAX_PLAYER_SLOTS],
    /// Player id per slot (0xFF for computers and empty slots)
    pub player_ids: [u8; MAX_PLAYER_SLOTS],

    /// Action count per player id
    pub player_id_action_counts: [u32; MAX_PLAYER_SLOTS],
    /// Action count per player id within the first two minutes
    pub player_id_early_action_counts: [u32; MAX_PLAYER_SLOTS],
    /// Frame of the last action per player id
    pub player_id_last_action_frames: [Option<u32>; MAX_PLAYER_SLOTS],
}

/// Decode the header section
///
/// `data` must hold at least [`HEADER_SIZE`] bytes. Fields are taken as-is;
/// the only validation is bounds checking.
pub fn decode_header(data: &[u8]) -> Result<ReplayHeader, ReplayError> {
    if data.len() < HEADER_SIZE {
        return Err(ReplayError::TruncatedData {
            position: 0,
            needed: HEADER_SIZE,
            available: data.len(),
        });
    }

    let mut cursor = BinaryCursor::new(&data[..HEADER_SIZE]);

    cursor.seek(offsets::ENGINE);
    let engine = cursor.read_u8()?;
    let frame_count = cursor.read_u32()?;

    cursor.seek(offsets::SAVE_TIME);
    let save_time = cursor.read_u32()?;

    cursor.seek(offsets::GAME_NAME);
    let game_name = cursor.read_fixed_string(offsets::GAME_NAME_LEN)?;

    cursor.seek(offsets::MAP_WIDTH);
    let map_width = cursor.read_u16()?;
    let map_height = cursor.read_u16()?;

    cursor.seek(offsets::GAME_SPEED);
    let game_speed = cursor.read_u16()?;
    let game_type = cursor.read_u16()?;
    let game_sub_type = cursor.read_u16()?;

    cursor.seek(offsets::CREATOR_NAME);
    let creator_name = cursor.read_fixed_string(offsets::CREATOR_NAME_LEN)?;

    cursor.seek(offsets::MAP_NAME);
    let map_name = cursor.read_fixed_string(offsets::MAP_NAME_LEN)?;

    cursor.seek(offsets::PLAYER_RECORDS);
    let player_records = cursor.read_array::<PLAYER_RECORDS_SIZE>()?;

    let mut player_colors = [0u32; COLOR_SLOTS];
    for color in &mut player_colors {
        *color = cursor.read_u32()?;
    }
    let player_spot_indices = cursor.read_array::<COLOR_SLOTS>()?;

    let mut player_names: [Option<String>; MAX_PLAYER_SLOTS] = Default::default();
    let mut player_races = [0u8; MAX_PLAYER_SLOTS];
    let mut player_ids = [0u8; MAX_PLAYER_SLOTS];
    for (slot, record) in player_records.chunks_exact(PLAYER_RECORD_SIZE).enumerate() {
        let name = zero_padded_string(
            &record[offsets::RECORD_NAME..offsets::RECORD_NAME + offsets::RECORD_NAME_LEN],
        );
        if !name.is_empty() {
            player_names[slot] = Some(name);
        }
        player_races[slot] = record[offsets::RECORD_RACE];
        player_ids[slot] = record[offsets::RECORD_PLAYER_ID];
    }

    Ok(ReplayHeader {
        engine,
        frame_count,
        save_time,
        game_name,
        map_width,
        map_height,
        game_speed,
        game_type,
        game_sub_type,
        creator_name,
        map_name,
        player_records,
        player_colors,
        player_spot_indices,
        player_names,
        player_races,
        player_ids,
        player_id_action_counts: [0; MAX_PLAYER_SLOTS],
        player_id_early_action_counts: [0; MAX_PLAYER_SLOTS],
        player_id_last_action_frames: [None; MAX_PLAYER_SLOTS],
    })
}

impl ReplayHeader {
    pub fn engine(&self) -> Engine {
        self.engine.into()
    }

    pub fn game_speed_kind(&self) -> GameSpeed {
        self.game_speed.into()
    }

    pub fn game_type_kind(&self) -> GameType {
        self.game_type.into()
    }

    /// Save time as a UTC timestamp
    pub fn save_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.save_time as i64, 0)
    }

    /// Game length in seconds of game time
    pub fn duration_seconds(&self) -> u64 {
        frames_to_seconds(self.frame_count)
    }

    /// Game length as a clock string
    pub fn formatted_duration(&self) -> String {
        format_frames(self.frame_count, false)
    }

    /// All 12 slots, including empty ones
    pub fn slots(&self) -> impl Iterator<Item = PlayerSlot<'_>> {
        (0..MAX_PLAYER_SLOTS).map(move |index| PlayerSlot {
            index,
            name: self.player_names[index].as_deref(),
            race: self.player_races[index].into(),
            player_id: self.player_ids[index],
        })
    }

    /// Occupied slots controlled by humans
    pub fn players(&self) -> impl Iterator<Item = PlayerSlot<'_>> {
        self.slots()
            .filter(|slot| slot.name.is_some() && !slot.is_computer())
    }

    /// Slot index of the player with the given name
    pub fn slot_of(&self, name: &str) -> Option<usize> {
        self.player_names
            .iter()
            .position(|slot_name| slot_name.as_deref() == Some(name))
    }

    /// Total actions of the named player
    pub fn player_action_count(&self, name: &str) -> Option<u32> {
        let id = self.player_ids[self.slot_of(name)?] as usize;
        self.player_id_action_counts.get(id).copied()
    }

    /// Actions per minute of the named player
    ///
    /// Actions within the first two minutes are left out (build order
    /// spam would skew the rate), measured up to the player's last action.
    /// If the player stopped acting within the first two minutes, the rate
    /// covers the whole span up to that action instead.
    pub fn player_apm(&self, name: &str) -> Option<u32> {
        let id = self.player_ids[self.slot_of(name)?] as usize;
        let total = *self.player_id_action_counts.get(id)?;
        let Some(last_frame) = self.player_id_last_action_frames[id] else {
            return Some(0);
        };

        let (actions, seconds) = if last_frame > FRAMES_IN_TWO_MINUTES {
            (
                total - self.player_id_early_action_counts[id],
                frames_to_seconds(last_frame - FRAMES_IN_TWO_MINUTES),
            )
        } else {
            (total, frames_to_seconds(last_frame))
        };

        if seconds == 0 {
            return Some(0);
        }
        Some((actions as u64 * 60 / seconds) as u32)
    }
}

/// View of one header player slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerSlot<'a> {
    /// Slot index (0..12)
    pub index: usize,
    pub name: Option<&'a str>,
    pub race: Race,
    pub player_id: u8,
}

impl PlayerSlot<'_> {
    /// Computer players carry the 0xFF id
    pub fn is_computer(&self) -> bool {
        self.player_id == COMPUTER_PLAYER_ID
    }
}

/// Game engine
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Engine {
    StarCraft,
    BroodWar,
    Unknown(u8),
}

impl From<u8> for Engine {
    fn from(value: u8) -> Self {
        match value {
            0 => Engine::StarCraft,
            1 => Engine::BroodWar,
            other => Engine::Unknown(other),
        }
    }
}

/// Player race
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Race {
    Zerg,
    Terran,
    Protoss,
    Random,
    Unknown(u8),
}

impl Race {
    pub fn name(self) -> &'static str {
        match self {
            Race::Zerg => "Zerg",
            Race::Terran => "Terran",
            Race::Protoss => "Protoss",
            Race::Random => "Random",
            Race::Unknown(_) => "Unknown",
        }
    }
}

impl From<u8> for Race {
    fn from(value: u8) -> Self {
        match value {
            0 => Race::Zerg,
            1 => Race::Terran,
            2 => Race::Protoss,
            6 => Race::Random,
            other => Race::Unknown(other),
        }
    }
}

/// Game speed setting
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum GameSpeed {
    Slowest,
    Slower,
    Slow,
    Normal,
    Fast,
    Faster,
    Fastest,
    Unknown(u16),
}

impl From<u16> for GameSpeed {
    fn from(value: u16) -> Self {
        match value {
            0 => GameSpeed::Slowest,
            1 => GameSpeed::Slower,
            2 => GameSpeed::Slow,
            3 => GameSpeed::Normal,
            4 => GameSpeed::Fast,
            5 => GameSpeed::Faster,
            6 => GameSpeed::Fastest,
            other => GameSpeed::Unknown(other),
        }
    }
}

/// Game type
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum GameType {
    None,
    Melee,
    FreeForAll,
    OneOnOne,
    CaptureTheFlag,
    Greed,
    Slaughter,
    SuddenDeath,
    Ladder,
    UseMapSettings,
    TeamMelee,
    TeamFreeForAll,
    TeamCaptureTheFlag,
    TopVsBottom,
    Unknown(u16),
}

impl From<u16> for GameType {
    fn from(value: u16) -> Self {
        match value {
            0 => GameType::None,
            2 => GameType::Melee,
            3 => GameType::FreeForAll,
            4 => GameType::OneOnOne,
            5 => GameType::CaptureTheFlag,
            6 => GameType::Greed,
            7 => GameType::Slaughter,
            8 => GameType::SuddenDeath,
            9 => GameType::Ladder,
            10 => GameType::UseMapSettings,
            11 => GameType::TeamMelee,
            12 => GameType::TeamFreeForAll,
            13 => GameType::TeamCaptureTheFlag,
            15 => GameType::TopVsBottom,
            other => GameType::Unknown(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn put(buf: &mut [u8], offset: usize, bytes: &[u8]) {
        buf[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    fn put_player(buf: &mut [u8], slot: usize, id: u8, race: u8, name: &str) {
        let base = offsets::PLAYER_RECORDS + slot * PLAYER_RECORD_SIZE;
        buf[base + offsets::RECORD_PLAYER_ID] = id;
        buf[base + offsets::RECORD_RACE] = race;
        put(buf, base + offsets::RECORD_NAME, name.as_bytes());
    }

    fn sample_header() -> Vec<u8> {
        let mut buf = vec![0u8; HEADER_SIZE];
        buf[offsets::ENGINE] = 1;
        put(&mut buf, offsets::FRAME_COUNT, &12_345u32.to_le_bytes());
        put(&mut buf, offsets::SAVE_TIME, &1_477_230_422u32.to_le_bytes());
        put(&mut buf, offsets::GAME_NAME, b"neiv's game");
        put(&mut buf, offsets::MAP_WIDTH, &128u16.to_le_bytes());
        put(&mut buf, offsets::MAP_HEIGHT, &96u16.to_le_bytes());
        put(&mut buf, offsets::GAME_SPEED, &6u16.to_le_bytes());
        put(&mut buf, offsets::GAME_TYPE, &15u16.to_le_bytes());
        put(&mut buf, offsets::GAME_SUB_TYPE, &2u16.to_le_bytes());
        put(&mut buf, offsets::CREATOR_NAME, b"neiv");
        put(&mut buf, offsets::MAP_NAME, b"Shadowlands");
        for i in 0..COLOR_SLOTS {
            put(
                &mut buf,
                offsets::PLAYER_COLORS + i * 4,
                &(i as u32 * 0x0101).to_le_bytes(),
            );
            buf[offsets::PLAYER_SPOTS + i] = 7 - i as u8;
        }
        // Slot 11 is empty and keeps id 0xFF
        for slot in 0..MAX_PLAYER_SLOTS {
            put_player(&mut buf, slot, COMPUTER_PLAYER_ID, 6, "");
        }
        put_player(&mut buf, 0, 0, 1, "neiv");
        put_player(&mut buf, 1, 1, 2, "Sargas Tribe");
        put_player(&mut buf, 2, COMPUTER_PLAYER_ID, 0, "Computer");
        buf
    }

    #[test]
    fn test_decode_fixed_fields() {
        let header = decode_header(&sample_header()).unwrap();

        assert_eq!(header.engine, 1);
        assert_eq!(header.engine(), Engine::BroodWar);
        assert_eq!(header.frame_count, 12_345);
        assert_eq!(header.save_time, 1_477_230_422);
        assert_eq!(header.game_name, "neiv's game");
        assert_eq!(header.map_width, 128);
        assert_eq!(header.map_height, 96);
        assert_eq!(header.game_speed_kind(), GameSpeed::Fastest);
        assert_eq!(header.game_type_kind(), GameType::TopVsBottom);
        assert_eq!(header.game_sub_type, 2);
        assert_eq!(header.creator_name, "neiv");
        assert_eq!(header.map_name, "Shadowlands");
        assert_eq!(header.player_colors[3], 0x0303);
        assert_eq!(header.player_spot_indices, [7, 6, 5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_decode_player_slots() {
        let header = decode_header(&sample_header()).unwrap();

        assert_eq!(header.player_names[0].as_deref(), Some("neiv"));
        assert_eq!(header.player_names[1].as_deref(), Some("Sargas Tribe"));
        assert_eq!(header.player_names[11], None);
        assert_eq!(header.player_ids[0], 0);
        assert_eq!(header.player_ids[2], COMPUTER_PLAYER_ID);
        assert_eq!(header.player_races[1], 2);

        let players: Vec<_> = header.players().map(|p| p.name.unwrap()).collect();
        assert_eq!(players, ["neiv", "Sargas Tribe"]);

        let computer = header.slots().nth(2).unwrap();
        assert!(computer.is_computer());
        assert_eq!(computer.race, Race::Zerg);
    }

    #[test]
    fn test_raw_records_kept() {
        let data = sample_header();
        let header = decode_header(&data).unwrap();
        assert_eq!(
            &header.player_records[..],
            &data[offsets::PLAYER_RECORDS..offsets::PLAYER_COLORS]
        );
    }

    #[test]
    fn test_short_header_is_truncated() {
        let data = vec![0u8; HEADER_SIZE - 1];
        assert!(matches!(
            decode_header(&data),
            Err(ReplayError::TruncatedData {
                needed: HEADER_SIZE,
                ..
            })
        ));
    }

    #[test]
    fn test_names_use_full_window() {
        let mut data = sample_header();
        // Game name fills its 28-byte window with no terminator
        put(&mut data, offsets::GAME_NAME, &[b'x'; offsets::GAME_NAME_LEN]);
        let header = decode_header(&data).unwrap();
        assert_eq!(header.game_name.len(), offsets::GAME_NAME_LEN);
    }

    #[test]
    fn test_save_time_and_duration() {
        let header = decode_header(&sample_header()).unwrap();
        assert_eq!(header.save_time().unwrap().timestamp(), 1_477_230_422);
        // 12 345 frames * 42 ms = 518.49 s
        assert_eq!(header.duration_seconds(), 518);
        assert_eq!(header.formatted_duration(), "8:38");
    }

    #[test]
    fn test_apm() {
        let mut header = decode_header(&sample_header()).unwrap();
        assert_eq!(header.player_apm("neiv"), Some(0));
        assert_eq!(header.player_apm("nobody"), None);

        header.player_id_action_counts[0] = 300;
        header.player_id_early_action_counts[0] = 100;
        // Last action exactly 60 seconds after the two-minute mark
        header.player_id_last_action_frames[0] = Some(FRAMES_IN_TWO_MINUTES + 1429);
        assert_eq!(header.player_action_count("neiv"), Some(300));
        assert_eq!(header.player_apm("neiv"), Some(200));

        header.player_id_action_counts[1] = 30;
        header.player_id_early_action_counts[1] = 30;
        header.player_id_last_action_frames[1] = Some(1429);
        assert_eq!(header.player_apm("Sargas Tribe"), Some(30));
    }

    #[test]
    fn test_computer_has_no_counts() {
        let header = decode_header(&sample_header()).unwrap();
        assert_eq!(header.player_action_count("Computer"), None);
        assert_eq!(header.player_apm("Computer"), None);
    }
}
