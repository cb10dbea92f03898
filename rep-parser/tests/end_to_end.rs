//! Whole-pipeline tests over synthetic replays

mod common;

use std::io::Cursor;

use common::{ReplayBuilder, chat, chunk};
use rep_parser::action::opcodes;
use rep_parser::{
    ActionKind, ChunkedUnpacker, ParseOptions, Position, RawUnpacker, ReplayError,
    parse_replay, parse_replay_file, try_parse_replay, try_parse_replay_file,
};

fn commands_only() -> ParseOptions {
    ParseOptions::new(true, false, false, false)
}

#[test]
fn test_empty_commands_section() {
    let builder = ReplayBuilder::new()
        .frame_count(100)
        .map_size(64, 64)
        .player(0, 0, 1, "neiv");

    let replay = parse_replay(RawUnpacker::new(&builder.raw()), &commands_only()).unwrap();

    assert_eq!(replay.header.frame_count, 100);
    assert_eq!(replay.header.map_width, 64);
    assert_eq!(replay.header.map_height, 64);
    assert_eq!(replay.header.player_names[0].as_deref(), Some("neiv"));
    assert_eq!(replay.header.player_ids[0], 0);

    let actions = replay.actions.unwrap();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions.get("neiv"), Some(&[][..]));
    assert_eq!(replay.header.player_id_last_action_frames[0], None);
}

#[test]
fn test_single_game_speed_action() {
    let builder = ReplayBuilder::new()
        .frame_count(100)
        .player(0, 0, 1, "neiv")
        .frame(50, &[&[0, opcodes::GAME_SPEED, 6]]);

    let replay = parse_replay(RawUnpacker::new(&builder.raw()), &commands_only()).unwrap();

    let actions = replay.actions.as_ref().unwrap().get("neiv").unwrap();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].frame, 50);
    assert_eq!(actions[0].kind, ActionKind::ChangeGameSpeed);
    assert_eq!(actions[0].parameters, "Fastest");
    assert_eq!(replay.header.player_id_action_counts[0], 1);
    assert_eq!(replay.header.player_id_early_action_counts[0], 1);
    assert_eq!(replay.header.player_id_last_action_frames[0], Some(50));
    assert_eq!(replay.header.player_action_count("neiv"), Some(1));
}

#[test]
fn test_unknown_opcode_recovers_on_next_frame() {
    let builder = ReplayBuilder::new()
        .player(0, 0, 0, "a")
        .player(1, 1, 2, "b")
        .frame(10, &[&[0, 0xEE, 1, 2, 3], &[0, opcodes::STIM]])
        .frame(11, &[&[1, opcodes::HOTKEY, 0, 1]])
        .frame(12, &[&[0, opcodes::CANCEL]]);

    let replay = parse_replay(RawUnpacker::new(&builder.raw()), &commands_only()).unwrap();
    let actions = replay.actions.unwrap();

    assert_eq!(actions.get("a").unwrap().len(), 1);
    assert_eq!(actions.get("a").unwrap()[0].frame, 12);
    assert_eq!(actions.get("b").unwrap()[0].parameters, "Assign,1");
    assert_eq!(actions.total_actions(), 2);
}

#[test]
fn test_invalid_player_id_yields_nothing() {
    let builder = ReplayBuilder::new()
        .player(0, 0, 0, "a")
        .frame(10, &[&[0, opcodes::STIM]])
        .frame(20, &[&[12, opcodes::STIM]]);

    assert!(parse_replay(RawUnpacker::new(&builder.raw()), &commands_only()).is_none());
    assert!(matches!(
        try_parse_replay(RawUnpacker::new(&builder.raw()), &commands_only()),
        Err(ReplayError::InvalidPlayerAttribution {
            player_id: 12,
            frame: 20
        })
    ));
}

#[test]
fn test_named_slot_with_out_of_range_id_yields_nothing() {
    let builder = ReplayBuilder::new()
        .player(0, 0, 0, "a")
        .player(1, 12, 1, "ghost")
        .frame(10, &[&[0, opcodes::STIM]]);

    assert!(parse_replay(RawUnpacker::new(&builder.raw()), &commands_only()).is_none());
    assert!(matches!(
        try_parse_replay(RawUnpacker::new(&builder.raw()), &commands_only()),
        Err(ReplayError::InvalidPlayerAttribution {
            player_id: 12,
            ..
        })
    ));
}

#[test]
fn test_bad_magic() {
    let mut raw = ReplayBuilder::new().raw();
    raw[0] = b'x';
    assert!(matches!(
        try_parse_replay(RawUnpacker::new(&raw), &commands_only()),
        Err(ReplayError::NotAReplay { .. })
    ));
}

#[test]
fn test_truncated_header() {
    let raw = ReplayBuilder::new().raw();
    assert!(parse_replay(RawUnpacker::new(&raw[..100]), &commands_only()).is_none());
}

#[test]
fn test_chat_and_computer_players() {
    let builder = ReplayBuilder::new()
        .player(0, 0, 1, "neiv")
        .player(1, 0xFF, 0, "Computer")
        .player(2, 1, 2, "jaedong")
        .frame(50, &[&chat(0, 0, "gg")])
        .frame(1429, &[&chat(1, 2, "gg wp"), &chat(0, 1, "beep")]);

    let options = ParseOptions::new(true, true, false, false);
    let replay = parse_replay(RawUnpacker::new(&builder.raw()), &options).unwrap();

    assert_eq!(
        replay.chat.as_deref(),
        Some("0:02 - neiv: gg\r\n1:00 - jaedong: gg wp")
    );
    let actions = replay.actions.unwrap();
    let mut players: Vec<_> = actions.players().collect();
    players.sort_unstable();
    assert_eq!(players, ["jaedong", "neiv"]);
}

#[test]
fn test_action_lists_disabled() {
    let builder = ReplayBuilder::new()
        .player(0, 0, 1, "neiv")
        .frame(5000, &[&[0, opcodes::SIEGE, 0]]);

    let mut options = commands_only();
    options.action_lists = false;
    let replay = parse_replay(RawUnpacker::new(&builder.raw()), &options).unwrap();

    assert!(replay.actions.is_none());
    assert_eq!(replay.header.player_id_action_counts[0], 1);
    assert_eq!(replay.header.player_id_early_action_counts[0], 0);
    assert_eq!(replay.header.player_id_last_action_frames[0], Some(5000));
}

#[test]
fn test_shared_player_id() {
    // Two slots controlling the same player id see the same actions
    let builder = ReplayBuilder::new()
        .player(0, 0, 1, "one")
        .player(1, 0, 1, "two")
        .frame(10, &[&[0, opcodes::STIM]]);

    let replay = parse_replay(RawUnpacker::new(&builder.raw()), &commands_only()).unwrap();
    let actions = replay.actions.unwrap();
    assert_eq!(actions.get("one"), actions.get("two"));
    assert_eq!(actions.get("one").unwrap().len(), 1);
}

#[test]
fn test_map_dimensions_without_tiles() {
    let mut map = chunk(b"VER ", &[0x3B, 0]);
    map.extend(chunk(b"DIM ", &[128, 0, 128, 0]));
    let builder = ReplayBuilder::new().map_size(96, 96).map_data(map);

    let options = ParseOptions::new(true, false, true, false);
    let replay = parse_replay(RawUnpacker::new(&builder.raw()), &options).unwrap();
    assert_eq!(replay.header.map_width, 128);
    assert_eq!(replay.header.map_height, 128);
    assert!(replay.map.is_none());
}

#[test]
fn test_map_tiles_and_units() {
    let mut unit = [0u8; 36];
    unit[4..6].copy_from_slice(&100u16.to_le_bytes());
    unit[6..8].copy_from_slice(&200u16.to_le_bytes());
    unit[8..10].copy_from_slice(&214u16.to_le_bytes());
    unit[16] = 1;

    let mut map = chunk(b"ERA ", &[3, 0]);
    map.extend(chunk(b"DIM ", &[2, 0, 2, 0]));
    map.extend(chunk(b"MTXM", &[1, 0, 2, 0, 3, 0, 4, 0]));
    map.extend(chunk(b"MTXM", &[9, 0]));
    map.extend(chunk(b"UNIT", &unit));
    let builder = ReplayBuilder::new().map_size(2, 2).map_data(map);

    let options = ParseOptions::everything();
    let replay = parse_replay(RawUnpacker::new(&builder.raw()), &options).unwrap();
    let map = replay.map.unwrap();

    assert_eq!(map.tile_set, Some(3));
    assert_eq!(map.tiles, Some(vec![9, 2, 3, 4]));
    assert_eq!(map.start_locations.len(), 1);
    assert_eq!(map.start_locations[0].owner, 1);
    assert_eq!(
        (map.start_locations[0].x, map.start_locations[0].y),
        (100, 200)
    );
    assert!(map.mineral_fields.is_empty());
    assert_eq!(map.geysers, Vec::<Position>::new());
}

#[test]
fn test_chunked_stream() {
    // Enough select commands to span several compressed chunks
    let mut builder = ReplayBuilder::new().player(0, 0, 2, "neiv");
    for i in 0..3000u32 {
        builder = builder.frame(i, &[&[0, opcodes::SELECT, 1, (i % 200) as u8, 0]]);
    }

    let file = builder.file();
    let replay = parse_replay(ChunkedUnpacker::new(Cursor::new(file)), &commands_only()).unwrap();
    assert_eq!(replay.actions.unwrap().get("neiv").unwrap().len(), 3000);
    assert_eq!(replay.header.player_id_early_action_counts[0], 2857);
}

#[test]
fn test_replay_file_on_disk() {
    let builder = ReplayBuilder::new()
        .frame_count(2000)
        .map_name("Fighting Spirit")
        .player(0, 0, 1, "neiv")
        .frame(50, &[&[0, opcodes::TRAIN, 0, 0]]);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.rep");
    std::fs::write(&path, builder.file()).unwrap();

    let replay = parse_replay_file(&path, &commands_only()).unwrap();
    assert_eq!(replay.header.map_name, "Fighting Spirit");
    let actions = replay.actions.unwrap();
    assert_eq!(actions.get("neiv").unwrap()[0].parameters, "Marine");

    assert!(parse_replay_file(dir.path().join("missing.rep"), &commands_only()).is_none());
    assert!(matches!(
        try_parse_replay_file(dir.path().join("missing.rep"), &commands_only()),
        Err(ReplayError::Io(_))
    ));
}

#[test]
fn test_replay_serializes() {
    let builder = ReplayBuilder::new()
        .player(0, 0, 1, "neiv")
        .frame(50, &[&[0, opcodes::MINIMAP_PING, 1, 0, 2, 0]]);
    let replay = parse_replay(RawUnpacker::new(&builder.raw()), &commands_only()).unwrap();

    let json = serde_json::to_value(&replay).unwrap();
    assert_eq!(json["header"]["player_names"][0], "neiv");
    assert_eq!(json["actions"]["neiv"][0]["parameters"], "(1,2)");
    assert_eq!(json["actions"]["neiv"][0]["kind"], "MinimapPing");
}
