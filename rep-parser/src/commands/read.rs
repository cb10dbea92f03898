//! Opcode payload decoding

use crate::action::{Action, ActionKind, opcodes::*};
use crate::cursor::BinaryCursor;
use crate::error::ReplayError;
use crate::names::{NameTables, UNKNOWN_NAME};

/// Decode one command payload following its opcode byte
///
/// Parameter text renders unit indices and coordinates as signed values;
/// the typed fields keep the raw bits.
///
/// Returns `Ok(None)` for opcodes with no known layout; the caller is
/// responsible for resynchronizing.
pub(super) fn read_action(
    cursor: &mut BinaryCursor<'_>,
    frame: u32,
    opcode: u8,
    names: &NameTables,
) -> Result<Option<Action>, ReplayError> {
    let action = match opcode {
        SELECT | SHIFT_SELECT | SHIFT_DESELECT => {
            let kind = match opcode {
                SELECT => ActionKind::Select,
                SHIFT_SELECT => ActionKind::ShiftSelect,
                _ => ActionKind::ShiftDeselect,
            };
            let count = cursor.read_u8()?;
            let mut units = Vec::with_capacity(count as usize);
            for _ in 0..count {
                units.push(cursor.read_i16()?.to_string());
            }
            Action::new(frame, opcode, kind, units.join(","))
        }
        BUILD => {
            let _placement = cursor.read_u8()?;
            let x = cursor.read_i16()?;
            let y = cursor.read_i16()?;
            let unit = cursor.read_u16()?;
            let name = names.unit(unit).unwrap_or(UNKNOWN_NAME);
            Action::new(frame, opcode, ActionKind::Build, format!("({x},{y}),{name}"))
                .with_position(x as u16, y as u16)
                .with_unit(unit)
        }
        VISION => Action::new(frame, opcode, ActionKind::Vision, hex_dump(cursor.read_bytes(2)?)),
        ALLY => Action::new(frame, opcode, ActionKind::Ally, hex_dump(cursor.read_bytes(4)?)),
        GAME_SPEED => {
            let speed = cursor.read_u8()?;
            let name = names.speed(speed).unwrap_or(UNKNOWN_NAME);
            Action::new(frame, opcode, ActionKind::ChangeGameSpeed, name)
        }
        HOTKEY => {
            let mode = if cursor.read_u8()? == 0 { "Assign" } else { "Select" };
            let group = cursor.read_i8()?;
            Action::new(frame, opcode, ActionKind::Hotkey, format!("{mode},{group}"))
        }
        MOVE => {
            let x = cursor.read_i16()?;
            let y = cursor.read_i16()?;
            let _target = cursor.read_u16()?;
            // Unit type (u16) and queue flag (u8)
            cursor.skip_exact(3)?;
            Action::new(frame, opcode, ActionKind::Move, format!("{x},{y}"))
                .with_position(x as u16, y as u16)
        }
        TARGETED_ORDER => {
            let x = cursor.read_i16()?;
            let y = cursor.read_i16()?;
            let _target = cursor.read_u16()?;
            let _unknown = cursor.read_u16()?;
            let subtype = cursor.read_u8()?;
            let _queued = cursor.read_u8()?;
            Action::new(
                frame,
                opcode,
                ActionKind::from_order_subtype(subtype),
                format!("{x},{y}"),
            )
            .with_position(x as u16, y as u16)
            .with_secondary(subtype as u16)
        }
        TRAIN | HATCH => {
            let kind = if opcode == TRAIN {
                ActionKind::Train
            } else {
                ActionKind::Hatch
            };
            let unit = cursor.read_u16()?;
            Action::new(frame, opcode, kind, names.unit(unit).unwrap_or(UNKNOWN_NAME))
                .with_unit(unit)
        }
        MORPH => {
            let unit = cursor.read_u16()?;
            Action::new(
                frame,
                opcode,
                ActionKind::Morph,
                names.unit(unit).unwrap_or(UNKNOWN_NAME),
            )
            .with_unit(unit)
            .with_secondary(unit)
        }
        CANCEL_TRAIN | UNLOAD => {
            let kind = if opcode == CANCEL_TRAIN {
                ActionKind::CancelTrain
            } else {
                ActionKind::Unload
            };
            cursor.skip_exact(2)?;
            Action::new(frame, opcode, kind, "")
        }
        RESEARCH => {
            let id = cursor.read_u8()?;
            Action::new(
                frame,
                opcode,
                ActionKind::Research,
                names.research(id).unwrap_or(UNKNOWN_NAME),
            )
            .with_secondary(id as u16)
        }
        UPGRADE => {
            let id = cursor.read_u8()?;
            Action::new(
                frame,
                opcode,
                ActionKind::Upgrade,
                names.upgrade(id).unwrap_or(UNKNOWN_NAME),
            )
            .with_secondary(id as u16)
        }
        STOP | RETURN_CARGO | CLOAK | DECLOAK | UNSIEGE | SIEGE | UNLOAD_ALL | HOLD_POSITION
        | BURROW | UNBURROW => {
            let queued = cursor.read_u8()? != 0;
            let parameters = match opcode {
                STOP | RETURN_CARGO | UNLOAD_ALL | HOLD_POSITION if queued => "Queued",
                STOP | RETURN_CARGO | UNLOAD_ALL | HOLD_POSITION => "Instant",
                _ => "",
            };
            Action::new(frame, opcode, single_byte_kind(opcode), parameters)
        }
        LEAVE_GAME => {
            let reason = match cursor.read_u8()? {
                1 => "Quit",
                6 => "Dropped",
                _ => "",
            };
            Action::new(frame, opcode, ActionKind::LeaveGame, reason)
        }
        MINIMAP_PING => {
            let x = cursor.read_i16()?;
            let y = cursor.read_i16()?;
            Action::new(frame, opcode, ActionKind::MinimapPing, format!("({x},{y})"))
                .with_position(x as u16, y as u16)
        }
        USE_CHEAT | LIFT => {
            let kind = if opcode == USE_CHEAT {
                ActionKind::UseCheat
            } else {
                ActionKind::Lift
            };
            Action::new(frame, opcode, kind, hex_dump(cursor.read_bytes(4)?))
        }
        CANCEL => Action::new(frame, opcode, ActionKind::Cancel, ""),
        CANCEL_HATCH => Action::new(frame, opcode, ActionKind::CancelHatch, ""),
        BUILD_INTERCEPTOR => Action::new(frame, opcode, ActionKind::BuildInterceptor, ""),
        MERGE_ARCHON => Action::new(frame, opcode, ActionKind::MergeArchon, ""),
        CANCEL_NUKE => Action::new(frame, opcode, ActionKind::CancelNuke, ""),
        CANCEL_RESEARCH => Action::new(frame, opcode, ActionKind::CancelResearch, ""),
        STIM => Action::new(frame, opcode, ActionKind::Stim, ""),
        MERGE_DARK_ARCHON => Action::new(frame, opcode, ActionKind::MergeDarkArchon, ""),
        _ => return Ok(None),
    };

    Ok(Some(action))
}

fn single_byte_kind(opcode: u8) -> ActionKind {
    match opcode {
        STOP => ActionKind::Stop,
        RETURN_CARGO => ActionKind::ReturnCargo,
        CLOAK => ActionKind::Cloak,
        DECLOAK => ActionKind::Decloak,
        UNSIEGE => ActionKind::Unsiege,
        SIEGE => ActionKind::Siege,
        UNLOAD_ALL => ActionKind::UnloadAll,
        HOLD_POSITION => ActionKind::HoldPosition,
        BURROW => ActionKind::Burrow,
        _ => ActionKind::Unburrow,
    }
}

/// Uppercase hex digits per byte, space separated
pub fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}
