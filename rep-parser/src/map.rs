//! Map data section decoder
//!
//! The section is a walk over tagged chunks (`tag[4] | length u32 | body`).
//! Only four chunks are understood:
//!
//! - `DIM ` - true map dimensions, corrects the header's width/height
//! - `ERA ` - tile set id
//! - `MTXM` - tile grid, possibly split over several chunks
//! - `UNIT` - placed units (resources and start locations)
//!
//! Everything else is skipped.

use serde::Serialize;
use tracing::trace;

use crate::action::Position;
use crate::cursor::BinaryCursor;
use crate::error::ReplayError;
use crate::header::ReplayHeader;
use crate::names::{UNIT_MINERAL_FIELDS, UNIT_START_LOCATION, UNIT_VESPENE_GEYSER};

// ===== Chunk tags =====

pub const CHUNK_DIMENSIONS: &[u8; 4] = b"DIM ";
pub const CHUNK_TILE_SET: &[u8; 4] = b"ERA ";
pub const CHUNK_TILES: &[u8; 4] = b"MTXM";
pub const CHUNK_UNITS: &[u8; 4] = b"UNIT";

/// Size of one `UNIT` record
pub const UNIT_RECORD_SIZE: usize = 36;

/// `DIM ` values above this are treated as garbage
pub const MAX_MAP_DIMENSION: u16 = 256;

/// Tile and placement data from the map section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MapData {
    pub tile_set: Option<u16>,
    /// Row-major tile ids
    pub tiles: Option<Vec<u16>>,
    pub mineral_fields: Vec<Position>,
    pub geysers: Vec<Position>,
    pub start_locations: Vec<StartLocation>,
}

/// Start location marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StartLocation {
    pub x: u16,
    pub y: u16,
    /// Owning player slot
    pub owner: u8,
}

/// Decode the map data section
///
/// The `DIM ` chunk is always honored and may widen the header's map size.
/// With `want_tiles` unset the walk stops right after it and `None` is
/// returned; otherwise tiles, tile set and unit placements are collected.
pub fn decode_map_data(
    data: &[u8],
    header: &mut ReplayHeader,
    want_tiles: bool,
) -> Result<Option<MapData>, ReplayError> {
    let mut cursor = BinaryCursor::new(data);
    let mut map = MapData::default();

    while cursor.remaining() > 0 {
        let tag = cursor.read_array::<4>()?;
        let len = cursor.read_u32()? as usize;
        let chunk_end = cursor.position().saturating_add(len);

        match &tag {
            CHUNK_DIMENSIONS => {
                apply_dimensions(&mut cursor, header)?;
                if !want_tiles {
                    break;
                }
            }
            CHUNK_UNITS if want_tiles => read_units(&mut cursor, chunk_end, &mut map)?,
            CHUNK_TILES if want_tiles => read_tiles(&mut cursor, len / 2, &mut map)?,
            CHUNK_TILE_SET if want_tiles => map.tile_set = Some(cursor.read_u16()?),
            _ => trace!(tag = %String::from_utf8_lossy(&tag), len, "skipping map chunk"),
        }

        if cursor.position() < chunk_end {
            cursor.seek(chunk_end);
        }
    }

    Ok(want_tiles.then_some(map))
}

fn apply_dimensions(
    cursor: &mut BinaryCursor<'_>,
    header: &mut ReplayHeader,
) -> Result<(), ReplayError> {
    let width = cursor.read_u16()?;
    let height = cursor.read_u16()?;

    // Zero or oversized values show up in the wild and must not win
    if width <= MAX_MAP_DIMENSION && height <= MAX_MAP_DIMENSION {
        if width > header.map_width {
            header.map_width = width;
        }
        if height > header.map_height {
            header.map_height = height;
        }
    }
    Ok(())
}

fn read_units(
    cursor: &mut BinaryCursor<'_>,
    chunk_end: usize,
    map: &mut MapData,
) -> Result<(), ReplayError> {
    while cursor.position() < chunk_end {
        let record_end = cursor.position() + UNIT_RECORD_SIZE;
        cursor.skip_exact(4)?;
        let x = cursor.read_u16()?;
        let y = cursor.read_u16()?;
        let unit_type = cursor.read_u16()?;
        // Unknown, property flags, valid-element flags
        cursor.skip_exact(6)?;
        let owner = cursor.read_u8()?;

        if UNIT_MINERAL_FIELDS.contains(&unit_type) {
            map.mineral_fields.push(Position { x, y });
        } else if unit_type == UNIT_VESPENE_GEYSER {
            map.geysers.push(Position { x, y });
        } else if unit_type == UNIT_START_LOCATION {
            map.start_locations.push(StartLocation { x, y, owner });
        }

        cursor.seek(record_end);
    }
    Ok(())
}

fn read_tiles(
    cursor: &mut BinaryCursor<'_>,
    cells: usize,
    map: &mut MapData,
) -> Result<(), ReplayError> {
    // Later chunks overwrite the start of the grid sized by the first one
    let tiles = map.tiles.get_or_insert_with(|| vec![0; cells]);
    let writable = cells.min(tiles.len());
    for tile in &mut tiles[..writable] {
        *tile = cursor.read_u16()?;
    }
    Ok(())
}
