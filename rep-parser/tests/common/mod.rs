//! Synthetic replay builder shared by the integration tests

#![allow(dead_code)]

use std::io::Write;

use flate2::Compression;
use flate2::write::ZlibEncoder;
use rep_parser::header::offsets;
use rep_parser::unpack::CHUNK_SIZE;
use rep_parser::{COMPUTER_PLAYER_ID, HEADER_SIZE, MAX_PLAYER_SLOTS, PLAYER_RECORD_SIZE};

/// Builds the decompressed sections of a replay
#[derive(Debug, Clone)]
pub struct ReplayBuilder {
    header: Vec<u8>,
    commands: Vec<u8>,
    map: Option<Vec<u8>>,
}

impl Default for ReplayBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplayBuilder {
    /// Empty header with every slot unused
    pub fn new() -> Self {
        let mut header = vec![0u8; HEADER_SIZE];
        for slot in 0..MAX_PLAYER_SLOTS {
            header[record(slot) + offsets::RECORD_PLAYER_ID] = COMPUTER_PLAYER_ID;
        }
        Self {
            header,
            commands: Vec::new(),
            map: None,
        }
    }

    pub fn frame_count(mut self, frames: u32) -> Self {
        self.put(offsets::FRAME_COUNT, &frames.to_le_bytes());
        self
    }

    pub fn map_size(mut self, width: u16, height: u16) -> Self {
        self.put(offsets::MAP_WIDTH, &width.to_le_bytes());
        self.put(offsets::MAP_HEIGHT, &height.to_le_bytes());
        self
    }

    pub fn map_name(mut self, name: &str) -> Self {
        self.put(offsets::MAP_NAME, name.as_bytes());
        self
    }

    pub fn player(mut self, slot: usize, id: u8, race: u8, name: &str) -> Self {
        let base = record(slot);
        self.header[base + offsets::RECORD_PLAYER_ID] = id;
        self.header[base + offsets::RECORD_RACE] = race;
        self.put(base + offsets::RECORD_NAME, name.as_bytes());
        self
    }

    /// Append a frame record to the commands section
    pub fn frame(mut self, frame_no: u32, commands: &[&[u8]]) -> Self {
        self.commands.extend(frame(frame_no, commands));
        self
    }

    pub fn map_data(mut self, data: Vec<u8>) -> Self {
        self.map = Some(data);
        self
    }

    pub fn header_bytes(&self) -> &[u8] {
        &self.header
    }

    /// Sections in read order, each as its decompressed bytes
    pub fn sections(&self) -> Vec<Vec<u8>> {
        let mut sections = vec![
            b"reRS".to_vec(),
            self.header.clone(),
            (self.commands.len() as u32).to_le_bytes().to_vec(),
            self.commands.clone(),
        ];
        if let Some(map) = &self.map {
            sections.push((map.len() as u32).to_le_bytes().to_vec());
            sections.push(map.clone());
        }
        sections
    }

    /// Sections back to back, for `RawUnpacker`
    pub fn raw(&self) -> Vec<u8> {
        self.sections().concat()
    }

    /// Sections in the on-disk chunked framing, zlib compressed
    pub fn file(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for section in self.sections() {
            let chunks: Vec<&[u8]> = section.chunks(CHUNK_SIZE).collect();
            out.extend(0u32.to_le_bytes());
            out.extend((chunks.len() as u32).to_le_bytes());
            for chunk in chunks {
                let compressed = zlib(chunk);
                // A chunk stored at its inflated size is read as raw
                let stored = if compressed.len() == chunk.len() {
                    chunk.to_vec()
                } else {
                    compressed
                };
                out.extend((stored.len() as u32).to_le_bytes());
                out.extend(stored);
            }
        }
        out
    }

    fn put(&mut self, offset: usize, bytes: &[u8]) {
        self.header[offset..offset + bytes.len()].copy_from_slice(bytes);
    }
}

fn record(slot: usize) -> usize {
    offsets::PLAYER_RECORDS + slot * PLAYER_RECORD_SIZE
}

pub fn zlib(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// One frame record holding `commands` (each prefixed with its player id)
pub fn frame(frame: u32, commands: &[&[u8]]) -> Vec<u8> {
    let body = commands.concat();
    let mut out = frame.to_le_bytes().to_vec();
    out.push(body.len() as u8);
    out.extend(body);
    out
}

/// One tagged map data chunk
pub fn chunk(tag: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut out = tag.to_vec();
    out.extend((body.len() as u32).to_le_bytes());
    out.extend_from_slice(body);
    out
}

/// A chat command from `sender` (slot index)
pub fn chat(player_id: u8, sender: u8, message: &str) -> Vec<u8> {
    let mut out = vec![player_id, 0x5C, sender];
    let mut window = [0u8; 80];
    window[..message.len()].copy_from_slice(message.as_bytes());
    out.extend_from_slice(&window);
    out
}
