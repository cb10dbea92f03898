//! Section unpacking
//!
//! A replay file is a sequence of sections, each of which the reader asks
//! for by its decompressed length. On disk every section is framed as
//!
//! ```text
//! checksum u32 | chunk count u32 | { stored length u32 | bytes }*
//! ```
//!
//! where chunk `k` inflates to `min(8192, bytes still missing)`. A chunk
//! stored at exactly that size is raw; otherwise it is zlib (leading `0x78`)
//! or PKWARE DCL implode.

use std::io::{self, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use explode::ExplodeReader;
use flate2::bufread::ZlibDecoder;

use crate::cursor::BinaryCursor;
use crate::error::ReplayError;

/// Decompressed size of a full chunk
pub const CHUNK_SIZE: usize = 8192;

/// First byte of a zlib stream with the default window
const ZLIB_MARKER: u8 = 0x78;

/// Source of decompressed replay sections
pub trait SectionUnpacker {
    /// Produce exactly `len` decompressed bytes, or fail
    fn unpack_section(&mut self, len: usize) -> Result<Vec<u8>, ReplayError>;
}

impl<U: SectionUnpacker + ?Sized> SectionUnpacker for &mut U {
    fn unpack_section(&mut self, len: usize) -> Result<Vec<u8>, ReplayError> {
        (**self).unpack_section(len)
    }
}

impl<U: SectionUnpacker + ?Sized> SectionUnpacker for Box<U> {
    fn unpack_section(&mut self, len: usize) -> Result<Vec<u8>, ReplayError> {
        (**self).unpack_section(len)
    }
}

/// Allocation limits applied before trusting lengths read from a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnpackLimits {
    /// Largest section length that will be unpacked
    pub max_section_len: usize,
}

impl Default for UnpackLimits {
    fn default() -> Self {
        Self {
            max_section_len: 64 * 1024 * 1024,
        }
    }
}

impl UnpackLimits {
    fn check(&self, len: usize) -> Result<(), ReplayError> {
        if len > self.max_section_len {
            return Err(ReplayError::MalformedSection(format!(
                "section length {len} exceeds limit of {} bytes",
                self.max_section_len
            )));
        }
        Ok(())
    }
}

// ===== Raw =====

/// Sections stored back to back without framing or compression
#[derive(Debug, Clone)]
pub struct RawUnpacker<'a> {
    cursor: BinaryCursor<'a>,
    limits: UnpackLimits,
}

impl<'a> RawUnpacker<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_limits(data, UnpackLimits::default())
    }

    pub fn with_limits(data: &'a [u8], limits: UnpackLimits) -> Self {
        Self {
            cursor: BinaryCursor::new(data),
            limits,
        }
    }

    /// Bytes not yet handed out
    pub fn remaining(&self) -> usize {
        self.cursor.remaining()
    }
}

impl SectionUnpacker for RawUnpacker<'_> {
    fn unpack_section(&mut self, len: usize) -> Result<Vec<u8>, ReplayError> {
        self.limits.check(len)?;
        Ok(self.cursor.read_bytes(len)?.to_vec())
    }
}

// ===== Chunked =====

/// Sections in the on-disk chunked, compressed framing
#[derive(Debug)]
pub struct ChunkedUnpacker<R> {
    reader: R,
    limits: UnpackLimits,
}

impl<R: Read> ChunkedUnpacker<R> {
    pub fn new(reader: R) -> Self {
        Self::with_limits(reader, UnpackLimits::default())
    }

    pub fn with_limits(reader: R, limits: UnpackLimits) -> Self {
        Self { reader, limits }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn read_chunk(&mut self, expected: usize, out: &mut Vec<u8>) -> Result<(), ReplayError> {
        let stored = self.reader.read_u32::<LittleEndian>()? as usize;
        // Compressed data never needs more room than the section itself
        self.limits.check(stored)?;

        let mut compressed = vec![0u8; stored];
        self.reader.read_exact(&mut compressed)?;

        if stored == expected {
            out.extend_from_slice(&compressed);
            return Ok(());
        }

        let inflated = if compressed.first() == Some(&ZLIB_MARKER) {
            inflate(ZlibDecoder::new(&compressed[..]), expected, out)
        } else {
            inflate(ExplodeReader::new(&compressed[..]), expected, out)
        };

        match inflated {
            Ok(n) if n == expected => Ok(()),
            Ok(n) => Err(ReplayError::MalformedSection(format!(
                "chunk inflated to {n} bytes, expected {expected}"
            ))),
            Err(e) => Err(ReplayError::MalformedSection(format!(
                "chunk failed to inflate: {e}"
            ))),
        }
    }
}

impl<R: Read> SectionUnpacker for ChunkedUnpacker<R> {
    fn unpack_section(&mut self, len: usize) -> Result<Vec<u8>, ReplayError> {
        self.limits.check(len)?;

        let _checksum = self.reader.read_u32::<LittleEndian>()?;
        let chunk_count = self.reader.read_u32::<LittleEndian>()? as usize;
        if chunk_count > len.div_ceil(CHUNK_SIZE) {
            return Err(ReplayError::MalformedSection(format!(
                "{chunk_count} chunks for a section of {len} bytes"
            )));
        }

        let mut out = Vec::with_capacity(len);
        for _ in 0..chunk_count {
            let expected = (len - out.len()).min(CHUNK_SIZE);
            self.read_chunk(expected, &mut out)?;
        }

        if out.len() != len {
            return Err(ReplayError::MalformedSection(format!(
                "section unpacked to {} bytes, expected {len}",
                out.len()
            )));
        }
        Ok(out)
    }
}

/// Decompress at most `expected + 1` bytes so oversized output is detected
/// without inflating all of it
fn inflate(decoder: impl Read, expected: usize, out: &mut Vec<u8>) -> io::Result<usize> {
    decoder.take(expected as u64 + 1).read_to_end(out)
}
