//! Bounds-checked little-endian read cursor
//!
//! All section decoding reads through [`BinaryCursor`]. Reads never
//! advance past the end of the buffer: a short read fails with
//! [`ReplayError::TruncatedData`] and leaves the position untouched.
//! Seeking is lenient and clamps to the buffer length, which is what the
//! skip-to-block-end and skip-to-chunk-end recovery points rely on.

use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::ReplayError;

/// Read cursor over a decompressed section
#[derive(Debug, Clone)]
pub struct BinaryCursor<'a> {
    inner: Cursor<&'a [u8]>,
}

impl<'a> BinaryCursor<'a> {
    /// Create a cursor positioned at the start of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            inner: Cursor::new(data),
        }
    }

    /// Current absolute position
    pub fn position(&self) -> usize {
        self.inner.position() as usize
    }

    /// Total buffer length
    pub fn len(&self) -> usize {
        self.inner.get_ref().len()
    }

    /// True if the buffer holds no bytes
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes left before the end of the buffer
    pub fn remaining(&self) -> usize {
        self.len().saturating_sub(self.position())
    }

    /// Bytes left before `limit` (zero once the position reaches it)
    pub fn remaining_before(&self, limit: usize) -> usize {
        limit.min(self.len()).saturating_sub(self.position())
    }

    /// Move to an absolute position, clamped to the buffer length
    pub fn seek(&mut self, position: usize) {
        self.inner.set_position(position.min(self.len()) as u64);
    }

    /// Skip `count` bytes that must be present
    pub fn skip_exact(&mut self, count: usize) -> Result<(), ReplayError> {
        self.ensure(count)?;
        self.seek(self.position() + count);
        Ok(())
    }

    /// Read one unsigned byte
    pub fn read_u8(&mut self) -> Result<u8, ReplayError> {
        self.ensure(1)?;
        Ok(self.inner.read_u8()?)
    }

    /// Read one signed byte
    pub fn read_i8(&mut self) -> Result<i8, ReplayError> {
        self.ensure(1)?;
        Ok(self.inner.read_i8()?)
    }

    /// Read a little-endian u16
    pub fn read_u16(&mut self) -> Result<u16, ReplayError> {
        self.ensure(2)?;
        Ok(self.inner.read_u16::<LittleEndian>()?)
    }

    /// Read a little-endian i16
    pub fn read_i16(&mut self) -> Result<i16, ReplayError> {
        self.ensure(2)?;
        Ok(self.inner.read_i16::<LittleEndian>()?)
    }

    /// Read a little-endian u32
    pub fn read_u32(&mut self) -> Result<u32, ReplayError> {
        self.ensure(4)?;
        Ok(self.inner.read_u32::<LittleEndian>()?)
    }

    /// Read a little-endian i32
    pub fn read_i32(&mut self) -> Result<i32, ReplayError> {
        self.ensure(4)?;
        Ok(self.inner.read_i32::<LittleEndian>()?)
    }

    /// Borrow the next `count` bytes and advance past them
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], ReplayError> {
        self.ensure(count)?;
        let start = self.position();
        let data: &'a [u8] = *self.inner.get_ref();
        self.seek(start + count);
        Ok(&data[start..start + count])
    }

    /// Copy the next `N` bytes into an array
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], ReplayError> {
        self.ensure(N)?;
        let mut buf = [0u8; N];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Read a fixed-width, zero-padded string field
    pub fn read_fixed_string(&mut self, width: usize) -> Result<String, ReplayError> {
        Ok(zero_padded_string(self.read_bytes(width)?))
    }

    fn ensure(&self, needed: usize) -> Result<(), ReplayError> {
        let available = self.remaining();
        if available < needed {
            return Err(ReplayError::TruncatedData {
                position: self.position(),
                needed,
                available,
            });
        }
        Ok(())
    }
}

/// Decode a zero-terminated string from a fixed-width window
///
/// Bytes after the first zero are ignored. Invalid UTF-8 is replaced
/// rather than rejected.
pub fn zero_padded_string(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}
