//! Big-endian byte cursor
//!
//! Thin wrapper over `std::io::Cursor` that maps short reads to
//! [`Error::UnexpectedEndOfStream`] and provides the offset-table and
//! null-terminated-name primitives every container is built from.

use byteorder::{BigEndian, ReadBytesExt};
use std::io::{self, Cursor, Read};

use crate::{Error, Result, MAX_NAME_LEN};

/// Seekable big-endian reader over an in-memory container
pub struct Reader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(data),
        }
    }

    /// Total length of the underlying data
    #[inline]
    pub fn len(&self) -> usize {
        self.cursor.get_ref().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    /// Move to an absolute offset. Offsets past the end are allowed; the next
    /// read from there fails instead.
    #[inline]
    pub fn seek(&mut self, offset: u64) {
        self.cursor.set_position(offset);
    }

    /// Bytes left between the current position and the end of data
    pub fn remaining(&self) -> usize {
        self.len().saturating_sub(self.position() as usize)
    }

    /// Run `f` and put the cursor back where it was, whether `f` succeeded or not
    pub fn restoring<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let saved = self.position();
        let result = f(self);
        self.seek(saved);
        result
    }

    /// Run `f` at an absolute offset, then return to the current position
    pub fn at<T>(&mut self, offset: u32, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.restoring(|r| {
            r.seek(u64::from(offset));
            f(r)
        })
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_with(|c| c.read_u8())
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_with(|c| c.read_u16::<BigEndian>())
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        self.read_with(|c| c.read_i16::<BigEndian>())
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_with(|c| c.read_u32::<BigEndian>())
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_with(|c| c.read_i32::<BigEndian>())
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        if n > self.remaining() {
            return Err(Error::UnexpectedEndOfStream {
                offset: self.position(),
            });
        }
        let mut buf = vec![0u8; n];
        self.read_with(|c| c.read_exact(&mut buf))?;
        Ok(buf)
    }

    /// Read `count` absolute offsets in file order without following them
    pub fn read_offsets(&mut self, count: usize) -> Result<Vec<u32>> {
        // count comes from the file; let the reads bound it
        let mut offsets = Vec::new();
        for _ in 0..count {
            offsets.push(self.read_u32()?);
        }
        Ok(offsets)
    }

    /// Read a u32 count followed by that many offsets
    pub fn read_offset_table(&mut self) -> Result<Vec<u32>> {
        let count = self.read_u32()?;
        self.read_offsets(count as usize)
    }

    /// Read bytes up to `terminator` (consumed, not returned) as ASCII text.
    ///
    /// Names longer than [`MAX_NAME_LEN`] bytes are rejected rather than truncated.
    pub fn read_terminated(&mut self, terminator: u8) -> Result<String> {
        let start = self.position();
        let mut bytes = Vec::new();

        loop {
            let byte = self.read_u8()?;
            if byte == terminator {
                break;
            }
            if bytes.len() == MAX_NAME_LEN {
                return Err(Error::InvalidStringEncoding {
                    offset: start,
                    limit: MAX_NAME_LEN,
                });
            }
            bytes.push(byte);
        }

        Ok(bytes
            .into_iter()
            .map(|b| if b.is_ascii() { b as char } else { '?' })
            .collect())
    }

    /// Resolve a null-terminated name at `offset` without moving the cursor
    pub fn read_name_at(&mut self, offset: u32) -> Result<String> {
        self.at(offset, |r| r.read_terminated(0x00))
    }

    fn read_with<T>(&mut self, f: impl FnOnce(&mut Cursor<&'a [u8]>) -> io::Result<T>) -> Result<T> {
        let offset = self.position();
        f(&mut self.cursor).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => Error::UnexpectedEndOfStream { offset },
            _ => Error::Io(e),
        })
    }
}
