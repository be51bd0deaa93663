//! BSC sequence collection parsing
//!
//! ```text
//! u32 reserved | u32 size | u32 group offset * N
//! group:    u32 count | u32 sequence offset * count
//! sequence: opcodes up to an end opcode (0xFFC1 / 0xFFC3)
//! ```
//!
//! The container does not store its own group count: `N` is the group count of
//! the first section of the matching BST. Sequences have no stored length
//! either; it is found by scanning byte by byte for an end opcode, which may
//! start at an odd offset.
//!
//! An end opcode pattern inside a sequence's operands is indistinguishable
//! from the real terminator and ends the sequence early.

use serde::{Serialize, Serializer};

use crate::bst::Bank;
use crate::reader::Reader;
use crate::{Error, Result, SEQUENCE_TERMINATORS};

/// Decoded BSC container
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceBank {
    /// Declared size from the header; informational only
    pub size: u32,
    /// One entry per group of the BST's first section
    pub groups: Vec<SequenceGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceGroup {
    pub offset: u32,
    /// Indexed like the waves of the matching BST group
    pub sequences: Vec<Sequence>,
}

/// One sequence blob
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sequence {
    pub offset: u32,
    #[serde(rename = "length", serialize_with = "serialize_len")]
    pub data: Vec<u8>,
    /// False when the scan ran off the end of the data before an end opcode
    pub terminated: bool,
}

fn serialize_len<S: Serializer>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(data.len() as u64)
}

impl SequenceBank {
    /// Parse a BSC container holding `group_count` groups
    pub fn parse(data: &[u8], group_count: usize) -> Result<Self> {
        Self::read(&mut Reader::new(data), group_count)
    }

    /// Parse a BSC container laid out after the first section of `bank`
    pub fn parse_for(data: &[u8], bank: &Bank) -> Result<Self> {
        let section = bank.first_section().ok_or_else(|| Error::IndexOutOfRange {
            location: "BST sections".to_string(),
            expected: 1,
            actual: 0,
        })?;
        Self::parse(data, section.groups.len())
    }

    pub fn read(reader: &mut Reader<'_>, group_count: usize) -> Result<Self> {
        reader.read_u32()?; // header, not checked
        let size = reader.read_u32()?;
        let group_offsets = reader.read_offsets(group_count)?;
        tracing::debug!(size, groups = group_count, "reading BSC");

        let mut groups = Vec::new();
        for offset in group_offsets {
            groups.push(reader.at(offset, |r| SequenceGroup::read(r, offset))?);
        }

        Ok(Self { size, groups })
    }

    /// Look up a sequence by (group, wave) index
    pub fn sequence(&self, group: usize, index: usize) -> Option<&Sequence> {
        self.groups.get(group)?.sequences.get(index)
    }

    pub fn sequence_count(&self) -> usize {
        self.groups.iter().map(|g| g.sequences.len()).sum()
    }
}

impl SequenceGroup {
    fn read(reader: &mut Reader<'_>, offset: u32) -> Result<Self> {
        let sequence_offsets = reader.read_offset_table()?;

        let mut sequences = Vec::new();
        for seq_offset in sequence_offsets {
            sequences.push(scan_sequence(reader, seq_offset)?);
        }

        tracing::trace!(offset, sequences = sequences.len(), "BSC group");
        Ok(Self { offset, sequences })
    }
}

impl Sequence {
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Extract the sequence starting at `offset`.
///
/// The blob runs up to and including the first byte of the end opcode. If no
/// end opcode is found, it runs to the end of the data. The cursor is left
/// where it was.
pub fn scan_sequence(reader: &mut Reader<'_>, offset: u32) -> Result<Sequence> {
    reader.at(offset, |r| {
        let (scanned, terminated) = r.restoring(scan_length)?;
        let len = (scanned + 1).min(r.remaining());
        let data = r.read_bytes(len)?;

        Ok(Sequence {
            offset,
            data,
            terminated,
        })
    })
}

/// Count bytes before the first end opcode, checking every byte pair
fn scan_length(reader: &mut Reader<'_>) -> Result<(usize, bool)> {
    let mut len = 0;

    loop {
        let pos = reader.position();
        match reader.read_u16() {
            Ok(opcode) if SEQUENCE_TERMINATORS.contains(&opcode) => return Ok((len, true)),
            Ok(_) => {
                // next pair overlaps this one
                reader.seek(pos + 1);
                len += 1;
            }
            Err(Error::UnexpectedEndOfStream { offset }) => {
                tracing::warn!(offset, len, "sequence ran to end of data without end opcode");
                return Ok((len, false));
            }
            Err(e) => return Err(e),
        }
    }
}
