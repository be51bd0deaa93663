//! Decoder for JAudio sound-table banks
//!
//! A bank is described by three big-endian containers that share one tree shape
//! (sections → groups → leaves), with every child located by an absolute offset:
//!
//! ## BST (`"BST "`)
//!
//! Structural table. Each leaf is a tagged record whose layout depends on the
//! high nibble of its tag byte.
//!
//! ## BSTN (`"BSTN"`)
//!
//! Name table. Same shape as the BST; every leaf is a null-terminated name.
//!
//! ## BSC
//!
//! Sequence collection. One offset table per group of the BST's first section,
//! one sequence blob per leaf slot. Sequences carry no length; it is discovered
//! by scanning for an end-of-sequence opcode (`0xFFC1` or `0xFFC3`).
//!
//! ```text
//! header:  magic u32 | reserved u32 | version u32 (0x01000000) | section table u32
//! table:   count u32 | offset u32 * count
//! section: count u32 | name u32 | group offset u32 * count
//! group:   count u32 | reserved u32 (BST only) | name u32 | leaf offset u32 * count
//! ```

pub mod bsc;
pub mod bst;
pub mod bstn;
#[cfg(test)]
mod fixture;
mod header;
pub mod merge;
pub mod reader;

pub use bsc::{scan_sequence, Sequence, SequenceBank, SequenceGroup};
pub use bst::{Bank, Group, Section, TagClass, Wave, WaveInfo};
pub use bstn::{NameBank, NameGroup, NameSection};
pub use header::ContainerHeader;
pub use merge::merge_names;
pub use reader::Reader;

/// BST magic: "BST "
pub const BST_MAGIC: u32 = 0x4253_5420;

/// BSTN magic: "BSTN"
pub const BSTN_MAGIC: u32 = 0x4253_544E;

/// The only container version that has been observed
pub const SUPPORTED_VERSION: u32 = 0x0100_0000;

/// Longest name the resolver accepts, excluding the terminator
pub const MAX_NAME_LEN: usize = 0xFF;

/// End-of-sequence opcodes terminating a BSC sequence
pub const SEQUENCE_TERMINATORS: [u16; 2] = [0xFFC1, 0xFFC3];

/// Errors from bank decoding
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid header magic: expected 0x{expected:08x}, got 0x{actual:08x}")]
    BadHeader { expected: u32, actual: u32 },

    #[error("Unsupported version: expected 0x01000000, got 0x{actual:08x}")]
    UnsupportedVersion { actual: u32 },

    #[error("Unexpected end of stream reading at offset 0x{offset:x}")]
    UnexpectedEndOfStream { offset: u64 },

    #[error("Name at offset 0x{offset:x} exceeds {limit} bytes")]
    InvalidStringEncoding { offset: u64, limit: usize },

    #[error("Index out of range in {location}: expected {expected} entries, got {actual}")]
    IndexOutOfRange {
        location: String,
        expected: usize,
        actual: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Check if data starts with BST magic
pub fn is_bst(data: &[u8]) -> bool {
    starts_with_magic(data, BST_MAGIC)
}

/// Check if data starts with BSTN magic
pub fn is_bstn(data: &[u8]) -> bool {
    starts_with_magic(data, BSTN_MAGIC)
}

fn starts_with_magic(data: &[u8], magic: u32) -> bool {
    data.len() >= 4 && data[0..4] == magic.to_be_bytes()
}
