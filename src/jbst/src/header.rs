//! Shared BST/BSTN container header

use serde::Serialize;

use crate::reader::Reader;
use crate::{Error, Result, SUPPORTED_VERSION};

/// Container header (16 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContainerHeader {
    pub magic: u32,
    /// Some producers leave garbage here; never validated
    pub reserved: u32,
    pub version: u32,
    /// Absolute offset of the section table
    pub section_table_offset: u32,
}

impl ContainerHeader {
    /// Read and validate a header, failing on the first mismatched field
    pub fn read(reader: &mut Reader<'_>, expected_magic: u32) -> Result<Self> {
        let magic = reader.read_u32()?;
        if magic != expected_magic {
            return Err(Error::BadHeader {
                expected: expected_magic,
                actual: magic,
            });
        }

        let reserved = reader.read_u32()?;

        let version = reader.read_u32()?;
        if version != SUPPORTED_VERSION {
            return Err(Error::UnsupportedVersion { actual: version });
        }

        let section_table_offset = reader.read_u32()?;

        Ok(Self {
            magic,
            reserved,
            version,
            section_table_offset,
        })
    }

    /// Read the header, then the section table it points at.
    ///
    /// Leaves the cursor just past the section table.
    pub fn read_with_sections(reader: &mut Reader<'_>, expected_magic: u32) -> Result<(Self, Vec<u32>)> {
        let header = Self::read(reader, expected_magic)?;
        reader.seek(u64::from(header.section_table_offset));
        let sections = reader.read_offset_table()?;
        Ok((header, sections))
    }
}

/// Resolve an optional section/group name; offset 0 points at the magic, not a label
pub(crate) fn read_optional_name(reader: &mut Reader<'_>, offset: u32) -> Result<Option<String>> {
    if offset == 0 {
        return Ok(None);
    }
    reader.read_name_at(offset).map(Some)
}
