//! BSTN name table parsing (`"BSTN"`)
//!
//! Mirrors the BST tree one-to-one, but every leaf is just a null-terminated
//! name and groups have no alignment word after their count.

use serde::Serialize;

use crate::header::{read_optional_name, ContainerHeader};
use crate::reader::Reader;
use crate::{Result, BSTN_MAGIC};

/// Decoded BSTN container
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameBank {
    pub header: ContainerHeader,
    pub sections: Vec<NameSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameSection {
    pub name: Option<String>,
    pub groups: Vec<NameGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameGroup {
    pub name: Option<String>,
    /// One name per wave of the matching BST group
    pub waves: Vec<String>,
}

impl NameBank {
    /// Parse a BSTN container from its complete contents
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::read(&mut Reader::new(data))
    }

    pub fn read(reader: &mut Reader<'_>) -> Result<Self> {
        let (header, section_offsets) = ContainerHeader::read_with_sections(reader, BSTN_MAGIC)?;
        tracing::debug!(sections = section_offsets.len(), "reading BSTN");

        let mut sections = Vec::new();
        for offset in section_offsets {
            sections.push(reader.at(offset, NameSection::read)?);
        }

        Ok(Self { header, sections })
    }

    /// Look up a wave name by (section, group, wave) index
    pub fn wave_name(&self, section: usize, group: usize, wave: usize) -> Option<&str> {
        self.sections
            .get(section)?
            .groups
            .get(group)?
            .waves
            .get(wave)
            .map(String::as_str)
    }
}

impl NameSection {
    pub fn read(reader: &mut Reader<'_>) -> Result<Self> {
        let count = reader.read_u32()?;
        let name_offset = reader.read_u32()?;
        let group_offsets = reader.read_offsets(count as usize)?;
        let name = read_optional_name(reader, name_offset)?;

        let mut groups = Vec::new();
        for offset in group_offsets {
            groups.push(reader.at(offset, NameGroup::read)?);
        }

        Ok(Self { name, groups })
    }
}

impl NameGroup {
    pub fn read(reader: &mut Reader<'_>) -> Result<Self> {
        let count = reader.read_u32()?;
        let name_offset = reader.read_u32()?;
        let name = read_optional_name(reader, name_offset)?;

        let mut waves = Vec::new();
        for _ in 0..count {
            let offset = reader.read_u32()?;
            waves.push(reader.read_name_at(offset)?);
        }

        tracing::trace!(name = ?name, waves = waves.len(), "BSTN group");
        Ok(Self { name, waves })
    }
}
