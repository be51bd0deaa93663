//! BST structural table parsing (`"BST "`)
//!
//! Sections hold groups, groups hold wave records. Each wave record starts with a
//! tag byte whose high nibble selects the rest of its layout:
//!
//! | class  | fields                                                 |
//! |--------|--------------------------------------------------------|
//! | `0x40` | none                                                   |
//! | `0x50` | `i16` sound id                                         |
//! | `0x60` | none                                                   |
//! | `0x70` | `u8` stream format, `u8` unknown, `u16` flags, `u32` path offset |
//!
//! Any other class decodes to [`WaveInfo::Unknown`] instead of failing.

use serde::Serialize;

use crate::header::{read_optional_name, ContainerHeader};
use crate::reader::Reader;
use crate::{Result, BST_MAGIC};

/// Decoded BST container
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bank {
    pub header: ContainerHeader,
    /// Sections in section-table order
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub name: Option<String>,
    pub groups: Vec<Group>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub name: Option<String>,
    pub waves: Vec<Wave>,
}

/// A single wave record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wave {
    /// Raw tag byte (class in the high nibble)
    pub tag: u8,
    /// Empty until names are merged in from a BSTN
    pub name: String,
    pub info: WaveInfo,
}

/// Record class, the high nibble of a wave's tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TagClass {
    Simple,
    Wave,
    Sequence,
    Stream,
    Unknown,
}

impl From<u8> for TagClass {
    fn from(tag: u8) -> Self {
        match tag & 0xF0 {
            0x40 => Self::Simple,
            0x50 => Self::Wave,
            0x60 => Self::Sequence,
            0x70 => Self::Stream,
            _ => Self::Unknown,
        }
    }
}

/// Class-specific wave fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WaveInfo {
    Simple,
    Wave {
        sound_id: i16,
    },
    Sequence,
    Stream {
        stream_format: u8,
        unknown: u8,
        flags: u16,
        path: String,
    },
    /// Tag class with no known layout; nothing beyond the tag is read
    Unknown,
}

impl Bank {
    /// Parse a BST container from its complete contents
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::read(&mut Reader::new(data))
    }

    pub fn read(reader: &mut Reader<'_>) -> Result<Self> {
        let (header, section_offsets) = ContainerHeader::read_with_sections(reader, BST_MAGIC)?;
        tracing::debug!(sections = section_offsets.len(), "reading BST");

        let mut sections = Vec::new();
        for offset in section_offsets {
            sections.push(reader.at(offset, Section::read)?);
        }

        Ok(Self { header, sections })
    }

    #[inline]
    pub fn first_section(&self) -> Option<&Section> {
        self.sections.first()
    }

    /// Look up a wave by (section, group, wave) index
    pub fn wave(&self, section: usize, group: usize, wave: usize) -> Option<&Wave> {
        self.sections
            .get(section)?
            .groups
            .get(group)?
            .waves
            .get(wave)
    }

    /// Every wave with its (section, group, wave) index, in tree order
    pub fn waves(&self) -> impl Iterator<Item = ((usize, usize, usize), &Wave)> {
        self.sections.iter().enumerate().flat_map(|(s, section)| {
            section.groups.iter().enumerate().flat_map(move |(g, group)| {
                group
                    .waves
                    .iter()
                    .enumerate()
                    .map(move |(w, wave)| ((s, g, w), wave))
            })
        })
    }

    pub fn wave_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|s| &s.groups)
            .map(|g| g.waves.len())
            .sum()
    }
}

impl Section {
    pub fn read(reader: &mut Reader<'_>) -> Result<Self> {
        let count = reader.read_u32()?;
        let name_offset = reader.read_u32()?;
        let group_offsets = reader.read_offsets(count as usize)?;
        let name = read_optional_name(reader, name_offset)?;

        let mut groups = Vec::new();
        for offset in group_offsets {
            groups.push(reader.at(offset, Group::read)?);
        }

        tracing::trace!(name = ?name, groups = groups.len(), "BST section");
        Ok(Self { name, groups })
    }
}

impl Group {
    pub fn read(reader: &mut Reader<'_>) -> Result<Self> {
        let count = reader.read_u32()?;
        reader.read_u32()?; // alignment, not checked
        let name_offset = reader.read_u32()?;

        let mut waves = Vec::new();
        for _ in 0..count {
            let offset = reader.read_u32()?;
            waves.push(reader.at(offset, Wave::read)?);
        }

        let name = read_optional_name(reader, name_offset)?;
        Ok(Self { name, waves })
    }
}

impl Wave {
    pub fn read(reader: &mut Reader<'_>) -> Result<Self> {
        let tag = reader.read_u8()?;

        let info = match TagClass::from(tag) {
            TagClass::Simple => WaveInfo::Simple,
            TagClass::Wave => WaveInfo::Wave {
                sound_id: reader.read_i16()?,
            },
            TagClass::Sequence => WaveInfo::Sequence,
            TagClass::Stream => {
                let stream_format = reader.read_u8()?;
                let unknown = reader.read_u8()?;
                let flags = reader.read_u16()?;
                let path_offset = reader.read_u32()?;
                WaveInfo::Stream {
                    stream_format,
                    unknown,
                    flags,
                    path: reader.read_name_at(path_offset)?,
                }
            }
            TagClass::Unknown => {
                tracing::trace!(tag, offset = reader.position() - 1, "unknown wave tag");
                WaveInfo::Unknown
            }
        };

        Ok(Self {
            tag,
            name: String::new(),
            info,
        })
    }

    #[inline]
    pub fn class(&self) -> TagClass {
        TagClass::from(self.tag)
    }

    pub fn sound_id(&self) -> Option<i16> {
        match self.info {
            WaveInfo::Wave { sound_id } => Some(sound_id),
            _ => None,
        }
    }

    /// Path of the streamed audio file, for stream-class waves
    pub fn stream_path(&self) -> Option<&str> {
        match &self.info {
            WaveInfo::Stream { path, .. } => Some(path),
            _ => None,
        }
    }
}
