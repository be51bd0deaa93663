//! Container builders for unit tests

use crate::{BSTN_MAGIC, BST_MAGIC, SUPPORTED_VERSION};

/// Leaf record layouts accepted by [`bst`]
pub(crate) enum Leaf {
    Plain(u8),
    Wave(u8, i16),
    Stream {
        tag: u8,
        format: u8,
        unknown: u8,
        flags: u16,
        path: &'static str,
    },
}

pub(crate) type BstGroup = (Option<&'static str>, Vec<Leaf>);
pub(crate) type BstSection = (Option<&'static str>, Vec<BstGroup>);
pub(crate) type BstnGroup = (Option<&'static str>, Vec<&'static str>);
pub(crate) type BstnSection = (Option<&'static str>, Vec<BstnGroup>);

#[derive(Default)]
pub(crate) struct Buf(pub Vec<u8>);

impl Buf {
    pub fn pos(&self) -> u32 {
        self.0.len() as u32
    }

    pub fn u8(&mut self, v: u8) {
        self.0.push(v);
    }

    pub fn u16(&mut self, v: u16) {
        self.0.extend_from_slice(&v.to_be_bytes());
    }

    pub fn u32(&mut self, v: u32) {
        self.0.extend_from_slice(&v.to_be_bytes());
    }

    pub fn cstr(&mut self, s: &str) -> u32 {
        let at = self.pos();
        self.0.extend_from_slice(s.as_bytes());
        self.0.push(0);
        at
    }

    pub fn name(&mut self, s: Option<&str>) -> u32 {
        s.map_or(0, |s| self.cstr(s))
    }

    pub fn patch(&mut self, at: u32, v: u32) {
        let at = at as usize;
        self.0[at..at + 4].copy_from_slice(&v.to_be_bytes());
    }

    /// Emit `count`, `name` and the offset list at the current position
    fn node(&mut self, count: usize, pad: bool, name: u32, offsets: &[u32]) -> u32 {
        let at = self.pos();
        self.u32(count as u32);
        if pad {
            self.u32(0);
        }
        self.u32(name);
        for &o in offsets {
            self.u32(o);
        }
        at
    }
}

fn container(magic: u32, buf: &mut Buf, sections: Vec<u32>) -> Vec<u8> {
    let table = buf.pos();
    buf.u32(sections.len() as u32);
    for o in sections {
        buf.u32(o);
    }
    buf.patch(0, magic);
    buf.patch(8, SUPPORTED_VERSION);
    buf.patch(12, table);
    std::mem::take(&mut buf.0)
}

fn emit_leaf(buf: &mut Buf, leaf: &Leaf) -> u32 {
    match *leaf {
        Leaf::Plain(tag) => {
            let at = buf.pos();
            buf.u8(tag);
            at
        }
        Leaf::Wave(tag, sound_id) => {
            let at = buf.pos();
            buf.u8(tag);
            buf.u16(sound_id as u16);
            at
        }
        Leaf::Stream {
            tag,
            format,
            unknown,
            flags,
            path,
        } => {
            let path = buf.cstr(path);
            let at = buf.pos();
            buf.u8(tag);
            buf.u8(format);
            buf.u8(unknown);
            buf.u16(flags);
            buf.u32(path);
            at
        }
    }
}

/// Build a BST container; children are laid out before their parents
pub(crate) fn bst(sections: &[BstSection]) -> Vec<u8> {
    let mut buf = Buf(vec![0; 16]);
    let mut section_offsets = Vec::new();

    for (section_name, groups) in sections {
        let mut group_offsets = Vec::new();
        for (group_name, leaves) in groups {
            let leaf_offsets: Vec<u32> = leaves.iter().map(|l| emit_leaf(&mut buf, l)).collect();
            let name = buf.name(*group_name);
            group_offsets.push(buf.node(leaf_offsets.len(), true, name, &leaf_offsets));
        }
        let name = buf.name(*section_name);
        section_offsets.push(buf.node(group_offsets.len(), false, name, &group_offsets));
    }

    container(BST_MAGIC, &mut buf, section_offsets)
}

/// Build a BSTN container with the same layout rules as [`bst`]
pub(crate) fn bstn(sections: &[BstnSection]) -> Vec<u8> {
    let mut buf = Buf(vec![0; 16]);
    let mut section_offsets = Vec::new();

    for (section_name, groups) in sections {
        let mut group_offsets = Vec::new();
        for (group_name, leaves) in groups {
            let leaf_offsets: Vec<u32> = leaves.iter().map(|l| buf.cstr(l)).collect();
            let name = buf.name(*group_name);
            group_offsets.push(buf.node(leaf_offsets.len(), false, name, &leaf_offsets));
        }
        let name = buf.name(*section_name);
        section_offsets.push(buf.node(group_offsets.len(), false, name, &group_offsets));
    }

    container(BSTN_MAGIC, &mut buf, section_offsets)
}

/// Build a BSC container holding the given sequence blobs per group
pub(crate) fn bsc(groups: &[Vec<&[u8]>]) -> Vec<u8> {
    let mut buf = Buf::default();
    buf.u32(0x4253_4320);
    buf.u32(0);
    let table = buf.pos();
    for _ in groups {
        buf.u32(0);
    }

    for (g, sequences) in groups.iter().enumerate() {
        let offsets: Vec<u32> = sequences
            .iter()
            .map(|s| {
                let at = buf.pos();
                buf.0.extend_from_slice(s);
                at
            })
            .collect();
        let at = buf.pos();
        buf.u32(offsets.len() as u32);
        for o in offsets {
            buf.u32(o);
        }
        buf.patch(table + 4 * g as u32, at);
    }

    let size = buf.pos();
    buf.patch(4, size);
    buf.0
}
