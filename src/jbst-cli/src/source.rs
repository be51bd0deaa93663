//! Opening and decoding bank files

use anyhow::{bail, Context, Result};
use jbst::{Bank, NameBank, SequenceBank};
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// Memory-map a whole file
pub fn map(path: &Path) -> Result<Mmap> {
    let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;

    let len = file
        .metadata()
        .with_context(|| format!("Failed to stat {:?}", path))?
        .len();
    if len == 0 {
        bail!("File is empty: {:?}", path);
    }

    let mmap = unsafe { Mmap::map(&file) }.with_context(|| format!("Failed to mmap {:?}", path))?;
    tracing::debug!(path = %path.display(), bytes = mmap.len(), "mapped");
    Ok(mmap)
}

pub fn load_bank(path: &Path) -> Result<Bank> {
    let data = map(path)?;
    if jbst::is_bstn(&data) {
        bail!("{:?} is a name table (BSTN), expected a sound table (BST)", path);
    }
    Bank::parse(&data).with_context(|| format!("Failed to decode sound table {:?}", path))
}

pub fn load_names(path: &Path) -> Result<NameBank> {
    let data = map(path)?;
    if jbst::is_bst(&data) {
        bail!("{:?} is a sound table (BST), expected a name table (BSTN)", path);
    }
    NameBank::parse(&data).with_context(|| format!("Failed to decode name table {:?}", path))
}

pub fn load_sequences(path: &Path, bank: &Bank) -> Result<SequenceBank> {
    let data = map(path)?;
    SequenceBank::parse_for(&data, bank)
        .with_context(|| format!("Failed to decode sequence collection {:?}", path))
}

/// A sound table with names merged in, plus its sequences
pub struct Decoded {
    pub bank: Bank,
    pub sequences: SequenceBank,
}

/// Decode all three files and merge names.
///
/// The name table decodes alongside the sound table; the sequence collection
/// needs the sound table's group count, so it follows it on the same thread.
pub fn decode_all(bst: &Path, bstn: &Path, bsc: &Path) -> Result<Decoded> {
    let (names, chain) = rayon::join(
        || load_names(bstn),
        || -> Result<(Bank, SequenceBank)> {
            let bank = load_bank(bst)?;
            let sequences = load_sequences(bsc, &bank)?;
            Ok((bank, sequences))
        },
    );

    let names = names?;
    let (bank, sequences) = chain?;

    let bank = bank
        .with_names(&names)
        .with_context(|| format!("Name table {:?} does not match sound table {:?}", bstn, bst))?;

    Ok(Decoded { bank, sequences })
}
