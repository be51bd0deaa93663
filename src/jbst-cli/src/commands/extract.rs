//! Sequence extraction command implementation

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use jbst::{Bank, Sequence, SequenceBank};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::source;

/// A sequence and the file it will be written to
#[derive(Debug)]
pub struct Planned<'a> {
    pub path: PathBuf,
    pub sequence: &'a Sequence,
}

/// Decode the three files and write every sequence under `output`
pub fn handle(
    bst: &Path,
    bstn: &Path,
    bsc: &Path,
    output: &Path,
    extension: &str,
    list_only: bool,
) -> Result<()> {
    let decoded = source::decode_all(bst, bstn, bsc)?;
    let bank = &decoded.bank;

    let section_name = bank
        .first_section()
        .and_then(|s| s.name.as_deref())
        .unwrap_or("<unnamed>");
    eprintln!("Section: {}", section_name);

    let planned = plan(bank, &decoded.sequences, output, extension);
    eprintln!(
        "Found {} sequences in {} groups",
        planned.len(),
        decoded.sequences.groups.len()
    );

    if list_only {
        for entry in &planned {
            println!("{}\t{} bytes", entry.path.display(), entry.sequence.len());
        }
        return Ok(());
    }

    let pb = ProgressBar::new(planned.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let written = match write_all(&planned, &pb) {
        Ok(n) => n,
        Err(e) => {
            pb.abandon_with_message("failed");
            return Err(e);
        }
    };
    pb.finish_with_message("done");

    eprintln!("Extracted: {}", written);
    eprintln!("Output: {}", output.display());
    Ok(())
}

/// Work out where each sequence goes.
///
/// BSC group `g` pairs with group `g` of the first BST section, and sequence
/// `w` with that group's wave `w`.
pub fn plan<'a>(
    bank: &Bank,
    sequences: &'a SequenceBank,
    output: &Path,
    extension: &str,
) -> Vec<Planned<'a>> {
    let groups = bank.first_section().map(|s| s.groups.as_slice()).unwrap_or(&[]);
    let mut seen = HashSet::new();
    let mut planned = Vec::with_capacity(sequences.sequence_count());

    for (g, seq_group) in sequences.groups.iter().enumerate() {
        let group = groups.get(g);
        let dir = group
            .and_then(|grp| grp.name.as_deref())
            .and_then(sanitize_component)
            .unwrap_or_else(|| format!("group_{}", g));

        for (w, sequence) in seq_group.sequences.iter().enumerate() {
            let stem = group
                .and_then(|grp| grp.waves.get(w))
                .and_then(|wave| sanitize_component(&wave.name))
                .unwrap_or_else(|| w.to_string());

            let file_name = if extension.is_empty() {
                stem
            } else {
                format!("{}.{}", stem, extension)
            };
            let path = output.join(&dir).join(file_name);

            if !seen.insert(path.clone()) {
                tracing::warn!(path = %path.display(), group = g, index = w, "duplicate output name, earlier sequence will be overwritten");
            }
            planned.push(Planned { path, sequence });
        }
    }

    planned
}

/// Write planned sequences in order, stopping at the first failure.
///
/// Returns the number of files written.
pub fn write_all(planned: &[Planned<'_>], pb: &ProgressBar) -> Result<usize> {
    let mut written = 0;

    for entry in planned {
        write_one(entry)?;
        written += 1;
        pb.inc(1);
    }

    Ok(written)
}

fn write_one(entry: &Planned<'_>) -> Result<()> {
    if let Some(parent) = entry.path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }
    fs::write(&entry.path, &entry.sequence.data)
        .with_context(|| format!("Failed to write {:?}", entry.path))?;
    tracing::debug!(path = %entry.path.display(), bytes = entry.sequence.len(), "wrote sequence");
    Ok(())
}

/// Turn a stored name into a single path component, or None if nothing usable is left
fn sanitize_component(name: &str) -> Option<String> {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' | ':' => '_',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        None
    } else {
        Some(cleaned.to_string())
    }
}
