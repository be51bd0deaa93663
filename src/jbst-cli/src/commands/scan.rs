//! Sequence listing

use anyhow::Result;
use jbst::SequenceBank;
use std::io::{self, Write};
use std::path::Path;

use crate::source;

/// Bytes shown per sequence with --hex
const PREVIEW_BYTES: usize = 16;

pub fn handle(bst: &Path, bsc: &Path, hex: bool, json: bool) -> Result<()> {
    let bank = source::load_bank(bst)?;
    let sequences = source::load_sequences(bsc, &bank)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&sequences)?);
        return Ok(());
    }

    let stdout = io::stdout();
    write_table(&mut stdout.lock(), &sequences, hex)?;
    Ok(())
}

fn write_table(out: &mut impl Write, sequences: &SequenceBank, hex: bool) -> io::Result<()> {
    writeln!(
        out,
        "{} groups, {} sequences, declared size {}",
        sequences.groups.len(),
        sequences.sequence_count(),
        sequences.size
    )?;

    let mut unterminated = 0;
    for (g, group) in sequences.groups.iter().enumerate() {
        writeln!(out, "Group {} @ 0x{:08X}", g, group.offset)?;

        for (i, seq) in group.sequences.iter().enumerate() {
            let mark = if seq.terminated {
                ""
            } else {
                unterminated += 1;
                " (no end opcode)"
            };
            write!(out, "  [{:3}] 0x{:08X} {:8} bytes{}", i, seq.offset, seq.len(), mark)?;
            if hex {
                let shown = seq.len().min(PREVIEW_BYTES);
                let more = if seq.len() > shown { "..." } else { "" };
                write!(out, "  {}{}", hex::encode(&seq.data[..shown]), more)?;
            }
            writeln!(out)?;
        }
    }

    if unterminated > 0 {
        writeln!(out, "{} sequences ran to the end of the data", unterminated)?;
    }
    Ok(())
}
