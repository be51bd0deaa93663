//! Sound table display

use anyhow::{Context, Result};
use jbst::{Bank, WaveInfo};
use std::io::{self, Write};
use std::path::Path;

use crate::cli::OutputFormat;
use crate::source;

pub fn handle(bst: &Path, bstn: Option<&Path>, format: OutputFormat) -> Result<()> {
    let mut bank = source::load_bank(bst)?;

    if let Some(bstn) = bstn {
        let names = source::load_names(bstn)?;
        jbst::merge_names(&mut bank, &names)
            .with_context(|| format!("Name table {:?} does not match sound table {:?}", bstn, bst))?;
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&bank)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&bank)?),
        OutputFormat::Text => {
            let stdout = io::stdout();
            write_text(&mut stdout.lock(), &bank)?;
        }
    }

    Ok(())
}

fn write_text(out: &mut impl Write, bank: &Bank) -> io::Result<()> {
    writeln!(
        out,
        "BST v{:08X}, {} sections, {} waves",
        bank.header.version,
        bank.sections.len(),
        bank.wave_count()
    )?;

    for (s, section) in bank.sections.iter().enumerate() {
        writeln!(
            out,
            "Section {}: {} ({} groups)",
            s,
            section.name.as_deref().unwrap_or("-"),
            section.groups.len()
        )?;

        for (g, group) in section.groups.iter().enumerate() {
            writeln!(
                out,
                "  Group {}: {} ({} waves)",
                g,
                group.name.as_deref().unwrap_or("-"),
                group.waves.len()
            )?;

            for (w, wave) in group.waves.iter().enumerate() {
                let name = if wave.name.is_empty() { "-" } else { &wave.name };
                write!(out, "    [{:3}] 0x{:02X} {:<16}", w, wave.tag, name)?;
                match &wave.info {
                    WaveInfo::Wave { sound_id } => write!(out, " sound_id={}", sound_id)?,
                    WaveInfo::Stream {
                        stream_format,
                        unknown,
                        flags,
                        path,
                    } => write!(
                        out,
                        " format={} unknown={} flags=0x{:04X} path={}",
                        stream_format, unknown, flags, path
                    )?,
                    WaveInfo::Simple | WaveInfo::Sequence | WaveInfo::Unknown => {
                        write!(out, " {:?}", wave.class())?
                    }
                }
                writeln!(out)?;
            }
        }
    }

    Ok(())
}
