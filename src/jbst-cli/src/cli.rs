//! CLI argument definitions for jbst

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jbst")]
#[command(about = "JAudio sound table decoder and sequence extractor", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Verbose output (repeat for trace-level decode logging)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract every sequence to <output>/<group>/<wave>.<extension>
    #[command(visible_alias = "x")]
    Extract {
        /// Sound table (.bst)
        #[arg(long, default_value = "0.bst")]
        bst: PathBuf,

        /// Name table (.bstn)
        #[arg(long, default_value = "1.bstn")]
        bstn: PathBuf,

        /// Sequence collection (.bsc)
        #[arg(long, default_value = "12.bsc")]
        bsc: PathBuf,

        /// Output directory (uses configured default if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// File extension for extracted sequences (uses configured default if not provided)
        #[arg(short, long)]
        extension: Option<String>,

        /// List output paths without writing anything
        #[arg(short, long)]
        list: bool,
    },

    /// Print the decoded sound table, with names merged in when a name table is given
    #[command(visible_alias = "s")]
    Show {
        /// Sound table (.bst)
        #[arg(long, default_value = "0.bst")]
        bst: PathBuf,

        /// Name table (.bstn)
        #[arg(long)]
        bstn: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List every sequence in a sequence collection
    Scan {
        /// Sound table (.bst) supplying the group count
        #[arg(long, default_value = "0.bst")]
        bst: PathBuf,

        /// Sequence collection (.bsc)
        #[arg(long, default_value = "12.bsc")]
        bsc: PathBuf,

        /// Show the first bytes of each sequence
        #[arg(long)]
        hex: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set default output directory
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Set default sequence file extension
        #[arg(long)]
        extension: Option<String>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}
