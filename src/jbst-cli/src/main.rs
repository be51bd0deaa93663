//! jbst CLI - decode JAudio sound tables and extract sequences
//!
//! Usage:
//!   jbst extract --bst 0.bst --bstn 1.bstn --bsc 12.bsc -o out
//!   jbst show --bst 0.bst --bstn 1.bstn --format json
//!   jbst scan --bst 0.bst --bsc 12.bsc --hex

mod cli;
mod commands;
mod config;
mod source;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging(verbose: u8) {
    // the binary and the library share the `jbst` target prefix
    let default = match verbose {
        0 => "jbst=info",
        1 => "jbst=debug",
        _ => "jbst=trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Extract {
            bst,
            bstn,
            bsc,
            output,
            extension,
            list,
        } => {
            let config = Config::load()?;
            let output = config.output_dir(output);
            let extension = config.extension(extension);
            commands::extract::handle(&bst, &bstn, &bsc, &output, &extension, list)?;
        }

        Commands::Show { bst, bstn, format } => {
            commands::show::handle(&bst, bstn.as_deref(), format)?;
        }

        Commands::Scan {
            bst,
            bsc,
            hex,
            json,
        } => {
            commands::scan::handle(&bst, &bsc, hex, json)?;
        }

        Commands::Configure {
            output_dir,
            extension,
            show,
        } => {
            commands::configure::handle(output_dir, extension, show)?;
        }
    }

    Ok(())
}
