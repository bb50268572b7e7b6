//! CLI for the mhx MHTML resource extractor.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mhx_core::config;
use mhx_core::Decoder;
use std::io;
use std::path::Path;

use commands::{run_extract, run_html, run_list, ListOptions, SelectionArgs};

/// Top-level CLI for mhx.
#[derive(Debug, Parser)]
#[command(name = "mhx")]
#[command(about = "mhx: list and extract resources from MHTML archives", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List every resource in an archive.
    List {
        /// Path to the .mhtml / .mht file.
        path: String,
        /// Also download scripts referenced by <script src="http(s)://...">.
        #[arg(long)]
        fetch_external: bool,
        /// Print a JSON array instead of a table.
        #[arg(long)]
        json: bool,
        /// Include the SHA-256 of each payload.
        #[arg(long)]
        digest: bool,
    },

    /// Print the primary HTML document of an archive.
    Html {
        /// Path to the .mhtml / .mht file.
        path: String,
        /// Write the HTML to this file instead of stdout.
        #[arg(long, short, value_name = "PATH")]
        output: Option<String>,
    },

    /// Write selected resources into a directory.
    Extract {
        /// Path to the .mhtml / .mht file.
        path: String,
        /// Output directory (created if missing).
        #[arg(long, short, value_name = "DIR")]
        out: String,
        /// Resource index as shown by `mhx list`. Repeatable.
        #[arg(long = "index", short = 'i', value_name = "N")]
        indices: Vec<usize>,
        /// Select resources whose kind starts with PREFIX (e.g. `image/`). Repeatable.
        #[arg(long = "kind", value_name = "PREFIX")]
        kinds: Vec<String>,
        /// Select every resource.
        #[arg(long)]
        all: bool,
        /// Also download scripts referenced by <script src="http(s)://...">.
        #[arg(long)]
        fetch_external: bool,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let decoder = Decoder::new(&cfg.fetch);
        let mut stdout = io::stdout().lock();

        match cli.command {
            CliCommand::List {
                path,
                fetch_external,
                json,
                digest,
            } => {
                let fetch = fetch_external || cfg.fetch_external;
                let result = decoder.parse(Path::new(&path), fetch)?;
                run_list(&result, ListOptions { json, digest }, &mut stdout)?;
            }
            CliCommand::Html { path, output } => {
                let result = decoder.parse(Path::new(&path), false)?;
                run_html(&result, output.as_deref().map(Path::new), &mut stdout)?;
            }
            CliCommand::Extract {
                path,
                out,
                indices,
                kinds,
                all,
                fetch_external,
            } => {
                let fetch = fetch_external || cfg.fetch_external;
                let result = decoder.parse(Path::new(&path), fetch)?;
                let selection = SelectionArgs { indices, kinds, all };
                run_extract(&result, &selection, Path::new(&out), &mut stdout)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
