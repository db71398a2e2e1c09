//! midex CLI library
//!
//! Batch drivers for the molecular-interaction data-exchange layer:
//!
//! - **IMEx reconciliation**: `midex imex-update` runs the two-pass
//!   accession update over a publication snapshot
//! - **Exports**: `midex export xml|mitab|uniprot` render the snapshot in
//!   the community formats
//! - **CV caches**: `midex cv-cache` builds the JSON term cache from a
//!   flat mapping file

pub mod commands;
pub mod config;
pub mod progress;

pub use config::Config;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// midex - molecular interaction data exchange
#[derive(Parser, Debug)]
#[command(name = "midex")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reconcile IMEx accessions for a publication snapshot
    ImexUpdate {
        /// Publication snapshot (JSON array)
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the updated snapshot (defaults to overwriting
        /// the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report directory (defaults to MIDEX_REPORTS_DIR)
        #[arg(long)]
        reports_dir: Option<PathBuf>,

        /// Use the in-memory registry instead of IMEx Central
        #[arg(long)]
        dry_run: bool,
    },

    /// Export publications in a community format
    Export {
        #[command(subcommand)]
        command: ExportCommand,
    },

    /// Parse a MITAB file and summarize its contents
    ValidateMitab {
        /// MITAB document (`.gz` handled by extension)
        #[arg(short, long)]
        input: PathBuf,

        /// Stop after this many rows
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Build a JSON CV-term cache from a flat mapping file
    CvCache {
        /// Flat mapping file (`MI:xxxx<TAB>shortlabel` lines)
        #[arg(short, long)]
        mapping: PathBuf,

        /// Output JSON cache path
        #[arg(short, long)]
        out: PathBuf,

        /// Seed the cache with the built-in terms
        #[arg(long)]
        builtins: bool,
    },
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommand {
    /// PSI-MI XML
    Xml {
        /// Publication snapshot (JSON array)
        #[arg(short, long)]
        input: PathBuf,

        /// Output document path
        #[arg(short, long)]
        out: PathBuf,

        /// Schema version: 1, 2 or 2.5
        #[arg(long, default_value = "2.5")]
        psi_version: String,

        /// Gzip the output
        #[arg(long)]
        gzip: bool,
    },

    /// PSI-MI TAB
    Mitab {
        /// Publication snapshot (JSON array)
        #[arg(short, long)]
        input: PathBuf,

        /// Output document path
        #[arg(short, long)]
        out: PathBuf,

        /// Gzip the output
        #[arg(long)]
        gzip: bool,

        /// Skip the header line
        #[arg(long)]
        no_header: bool,
    },

    /// UniProt DR/CC/GO annotation lines
    Uniprot {
        /// Publication snapshot (JSON array)
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        out_dir: PathBuf,
    },
}
