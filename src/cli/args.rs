//! CLI argument definitions using clap
//!
//! Commands:
//! - dfschema check <file>
//! - dfschema fmt <file> [--output <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// dfschema - inspect and normalize dataframe schema files
#[derive(Parser, Debug)]
#[command(name = "dfschema")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a schema file and print a JSON summary
    Check {
        /// Schema file to read
        path: PathBuf,
    },

    /// Re-encode a schema file in canonical form
    Fmt {
        /// Schema file to read
        path: PathBuf,

        /// Write here instead of stdout (may be the input file)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
