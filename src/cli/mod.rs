//! CLI module for dfschema
//!
//! Provides command-line interface for:
//! - check: Decode a schema file and print a JSON summary
//! - fmt: Re-encode a schema file in canonical form

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, fmt, run, run_command, summarize};
pub use config::{Config, CustomCheck, ParamSpec};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response, write_text};
