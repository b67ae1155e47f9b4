//! dfschema - A deterministic, versioned YAML format for dataframe schemas
//!
//! - `schema`: the in-memory descriptor model
//! - `yaml`: encode/decode over text, streams and files
//! - `observability`: structured logging
//! - `cli`: the `dfschema` command-line tool

pub mod cli;
pub mod observability;
pub mod schema;
pub mod yaml;

/// Version stamped into encoded schemas by the default codec
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
