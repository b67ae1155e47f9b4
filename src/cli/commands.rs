//! CLI command implementations
//!
//! Each command loads the optional configuration, applies its log level, and
//! builds a codec with the configured check registry before touching any
//! schema file.

use std::path::Path;

use serde_json::{json, Value};

use crate::observability::{log_event_with_fields, Event, Logger};
use crate::schema::SchemaDescriptor;
use crate::yaml::{Sink, Source, YamlCodec};

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::CliResult;
use super::io::{write_error, write_response, write_text};

/// Main entry point for CLI
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let result = run_command(cli);
    if let Err(ref e) = result {
        write_error(e.code_str(), e.message())?;
    }
    result
}

/// Run the appropriate command based on CLI args
pub fn run_command(cli: Cli) -> CliResult<()> {
    let config = match &cli.config {
        Some(path) => {
            let config = Config::load(path)?;
            Logger::set_level(config.severity()?);
            let path = path.display().to_string();
            log_event_with_fields(Event::ConfigLoaded, &[("path", path.as_str())]);
            config
        }
        None => Config::default(),
    };
    let codec = config.codec()?;

    match cli.command {
        Command::Check { path } => check(&codec, &path),
        Command::Fmt { path, output } => fmt(&codec, &path, output.as_deref()),
    }
}

/// Decode a schema file and print its summary
pub fn check(codec: &YamlCodec, path: &Path) -> CliResult<()> {
    let schema = codec.decode(Source::path(path))?;
    write_response(summarize(&schema))
}

/// Decode a schema file and write it back in canonical form.
///
/// Without `output` the text goes to stdout. The input is fully read before
/// the output is opened, so `output` may name the input file.
pub fn fmt(codec: &YamlCodec, path: &Path, output: Option<&Path>) -> CliResult<()> {
    let schema = codec.decode(Source::path(path))?;
    match output {
        Some(target) => codec.encode_to(&schema, Sink::path(target))?,
        None => write_text(&codec.encode(&schema)?)?,
    }
    Ok(())
}

/// JSON summary of a decoded schema
pub fn summarize(schema: &SchemaDescriptor) -> Value {
    let columns: Vec<Value> = schema
        .columns()
        .iter()
        .map(|c| {
            json!({
                "name": c.name,
                "dtype": c.dtype.tag(),
                "nullable": c.nullable,
                "checks": c.checks.iter().map(|k| k.name()).collect::<Vec<_>>(),
            })
        })
        .collect();

    let index: Vec<Value> = schema
        .index()
        .iter()
        .map(|level| {
            json!({
                "name": level.name,
                "dtype": level.dtype.tag(),
                "nullable": level.nullable,
                "checks": level.checks.iter().map(|k| k.name()).collect::<Vec<_>>(),
            })
        })
        .collect();

    json!({
        "schema_type": schema.schema_type(),
        "version": schema.version(),
        "columns": columns,
        "index": index,
    })
}
