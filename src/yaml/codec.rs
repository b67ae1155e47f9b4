//! YAML codec for schema descriptors
//!
//! Encoded layout, keys always in this order:
//!
//! ```text
//! schema_type: dataframe
//! version: <codec version>
//! columns:
//!   <name>:
//!     pandas_dtype: <tag>
//!     nullable: <bool>
//!     checks: <null | mapping of check name to params>
//! index:
//! - pandas_dtype: <tag>
//!   nullable: <bool>
//!   checks: <null | mapping>
//!   name: <string | null>
//! ```
//!
//! The version is stamped by the codec, never taken from the descriptor, and
//! is not enforced when decoding.

use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::observability::{log_event_with_fields, Event};
use crate::schema::{
    CheckDescriptor, CheckRegistry, ColumnDescriptor, DType, IndexDescriptor, SchemaDescriptor,
    SchemaError, SchemaResult, SCHEMA_TYPE,
};

use super::node::Node;
use super::transport::{Sink, Source};

const KEY_SCHEMA_TYPE: &str = "schema_type";
const KEY_VERSION: &str = "version";
const KEY_COLUMNS: &str = "columns";
const KEY_INDEX: &str = "index";
const KEY_DTYPE: &str = "pandas_dtype";
const KEY_NULLABLE: &str = "nullable";
const KEY_CHECKS: &str = "checks";
const KEY_NAME: &str = "name";

/// Top-level `version` read as a string, so `1.10` keeps its scalar text
#[derive(Deserialize)]
struct RawVersion {
    #[serde(default)]
    version: Option<String>,
}

fn raw_version(text: &str) -> Option<String> {
    serde_yaml::from_str::<RawVersion>(text)
        .ok()
        .and_then(|raw| raw.version)
}

/// Encoder/decoder pair with an explicit version stamp and check registry
#[derive(Debug, Clone)]
pub struct YamlCodec {
    version: String,
    registry: CheckRegistry,
}

impl Default for YamlCodec {
    /// Stamps this crate's version and accepts the built-in checks
    fn default() -> Self {
        Self::new(crate::VERSION)
    }
}

impl YamlCodec {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            registry: CheckRegistry::builtin(),
        }
    }

    pub fn with_registry(mut self, registry: CheckRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn registry(&self) -> &CheckRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CheckRegistry {
        &mut self.registry
    }

    /// Encodes a schema into its canonical text
    pub fn encode(&self, schema: &SchemaDescriptor) -> SchemaResult<String> {
        let result = self.render(schema);
        match &result {
            Ok(text) => {
                let columns = schema.columns().len().to_string();
                let bytes = text.len().to_string();
                log_event_with_fields(
                    Event::SchemaEncoded,
                    &[
                        ("bytes", bytes.as_str()),
                        ("columns", columns.as_str()),
                        ("version", self.version.as_str()),
                    ],
                );
            }
            Err(e) => log_rejected(e),
        }
        result
    }

    /// Encodes a schema and writes it to the sink.
    ///
    /// The text is rendered before the sink is touched, so an encoding error
    /// never truncates an existing file.
    pub fn encode_to(&self, schema: &SchemaDescriptor, sink: Sink<'_>) -> SchemaResult<()> {
        let text = self.encode(schema)?;
        let kind = sink.kind();
        sink.write_text(&text).map_err(|e| {
            let err = SchemaError::from(e);
            log_event_with_fields(
                Event::SchemaRejected,
                &[("code", err.code()), ("transport", kind)],
            );
            err
        })
    }

    /// Returns the text when no target is given; otherwise writes it and
    /// returns `None`.
    pub fn to_yaml(
        &self,
        schema: &SchemaDescriptor,
        target: Option<Sink<'_>>,
    ) -> SchemaResult<Option<String>> {
        match target {
            None => self.encode(schema).map(Some),
            Some(sink) => self.encode_to(schema, sink).map(|()| None),
        }
    }

    /// Decodes a schema from any transport
    pub fn decode(&self, source: Source<'_>) -> SchemaResult<SchemaDescriptor> {
        let kind = source.kind();
        let result = source
            .read_text()
            .map_err(SchemaError::from)
            .and_then(|text| self.parse(&text));

        match &result {
            Ok(schema) => {
                let columns = schema.columns().len().to_string();
                let index = schema.index().len().to_string();
                log_event_with_fields(
                    Event::SchemaDecoded,
                    &[
                        ("columns", columns.as_str()),
                        ("index", index.as_str()),
                        ("transport", kind),
                        ("version", schema.version().unwrap_or("")),
                    ],
                );
            }
            Err(e) => log_rejected(e),
        }
        result
    }

    pub fn decode_str(&self, text: &str) -> SchemaResult<SchemaDescriptor> {
        self.decode(Source::Text(text))
    }

    fn render(&self, schema: &SchemaDescriptor) -> SchemaResult<String> {
        let mut root = Mapping::new();
        root.insert(KEY_SCHEMA_TYPE.into(), SCHEMA_TYPE.into());
        root.insert(KEY_VERSION.into(), self.version.clone().into());

        let mut columns = Mapping::new();
        for column in schema.columns() {
            let entry = self.render_entry(column.dtype, column.nullable, &column.checks)?;
            columns.insert(column.name.clone().into(), Value::Mapping(entry));
        }
        root.insert(KEY_COLUMNS.into(), Value::Mapping(columns));

        let mut index = Vec::with_capacity(schema.index().len());
        for level in schema.index() {
            let mut entry = self.render_entry(level.dtype, level.nullable, &level.checks)?;
            let name = level.name.clone().map(Value::String).unwrap_or(Value::Null);
            entry.insert(KEY_NAME.into(), name);
            index.push(Value::Mapping(entry));
        }
        root.insert(KEY_INDEX.into(), Value::Sequence(index));

        serde_yaml::to_string(&Value::Mapping(root))
            .map_err(|e| SchemaError::unsupported_type(e.to_string()))
    }

    fn render_entry(
        &self,
        dtype: DType,
        nullable: bool,
        checks: &[CheckDescriptor],
    ) -> SchemaResult<Mapping> {
        let mut entry = Mapping::new();
        entry.insert(KEY_DTYPE.into(), dtype.tag().into());
        entry.insert(KEY_NULLABLE.into(), nullable.into());
        entry.insert(KEY_CHECKS.into(), self.render_checks(checks)?);
        Ok(entry)
    }

    /// No checks encode as an explicit `null`, never an omitted key
    fn render_checks(&self, checks: &[CheckDescriptor]) -> SchemaResult<Value> {
        if checks.is_empty() {
            return Ok(Value::Null);
        }

        let mut mapping = Mapping::new();
        for check in checks {
            self.registry.validate(check)?;
            mapping.insert(check.name().into(), check.params().clone());
        }
        Ok(Value::Mapping(mapping))
    }

    fn parse(&self, text: &str) -> SchemaResult<SchemaDescriptor> {
        let root: Node = serde_yaml::from_str(text).map_err(SchemaError::Parse)?;
        let mut document = Fields::from_node(root, "document")?;

        let schema_type = document
            .take(KEY_SCHEMA_TYPE)
            .ok_or_else(|| SchemaError::malformed("missing required key 'schema_type'"))?;
        if schema_type.as_str() != Some(SCHEMA_TYPE) {
            return Err(SchemaError::malformed(format!(
                "schema_type must be '{}', found {}",
                SCHEMA_TYPE,
                describe(&schema_type)
            )));
        }

        let version = match document.take(KEY_VERSION) {
            None => None,
            Some(node) if node.is_null() => None,
            Some(node) => {
                let rendered = node.scalar_to_string().ok_or_else(|| {
                    SchemaError::malformed(format!(
                        "version must be a scalar, found {}",
                        node.kind()
                    ))
                })?;
                Some(raw_version(text).unwrap_or(rendered))
            }
        };

        let columns = match document.take(KEY_COLUMNS) {
            None => return Err(SchemaError::malformed("missing required key 'columns'")),
            Some(node) => self.parse_columns(node)?,
        };

        let index = match document.take(KEY_INDEX) {
            None => Vec::new(),
            Some(node) => self.parse_index(node)?,
        };

        document.finish();

        let schema = SchemaDescriptor::new(columns, index)?;
        Ok(match version {
            Some(version) => {
                if version != self.version {
                    log_event_with_fields(
                        Event::VersionMismatch,
                        &[("codec", self.version.as_str()), ("document", version.as_str())],
                    );
                }
                schema.with_version(version)
            }
            None => schema,
        })
    }

    fn parse_columns(&self, node: Node) -> SchemaResult<Vec<ColumnDescriptor>> {
        let entries = match node {
            Node::Map(entries) => entries,
            node if node.is_null() => return Ok(Vec::new()),
            node => {
                return Err(SchemaError::malformed(format!(
                    "'columns' must be a mapping, found {}",
                    node.kind()
                )))
            }
        };

        // Repeated names are passed through; the descriptor rejects them.
        let mut columns = Vec::with_capacity(entries.len());
        for (key, body) in entries {
            let name = key.as_str().map(str::to_owned).ok_or_else(|| {
                SchemaError::malformed(format!("column names must be strings, found {}", key.kind()))
            })?;
            let context = format!("column '{}'", name);
            let mut fields = Fields::from_node(body, &context)?;
            let (dtype, nullable, checks) = parse_entry(&mut fields, &context)?;
            fields.finish();

            columns.push(ColumnDescriptor {
                name,
                dtype,
                nullable,
                checks,
            });
        }
        Ok(columns)
    }

    fn parse_index(&self, node: Node) -> SchemaResult<Vec<IndexDescriptor>> {
        let items = match node {
            Node::Seq(items) => items,
            node if node.is_null() => return Ok(Vec::new()),
            node => {
                return Err(SchemaError::malformed(format!(
                    "'index' must be a sequence, found {}",
                    node.kind()
                )))
            }
        };

        let mut index = Vec::with_capacity(items.len());
        for (position, item) in items.into_iter().enumerate() {
            let context = format!("index level {}", position);
            let mut fields = Fields::from_node(item, &context)?;
            let (dtype, nullable, checks) = parse_entry(&mut fields, &context)?;
            let name = match fields.take(KEY_NAME) {
                None => None,
                Some(node) if node.is_null() => None,
                Some(node) => Some(node.as_str().map(str::to_owned).ok_or_else(|| {
                    SchemaError::malformed(format!(
                        "{} name must be a string, found {}",
                        context,
                        node.kind()
                    ))
                })?),
            };
            fields.finish();

            index.push(IndexDescriptor {
                name,
                dtype,
                nullable,
                checks,
            });
        }
        Ok(index)
    }
}

/// Reads the keys shared by column and index entries
fn parse_entry(
    fields: &mut Fields,
    context: &str,
) -> SchemaResult<(DType, bool, Vec<CheckDescriptor>)> {
    let dtype_node = fields
        .take(KEY_DTYPE)
        .ok_or_else(|| SchemaError::malformed(format!("{} is missing 'pandas_dtype'", context)))?;
    let tag = dtype_node.as_str().ok_or_else(|| {
        SchemaError::malformed(format!(
            "{} pandas_dtype must be a string, found {}",
            context,
            dtype_node.kind()
        ))
    })?;
    let dtype: DType = tag.parse()?;

    let nullable = match fields.take(KEY_NULLABLE) {
        None => false,
        Some(node) if node.is_null() => false,
        Some(node) => node.as_bool().ok_or_else(|| {
            SchemaError::malformed(format!(
                "{} nullable must be a bool, found {}",
                context,
                node.kind()
            ))
        })?,
    };

    let checks = match fields.take(KEY_CHECKS) {
        None => Vec::new(),
        Some(Node::Map(entries)) => {
            let mut checks = Vec::with_capacity(entries.len());
            for (key, params) in entries {
                let name = key.as_str().map(str::to_owned).ok_or_else(|| {
                    SchemaError::malformed(format!(
                        "{} check names must be strings, found {}",
                        context,
                        key.kind()
                    ))
                })?;
                let params = params.into_value().map_err(|reason| {
                    SchemaError::malformed(format!(
                        "{} check '{}' parameters: {}",
                        context, name, reason
                    ))
                })?;
                checks.push(CheckDescriptor::from_raw(name, params));
            }
            checks
        }
        Some(node) if node.is_null() => Vec::new(),
        Some(node) => {
            return Err(SchemaError::malformed(format!(
                "{} checks must be a mapping or null, found {}",
                context,
                node.kind()
            )))
        }
    };

    Ok((dtype, nullable, checks))
}

/// String-keyed entries of one mapping, consumed key by key
struct Fields {
    context: String,
    entries: Vec<(String, Node)>,
}

impl Fields {
    fn from_node(node: Node, context: &str) -> SchemaResult<Self> {
        let raw = match node {
            Node::Map(entries) => entries,
            other => {
                return Err(SchemaError::malformed(format!(
                    "{} must be a mapping, found {}",
                    context,
                    other.kind()
                )))
            }
        };

        let mut entries: Vec<(String, Node)> = Vec::with_capacity(raw.len());
        for (key, value) in raw {
            let key = key.as_str().map(str::to_owned).ok_or_else(|| {
                SchemaError::malformed(format!("{} has a non-string key", context))
            })?;
            if entries.iter().any(|(k, _)| *k == key) {
                return Err(SchemaError::malformed(format!(
                    "{} repeats key '{}'",
                    context, key
                )));
            }
            entries.push((key, value));
        }

        Ok(Self {
            context: context.to_string(),
            entries,
        })
    }

    fn take(&mut self, key: &str) -> Option<Node> {
        let position = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(position).1)
    }

    /// Unknown keys are tolerated so newer producers stay readable
    fn finish(self) {
        for (key, _) in &self.entries {
            log_event_with_fields(
                Event::UnknownKeyIgnored,
                &[("context", self.context.as_str()), ("key", key.as_str())],
            );
        }
    }
}

fn describe(node: &Node) -> String {
    match node.as_str() {
        Some(s) => format!("'{}'", s),
        None => node.kind().to_string(),
    }
}

fn log_rejected(err: &SchemaError) {
    let message = err.to_string();
    log_event_with_fields(
        Event::SchemaRejected,
        &[("code", err.code()), ("message", message.as_str())],
    );
}
