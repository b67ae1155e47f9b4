//! Schema descriptor model
//!
//! A declarative description of a dataframe schema: named columns in
//! declaration order, plus zero or more index levels. Nothing here knows about
//! any text format.

use std::collections::HashSet;

use super::checks::CheckDescriptor;
use super::errors::{SchemaError, SchemaResult};
use super::types::DType;

/// Fixed tag identifying a dataframe schema in the text format
pub const SCHEMA_TYPE: &str = "dataframe";

/// A single named column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub dtype: DType,
    pub nullable: bool,
    pub checks: Vec<CheckDescriptor>,
}

impl ColumnDescriptor {
    /// Create a non-nullable column without checks
    pub fn new(name: impl Into<String>, dtype: DType) -> Self {
        Self {
            name: name.into(),
            dtype,
            nullable: false,
            checks: Vec::new(),
        }
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn with_check(mut self, check: CheckDescriptor) -> Self {
        self.checks.push(check);
        self
    }

    pub fn with_checks(mut self, checks: impl IntoIterator<Item = CheckDescriptor>) -> Self {
        self.checks.extend(checks);
        self
    }
}

/// One level of the dataframe index
#[derive(Debug, Clone, PartialEq)]
pub struct IndexDescriptor {
    pub name: Option<String>,
    pub dtype: DType,
    pub nullable: bool,
    pub checks: Vec<CheckDescriptor>,
}

impl IndexDescriptor {
    /// Create an unnamed, non-nullable index level
    pub fn new(dtype: DType) -> Self {
        Self {
            name: None,
            dtype,
            nullable: false,
            checks: Vec::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn with_check(mut self, check: CheckDescriptor) -> Self {
        self.checks.push(check);
        self
    }
}

/// Complete dataframe schema description
///
/// Equality compares columns, index levels and their checks in order. The
/// producer version is informational and does not take part.
#[derive(Debug, Clone)]
pub struct SchemaDescriptor {
    version: Option<String>,
    columns: Vec<ColumnDescriptor>,
    index: Vec<IndexDescriptor>,
}

impl SchemaDescriptor {
    /// Create a schema, enforcing unique column names and unique check names
    /// per column or index level.
    pub fn new(
        columns: Vec<ColumnDescriptor>,
        index: Vec<IndexDescriptor>,
    ) -> SchemaResult<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(SchemaError::invalid_descriptor(format!(
                    "duplicate column name '{}'",
                    column.name
                )));
            }
            ensure_unique_checks(&format!("column '{}'", column.name), &column.checks)?;
        }

        for (position, level) in index.iter().enumerate() {
            let owner = match &level.name {
                Some(name) => format!("index '{}'", name),
                None => format!("index level {}", position),
            };
            ensure_unique_checks(&owner, &level.checks)?;
        }

        Ok(Self {
            version: None,
            columns,
            index,
        })
    }

    /// Attach the version of the library that produced this schema
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn schema_type(&self) -> &'static str {
        SCHEMA_TYPE
    }

    /// Producer version, when the schema was decoded from text
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn index(&self) -> &[IndexDescriptor] {
        &self.index
    }
}

impl PartialEq for SchemaDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns && self.index == other.index
    }
}

fn ensure_unique_checks(owner: &str, checks: &[CheckDescriptor]) -> SchemaResult<()> {
    let mut seen = HashSet::with_capacity(checks.len());
    for check in checks {
        if !seen.insert(check.name()) {
            return Err(SchemaError::invalid_descriptor(format!(
                "{} declares check '{}' more than once",
                owner,
                check.name()
            )));
        }
    }
    Ok(())
}
