//! Schema descriptor model for dfschema
//!
//! # Design Principles
//!
//! - Declaration order of columns and index levels is significant
//! - Column names are unique; check names are unique per column
//! - The dtype vocabulary is closed
//! - Checks are opaque: named predicate plus parameter bag
//! - No I/O and no validation execution

mod checks;
mod descriptor;
mod errors;
mod object;
mod types;

pub use checks::{CheckDescriptor, CheckKind, CheckRegistry, ParamStyle};
pub use descriptor::{ColumnDescriptor, IndexDescriptor, SchemaDescriptor, SCHEMA_TYPE};
pub use errors::{SchemaError, SchemaResult};
pub use object::{DescribeSchema, FromDescriptor};
pub use types::DType;
