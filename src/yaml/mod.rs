//! YAML serialization for schema descriptors
//!
//! Free functions use a default [`YamlCodec`]: this crate's version as the
//! stamp and the built-in check registry. Build a codec explicitly to pin the
//! version or accept custom checks.
//!
//! ```ignore
//! use dfschema::yaml::{from_yaml, to_yaml, Sink};
//!
//! let text = to_yaml(&schema, None)?.unwrap();
//! to_yaml(&schema, Some(Sink::path("schema.yaml")))?;
//! let decoded = from_yaml(text.as_str())?;
//! ```

mod codec;
mod node;
mod transport;

pub use codec::YamlCodec;
pub use transport::{Sink, Source};

use crate::schema::{DescribeSchema, FromDescriptor, SchemaDescriptor, SchemaResult};

/// Encodes a schema; returns the text when `target` is `None`, otherwise
/// writes to the target and returns `None`.
pub fn to_yaml(
    schema: &SchemaDescriptor,
    target: Option<Sink<'_>>,
) -> SchemaResult<Option<String>> {
    YamlCodec::default().to_yaml(schema, target)
}

/// Decodes a schema from text, a reader or a path
pub fn from_yaml<'a>(source: impl Into<Source<'a>>) -> SchemaResult<SchemaDescriptor> {
    YamlCodec::default().decode(source.into())
}

/// Encodes any schema object that can describe itself
pub fn dump<S: DescribeSchema + ?Sized>(
    object: &S,
    target: Option<Sink<'_>>,
) -> SchemaResult<Option<String>> {
    to_yaml(&object.describe()?, target)
}

/// Decodes text into any schema object buildable from a descriptor
pub fn load<'a, T: FromDescriptor>(source: impl Into<Source<'a>>) -> SchemaResult<T> {
    T::from_descriptor(&from_yaml(source)?)
}

impl SchemaDescriptor {
    /// See [`to_yaml`]
    pub fn to_yaml(&self, target: Option<Sink<'_>>) -> SchemaResult<Option<String>> {
        to_yaml(self, target)
    }

    /// See [`from_yaml`]
    pub fn from_yaml<'a>(source: impl Into<Source<'a>>) -> SchemaResult<Self> {
        from_yaml(source)
    }
}
