//! Conversion seam between descriptors and schema objects owned elsewhere
//!
//! A validation engine implements these traits for its own schema type; the
//! codec then reads and writes that type without knowing anything else
//! about it.

use super::descriptor::SchemaDescriptor;
use super::errors::SchemaResult;

/// Derives a descriptor from a schema object
pub trait DescribeSchema {
    fn describe(&self) -> SchemaResult<SchemaDescriptor>;
}

/// Rebuilds a schema object from a descriptor
pub trait FromDescriptor: Sized {
    fn from_descriptor(descriptor: &SchemaDescriptor) -> SchemaResult<Self>;
}

impl DescribeSchema for SchemaDescriptor {
    fn describe(&self) -> SchemaResult<SchemaDescriptor> {
        Ok(self.clone())
    }
}

impl FromDescriptor for SchemaDescriptor {
    fn from_descriptor(descriptor: &SchemaDescriptor) -> SchemaResult<Self> {
        Ok(descriptor.clone())
    }
}
