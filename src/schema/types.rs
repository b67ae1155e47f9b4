//! Column data types
//!
//! The dtype vocabulary is closed. Every variant has exactly one canonical
//! textual tag, used when encoding; decoding also accepts a few aliases.
//!
//! Supported tags:
//! - int, int8, int16, int32, int64
//! - uint8, uint16, uint32, uint64
//! - float, float32, float64
//! - string, str, bool, object, category
//! - datetime64[ns] (alias: datetime), timedelta64[ns] (alias: timedelta)

use std::fmt;
use std::str::FromStr;

use super::errors::SchemaError;

/// Data type of a column or index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    /// Platform default integer
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    /// Platform default float
    Float,
    Float32,
    Float64,
    /// Nullable string extension type
    String,
    /// Python `str` stored as object
    Str,
    Bool,
    /// Nanosecond-resolution timestamp
    DateTime,
    /// Nanosecond-resolution duration
    Timedelta,
    Category,
    Object,
}

/// Every dtype in declaration order
const ALL: &[DType] = &[
    DType::Int,
    DType::Int8,
    DType::Int16,
    DType::Int32,
    DType::Int64,
    DType::UInt8,
    DType::UInt16,
    DType::UInt32,
    DType::UInt64,
    DType::Float,
    DType::Float32,
    DType::Float64,
    DType::String,
    DType::Str,
    DType::Bool,
    DType::DateTime,
    DType::Timedelta,
    DType::Category,
    DType::Object,
];

/// Accepted on decode only; never emitted.
const ALIASES: &[(&str, DType)] = &[
    ("datetime", DType::DateTime),
    ("timedelta", DType::Timedelta),
];

impl DType {
    /// Returns the canonical tag written to the text format
    pub fn tag(&self) -> &'static str {
        match self {
            DType::Int => "int",
            DType::Int8 => "int8",
            DType::Int16 => "int16",
            DType::Int32 => "int32",
            DType::Int64 => "int64",
            DType::UInt8 => "uint8",
            DType::UInt16 => "uint16",
            DType::UInt32 => "uint32",
            DType::UInt64 => "uint64",
            DType::Float => "float",
            DType::Float32 => "float32",
            DType::Float64 => "float64",
            DType::String => "string",
            DType::Str => "str",
            DType::Bool => "bool",
            DType::DateTime => "datetime64[ns]",
            DType::Timedelta => "timedelta64[ns]",
            DType::Category => "category",
            DType::Object => "object",
        }
    }

    /// Resolves a textual tag (canonical or alias) to a dtype
    pub fn from_tag(tag: &str) -> Option<DType> {
        ALL.iter()
            .find(|dtype| dtype.tag() == tag)
            .copied()
            .or_else(|| {
                ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == tag)
                    .map(|(_, dtype)| *dtype)
            })
    }

    /// All dtypes in declaration order
    pub fn all() -> impl Iterator<Item = DType> {
        ALL.iter().copied()
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            DType::Int
                | DType::Int8
                | DType::Int16
                | DType::Int32
                | DType::Int64
                | DType::UInt8
                | DType::UInt16
                | DType::UInt32
                | DType::UInt64
                | DType::Float
                | DType::Float32
                | DType::Float64
        )
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for DType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DType::from_tag(s).ok_or_else(|| SchemaError::UnknownDType(s.to_string()))
    }
}
