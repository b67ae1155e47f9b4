//! Schema error types
//!
//! Error codes:
//! - DFS_INVALID_DESCRIPTOR: the in-memory model violates a structural rule
//! - DFS_UNSUPPORTED_TYPE: a value has no representation in the text format
//! - DFS_PARSE_ERROR: the payload is not well-formed YAML
//! - DFS_MALFORMED_SCHEMA: well-formed YAML, wrong or missing schema keys
//! - DFS_UNKNOWN_DTYPE: a dtype tag outside the known vocabulary
//!
//! I/O failures from the transport are carried as [`SchemaError::Io`] and keep
//! the platform error untouched.

use std::io;

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised by the descriptor model and the YAML codec
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Structural violation of the descriptor model (e.g. duplicate column names)
    #[error("invalid schema descriptor: {0}")]
    InvalidDescriptor(String),

    /// Encode-time: a value cannot be represented in the text format
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// Decode-time: the payload is not syntactically valid YAML
    #[error("failed to parse schema text: {0}")]
    Parse(#[source] serde_yaml::Error),

    /// Decode-time: valid YAML, but required keys are missing or wrong
    #[error("malformed schema: {0}")]
    MalformedSchema(String),

    /// Decode-time: dtype tag is not in the recognized vocabulary
    #[error("unknown dtype '{0}'")]
    UnknownDType(String),

    /// Transport failure, passed through as-is
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl SchemaError {
    pub fn invalid_descriptor(msg: impl Into<String>) -> Self {
        Self::InvalidDescriptor(msg.into())
    }

    pub fn unsupported_type(msg: impl Into<String>) -> Self {
        Self::UnsupportedType(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedSchema(msg.into())
    }

    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::InvalidDescriptor(_) => "DFS_INVALID_DESCRIPTOR",
            SchemaError::UnsupportedType(_) => "DFS_UNSUPPORTED_TYPE",
            SchemaError::Parse(_) => "DFS_PARSE_ERROR",
            SchemaError::MalformedSchema(_) => "DFS_MALFORMED_SCHEMA",
            SchemaError::UnknownDType(_) => "DFS_UNKNOWN_DTYPE",
            SchemaError::Io(_) => "DFS_IO_ERROR",
        }
    }

    /// Whether this error came from the underlying transport rather than the codec
    pub fn is_io(&self) -> bool {
        matches!(self, SchemaError::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SchemaError::invalid_descriptor("x").code(),
            "DFS_INVALID_DESCRIPTOR"
        );
        assert_eq!(SchemaError::unsupported_type("x").code(), "DFS_UNSUPPORTED_TYPE");
        assert_eq!(SchemaError::malformed("x").code(), "DFS_MALFORMED_SCHEMA");
        assert_eq!(SchemaError::UnknownDType("x".into()).code(), "DFS_UNKNOWN_DTYPE");
    }

    #[test]
    fn test_io_error_is_transparent() {
        let err: SchemaError = io::Error::new(io::ErrorKind::NotFound, "no such file").into();
        assert!(err.is_io());
        assert_eq!(err.to_string(), "no such file");
        assert_eq!(err.code(), "DFS_IO_ERROR");
    }

    #[test]
    fn test_display_includes_context() {
        let err = SchemaError::UnknownDType("complex128".into());
        assert!(err.to_string().contains("complex128"));

        let err = SchemaError::invalid_descriptor("duplicate column 'a'");
        assert!(err.to_string().contains("duplicate column 'a'"));
    }

    #[test]
    fn test_parse_error_keeps_source() {
        use std::error::Error;

        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("a: [1, 2").unwrap_err();
        let err = SchemaError::Parse(yaml_err);
        assert!(err.source().is_some());
        assert!(!err.is_io());
    }
}
