//! Observable events for dfschema
//!
//! Events are explicit and typed; each one carries its default severity.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Schema written to text
    SchemaEncoded,
    /// Schema read back from text
    SchemaDecoded,
    /// Decoded text was produced by a different library version
    VersionMismatch,
    /// Decoder skipped a key it does not know
    UnknownKeyIgnored,
    /// Encode or decode failed
    SchemaRejected,
    /// CLI configuration loaded
    ConfigLoaded,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::SchemaEncoded => "SCHEMA_ENCODED",
            Event::SchemaDecoded => "SCHEMA_DECODED",
            Event::VersionMismatch => "SCHEMA_VERSION_MISMATCH",
            Event::UnknownKeyIgnored => "UNKNOWN_KEY_IGNORED",
            Event::SchemaRejected => "SCHEMA_REJECTED",
            Event::ConfigLoaded => "CONFIG_LOADED",
        }
    }

    /// Rejections are INFO: the caller already receives the error.
    pub fn severity(&self) -> Severity {
        match self {
            Event::UnknownKeyIgnored => Severity::Trace,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::SchemaEncoded.as_str(), "SCHEMA_ENCODED");
        assert_eq!(Event::VersionMismatch.to_string(), "SCHEMA_VERSION_MISMATCH");
    }

    #[test]
    fn test_event_severity() {
        assert_eq!(Event::UnknownKeyIgnored.severity(), Severity::Trace);
        assert_eq!(Event::SchemaRejected.severity(), Severity::Info);
        assert!(Event::SchemaRejected.severity() < Severity::Warn);
        assert_eq!(Event::SchemaDecoded.severity(), Severity::Info);
    }
}
