//! Observability for dfschema
//!
//! Structured JSON-line logging of codec lifecycle events.
//!
//! # Usage
//!
//! ```ignore
//! use dfschema::observability::{log_event_with_fields, Event, Logger, Severity};
//!
//! Logger::set_level(Severity::Info);
//! log_event_with_fields(Event::SchemaDecoded, &[("columns", "4")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event at its default severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
