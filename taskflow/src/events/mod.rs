//! Activity log types and sinks.
//!
//! The activity log is an append-only record of stage transitions and
//! outcomes. The orchestrator and stage runner depend on the [`EventSink`]
//! capability only; production wiring fans out to the tracing-backed
//! durable log and the console, tests capture entries for assertion.

mod sink;

pub use sink::{
    CollectingEventSink, ConsoleEventSink, EventSink, FanOutEventSink,
    NoOpEventSink, TracingEventSink,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Routine lifecycle information.
    Info,
    /// A failure that ends the run from this point forward.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// One appended record: timestamp, severity, message.
///
/// Entries are never mutated or deleted once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// When the entry was recorded.
    pub timestamp: DateTime<Utc>,
    /// Entry severity.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
}

impl LogEntry {
    /// Creates an entry stamped with the current time.
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            severity,
            message: message.into(),
        }
    }

    /// Returns true for error-severity entries.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_display() {
        assert_eq!(format!("{}", Severity::Info), "INFO");
        assert_eq!(format!("{}", Severity::Error), "ERROR");
    }

    #[test]
    fn test_log_entry_construction() {
        let entry = LogEntry::new(Severity::Error, "stage failed");

        assert!(entry.is_error());
        assert_eq!(entry.message, "stage failed");
    }

    #[test]
    fn test_log_entry_serialization() {
        let entry = LogEntry::new(Severity::Info, "starting");

        let json = serde_json::to_string(&entry).unwrap();
        let deserialized: LogEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(entry, deserialized);
        assert!(json.contains("\"info\""));
    }
}
