//! Event sink trait and implementations.

use super::{LogEntry, Severity};
use std::sync::Arc;

/// Capability to append to the activity log.
///
/// `record` is the durable append; `banner` marks a section for a human
/// operator watching a live run and is a no-op for sinks without an
/// interactive surface.
pub trait EventSink: Send + Sync {
    /// Appends one entry to the log.
    fn record(&self, severity: Severity, message: &str);

    /// Prints an operator-facing section marker.
    fn banner(&self, _text: &str) {}
}

/// A sink that discards all entries.
///
/// Used as the default when no sink is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEventSink;

impl EventSink for NoOpEventSink {
    fn record(&self, _severity: Severity, _message: &str) {
        // Intentionally empty - discards all entries
    }
}

/// A sink that records entries through the tracing framework.
///
/// Combined with [`crate::observability::init_file_logging`] this is the
/// durable half of the activity log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn record(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => tracing::info!("{}", message),
            Severity::Error => tracing::error!("{}", message),
        }
    }
}

/// A sink that mirrors entries to stdout for a human operator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleEventSink;

impl EventSink for ConsoleEventSink {
    fn record(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => println!("{message}"),
            Severity::Error => println!("ERROR: {message}"),
        }
    }

    fn banner(&self, text: &str) {
        println!("\n=== {text} ===");
    }
}

/// A sink that forwards every entry to a set of inner sinks.
///
/// This is how log/console pairing is achieved: the orchestrator records
/// once and the fan-out delivers to every destination.
#[derive(Clone, Default)]
pub struct FanOutEventSink {
    sinks: Vec<Arc<dyn EventSink>>,
}

impl FanOutEventSink {
    /// Creates a fan-out over the given sinks.
    #[must_use]
    pub fn new(sinks: Vec<Arc<dyn EventSink>>) -> Self {
        Self { sinks }
    }

    /// The production wiring: durable tracing log plus console mirror.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![
            Arc::new(TracingEventSink),
            Arc::new(ConsoleEventSink),
        ])
    }
}

impl std::fmt::Debug for FanOutEventSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanOutEventSink")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl EventSink for FanOutEventSink {
    fn record(&self, severity: Severity, message: &str) {
        for sink in &self.sinks {
            sink.record(severity, message);
        }
    }

    fn banner(&self, text: &str) {
        for sink in &self.sinks {
            sink.banner(text);
        }
    }
}

/// A collecting sink for testing purposes.
#[derive(Debug, Default)]
pub struct CollectingEventSink {
    entries: parking_lot::RwLock<Vec<LogEntry>>,
    banners: parking_lot::RwLock<Vec<String>>,
}

impl CollectingEventSink {
    /// Creates a new collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected entries.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.read().clone()
    }

    /// Returns the error-severity entries only.
    #[must_use]
    pub fn errors(&self) -> Vec<LogEntry> {
        self.entries
            .read()
            .iter()
            .filter(|entry| entry.is_error())
            .cloned()
            .collect()
    }

    /// Returns all collected banners.
    #[must_use]
    pub fn banners(&self) -> Vec<String> {
        self.banners.read().clone()
    }

    /// Returns true if any entry's message contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.entries
            .read()
            .iter()
            .any(|entry| entry.message.contains(needle))
    }

    /// Returns the number of collected entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if no entries have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Clears all collected entries and banners.
    pub fn clear(&self) {
        self.entries.write().clear();
        self.banners.write().clear();
    }
}

impl EventSink for CollectingEventSink {
    fn record(&self, severity: Severity, message: &str) {
        self.entries.write().push(LogEntry::new(severity, message));
    }

    fn banner(&self, text: &str) {
        self.banners.write().push(text.to_string());
    }
}
