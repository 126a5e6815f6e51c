//! Durable log wiring.
//!
//! Installs a single tracing-subscriber file layer: one line per record,
//! human-readable timestamp, level, message. Console mirroring is handled
//! by [`crate::events::ConsoleEventSink`], not a second layer, so each
//! destination has exactly one writer.

use chrono::Local;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Default path of the durable activity log, relative to the working
/// directory.
pub const DEFAULT_LOG_FILE: &str = "taskflow_automation.log";

/// `%Y-%m-%d %H:%M:%S` local-time formatter for log lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct HumanTime;

impl FormatTime for HumanTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

/// Installs the global subscriber appending to the log file at `path`.
///
/// The filter honours `RUST_LOG` and defaults to `info`. Fails if the file
/// cannot be opened or a global subscriber is already installed.
pub fn init_file_logging(path: impl AsRef<Path>) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path.as_ref())?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_timer(HumanTime);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()?;

    Ok(())
}
