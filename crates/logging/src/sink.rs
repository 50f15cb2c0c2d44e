use crate::event::SyncEvent;
use crate::timestamp::{format_timestamp, now_epoch_secs};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

/// Dual-destination sink for [`SyncEvent`] lines.
///
/// Every recorded event is rendered once and appended to an append-only
/// durable log file and to a console stream. The durable file is flushed
/// after each line so a crashed or killed process leaves a complete record
/// of the operations it performed.
///
/// The log is shared by reference across the engine; interior mutexes keep
/// the two writers consistent should a future caller record from more than
/// one thread.
pub struct EventLog {
    durable: Mutex<File>,
    console: Mutex<Box<dyn Write + Send>>,
}

impl EventLog {
    /// Opens (creating if needed) the durable log file in append mode, with
    /// the process's stdout as the console stream.
    pub fn open(path: &Path) -> io::Result<Self> {
        Self::with_console(path, Box::new(io::stdout()))
    }

    /// Opens the durable log file with an explicit console writer.
    ///
    /// Tests use this to capture the console stream in memory.
    pub fn with_console(path: &Path, console: Box<dyn Write + Send>) -> io::Result<Self> {
        let durable = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            durable: Mutex::new(durable),
            console: Mutex::new(console),
        })
    }

    /// Appends one event to both sinks.
    ///
    /// Write failures are downgraded to `tracing` warnings; losing a log line
    /// must not abort the synchronization pass that produced it.
    pub fn record(&self, event: &SyncEvent) {
        self.write_line(&event.render());
    }

    /// Appends a timestamped free-text line to both sinks.
    ///
    /// Used for the startup banner and pass-failure notices.
    pub fn banner(&self, text: &str) {
        let timestamp = format_timestamp(now_epoch_secs());
        self.write_line(&format!("[{timestamp}] {text}"));
    }

    fn write_line(&self, line: &str) {
        if let Ok(mut durable) = self.durable.lock() {
            if let Err(error) = writeln!(durable, "{line}").and_then(|()| durable.flush()) {
                tracing::warn!(%error, "failed to append to the durable log");
            }
        }
        if let Ok(mut console) = self.console.lock() {
            if let Err(error) = writeln!(console, "{line}") {
                tracing::warn!(%error, "failed to write to the console stream");
            }
        }
    }
}

impl std::fmt::Debug for EventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLog").finish_non_exhaustive()
    }
}
