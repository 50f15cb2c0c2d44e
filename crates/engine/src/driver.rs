use std::path::Path;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError};
use logging::EventLog;

use crate::sync::sync_once;

/// Runs synchronization passes forever, one per interval, until cancelled.
///
/// The first pass starts immediately. Between passes the driver sleeps on
/// `shutdown.recv_timeout(interval)`, so a shutdown message (or the sender
/// being dropped) interrupts the wait promptly instead of at the next pass
/// boundary. Cancellation is only observed between passes: a pass that has
/// started runs to completion, which keeps every pass fully logged.
///
/// Exactly one pass is ever in flight. A pass that takes longer than
/// `interval` simply delays the start of the next one; passes are never
/// skipped, queued, or overlapped.
///
/// A failed pass (for example, the source directory vanished) is logged and
/// survived; the next interval retries it.
pub fn run_forever(
    source: &Path,
    replica: &Path,
    interval: Duration,
    shutdown: &Receiver<()>,
    log: &EventLog,
) {
    loop {
        match sync_once(source, replica, log) {
            Ok(stats) => {
                tracing::info!(
                    dirs_created = stats.dirs_created,
                    files_copied = stats.files_copied,
                    files_deleted = stats.files_deleted,
                    dirs_deleted = stats.dirs_deleted,
                    roots_recreated = stats.roots_recreated,
                    errors = stats.errors,
                    "synchronization pass finished"
                );
            }
            Err(error) => {
                tracing::error!(%error, "synchronization pass failed");
                log.banner(&format!("synchronization pass failed: {error}"));
            }
        }

        match shutdown.recv_timeout(interval) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
            Err(RecvTimeoutError::Timeout) => {}
        }
    }
}
