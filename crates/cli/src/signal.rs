//! Shutdown signal plumbing.
//!
//! Raw libc signal handlers must be async-signal-safe, so the handler only
//! sets an atomic flag. A watcher thread polls the flag and forwards the
//! shutdown onto a channel the daemon loop can sleep on.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crossbeam_channel::Sender;

/// Set by the signal handler on the first SIGINT or SIGTERM.
static SHUTDOWN_REQUESTED: AtomicBool = AtomicBool::new(false);

#[cfg(unix)]
extern "C" fn handle_shutdown_signal(_signum: libc::c_int) {
    SHUTDOWN_REQUESTED.store(true, Ordering::SeqCst);
}

/// Installs handlers for SIGINT and SIGTERM.
///
/// Handlers stay installed for the lifetime of the process; restoring them
/// during shutdown would leave a window where a repeat signal kills the
/// process mid-cleanup.
#[cfg(unix)]
#[allow(unsafe_code)]
fn install() -> io::Result<()> {
    unsafe {
        let mut action: libc::sigaction = std::mem::zeroed();
        action.sa_sigaction = handle_shutdown_signal as libc::sighandler_t;
        action.sa_flags = libc::SA_RESTART;
        libc::sigemptyset(&mut action.sa_mask as *mut libc::sigset_t);

        for signum in [libc::SIGINT, libc::SIGTERM] {
            if libc::sigaction(signum, &action, std::ptr::null_mut()) != 0 {
                return Err(io::Error::last_os_error());
            }
        }
    }
    Ok(())
}

/// Signal delivery is process-wide state this build cannot hook; the daemon
/// still shuts down cleanly when its console is closed.
#[cfg(not(unix))]
fn install() -> io::Result<()> {
    Ok(())
}

/// Installs the signal handlers and forwards the first shutdown signal to
/// `shutdown`.
///
/// The watcher thread polls the handler flag every 100ms, so cancellation
/// reaches the daemon loop promptly without doing anything unsafe inside the
/// handler itself.
pub(crate) fn notify_on_shutdown(shutdown: Sender<()>) -> io::Result<()> {
    install()?;
    thread::spawn(move || {
        while !SHUTDOWN_REQUESTED.load(Ordering::SeqCst) {
            thread::sleep(Duration::from_millis(100));
        }
        let _ = shutdown.send(());
    });
    Ok(())
}
