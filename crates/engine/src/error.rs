//! Error types for mirror passes.

use std::io;
use std::path::PathBuf;

use flist::FlistError;

/// Result type for engine operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Error that aborts a synchronization pass.
///
/// Per-entry failures inside a pass are downgraded to error-outcome events
/// and never surface here; this type covers the conditions under which the
/// pass itself cannot proceed.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// A directory at the pass root could not be listed.
    #[error(transparent)]
    Listing(#[from] FlistError),

    /// I/O error with path context (for example, the replica root could not
    /// be created).
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The path where the error occurred.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl SyncError {
    /// Creates an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Extension trait for mapping I/O results to `SyncError` with path context.
pub(crate) trait IoResultExt<T> {
    /// Maps an I/O error to [`SyncError::Io`] with the given path.
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T, SyncError>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T, SyncError> {
        self.map_err(|e| SyncError::io(path, e))
    }
}
