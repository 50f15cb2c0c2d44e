use std::error::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Error returned when a directory listing fails.
#[derive(Debug)]
pub struct FlistError {
    kind: FlistErrorKind,
}

impl FlistError {
    pub(crate) fn new(kind: FlistErrorKind) -> Self {
        Self { kind }
    }

    pub(crate) fn read_dir(path: PathBuf, source: io::Error) -> Self {
        Self::new(FlistErrorKind::ReadDir { path, source })
    }

    pub(crate) fn read_dir_entry(path: PathBuf, source: io::Error) -> Self {
        Self::new(FlistErrorKind::ReadDirEntry { path, source })
    }

    pub(crate) fn file_type(path: PathBuf, source: io::Error) -> Self {
        Self::new(FlistErrorKind::FileType { path, source })
    }

    /// Returns the specific failure that aborted the listing.
    #[must_use]
    pub fn kind(&self) -> &FlistErrorKind {
        &self.kind
    }

    /// Returns the filesystem path associated with the error.
    ///
    /// Every listing failure identifies the directory (or entry) it refers
    /// to, so callers can forward the returned path directly into
    /// higher-level diagnostics without pattern matching on
    /// [`FlistErrorKind`].
    #[must_use]
    pub fn path(&self) -> &Path {
        self.kind.path()
    }
}

impl fmt::Display for FlistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FlistErrorKind::ReadDir { path, source } => {
                write!(
                    f,
                    "failed to read directory '{}': {}",
                    path.display(),
                    source
                )
            }
            FlistErrorKind::ReadDirEntry { path, source } => {
                write!(
                    f,
                    "failed to read entry in '{}': {}",
                    path.display(),
                    source
                )
            }
            FlistErrorKind::FileType { path, source } => {
                write!(
                    f,
                    "failed to determine the type of '{}': {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl Error for FlistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            FlistErrorKind::ReadDir { source, .. }
            | FlistErrorKind::ReadDirEntry { source, .. }
            | FlistErrorKind::FileType { source, .. } => Some(source),
        }
    }
}

/// Classification of listing failures.
#[derive(Debug)]
pub enum FlistErrorKind {
    /// Failed to open the directory for reading.
    ReadDir {
        /// Directory whose contents could not be read.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
    /// Failed to obtain a directory entry during iteration.
    ReadDirEntry {
        /// Directory containing the problematic entry.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
    /// Failed to query the filesystem type indicator for an entry.
    FileType {
        /// Entry whose type could not be determined.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
}

impl FlistErrorKind {
    /// Returns the filesystem path tied to the failure.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            FlistErrorKind::ReadDir { path, .. }
            | FlistErrorKind::ReadDirEntry { path, .. }
            | FlistErrorKind::FileType { path, .. } => path,
        }
    }
}
