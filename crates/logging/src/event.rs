use crate::timestamp::{format_timestamp, now_epoch_secs};
use std::fmt;
use std::path::{Path, PathBuf};

/// Kind of filesystem operation recorded by a [`SyncEvent`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OpKind {
    /// A directory was created in the replica.
    CreateDir,
    /// A file's content and modification time were copied to the replica.
    CopyFile,
    /// A file (or other non-directory entry) was removed from the replica.
    DeleteFile,
    /// A directory subtree was removed from the replica.
    DeleteDir,
    /// A replica directory expected to exist was found missing and recreated.
    ReplicaRootRecreated,
}

impl OpKind {
    /// Returns the stable log-line token for this operation kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateDir => "create-dir",
            Self::CopyFile => "copy-file",
            Self::DeleteFile => "delete-file",
            Self::DeleteDir => "delete-dir",
            Self::ReplicaRootRecreated => "replica-root-recreated",
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the recorded operation succeeded.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The operation completed.
    Ok,
    /// The operation failed; the text describes the underlying error.
    Failed(String),
}

impl Outcome {
    /// Reports whether the outcome is a failure.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Immutable record of one replica mutation.
///
/// Created when the operation completes, appended to the durable and console
/// sinks by [`crate::EventLog::record`], and never mutated.
#[derive(Clone, Debug)]
pub struct SyncEvent {
    timestamp_secs: u64,
    op: OpKind,
    source: Option<PathBuf>,
    destination: PathBuf,
    outcome: Outcome,
}

impl SyncEvent {
    /// Creates a success record stamped with the current time.
    ///
    /// `source` is the path the data came from, when the operation has one
    /// (copies and creations); deletions only name the replica path.
    #[must_use]
    pub fn new(op: OpKind, source: Option<&Path>, destination: &Path) -> Self {
        Self {
            timestamp_secs: now_epoch_secs(),
            op,
            source: source.map(Path::to_path_buf),
            destination: destination.to_path_buf(),
            outcome: Outcome::Ok,
        }
    }

    /// Creates a failure record stamped with the current time.
    #[must_use]
    pub fn failed(
        op: OpKind,
        source: Option<&Path>,
        destination: &Path,
        error: &dyn fmt::Display,
    ) -> Self {
        Self {
            timestamp_secs: now_epoch_secs(),
            op,
            source: source.map(Path::to_path_buf),
            destination: destination.to_path_buf(),
            outcome: Outcome::Failed(error.to_string()),
        }
    }

    /// Returns the operation kind.
    #[must_use]
    pub const fn op(&self) -> OpKind {
        self.op
    }

    /// Returns the source path, when the operation has one.
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Returns the replica-side path the operation acted on.
    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Returns the recorded outcome.
    #[must_use]
    pub const fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Renders the event as one human-readable log line (no trailing newline).
    #[must_use]
    pub fn render(&self) -> String {
        let timestamp = format_timestamp(self.timestamp_secs);
        let mut line = match &self.source {
            Some(source) => format!(
                "[{timestamp}] {} '{}' -> '{}'",
                self.op,
                source.display(),
                self.destination.display()
            ),
            None => format!("[{timestamp}] {} '{}'", self.op, self.destination.display()),
        };
        if let Outcome::Failed(reason) = &self.outcome {
            line.push_str(" FAILED: ");
            line.push_str(reason);
        }
        line
    }

    #[cfg(test)]
    pub(crate) fn with_timestamp(mut self, epoch_secs: u64) -> Self {
        self.timestamp_secs = epoch_secs;
        self
    }
}
