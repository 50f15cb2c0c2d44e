use std::path::{Path, PathBuf};

/// Operation counters accumulated over one synchronization pass.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SyncStats {
    /// Directories created in the replica.
    pub dirs_created: u64,
    /// Files copied into the replica.
    pub files_copied: u64,
    /// Non-directory entries removed from the replica.
    pub files_deleted: u64,
    /// Directory subtrees removed from the replica.
    pub dirs_deleted: u64,
    /// Replica directories found missing mid-pass and recreated.
    pub roots_recreated: u64,
    /// Per-entry operations that failed and were skipped.
    pub errors: u64,
}

impl SyncStats {
    /// Total number of replica mutations performed during the pass.
    #[must_use]
    pub const fn operations(&self) -> u64 {
        self.dirs_created
            + self.files_copied
            + self.files_deleted
            + self.dirs_deleted
            + self.roots_recreated
    }

    /// Reports whether the pass changed nothing and hit no errors.
    ///
    /// A clean pass over an unchanged tree is the expected steady state of
    /// the daemon loop.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.operations() == 0 && self.errors == 0
    }
}

/// Per-pass context: the resolved roots plus the running counters.
///
/// A session lives for exactly one top-level [`crate::sync_once`] call,
/// through every directory level that call visits, and is discarded when the
/// pass finishes. Nothing else survives between passes.
#[derive(Debug)]
pub struct SyncSession {
    source_root: PathBuf,
    replica_root: PathBuf,
    pub(crate) stats: SyncStats,
}

impl SyncSession {
    pub(crate) fn new(source_root: &Path, replica_root: &Path) -> Self {
        Self {
            source_root: source_root.to_path_buf(),
            replica_root: replica_root.to_path_buf(),
            stats: SyncStats::default(),
        }
    }

    /// Returns the source tree treated as the single source of truth.
    #[must_use]
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Returns the replica tree being converged onto the source.
    #[must_use]
    pub fn replica_root(&self) -> &Path {
        &self.replica_root
    }

    /// Returns the counters accumulated so far.
    #[must_use]
    pub const fn stats(&self) -> &SyncStats {
        &self.stats
    }
}
