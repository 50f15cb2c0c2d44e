use crate::error::FlistError;
use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

/// Filesystem type indicator for one directory entry.
///
/// Classification comes from the non-following type reported by the directory
/// iterator, so a symbolic link is reported as [`EntryKind::Symlink`] even
/// when its target is a directory. Names are never used to guess a kind.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntryKind {
    /// Regular file or any non-directory, non-symlink entry.
    File,
    /// Directory.
    Dir,
    /// Symbolic link, regardless of target.
    Symlink,
}

impl EntryKind {
    /// Reports whether the entry is a directory on the non-following view.
    #[must_use]
    pub const fn is_dir(self) -> bool {
        matches!(self, Self::Dir)
    }
}

/// The entries directly inside one directory at one point in time.
///
/// A snapshot covers exactly one level; recursing into subdirectories is the
/// engine's job. Names are held in lexical order so a pass visits entries
/// deterministically, but no cross-run ordering is promised to callers.
#[derive(Debug, Default)]
pub struct DirectorySnapshot {
    path: PathBuf,
    entries: BTreeMap<OsString, EntryKind>,
}

impl DirectorySnapshot {
    /// Lists `dir` (one level, no recursion) and classifies each entry.
    ///
    /// # Errors
    ///
    /// Returns [`FlistError`] when the directory cannot be opened, an entry
    /// cannot be retrieved during iteration, or an entry's type indicator
    /// cannot be queried.
    pub fn capture(dir: &Path) -> Result<Self, FlistError> {
        let mut entries = BTreeMap::new();
        let read_dir =
            fs::read_dir(dir).map_err(|error| FlistError::read_dir(dir.to_path_buf(), error))?;
        for entry in read_dir {
            let entry =
                entry.map_err(|error| FlistError::read_dir_entry(dir.to_path_buf(), error))?;
            let file_type = entry
                .file_type()
                .map_err(|error| FlistError::file_type(dir.join(entry.file_name()), error))?;
            let kind = if file_type.is_dir() {
                EntryKind::Dir
            } else if file_type.is_symlink() {
                EntryKind::Symlink
            } else {
                EntryKind::File
            };
            entries.insert(entry.file_name(), kind);
        }

        Ok(Self {
            path: dir.to_path_buf(),
            entries,
        })
    }

    /// Returns the directory this snapshot was captured from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the kind recorded for `name`, if the entry was present.
    #[must_use]
    pub fn kind(&self, name: &OsStr) -> Option<EntryKind> {
        self.entries.get(name).copied()
    }

    /// Reports whether an entry named `name` was present.
    #[must_use]
    pub fn contains(&self, name: &OsStr) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterates over `(name, kind)` pairs in lexical name order.
    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, EntryKind)> {
        self.entries
            .iter()
            .map(|(name, kind)| (name.as_os_str(), *kind))
    }

    /// Iterates over entry names in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &OsStr> {
        self.entries.keys().map(OsString::as_os_str)
    }

    /// Number of entries in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether the directory was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
