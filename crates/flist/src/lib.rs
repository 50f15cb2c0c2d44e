#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `flist` captures single-level directory listings and computes the set
//! difference between a source listing and a replica listing. It is the pure
//! half of the mirror pipeline: the crate performs no mutation, and the diff
//! itself performs no I/O at all.
//!
//! # Design
//!
//! - [`DirectorySnapshot`] records the entries directly inside one directory
//!   at one instant, each classified by the filesystem's own type indicator
//!   ([`EntryKind`]), never by name. Snapshots are captured fresh for every
//!   pass and never cached.
//! - [`diff`] takes a source and a replica snapshot and produces a
//!   [`DiffOutcome`]: the names to create in the replica, the names to remove
//!   from it, and the names present on both sides.
//! - [`FlistError`] describes listing failures and always carries the
//!   offending path so higher layers can surface actionable diagnostics.
//!
//! # Invariants
//!
//! - Entry names within one snapshot are unique (filesystem guarantee).
//! - `to_create`, `to_remove`, and `common` are pairwise disjoint and their
//!   union equals the union of both snapshots' name sets.
//! - Snapshots store names in lexical order for reproducible traversal, but
//!   callers must not depend on ordering between runs.
//!
//! # Errors
//!
//! Capturing a snapshot emits [`FlistError`] when the directory cannot be
//! read. The original [`std::io::Error`] is reachable through
//! [`std::error::Error::source`].
//!
//! # Examples
//!
//! ```
//! use flist::{DirectorySnapshot, diff};
//! use std::fs;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let source = temp.path().join("source");
//! let replica = temp.path().join("replica");
//! fs::create_dir_all(&source)?;
//! fs::create_dir_all(&replica)?;
//! fs::write(source.join("a.txt"), b"hi")?;
//! fs::write(replica.join("c.txt"), b"old")?;
//!
//! let outcome = diff(
//!     &DirectorySnapshot::capture(&source)?,
//!     &DirectorySnapshot::capture(&replica)?,
//! );
//! assert!(outcome.to_create.contains(std::ffi::OsStr::new("a.txt")));
//! assert!(outcome.to_remove.contains(std::ffi::OsStr::new("c.txt")));
//! assert!(outcome.common.is_empty());
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod diff;
mod error;
mod snapshot;

pub use diff::{DiffOutcome, diff};
pub use error::{FlistError, FlistErrorKind};
pub use snapshot::{DirectorySnapshot, EntryKind};

#[cfg(test)]
mod tests;
