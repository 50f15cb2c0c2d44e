#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `engine` turns a replica directory tree into an exact mirror of a source
//! tree, one level at a time. [`sync_once`] performs a single full pass:
//! it compares each source/replica directory pair via the `flist` diff,
//! creates missing directories, copies missing files (content plus
//! modification time), removes entries that no longer exist in the source,
//! and emits one [`logging::SyncEvent`] per mutation. [`run_forever`] wraps
//! the pass in the daemon loop: one pass immediately, then one per interval,
//! with an interruptible sleep so shutdown never waits out a full interval.
//!
//! # Design
//!
//! - Traversal uses an explicit work stack of directory pairs rather than
//!   native recursion, so tree depth never threatens the call stack. All
//!   creations at a level are applied before any pushed subdirectory pair is
//!   processed.
//! - Files present under the same name on both sides are left untouched.
//!   There is no content, size, or mtime comparison; renaming or recreating
//!   the source file is what propagates an in-place edit.
//! - Source-side symbolic links are dereferenced: a link to a file is copied
//!   as a regular file, a link to a directory is traversed as a directory,
//!   and a dangling link is recorded as a failed copy. Replica-side links
//!   are removed like any other non-directory entry.
//!
//! # Invariants
//!
//! - Exactly one pass is in flight at any time; a pass that outlasts the
//!   interval delays the next one instead of overlapping it.
//! - A per-entry failure is recorded as an error-outcome event and never
//!   aborts sibling entries or other subtrees. Only a failure to list the
//!   top-level source directory aborts a pass, and [`run_forever`] survives
//!   even that.
//! - Nothing persists between passes except the filesystem trees themselves.

mod driver;
mod error;
mod session;
mod sync;

pub use driver::run_forever;
pub use error::{SyncError, SyncResult};
pub use session::{SyncSession, SyncStats};
pub use sync::sync_once;
