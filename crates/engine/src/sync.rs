use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use filetime::FileTime;
use flist::{DirectorySnapshot, EntryKind, diff};
use logging::{EventLog, OpKind, SyncEvent};

use crate::error::{IoResultExt, SyncResult};
use crate::session::{SyncSession, SyncStats};

/// Runs one complete synchronization pass.
///
/// After a successful pass the replica's directory and file name structure is
/// set-equal to the source's at every level and copied files hold the source
/// content and modification time. Re-running immediately on an unchanged tree
/// performs zero mutations (every directory is still revisited, which is what
/// makes the pass idempotent rather than incremental).
///
/// Files present under the same name on both sides are not compared and not
/// touched; see the crate documentation for this deliberate policy.
///
/// # Errors
///
/// Returns [`crate::SyncError`] when the top-level source directory cannot be
/// listed or the replica root can neither be found nor created. Failures on
/// individual entries or deeper subtrees are recorded as error-outcome events
/// and do not abort the pass.
pub fn sync_once(source: &Path, replica: &Path, log: &EventLog) -> SyncResult<SyncStats> {
    let mut session = SyncSession::new(source, replica);
    let mut stack: Vec<(PathBuf, PathBuf)> = vec![(source.to_path_buf(), replica.to_path_buf())];
    let mut at_root = true;

    while let Some((source_dir, replica_dir)) = stack.pop() {
        match sync_level(&source_dir, &replica_dir, &mut stack, &mut session, log) {
            Ok(()) => {}
            Err(error) if at_root => return Err(error),
            Err(error) => {
                // One unreadable subtree must not stop its siblings.
                tracing::warn!(%error, subtree = %source_dir.display(), "skipping subtree");
                log.banner(&format!("skipping subtree: {error}"));
                session.stats.errors += 1;
            }
        }
        at_root = false;
    }

    Ok(session.stats)
}

/// Synchronizes one directory pair and queues matched subdirectories.
fn sync_level(
    source_dir: &Path,
    replica_dir: &Path,
    stack: &mut Vec<(PathBuf, PathBuf)>,
    session: &mut SyncSession,
    log: &EventLog,
) -> SyncResult<()> {
    // The existence check must precede snapshot capture: a replica directory
    // presumed from a prior pass that was deleted externally is recreated
    // here, not reported as an error.
    if !replica_dir.exists() {
        fs::create_dir_all(replica_dir).with_path(replica_dir)?;
        log.record(&SyncEvent::new(
            OpKind::ReplicaRootRecreated,
            None,
            replica_dir,
        ));
        session.stats.roots_recreated += 1;
    }

    let source_listing = DirectorySnapshot::capture(source_dir)?;
    let replica_listing = DirectorySnapshot::capture(replica_dir)?;
    let outcome = diff(&source_listing, &replica_listing);

    // Diagnostic only: reaches the console subscriber, never the durable log.
    tracing::debug!(
        directory = %source_dir.display(),
        source = ?source_listing.names().collect::<Vec<_>>(),
        replica = ?replica_listing.names().collect::<Vec<_>>(),
        to_create = ?outcome.to_create,
        to_remove = ?outcome.to_remove,
        common = ?outcome.common,
        "computed level diff"
    );

    for (name, kind) in source_listing.iter() {
        let source_path = source_dir.join(name);
        let replica_path = replica_dir.join(name);
        let creating = outcome.to_create.contains(name);

        match resolve_source_kind(kind, &source_path) {
            ResolvedKind::Dir => {
                if creating {
                    match fs::create_dir(&replica_path) {
                        Ok(()) => {
                            log.record(&SyncEvent::new(
                                OpKind::CreateDir,
                                Some(&source_path),
                                &replica_path,
                            ));
                            session.stats.dirs_created += 1;
                        }
                        Err(error) => {
                            log.record(&SyncEvent::failed(
                                OpKind::CreateDir,
                                Some(&source_path),
                                &replica_path,
                                &error,
                            ));
                            session.stats.errors += 1;
                            // Without the directory there is nothing to
                            // descend into.
                            continue;
                        }
                    }
                }
                stack.push((source_path, replica_path));
            }
            ResolvedKind::File => {
                if creating {
                    copy_file(&source_path, &replica_path, session, log);
                }
            }
            ResolvedKind::Unresolvable(error) => {
                if creating {
                    log.record(&SyncEvent::failed(
                        OpKind::CopyFile,
                        Some(&source_path),
                        &replica_path,
                        &error,
                    ));
                    session.stats.errors += 1;
                }
                // An unresolvable name in `common` has nothing to mirror;
                // the replica side is left alone.
            }
        }
    }

    for name in &outcome.to_remove {
        remove_entry(name, replica_dir, &replica_listing, session, log);
    }

    Ok(())
}

/// Source-side dispatch type after symlink resolution.
enum ResolvedKind {
    Dir,
    File,
    /// A symlink whose target cannot be inspected (typically dangling).
    Unresolvable(io::Error),
}

/// Resolves the snapshot kind of a source entry to a dispatch type.
///
/// Symbolic links are dereferenced: the link's target decides whether the
/// entry is mirrored as a directory or a file.
fn resolve_source_kind(kind: EntryKind, source_path: &Path) -> ResolvedKind {
    match kind {
        EntryKind::Dir => ResolvedKind::Dir,
        EntryKind::File => ResolvedKind::File,
        EntryKind::Symlink => match fs::metadata(source_path) {
            Ok(metadata) if metadata.is_dir() => ResolvedKind::Dir,
            Ok(_) => ResolvedKind::File,
            Err(error) => ResolvedKind::Unresolvable(error),
        },
    }
}

/// Copies one file's content and modification time into the replica.
fn copy_file(source_path: &Path, replica_path: &Path, session: &mut SyncSession, log: &EventLog) {
    let result = fs::copy(source_path, replica_path)
        .and_then(|_| copy_modification_time(source_path, replica_path));
    match result {
        Ok(()) => {
            log.record(&SyncEvent::new(
                OpKind::CopyFile,
                Some(source_path),
                replica_path,
            ));
            session.stats.files_copied += 1;
        }
        Err(error) => {
            log.record(&SyncEvent::failed(
                OpKind::CopyFile,
                Some(source_path),
                replica_path,
                &error,
            ));
            session.stats.errors += 1;
        }
    }
}

/// Carries the source file's mtime onto the freshly copied replica file.
fn copy_modification_time(source_path: &Path, replica_path: &Path) -> io::Result<()> {
    let metadata = fs::metadata(source_path)?;
    filetime::set_file_mtime(replica_path, FileTime::from_last_modification_time(&metadata))
}

/// Removes one replica entry that no longer exists in the source.
///
/// Directories are removed as whole subtrees with a single `delete-dir`
/// event for the subtree root; files and symlinks alike are removed with
/// `delete-file`.
fn remove_entry(
    name: &OsStr,
    replica_dir: &Path,
    replica_listing: &DirectorySnapshot,
    session: &mut SyncSession,
    log: &EventLog,
) {
    let replica_path = replica_dir.join(name);
    match replica_listing.kind(name) {
        Some(EntryKind::Dir) => match fs::remove_dir_all(&replica_path) {
            Ok(()) => {
                log.record(&SyncEvent::new(OpKind::DeleteDir, None, &replica_path));
                session.stats.dirs_deleted += 1;
            }
            Err(error) => {
                log.record(&SyncEvent::failed(
                    OpKind::DeleteDir,
                    None,
                    &replica_path,
                    &error,
                ));
                session.stats.errors += 1;
            }
        },
        Some(EntryKind::File | EntryKind::Symlink) => match fs::remove_file(&replica_path) {
            Ok(()) => {
                log.record(&SyncEvent::new(OpKind::DeleteFile, None, &replica_path));
                session.stats.files_deleted += 1;
            }
            Err(error) => {
                log.record(&SyncEvent::failed(
                    OpKind::DeleteFile,
                    None,
                    &replica_path,
                    &error,
                ));
                session.stats.errors += 1;
            }
        },
        // `name` came out of the replica snapshot's own diff, so it is
        // always present in the listing.
        None => {}
    }
}
