use crate::snapshot::DirectorySnapshot;
use std::collections::BTreeSet;
use std::ffi::OsString;

/// Result of comparing one source/replica directory pair.
///
/// The three sets are pairwise disjoint and their union equals the union
/// of both snapshots' name sets.
#[derive(Debug, Default, Eq, PartialEq)]
pub struct DiffOutcome {
    /// Names present in the source but absent from the replica.
    pub to_create: BTreeSet<OsString>,
    /// Names present in the replica but absent from the source.
    pub to_remove: BTreeSet<OsString>,
    /// Names present on both sides.
    pub common: BTreeSet<OsString>,
}

impl DiffOutcome {
    /// Reports whether the two listings already agree on names.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.to_create.is_empty() && self.to_remove.is_empty()
    }
}

/// Computes the set difference between a source and a replica listing.
///
/// Pure set algebra over entry names: `to_create = source − replica`,
/// `to_remove = replica − source`, `common = source ∩ replica`. Entry kinds
/// play no part here; the engine re-reads the kind from the snapshot when it
/// dispatches each name.
#[must_use]
pub fn diff(source: &DirectorySnapshot, replica: &DirectorySnapshot) -> DiffOutcome {
    let mut outcome = DiffOutcome::default();
    for name in source.names() {
        if replica.contains(name) {
            outcome.common.insert(name.to_os_string());
        } else {
            outcome.to_create.insert(name.to_os_string());
        }
    }
    for name in replica.names() {
        if !source.contains(name) {
            outcome.to_remove.insert(name.to_os_string());
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;
    use std::fs;
    use std::path::Path;

    fn snapshot_of(dir: &Path, files: &[&str]) -> DirectorySnapshot {
        for name in files {
            fs::write(dir.join(name), b"x").expect("write file");
        }
        DirectorySnapshot::capture(dir).expect("capture")
    }

    fn names(set: &BTreeSet<OsString>) -> Vec<&OsStr> {
        set.iter().map(OsString::as_os_str).collect()
    }

    #[test]
    fn diff_splits_names_into_three_sets() {
        let temp = tempfile::tempdir().expect("create tempdir");
        let source_dir = temp.path().join("source");
        let replica_dir = temp.path().join("replica");
        fs::create_dir(&source_dir).expect("create dir");
        fs::create_dir(&replica_dir).expect("create dir");

        let source = snapshot_of(&source_dir, &["a", "b", "shared"]);
        let replica = snapshot_of(&replica_dir, &["shared", "stale"]);

        let outcome = diff(&source, &replica);
        assert_eq!(names(&outcome.to_create), ["a", "b"]);
        assert_eq!(names(&outcome.to_remove), ["stale"]);
        assert_eq!(names(&outcome.common), ["shared"]);
    }

    #[test]
    fn diff_sets_are_disjoint_and_cover_the_union() {
        let temp = tempfile::tempdir().expect("create tempdir");
        let source_dir = temp.path().join("source");
        let replica_dir = temp.path().join("replica");
        fs::create_dir(&source_dir).expect("create dir");
        fs::create_dir(&replica_dir).expect("create dir");

        let source = snapshot_of(&source_dir, &["one", "two", "both"]);
        let replica = snapshot_of(&replica_dir, &["both", "three"]);
        let outcome = diff(&source, &replica);

        let mut union: BTreeSet<OsString> = BTreeSet::new();
        union.extend(source.names().map(OsStr::to_os_string));
        union.extend(replica.names().map(OsStr::to_os_string));

        let mut rebuilt: BTreeSet<OsString> = BTreeSet::new();
        rebuilt.extend(outcome.to_create.iter().cloned());
        rebuilt.extend(outcome.to_remove.iter().cloned());
        rebuilt.extend(outcome.common.iter().cloned());
        assert_eq!(rebuilt, union);

        assert!(outcome.to_create.is_disjoint(&outcome.to_remove));
        assert!(outcome.to_create.is_disjoint(&outcome.common));
        assert!(outcome.to_remove.is_disjoint(&outcome.common));
    }

    #[test]
    fn identical_listings_are_converged() {
        let temp = tempfile::tempdir().expect("create tempdir");
        let source_dir = temp.path().join("source");
        let replica_dir = temp.path().join("replica");
        fs::create_dir(&source_dir).expect("create dir");
        fs::create_dir(&replica_dir).expect("create dir");

        let source = snapshot_of(&source_dir, &["same"]);
        let replica = snapshot_of(&replica_dir, &["same"]);

        let outcome = diff(&source, &replica);
        assert!(outcome.is_converged());
        assert_eq!(names(&outcome.common), ["same"]);
    }

    #[test]
    fn empty_listings_produce_empty_outcome() {
        let temp = tempfile::tempdir().expect("create tempdir");
        let source_dir = temp.path().join("source");
        let replica_dir = temp.path().join("replica");
        fs::create_dir(&source_dir).expect("create dir");
        fs::create_dir(&replica_dir).expect("create dir");

        let outcome = diff(
            &DirectorySnapshot::capture(&source_dir).expect("capture"),
            &DirectorySnapshot::capture(&replica_dir).expect("capture"),
        );
        assert_eq!(outcome, DiffOutcome::default());
        assert!(outcome.is_converged());
    }
}
