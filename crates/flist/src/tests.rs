use super::*;
use std::ffi::OsStr;
use std::fs;

#[test]
fn snapshot_and_diff_cover_a_mixed_level() {
    let temp = tempfile::tempdir().expect("tempdir");
    let source = temp.path().join("source");
    let replica = temp.path().join("replica");
    fs::create_dir(&source).expect("create source");
    fs::create_dir(&replica).expect("create replica");

    fs::write(source.join("a.txt"), b"hi").expect("write a.txt");
    fs::create_dir(source.join("sub")).expect("create sub");
    fs::write(replica.join("c.txt"), b"old").expect("write c.txt");
    fs::create_dir(replica.join("sub")).expect("create replica sub");

    let source_snapshot = DirectorySnapshot::capture(&source).expect("capture source");
    let replica_snapshot = DirectorySnapshot::capture(&replica).expect("capture replica");
    let outcome = diff(&source_snapshot, &replica_snapshot);

    assert!(outcome.to_create.contains(OsStr::new("a.txt")));
    assert!(outcome.to_remove.contains(OsStr::new("c.txt")));
    assert!(outcome.common.contains(OsStr::new("sub")));
    assert_eq!(source_snapshot.kind(OsStr::new("sub")), Some(EntryKind::Dir));
    assert_eq!(
        replica_snapshot.kind(OsStr::new("c.txt")),
        Some(EntryKind::File)
    );
}

#[test]
fn snapshots_are_one_level_deep() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path().join("root");
    fs::create_dir_all(root.join("sub/nested")).expect("create tree");
    fs::write(root.join("sub/nested/deep.txt"), b"deep").expect("write deep");

    let snapshot = DirectorySnapshot::capture(&root).expect("capture");
    let names: Vec<_> = snapshot.names().map(OsStr::to_os_string).collect();
    assert_eq!(names, ["sub"]);
}

#[test]
fn missing_directory_is_a_listing_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let missing = temp.path().join("gone");

    let error = DirectorySnapshot::capture(&missing).expect_err("capture must fail");
    assert!(matches!(error.kind(), FlistErrorKind::ReadDir { .. }));
    assert_eq!(error.path(), missing.as_path());
}
