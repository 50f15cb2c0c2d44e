use std::process::Command;

fn binary_output(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_oc-mirror"))
        .args(args)
        .output()
        .unwrap_or_else(|error| panic!("failed to run oc-mirror: {error}"))
}

#[test]
fn help_lists_usage() {
    let output = binary_output(&["--help"]);
    assert!(output.status.success(), "--help should succeed");
    assert!(
        output.stderr.is_empty(),
        "help output should not write to stderr"
    );
    let stdout = String::from_utf8(output.stdout).expect("stdout is UTF-8");
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("SOURCE"));
    assert!(stdout.contains("REPLICA"));
    assert!(stdout.contains("INTERVAL_SECONDS"));
    assert!(stdout.contains("LOG_FILE"));
}

#[test]
fn missing_operands_fail_before_any_synchronization() {
    let output = binary_output(&[]);
    assert!(
        !output.status.success(),
        "running without operands should fail"
    );
    let stderr = String::from_utf8(output.stderr).expect("stderr is UTF-8");
    assert!(stderr.contains("SOURCE"));
}

#[test]
fn zero_interval_is_rejected() {
    let temp = tempfile::tempdir().expect("tempdir");
    let source = temp.path().join("source");
    std::fs::create_dir(&source).expect("create source");

    let output = binary_output(&[
        source.to_str().expect("utf-8 path"),
        temp.path().join("replica").to_str().expect("utf-8 path"),
        "0",
        temp.path().join("mirror.log").to_str().expect("utf-8 path"),
    ]);
    assert!(!output.status.success(), "a zero interval should be rejected");
}

#[test]
fn missing_source_is_rejected() {
    let temp = tempfile::tempdir().expect("tempdir");

    let output = binary_output(&[
        temp.path().join("no-such-dir").to_str().expect("utf-8 path"),
        temp.path().join("replica").to_str().expect("utf-8 path"),
        "1",
        temp.path().join("mirror.log").to_str().expect("utf-8 path"),
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).expect("stderr is UTF-8");
    assert!(stderr.contains("not an accessible directory"));
    assert!(
        !temp.path().join("replica").exists(),
        "rejection must precede any filesystem mutation"
    );
}
