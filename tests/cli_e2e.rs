//! End-to-end CLI tests for msgtidy.
//!
//! These tests run the actual binary with various arguments and check the
//! output. The export collaborator is substituted through the
//! `MSGTIDY_EXPORTER` environment variable: a missing stub exercises the
//! fatal-exporter path, and (on Unix) a shell-script stub that writes
//! fixture files exercises the full pipeline without a real message
//! database.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn msgtidy() -> Command {
    let mut cmd = Command::cargo_bin("msgtidy").expect("binary builds");
    // Never fall through to a real exporter on the test machine.
    cmd.env("MSGTIDY_EXPORTER", "/nonexistent/imessage-exporter-stub");
    cmd
}

// ============================================================================
// Argument handling
// ============================================================================

#[test]
fn help_exits_zero_and_lists_flags() {
    msgtidy()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--format"))
        .stdout(predicate::str::contains("--copy-method"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--no-rename"));
}

#[test]
fn version_exits_zero() {
    msgtidy().arg("--version").assert().success();
}

#[test]
fn unknown_flag_exits_one() {
    msgtidy().arg("--frobnicate").assert().code(1);
}

#[test]
fn invalid_format_value_exits_one() {
    msgtidy().args(["-f", "pdf"]).assert().code(1);
}

#[test]
fn invalid_copy_method_exits_one() {
    msgtidy().args(["-c", "symlink"]).assert().code(1);
}

#[test]
fn invalid_start_date_exits_one_before_export() {
    msgtidy()
        .args(["-s", "not-a-date"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn invalid_end_date_exits_one_before_export() {
    msgtidy()
        .args(["-e", "2024-13-45"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid date"));
}

// ============================================================================
// Exporter collaborator failures
// ============================================================================

#[test]
fn missing_exporter_is_fatal() {
    let dir = tempdir().unwrap();
    msgtidy()
        .args(["-o", dir.path().to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Export failed"));
}

#[cfg(unix)]
#[test]
fn failing_exporter_is_fatal() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let stub = dir.path().join("exporter-fails.sh");
    std::fs::write(&stub, "#!/bin/sh\necho boom >&2\nexit 3\n").unwrap();
    std::fs::set_permissions(&stub, std::fs::Permissions::from_mode(0o755)).unwrap();

    let mut cmd = Command::cargo_bin("msgtidy").unwrap();
    cmd.env("MSGTIDY_EXPORTER", &stub)
        .args(["-o", dir.path().to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Export failed"));
}

// ============================================================================
// Full pipeline with a stub exporter
// ============================================================================

#[cfg(unix)]
fn stub_exporter(dir: &std::path::Path, export_dir: &std::path::Path) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    // Writes one conversation file into the export directory, the way the
    // real exporter would, and echoes a progress line.
    let script = format!(
        "#!/bin/sh\n\
         mkdir -p '{out}'\n\
         printf 'Nov 28, 2024 11:46:34 AM\\nMe\\nhello\\n\\nNov 29, 2024  2:19:59 PM\\nThem\\nhi\\n' \
         > '{out}/+14155551234.txt'\n\
         echo 'exported 1 conversation'\n",
        out = export_dir.display()
    );
    let stub = dir.join("exporter-stub.sh");
    std::fs::write(&stub, script).unwrap();
    std::fs::set_permissions(&stub, std::fs::Permissions::from_mode(0o755)).unwrap();
    stub
}

#[cfg(unix)]
#[test]
fn pipeline_with_stub_exporter_stamps_timestamps() {
    use chrono::TimeZone;

    let dir = tempdir().unwrap();
    let export_dir = dir.path().join("export");
    let stub = stub_exporter(dir.path(), &export_dir);

    let mut cmd = Command::cargo_bin("msgtidy").unwrap();
    cmd.env("MSGTIDY_EXPORTER", &stub)
        .args(["-o", export_dir.to_str().unwrap(), "--no-rename"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exported 1 conversation"))
        .stdout(predicate::str::contains("Timestamps: 1"));

    // File untouched by renaming, stamped by the date pass.
    let path = export_dir.join("+14155551234.txt");
    assert!(path.exists());

    let meta = std::fs::metadata(&path).unwrap();
    let mtime = filetime::FileTime::from_last_modification_time(&meta);
    let expected = chrono::Local
        .with_ymd_and_hms(2024, 11, 29, 14, 19, 59)
        .unwrap();
    assert_eq!(mtime.unix_seconds(), expected.timestamp());
}

#[cfg(unix)]
#[test]
fn dry_run_reports_without_mutating() {
    use chrono::TimeZone;

    let dir = tempdir().unwrap();
    let export_dir = dir.path().join("export");
    let stub = stub_exporter(dir.path(), &export_dir);

    let mut cmd = Command::cargo_bin("msgtidy").unwrap();
    cmd.env("MSGTIDY_EXPORTER", &stub)
        .args([
            "-o",
            export_dir.to_str().unwrap(),
            "--no-rename",
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("(simulated)"));

    // The stub wrote the file just now; a dry run must not backdate it.
    let meta = std::fs::metadata(export_dir.join("+14155551234.txt")).unwrap();
    let mtime = filetime::FileTime::from_last_modification_time(&meta);
    let backdated = chrono::Local
        .with_ymd_and_hms(2024, 11, 29, 14, 19, 59)
        .unwrap();
    assert_ne!(mtime.unix_seconds(), backdated.timestamp());
}
