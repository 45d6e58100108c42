//! Integration tests for the fgortho binary.
//!
//! These tests run the real binary and only exercise paths that finish
//! before any network request: bucket information output, argument
//! validation and the existing-output check.

use std::fs;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Run the fgortho binary and capture output.
fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fgortho"))
        .args(args)
        .output()
        .expect("Failed to execute fgortho")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_info_only_prints_bucket_for_lon_lat() {
    let output = run_cli(&["--lon", "-3.7", "--lat", "40.4", "--info-only"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let stdout = stdout(&output);
    assert!(stdout.contains("Index: 2891929"), "stdout: {}", stdout);
    assert!(stdout.contains("lat 40.375..40.5"), "stdout: {}", stdout);
}

#[test]
fn test_info_only_prints_bucket_for_index() {
    let output = run_cli(&["--index", "2891929", "--info-only"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let stdout = stdout(&output);
    assert!(stdout.contains("lon -3.75..-3.5"), "stdout: {}", stdout);
    assert!(stdout.contains("center (-3.625, 40.4375)"), "stdout: {}", stdout);
}

#[test]
fn test_missing_bucket_input_fails() {
    let output = run_cli(&["--info-only"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output).contains("lon, lat or index"),
        "stderr: {}",
        stderr(&output)
    );
}

#[test]
fn test_invalid_index_fails() {
    let output = run_cli(&["--index", "4294967295", "--info-only"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output).contains("Invalid bucket"),
        "stderr: {}",
        stderr(&output)
    );
}

#[test]
fn test_existing_output_fails_before_any_download() {
    let scenery = TempDir::new().unwrap();
    let cell_dir = scenery.path().join("Orthophotos/w010n40/w003n40");
    fs::create_dir_all(&cell_dir).unwrap();
    let orthophoto = cell_dir.join("2891929.png");
    fs::write(&orthophoto, b"sentinel").unwrap();

    let output = run_cli(&[
        "--lon",
        "-3.7",
        "--lat",
        "40.4",
        "--scenery-folder",
        scenery.path().to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr(&output);
    assert!(stderr.contains("already exists"), "stderr: {}", stderr);
    assert!(stderr.contains("--overwrite"), "stderr: {}", stderr);

    // The sentinel file was not touched.
    assert_eq!(fs::read(&orthophoto).unwrap(), b"sentinel");
}
