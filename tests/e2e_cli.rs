//! CLI end-to-end tests
//!
//! Tests for the trackforged command-line interface.

mod common;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::{Command, Stdio};
use std::time::Duration;
use tempfile::tempdir;

/// Get a command for the trackforged binary
#[allow(deprecated)]
fn trackforged_cmd() -> Command {
    let mut cmd = Command::cargo_bin("trackforged").unwrap();
    cmd.env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_cli_no_args_shows_usage() {
    trackforged_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_flag() {
    trackforged_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--parallel"))
        .stdout(predicate::str::contains("--quality"))
        .stdout(predicate::str::contains("--output"));
}

#[test]
fn test_cli_version_flag() {
    trackforged_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("trackforged"));
}

#[test]
fn test_cli_rejects_quality_out_of_range() {
    let input = tempdir().unwrap();
    trackforged_cmd()
        .arg(input.path())
        .args(["-q", "10"])
        .assert()
        .failure();
}

#[test]
fn test_cli_missing_encoder() {
    let input = tempdir().unwrap();
    trackforged_cmd()
        .arg(input.path())
        .args(["--encoder", "nonexistent_encoder_12345"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Please install nonexistent_encoder_12345 first",
        ));
}

#[cfg(unix)]
#[test]
fn test_cli_nonexistent_input() {
    let encoder = common::FakeEncoder::new("0");
    trackforged_cmd()
        .arg("/nonexistent/path/music")
        .arg("--encoder")
        .arg(encoder.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[cfg(unix)]
#[test]
fn test_cli_input_is_file() {
    let encoder = common::FakeEncoder::new("0");
    let dir = tempdir().unwrap();
    let file = dir.path().join("track.flac");
    fs::write(&file, b"").unwrap();

    trackforged_cmd()
        .arg(&file)
        .arg("--encoder")
        .arg(encoder.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid directory"));
}

#[cfg(unix)]
#[test]
fn test_cli_creates_missing_output() {
    let encoder = common::FakeEncoder::new("0");
    let tree = common::Tree::new(&["disc1/track1.flac"]);
    let output = tree.output.join("new/library");

    trackforged_cmd()
        .arg(&tree.input)
        .arg("-o")
        .arg(&output)
        .arg("--encoder")
        .arg(encoder.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Trying to create"))
        .stdout(predicate::str::contains("Created"));

    assert!(output.join("disc1/track1.mp3").exists());
}

#[cfg(unix)]
#[test]
fn test_cli_parallel_run() {
    let encoder = common::FakeEncoder::new("0");
    let tree = common::Tree::new(&[
        "disc1/track1.flac",
        "disc1/track2.flac",
        "disc2/track1.flac",
        "disc2/booklet.pdf",
    ]);

    trackforged_cmd()
        .arg(&tree.input)
        .arg("-o")
        .arg(&tree.output)
        .args(["-j", "2", "-q", "0"])
        .arg("--encoder")
        .arg(encoder.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Running Command:"))
        .stdout(predicate::str::contains("-qscale:a 0"))
        .stdout(predicate::str::contains(
            "3 discovered, 3 encoded, 0 skipped, 0 failed, 0 non-zero exits",
        ));

    assert_eq!(tree.output_files().len(), 3);

    // Nothing left to do on a second run.
    trackforged_cmd()
        .arg(&tree.input)
        .arg("-o")
        .arg(&tree.output)
        .args(["-j", "2"])
        .arg("--encoder")
        .arg(encoder.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Running Command:").not())
        .stdout(predicate::str::contains("3 skipped"));
    assert_eq!(encoder.invocations().len(), 3);
}

#[cfg(unix)]
#[test]
fn test_cli_failing_encoder_still_succeeds() {
    let encoder = common::FakeEncoder::with_exit("0", 2);
    let tree = common::Tree::new(&["track.flac"]);

    trackforged_cmd()
        .arg(&tree.input)
        .arg("-o")
        .arg(&tree.output)
        .arg("--encoder")
        .arg(encoder.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 non-zero exits"));
}

#[cfg(unix)]
#[test]
fn test_cli_config_file() {
    let encoder = common::FakeEncoder::new("0");
    let tree = common::Tree::new(&["song.wav", "song.flac"]);
    let config_dir = tempdir().unwrap();
    let config = config_dir.path().join("trackforged.toml");
    fs::write(
        &config,
        format!(
            r#"
[encode]
source_extension = "wav"
target_extension = "ogg"
quality = 6

[tools]
encoder_path = "{}"
"#,
            encoder.path().display()
        ),
    )
    .unwrap();

    trackforged_cmd()
        .arg(&tree.input)
        .arg("-o")
        .arg(&tree.output)
        .arg("-c")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("-qscale:a 6"));

    assert_eq!(
        tree.output_files(),
        [std::path::PathBuf::from("song.ogg")]
    );
}

#[cfg(unix)]
#[test]
fn test_cli_encoder_output_hidden_unless_verbose() {
    let encoder = common::FakeEncoder::new("0");
    let tree = common::Tree::new(&["track.flac"]);

    trackforged_cmd()
        .arg(&tree.input)
        .arg("-o")
        .arg(&tree.output)
        .arg("--encoder")
        .arg(encoder.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Running Command:"))
        .stdout(predicate::str::contains(common::ENCODER_STDOUT).not())
        .stderr(predicate::str::contains(common::ENCODER_STDERR).not());

    fs::remove_file(tree.output.join("track.mp3")).unwrap();

    trackforged_cmd()
        .arg(&tree.input)
        .arg("-o")
        .arg(&tree.output)
        .arg("-v")
        .arg("--encoder")
        .arg(encoder.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(common::ENCODER_STDOUT))
        .stderr(predicate::str::contains(common::ENCODER_STDERR));
}

#[cfg(unix)]
#[test]
fn test_cli_interrupt_exits_zero() {
    let encoder = common::FakeEncoder::new("3");
    let tree = common::Tree::new(&["a.flac", "b.flac", "c.flac", "d.flac"]);

    let child = trackforged_cmd()
        .arg(&tree.input)
        .arg("-o")
        .arg(&tree.output)
        .args(["-j", "2"])
        .arg("--encoder")
        .arg(encoder.path())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    // Let the first chunk start.
    std::thread::sleep(Duration::from_millis(800));
    let killed = Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(killed.success());

    let output = child.wait_with_output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("Running Command:"));
    assert!(stdout.contains("Keyboard Interruption!"));
    // The second chunk never started.
    assert!(!stdout.contains("c.flac"));
}
