// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end tests for the `pictool` binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use image::{Rgba, RgbaImage};
use tempfile::TempDir;

fn pictool(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pictool"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn pictool")
}

fn arg(path: &Path) -> &str {
    path.to_str().expect("utf-8 temp path")
}

/// Writes a 6x4 gradient PNG and returns its path.
fn write_input(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("in.png");
    RgbaImage::from_fn(6, 4, |x, y| Rgba([(x * 40) as u8, (y * 60) as u8, 90, 255]))
        .save(&path)
        .unwrap();
    path
}

fn read(path: &Path) -> RgbaImage {
    image::open(path).unwrap().into_rgba8()
}

#[test]
fn blur_writes_same_sized_output() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);
    let output = dir.path().join("out.png");

    let result = pictool(&["blur", "--radius=1", arg(&input), arg(&output)]);
    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));
    assert_eq!(read(&output).dimensions(), (6, 4));
}

#[test]
fn rotate_and_transpose_swap_dimensions() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);

    for (filter, extra) in [("rotate", None), ("rotate", Some("--right")), ("transpose", None)] {
        let output = dir.path().join(format!("{filter}.png"));
        let mut args = vec![filter];
        args.extend(extra);
        args.extend([arg(&input), arg(&output)]);

        let result = pictool(&args);
        assert!(result.status.success(), "{filter} {extra:?} failed");
        assert_eq!(read(&output).dimensions(), (4, 6));
    }
}

#[test]
fn flip_twice_restores_input() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);
    let once = dir.path().join("once.png");
    let twice = dir.path().join("twice.png");

    assert!(pictool(&["flip", arg(&input), arg(&once)]).status.success());
    assert!(pictool(&["flip", arg(&once), arg(&twice)]).status.success());
    assert_ne!(read(&once), read(&input));
    assert_eq!(read(&twice), read(&input));
}

#[test]
fn unknown_filter_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);
    let output = dir.path().join("out.png");

    let result = pictool(&["sharpen", arg(&input), arg(&output)]);
    assert_eq!(result.status.code(), Some(2));
    assert!(!output.exists());
}

#[test]
fn invalid_parameter_fails_without_writing() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);
    let output = dir.path().join("out.png");

    let result = pictool(&["pixellate", "--step=0", arg(&input), arg(&output)]);
    assert_eq!(result.status.code(), Some(1));
    assert!(!output.exists());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("error:"), "{stderr}");
}

#[test]
fn corrupt_input_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.png");
    std::fs::write(&input, b"definitely not a png").unwrap();
    let output = dir.path().join("out.png");

    let result = pictool(&["mono", arg(&input), arg(&output)]);
    assert_eq!(result.status.code(), Some(1));
    assert!(!output.exists());
}

#[test]
fn missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("absent.png");

    let result = pictool(&["dered", arg(&input)]);
    assert_eq!(result.status.code(), Some(1));
}

#[test]
fn display_prints_pixels_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);

    let result = pictool(&["display", arg(&input)]);
    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("RGB(0, 0, 90, 255)"), "{stdout}");
    assert_eq!(stdout.matches("RGB(").count(), 24);
}

#[test]
fn config_file_supplies_parameter_defaults() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);
    let config = dir.path().join("pictool.json");
    std::fs::write(&config, r#"{"filters": {"brighten": {"factor": 0}}}"#).unwrap();
    let output = dir.path().join("out.png");

    let result = pictool(&["--config", arg(&config), "brighten", arg(&input), arg(&output)]);
    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));
    assert!(read(&output).pixels().all(|p| p.0 == [0, 0, 0, 255]));
}

#[test]
fn command_line_beats_config_file() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);
    let config = dir.path().join("pictool.json");
    std::fs::write(&config, r#"{"filters": {"brighten": {"factor": 0}}}"#).unwrap();
    let output = dir.path().join("out.png");

    let result = pictool(&[
        "--config",
        arg(&config),
        "brighten",
        "--factor=1",
        arg(&input),
        arg(&output),
    ]);
    assert!(result.status.success());
    assert_eq!(read(&output), read(&input));
}

#[test]
fn malformed_config_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);
    let config = dir.path().join("pictool.json");
    std::fs::write(&config, "{ not json").unwrap();

    let result = pictool(&["--config", arg(&config), "dered", arg(&input)]);
    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("pictool failed"), "error was not logged: {stderr}");
    assert!(stderr.contains("hint:"), "{stderr}");
    assert!(!stderr.contains("detail:"), "{stderr}");
}

#[test]
fn seeded_scramble_is_reproducible() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);
    let first = dir.path().join("a.png");
    let second = dir.path().join("b.png");

    for output in [&first, &second] {
        let result = pictool(&["scramble", "--seed=5", "--amount=10", arg(&input), arg(output)]);
        assert!(result.status.success());
    }
    assert_eq!(read(&first), read(&second));
    assert_ne!(read(&first), read(&input));
}

#[test]
fn unchanged_result_is_still_written_when_output_given() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);

    for (filter, extra) in [("display", None), ("blur", Some("--radius=0"))] {
        let output = dir.path().join(format!("{filter}-copy.png"));
        let mut args = vec![filter];
        args.extend(extra);
        args.extend([arg(&input), arg(&output)]);

        let result = pictool(&args);
        assert!(result.status.success(), "{filter} failed");
        assert_eq!(read(&output), read(&input), "{filter}");
    }
}
