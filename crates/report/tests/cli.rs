#![allow(deprecated)] // Command::cargo_bin is deprecated but still functional

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn write_input(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("data.txt");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn reports_the_morning_peak() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "07:00:00 1 12\n07:00:00 2 40\n08:00:00 1 5\n");

    let expected = "Top 5 congested traffic lights for timestamp 07:00:00:\n\
                    Light ID: 2, Number of Cars: 40\n\
                    Light ID: 1, Number of Cars: 12\n\
                    \n\
                    Top 5 congested traffic lights for timestamp 08:00:00:\n\
                    Light ID: 1, Number of Cars: 5\n\
                    \n";

    Command::cargo_bin("congestion_report")
        .unwrap()
        .arg("--input")
        .arg(&input)
        .args(["--workers", "2"])
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn hour_without_data_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "07:00:00 1 12\n07:00:00 2 40\n08:00:00 1 5\n");

    Command::cargo_bin("congestion_report")
        .unwrap()
        .arg("-i")
        .arg(&input)
        .args(["--start-hour", "9", "--end-hour", "10"])
        .assert()
        .success()
        .stdout("No data available for timestamp 09:00:00\n");
}

#[test]
fn malformed_line_fails_without_partial_output() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "07:00:00 1 12\n07:00:00 2 40\n08:00:00 one 5\n");

    Command::cargo_bin("congestion_report")
        .unwrap()
        .arg("-i")
        .arg(&input)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("line 3"));
}

#[test]
fn missing_file_fails() {
    let dir = TempDir::new().unwrap();

    Command::cargo_bin("congestion_report")
        .unwrap()
        .arg("-i")
        .arg(dir.path().join("nope.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.txt"));
}

#[test]
fn json_format_and_metrics() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "07:00:00 1 12\n07:00:00 2 40\n");

    Command::cargo_bin("congestion_report")
        .unwrap()
        .arg("-i")
        .arg(&input)
        .args(["--format", "json", "--metrics", "-k", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"{"timestamp":"07:00:00","status":"ranked","signals":[{"signal_id":2,"car_count":40}]}"#,
        ))
        .stdout(predicate::str::contains(r#""status":"no_data""#))
        .stderr(predicate::str::contains(r#""records_loaded":2"#));
}
