//! End-to-end tests for the sniff-info binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{fixture_path, request_header, response_header, temp_capture};

/// Command with HOME pointed at an empty directory so no user config leaks in.
fn sniff_info(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sniff-info").expect("binary should be built");
    cmd.env("HOME", home.path()).env("NO_COLOR", "1");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn sort_lists_largest_responses_first() {
    let home = TempDir::new().unwrap();
    let stdout = stdout_of(sniff_info(&home).arg(fixture_path("sample.log")).arg("sort"));

    let sizes: Vec<_> = stdout
        .lines()
        .filter(|line| line.starts_with("Size: "))
        .collect();
    assert_eq!(
        sizes,
        vec![
            "Size: 170 B (in) / 72.34 kB (out)",
            "Size: 90 B (in) / 1.02 kB (out)",
            "Size: 60 B (in) / 310 B (out)",
        ]
    );
    assert!(stdout.contains("Client: 10.0.0.5:51000\nReply: n:101 cursorId: 0\n"));
    assert!(stdout.contains("Query: query: { status: \"open\" }  ntoreturn: 0 ntoskip: 0\n"));
}

#[test]
fn sort_prints_progress_and_unmatched_notices() {
    let home = TempDir::new().unwrap();
    let stdout = stdout_of(sniff_info(&home).arg(fixture_path("sample.log")).arg("sort"));

    assert!(stdout.starts_with("Gathering data\n"));
    assert!(stdout.contains(
        "Match for an input not found (line 18): 10.0.0.8:51003 -->> 10.0.0.1:27017 shop.audit 75 bytes\n"
    ));
    assert!(stdout.contains("Data gathered, analyzing...\n\nCollection: "));
    assert!(!stdout.contains("Collection: shop.audit"));
}

#[test]
fn sort_limit_truncates() {
    let home = TempDir::new().unwrap();
    let stdout = stdout_of(
        sniff_info(&home)
            .arg(fixture_path("sample.log"))
            .arg("sort")
            .args(["--limit", "1", "--quiet"]),
    );

    assert_eq!(stdout.matches("Collection: ").count(), 1);
    assert!(stdout.starts_with("Collection: shop.orders\n"));
}

#[test]
fn aggregate_groups_by_collection() {
    let home = TempDir::new().unwrap();
    let stdout = stdout_of(
        sniff_info(&home)
            .arg(fixture_path("sample.log"))
            .arg("aggregate")
            .arg("-q"),
    );

    assert_eq!(
        stdout,
        "Collection: shop.orders\nOps Count: 2\nSize: 260 B (in) / 73.36 kB (out)\n\n\
         Collection: shop.users\nOps Count: 1\nSize: 60 B (in) / 310 B (out)\n\n"
    );
}

#[test]
fn collection_filter_is_exact() {
    let home = TempDir::new().unwrap();
    sniff_info(&home)
        .arg(fixture_path("sample.log"))
        .args(["aggregate", "--collection", "shop.users", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Collection: shop.users"))
        .stdout(predicate::str::contains("shop.orders").not());
}

#[test]
fn unknown_collection_prints_empty_report() {
    let home = TempDir::new().unwrap();
    for mode in ["sort", "aggregate"] {
        sniff_info(&home)
            .arg(fixture_path("sample.log"))
            .args([mode, "--collection", "shop", "--quiet"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }
}

#[test]
fn json_aggregate_keeps_stdout_machine_readable() {
    let home = TempDir::new().unwrap();
    let output = sniff_info(&home)
        .arg(fixture_path("sample.log"))
        .args(["aggregate", "--format", "json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Match for an input not found"))
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value[0]["collection"], "shop.orders");
    assert_eq!(value[0]["ops_count"], 2);
    assert_eq!(value[0]["total_size_out"], 73360);
    assert_eq!(value.as_array().unwrap().len(), 2);
}

#[test]
fn config_file_sets_defaults() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join(".config").join("sniff-info");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "[report]\nlimit = 2\n").unwrap();

    let stdout = stdout_of(
        sniff_info(&home)
            .arg(fixture_path("sample.log"))
            .args(["sort", "-q"]),
    );
    assert_eq!(stdout.matches("Collection: ").count(), 2);
}

#[test]
fn explicit_config_must_be_valid() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("custom.toml");
    fs::write(&config, "[report]\nlimit = 0\n").unwrap();

    sniff_info(&home)
        .arg(fixture_path("sample.log"))
        .arg("sort")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("report.limit must be > 0"));
}

#[test]
fn malformed_header_fails_the_run() {
    let home = TempDir::new().unwrap();
    let content = format!(
        "{}\n  query\n10.0.0.1:27017 =<<-- 10.0.0.5:51000 10 bytes\n  reply\n",
        request_header("10.0.0.5:51000", "shop.orders", 10)
    );
    let (_dir, path) = temp_capture(&content);

    sniff_info(&home)
        .arg(&path)
        .arg("sort")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed header on line 3"));
}

#[test]
fn invalid_size_fails_the_run() {
    let home = TempDir::new().unwrap();
    sniff_info(&home)
        .arg(fixture_path("bad_size.log"))
        .arg("aggregate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("'many' is not a non-negative integer"));
}

#[test]
fn missing_file_fails_the_run() {
    let home = TempDir::new().unwrap();
    sniff_info(&home)
        .arg(home.path().join("missing.log"))
        .arg("sort")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open capture file"));
}

#[test]
fn unknown_mode_is_rejected() {
    let home = TempDir::new().unwrap();
    sniff_info(&home)
        .arg(fixture_path("sample.log"))
        .arg("count")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'count'"));
}

#[test]
fn scan_strategy_matches_indexed_output() {
    let home = TempDir::new().unwrap();
    let content = format!(
        "{}\n  q\n{}\n  q\n{}\n  reply a\n{}\n  reply b\n",
        request_header("A:1", "shop.orders", 1),
        request_header("A:1", "shop.users", 2),
        response_header("A:1", 3),
        response_header("B:1", 4),
    );
    let (_dir, path) = temp_capture(&content);

    let scan = stdout_of(sniff_info(&home).arg(&path).args(["sort", "--strategy", "scan"]));
    let indexed = stdout_of(sniff_info(&home).arg(&path).args(["sort", "--strategy", "indexed"]));
    assert_eq!(scan, indexed);
}
