//! Smoke tests for the fast-bench binary.

#![allow(missing_docs)]

use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;

#[test]
fn bench_runs_with_small_input() {
    let output = cargo_bin_cmd!("fast-bench")
        .args(["--keys", "2000", "--searches", "400", "--degree", "4", "--seed", "7"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).expect("utf-8 output");
    assert!(stdout.contains("Benchmarks Complete"));
    assert!(stdout.contains("Insert"));
}

#[test]
fn bench_emits_json() {
    let output = cargo_bin_cmd!("fast-bench")
        .args(["--keys", "1000", "--searches", "200", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: Value = serde_json::from_slice(&output).expect("valid json");
    assert_eq!(json["keys"], 1000);
    assert_eq!(json["results"].as_array().map(|r| r.len()), Some(3));
    assert_eq!(json["stats"]["inserts"], 1000);
    assert!(json["height"].is_number());
}

#[test]
fn bench_rejects_degenerate_degree() {
    cargo_bin_cmd!("fast-bench")
        .args(["--keys", "10", "--degree", "1"])
        .assert()
        .failure();
}
