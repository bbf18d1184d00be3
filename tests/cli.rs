use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_text_output_for_global_trace() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("input.js");
    fs::write(&script, "console.log(\"hi\");\n").unwrap();
    let map = dir.path().join("map.json");
    fs::write(&map, r#"{ "console": { "log": { "$call": true } } }"#).unwrap();

    Command::cargo_bin("reftrace")
        .unwrap()
        .arg(&script)
        .arg("--map")
        .arg(&map)
        .arg("--source")
        .arg("script")
        .assert()
        .success()
        .stdout(predicate::str::contains("call\tconsole.log"));
}

#[test]
fn test_json_output_for_commonjs_trace() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("input.js");
    fs::write(&script, "const { foo } = require(\"m\");\n").unwrap();
    let map = dir.path().join("map.json");
    fs::write(&map, r#"{ "m": { "foo": { "$read": { "why": "deprecated" } } } }"#).unwrap();

    let assert = Command::cargo_bin("reftrace")
        .unwrap()
        .arg(&script)
        .arg("--map")
        .arg(&map)
        .arg("--source")
        .arg("script")
        .arg("--strategy")
        .arg("commonjs")
        .arg("--format")
        .arg("json")
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let reports: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let reports = reports.as_array().unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["kind"], "read");
    assert_eq!(reports[0]["path"], serde_json::json!(["m", "foo"]));
    assert_eq!(reports[0]["entry"]["why"], "deprecated");
}

#[test]
fn test_missing_map_file_fails() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("input.js");
    fs::write(&script, "console.log(1);\n").unwrap();

    Command::cargo_bin("reftrace")
        .unwrap()
        .arg(&script)
        .arg("--map")
        .arg(dir.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn test_invalid_trace_map_fails() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("input.js");
    fs::write(&script, "console.log(1);\n").unwrap();
    let map = dir.path().join("map.json");
    fs::write(&map, r#"{ "m": { "$esm": "yes" } }"#).unwrap();

    Command::cargo_bin("reftrace")
        .unwrap()
        .arg(&script)
        .arg("--map")
        .arg(&map)
        .assert()
        .failure()
        .stderr(predicate::str::contains("$esm"));
}
