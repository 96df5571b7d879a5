//! End-to-end tests for `jar-guardian validate`

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::fixtures;

fn get_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_jar-guardian"))
}

#[test]
fn test_validate_obfuscated_jar_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    let jar = fixtures::write_jar(temp_dir.path(), "app.jar", &fixtures::obfuscated_jar_bytes());

    let mut cmd = get_bin();
    cmd.arg("validate")
        .arg(&jar)
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation passed"));
}

#[test]
fn test_validate_non_jar_fails_with_file_analysis_result() {
    let temp_dir = TempDir::new().unwrap();
    let file = fixtures::write_jar(temp_dir.path(), "archive.zip", b"not a jar");

    let mut cmd = get_bin();
    cmd.arg("validate")
        .arg(&file)
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "The file does not have the .jar extension",
        ));
}

#[test]
fn test_validate_empty_jar_fails() {
    let temp_dir = TempDir::new().unwrap();
    let file = fixtures::write_jar(temp_dir.path(), "empty.jar", b"");

    let mut cmd = get_bin();
    cmd.arg("validate")
        .arg(&file)
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("The file is empty"));
}

#[test]
fn test_validate_missing_file_exits_with_noinput_code() {
    let temp_dir = TempDir::new().unwrap();

    let mut cmd = get_bin();
    cmd.arg("validate")
        .arg("ghost.jar")
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .code(66);
}

#[test]
fn test_validate_json_output_is_parseable() {
    let temp_dir = TempDir::new().unwrap();
    let jar = fixtures::write_jar(temp_dir.path(), "app.jar", &fixtures::obfuscated_jar_bytes());

    let output = get_bin()
        .arg("validate")
        .arg(&jar)
        .arg("--json")
        .current_dir(temp_dir.path())
        .output()
        .expect("Command execution failed");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("stdout not UTF-8");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("JSON output should be valid JSON");

    let outcomes = parsed.as_array().expect("one outcome entry per file");
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0]["file_name"], "app.jar");
    assert_eq!(outcomes[0]["results"][0]["id"], "file-analysis");
    assert_eq!(outcomes[0]["results"][0]["status"], "success");
}

#[test]
fn test_validate_json_for_rejected_file_has_single_failed_result() {
    let temp_dir = TempDir::new().unwrap();
    let file = fixtures::write_jar(temp_dir.path(), "archive.zip", b"zip bytes");

    let output = get_bin()
        .arg("validate")
        .arg(&file)
        .arg("--json")
        .current_dir(temp_dir.path())
        .output()
        .expect("Command execution failed");

    assert!(!output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("stdout not UTF-8");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");

    let results = parsed[0]["results"].as_array().expect("results array");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"], "file-analysis");
    assert_eq!(results[0]["status"], "failed");
}

#[test]
fn test_validate_writes_report_artifact() {
    let temp_dir = TempDir::new().unwrap();
    let jar = fixtures::write_jar(temp_dir.path(), "app.jar", &fixtures::obfuscated_jar_bytes());
    let out_dir = temp_dir.path().join("artifacts");

    get_bin()
        .arg("validate")
        .arg(&jar)
        .arg("--report")
        .arg("--certificate")
        .arg("--out-dir")
        .arg(&out_dir)
        .current_dir(temp_dir.path())
        .assert()
        .success();

    let report = fs::read_to_string(out_dir.join("validation-report-app.md")).unwrap();
    assert!(report.contains("# JAR Obfuscation Validation Report"));
    assert!(report.contains("app.jar"));

    let certificate = fs::read_to_string(out_dir.join("validation-certificate-app.txt")).unwrap();
    assert!(certificate.contains("CERTIFICATE OF OBFUSCATION VALIDATION"));
    assert!(certificate.contains("CG-"));
}

#[test]
fn test_validate_save_persists_history() {
    let temp_dir = TempDir::new().unwrap();
    let jar = fixtures::write_jar(temp_dir.path(), "app.jar", &fixtures::obfuscated_jar_bytes());

    get_bin()
        .arg("validate")
        .arg(&jar)
        .arg("--save")
        .current_dir(temp_dir.path())
        .assert()
        .success();

    let history = fs::read_to_string(
        temp_dir
            .path()
            .join(".jar-guardian")
            .join("validations.json"),
    )
    .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&history).unwrap();
    assert_eq!(parsed["records"][0]["file_name"], "app.jar");
}

#[test]
fn test_validate_with_mapping_file_verifies_renames() {
    let temp_dir = TempDir::new().unwrap();
    let jar = fixtures::write_jar(temp_dir.path(), "app.jar", &fixtures::obfuscated_jar_bytes());
    let mapping = fixtures::write_mapping(temp_dir.path(), "mapping.txt");

    let output = get_bin()
        .arg("validate")
        .arg(&jar)
        .arg("--mapping")
        .arg(&mapping)
        .arg("--json")
        .current_dir(temp_dir.path())
        .output()
        .expect("Command execution failed");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    let results = parsed[0]["results"].as_array().unwrap();
    let class_check = results
        .iter()
        .find(|r| r["id"] == "class-obfuscation")
        .expect("class check present");
    assert_eq!(class_check["status"], "success");
}

#[test]
fn test_validate_multiple_files_in_one_run() {
    let temp_dir = TempDir::new().unwrap();
    let a = fixtures::write_jar(temp_dir.path(), "a.jar", &fixtures::obfuscated_jar_bytes());
    let b = fixtures::write_jar(temp_dir.path(), "b.jar", &fixtures::obfuscated_jar_bytes());

    let output = get_bin()
        .arg("validate")
        .arg(&a)
        .arg(&b)
        .arg("--json")
        .current_dir(temp_dir.path())
        .output()
        .expect("Command execution failed");

    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_str(&String::from_utf8(output.stdout).unwrap()).unwrap();
    let outcomes = parsed.as_array().unwrap();
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0]["file_name"], "a.jar");
    assert_eq!(outcomes[1]["file_name"], "b.jar");
}
