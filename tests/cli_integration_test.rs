//! End-to-end runs of the `iosplint` binary over program models on disk.

use assert_cmd::Command;
use iosplint::testkit::sketch::*;
use iosplint::ProgramModel;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_model(dir: &Path) -> PathBuf {
    let file = FileSketch::new("A.cs")
        .method(
            method(
                "Integration",
                [call("Operation1()").user(), expr("x == 42")],
            )
            .at(3, 17),
        )
        .method(method("Operation1", [expr("y + 1")]));
    let model = ProgramModel {
        files: vec![file.to_model()],
    };
    let path = dir.join("model.json");
    fs::write(&path, model.to_json().unwrap()).unwrap();
    path
}

fn iosplint(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("iosplint").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG").env_remove("IOSPLINT_CONFIG");
    cmd
}

#[test]
fn test_check_json_output_to_file() {
    let dir = TempDir::new().unwrap();
    let model = write_model(dir.path());
    let report = dir.path().join("report.json");

    iosplint(dir.path())
        .args(["check", "--format", "json", "--output"])
        .arg(&report)
        .arg(&model)
        .assert()
        .success();

    let json: Value = serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["files_analyzed"], 1);
    assert_eq!(json["methods_analyzed"], 2);
    let diagnostics = json["diagnostics"].as_array().unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0]["method_name"], "Integration");
    assert_eq!(diagnostics[0]["metric"], 2);
    assert_eq!(diagnostics[0]["location"]["span"]["start_line"], 3);
}

#[test]
fn test_check_terminal_output_exits_zero() {
    let dir = TempDir::new().unwrap();
    let model = write_model(dir.path());

    let output = iosplint(dir.path())
        .args(["check", "--plain"])
        .arg(&model)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("A.cs:3:17: warning[CCD0001]"));
    assert!(stdout.contains("- Operation: expression 'x == 42'"));
}

#[test]
fn test_config_min_metric_is_honored() {
    let dir = TempDir::new().unwrap();
    let model = write_model(dir.path());
    fs::write(dir.path().join(".iosplint.toml"), "[rule]\nmin_metric = 5\n").unwrap();

    let output = iosplint(dir.path())
        .args(["check", "-f", "json"])
        .arg(&model)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json["diagnostics"].as_array().unwrap().is_empty());
}

#[test]
fn test_invalid_model_fails() {
    let dir = TempDir::new().unwrap();
    let model = dir.path().join("broken.json");
    fs::write(&model, "{ \"files\": [ { \"path\": \"A.cs\" } ] }").unwrap();

    iosplint(dir.path()).arg("check").arg(&model).assert().failure();
}

#[test]
fn test_init_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();

    iosplint(dir.path()).arg("init").assert().success();
    assert!(dir.path().join(".iosplint.toml").exists());

    iosplint(dir.path()).arg("init").assert().failure();
    iosplint(dir.path()).args(["init", "--force"]).assert().success();
}

#[test]
fn test_explain_lists_rule() {
    let dir = TempDir::new().unwrap();
    let output = iosplint(dir.path()).arg("explain").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("CCD0001"));
    assert!(stdout.contains("Excluded calls"));
}
