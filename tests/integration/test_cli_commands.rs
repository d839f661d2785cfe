use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated environment: home, config and scratch all live in a temp dir.
struct Sandbox {
    root: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            root: TempDir::new().unwrap(),
        }
    }

    fn scratch(&self) -> PathBuf {
        self.root.path().join("scratch")
    }

    fn fusion(&self) -> Command {
        let mut command = Command::cargo_bin("fusion").expect("binary should build");
        command
            .env("HOME", self.root.path())
            .env("XDG_CONFIG_HOME", self.root.path().join("config"))
            .env("FUSION_DIRECTORY", "/opt/FUSION")
            .env("FUSION_SCRATCH_DIR", self.scratch())
            .env("FUSION_LOG_FILE", "false")
            .env_remove("FUSION_TIMEOUT")
            .env_remove("FUSION_VERBOSE")
            .env_remove("RUST_LOG");
        command
    }
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn tools_lists_every_group() {
    let sandbox = Sandbox::new();
    sandbox
        .fusion()
        .arg("tools")
        .assert()
        .success()
        .stdout(predicate::str::contains("clipdata"))
        .stdout(predicate::str::contains("openviewer"))
        .stdout(predicate::str::contains("Conversion"));
}

#[test]
fn tools_json_filters_by_group() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .fusion()
        .args(["tools", "--group", "conversion", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let tools = stdout_json(&output);
    let tools = tools.as_array().unwrap();
    assert_eq!(tools.len(), 7);
    assert!(tools.iter().all(|tool| tool["group"] == "conversion"));
    assert!(tools.iter().any(|tool| tool["id"] == "xyz2dtm"));
}

#[test]
fn describe_shows_parameters() {
    let sandbox = Sandbox::new();
    sandbox
        .fusion()
        .args(["describe", "clipdata"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Clip data (clipdata)"))
        .stdout(predicate::str::contains("extent"))
        .stdout(predicate::str::contains("extent, required"))
        .stdout(predicate::str::contains("one of Rectangle | Circle"));
}

#[test]
fn describe_unknown_tool_fails_with_code() {
    let sandbox = Sandbox::new();
    sandbox
        .fusion()
        .args(["describe", "lasinfo"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("FUS-TOOL-001"));
}

#[test]
fn command_prints_the_command_line_without_writing_files() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .fusion()
        .args([
            "command",
            "clipdata",
            "-p",
            "input=a.las",
            "-p",
            "extent=0,0,100,100",
            "-p",
            "shape=0",
            "-p",
            "version64=true",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let first_line = stdout.lines().next().unwrap();
    let scratch = sandbox.scratch().display().to_string();
    assert!(first_line.starts_with(&format!("/opt/FUSION/ClipData64.exe /shape:0 a.las {}/", scratch)));
    assert!(first_line.ends_with("/output.las 0.0 0.0 100.0 100.0"));
    assert!(!sandbox.scratch().exists());
}

#[test]
fn command_json_describes_the_plan() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .fusion()
        .args([
            "command",
            "mergedata",
            "-p",
            "input=a.las;b.las",
            "-p",
            "output=merged.las",
            "--format",
            "json",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let plan = stdout_json(&output);
    assert_eq!(plan["tool"], "mergedata");
    assert_eq!(plan["tokens"][0], "/opt/FUSION/MergeData.exe");
    assert_eq!(plan["tokens"][2], "merged.las");
    assert_eq!(plan["list_files"][0]["entries"], serde_json::json!(["a.las", "b.las"]));
    assert_eq!(plan["outputs"]["output"], "merged.las");
    assert_eq!(plan["launch"], "wait");
}

#[test]
fn params_file_values_are_overridden_by_flags() {
    let sandbox = Sandbox::new();
    let params = sandbox.root.path().join("params.yaml");
    fs::write(
        &params,
        "input: ground.dtm\noutput: ground.tif\nmask: true\n",
    )
    .unwrap();

    sandbox
        .fusion()
        .args(["command", "dtm2tif", "--params-file"])
        .arg(&params)
        .args(["-p", "mask=false"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "/opt/FUSION/DTM2TIF.exe ground.dtm ground.tif\n",
        ));
}

#[test]
fn install_dir_flag_overrides_environment() {
    let sandbox = Sandbox::new();
    sandbox
        .fusion()
        .args([
            "command",
            "dtm2envi",
            "-p",
            "input=g.dtm",
            "-p",
            "output=g.img",
            "--install-dir",
            "/mnt/tools/FUSION",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "/mnt/tools/FUSION/DTM2ENVI.exe g.dtm g.img",
        ));
}

#[test]
fn invalid_parameters_fail_with_code() {
    let sandbox = Sandbox::new();
    sandbox
        .fusion()
        .args(["command", "clipdata", "-p", "input=a.las"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("FUS-PARAM-002"))
        .stderr(predicate::str::contains("extent"));
}

#[test]
fn config_json_shows_effective_values_and_warnings() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .fusion()
        .env("FUSION_DIRECTORY", "/nonexistent/FUSION")
        .args(["config", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let payload = stdout_json(&output);
    assert_eq!(payload["config"]["install"]["directory"], "/nonexistent/FUSION");
    assert_eq!(
        payload["config"]["execution"]["scratch_dir"],
        sandbox.scratch().display().to_string()
    );
    assert!(payload["warnings"][0]
        .as_str()
        .unwrap()
        .contains("/nonexistent/FUSION"));
}

#[test]
fn config_text_lists_environment_variables() {
    let sandbox = Sandbox::new();
    sandbox
        .fusion()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[install]"))
        .stdout(predicate::str::contains("FUSION_DIRECTORY"))
        .stdout(predicate::str::contains("FUSION_LOG_LEVEL"));
}

#[test]
fn explicit_missing_config_file_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .fusion()
        .args(["--config", "/nonexistent/fusion.toml", "tools"])
        .assert()
        .success();
    sandbox
        .fusion()
        .args(["--config", "/nonexistent/fusion.toml", "config"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("FUS-CFG-001"));
}

#[cfg(unix)]
fn install_tool(install_dir: &Path, executable: &str, body: &str) {
    use std::os::unix::fs::PermissionsExt;
    let path = install_dir.join(executable);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(unix)]
#[test]
fn run_streams_output_and_reports_status() {
    let sandbox = Sandbox::new();
    let install = sandbox.root.path().join("FUSION");
    fs::create_dir_all(&install).unwrap();
    install_tool(&install, "DTM2TIF.exe", "echo \"converting $1\"");

    sandbox
        .fusion()
        .args(["run", "dtm2tif", "-p", "input=g.dtm", "-p", "output=g.tif"])
        .arg("--install-dir")
        .arg(&install)
        .assert()
        .success()
        .stdout(predicate::str::contains("FUSION command:"))
        .stdout(predicate::str::contains("converting g.dtm"))
        .stdout(predicate::str::contains("Status: completed"))
        .stdout(predicate::str::contains("Output output: g.tif"));
}

#[cfg(unix)]
#[test]
fn run_json_exit_code_follows_tool_status() {
    let sandbox = Sandbox::new();
    let install = sandbox.root.path().join("FUSION");
    fs::create_dir_all(&install).unwrap();
    install_tool(&install, "DTM2TIF.exe", "echo broken; exit 4");

    let output = sandbox
        .fusion()
        .args(["run", "dtm2tif", "-p", "input=g.dtm", "--format", "json"])
        .arg("--install-dir")
        .arg(&install)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let result = stdout_json(&output);
    assert_eq!(result["status"], "failed");
    assert_eq!(result["exit_code"], 4);
    assert_eq!(result["output_lines"], serde_json::json!(["broken"]));
}

#[cfg(unix)]
#[test]
fn run_timeout_flag_stops_the_tool() {
    let sandbox = Sandbox::new();
    let install = sandbox.root.path().join("FUSION");
    fs::create_dir_all(&install).unwrap();
    install_tool(&install, "DTM2TIF.exe", "exec sleep 30");

    sandbox
        .fusion()
        .args(["run", "dtm2tif", "-p", "input=g.dtm", "--timeout", "300ms"])
        .arg("--install-dir")
        .arg(&install)
        .assert()
        .code(124)
        .stdout(predicate::str::contains("Status: timed out"));
}

#[test]
fn malformed_params_file_reports_serialization_code() {
    let sandbox = Sandbox::new();
    let params = sandbox.root.path().join("params.yaml");
    fs::write(&params, "input: [unclosed\n").unwrap();

    sandbox
        .fusion()
        .args(["command", "dtm2tif", "--params-file"])
        .arg(&params)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("FUS-SER-001"))
        .stderr(predicate::str::contains("params.yaml"));
}
