use assert_cmd::Command;
use predicates::prelude::*;

const BIN: &str = "fusion";

fn fusion() -> Command {
    let mut command = Command::cargo_bin(BIN).expect("binary should build");
    command.env("FUSION_LOG_FILE", "false");
    command
}

#[test]
fn version_flag_prints_crate_version() {
    fusion()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn help_lists_tool_commands() {
    let output = fusion().arg("--help").output().expect("should run successfully");
    let stdout = std::str::from_utf8(&output.stdout).unwrap();

    assert!(stdout.contains("TOOL COMMANDS"));
    for subcommand in ["tools", "describe", "command", "run", "config"] {
        assert!(stdout.contains(subcommand), "missing {}", subcommand);
    }
    assert!(stdout.contains("--config"));
}

#[test]
fn run_help_documents_configuration_and_output_options() {
    let output = fusion()
        .args(["run", "--help"])
        .output()
        .expect("should run successfully");
    let stdout = std::str::from_utf8(&output.stdout).unwrap();

    assert!(stdout.contains("--install-dir"));
    assert!(stdout.contains("--timeout"));
    assert!(stdout.contains("--params-file"));
    assert!(stdout.contains("Output Options"));
    assert!(stdout.contains("fusion run gridsurfacecreate"));
}

#[test]
fn command_help_includes_example() {
    fusion()
        .args(["command", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("KEY=VALUE"))
        .stdout(predicate::str::contains("fusion command clipdata"));
}

#[test]
fn malformed_param_is_rejected_by_the_parser() {
    fusion()
        .args(["command", "clipdata", "-p", "novalue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected KEY=VALUE"));
}
