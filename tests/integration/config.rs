//! Integration tests for configuration file handling.

use predicates::prelude::*;

use crate::common::TestProject;

const TEMPLATE: &str = "Resources:\n  Topic:\n    Type: AWS::SNS::Topic\nDescription: d\n";

#[test]
fn test_missing_config_uses_defaults() {
    let project = TestProject::new();
    project.write("t.yaml", TEMPLATE);

    project
        .cmd()
        .args(["fmt", "t.yaml"])
        .assert()
        .success()
        .stdout("Description: d\n\nResources:\n  Topic:\n    Type: \"AWS::SNS::Topic\"\n");
}

#[test]
fn test_config_sets_json_style() {
    let project = TestProject::new();
    project.write("t.yaml", TEMPLATE);
    project.write("cfnkit.toml", "[format]\nstyle = \"json\"\n");

    project
        .cmd()
        .args(["fmt", "t.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{\n  \"Description\": \"d\",\n"));
}

#[test]
fn test_config_sets_compact() {
    let project = TestProject::new();
    project.write("t.yaml", TEMPLATE);
    project.write("cfnkit.toml", "[format]\ncompact = true\n");

    project
        .cmd()
        .args(["fmt", "t.yaml"])
        .assert()
        .success()
        .stdout("Description: d\nResources:\n  Topic:\n    Type: \"AWS::SNS::Topic\"\n");
}

#[test]
fn test_explicit_config_flag() {
    let project = TestProject::new();
    project.write("t.yaml", TEMPLATE);
    project.write("team.toml", "[format]\nunsorted = true\ncompact = true\n");

    project
        .cmd()
        .args(["--config", "team.toml", "fmt", "t.yaml"])
        .assert()
        .success()
        .stdout("Resources:\n  Topic:\n    Type: \"AWS::SNS::Topic\"\nDescription: d\n");
}

#[test]
fn test_invalid_config() {
    let project = TestProject::new();
    project.write("t.yaml", TEMPLATE);
    project.write("cfnkit.toml", "[format\nstyle = 1\n");

    project
        .cmd()
        .args(["fmt", "t.yaml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn test_unknown_config_key() {
    let project = TestProject::new();
    project.write("t.yaml", TEMPLATE);
    project.write("cfnkit.toml", "[format]\nindent = 4\n");

    project
        .cmd()
        .args(["fmt", "t.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("indent"));
}
