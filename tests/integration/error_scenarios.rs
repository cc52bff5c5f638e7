//! Failure modes across commands: exit status and the shape of the message.

use cfnkit::test_utils::TemplateFixture;
use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_syntax_error() {
    let project = TestProject::new();
    let fixture = TemplateFixture::invalid_syntax();
    project.write(&fixture.name, &fixture.content);

    project
        .cmd()
        .args(["fmt", &fixture.name])
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("error: Template syntax error"))
        .stderr(predicate::str::contains("Failed to parse invalid.yaml"));
}

#[test]
fn test_root_must_be_mapping() {
    let project = TestProject::new();
    project.write("list.yaml", "- a\n- b\n");

    project
        .cmd()
        .args(["fmt", "list.yaml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid template structure"));
}

#[test]
fn test_missing_template() {
    let project = TestProject::new();

    project
        .cmd()
        .args(["fmt", "absent.yaml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to read template absent.yaml"))
        .stderr(predicate::str::contains("Check that the file exists"));
}

#[test]
fn test_write_requires_file() {
    let project = TestProject::new();

    project
        .cmd()
        .args(["fmt", "--write"])
        .write_stdin("a: 1\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--write requires a template file"));
}

#[test]
fn test_verify_conflicts_with_write() {
    let project = TestProject::new();
    project.write("t.yaml", "a: 1\n");

    project
        .cmd()
        .args(["fmt", "--verify", "--write", "t.yaml"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_verbose_logs_to_stderr_only() {
    let project = TestProject::new();
    project.write("t.yaml", "a: 1\n");

    project
        .cmd()
        .args(["--verbose", "fmt", "t.yaml"])
        .assert()
        .success()
        .stdout("a: 1\n");
}

#[test]
fn test_unresolved_reference_does_not_block_fmt() {
    let project = TestProject::new();
    let fixture = TemplateFixture::unresolved();
    project.write(&fixture.name, &fixture.content);

    project
        .cmd()
        .args(["fmt", "--compact", &fixture.name])
        .assert()
        .success()
        .stdout(
            "Parameters:\n  QueueName:\n    Type: String\nResources:\n  Queue:\n    Type: \"AWS::SQS::Queue\"\n    Properties:\n      QueueName: !Ref QueueNam\n",
        );
}
