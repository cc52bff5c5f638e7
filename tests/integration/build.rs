//! Integration tests for the `build` command.

use cfnkit::test_utils::SpecFixture;
use predicates::prelude::*;

use crate::common::TestProject;

fn spec_project() -> TestProject {
    let project = TestProject::new();
    SpecFixture::basic().write_to(project.path()).unwrap();
    project
}

#[test]
fn test_build_full_skeleton() {
    let project = spec_project();

    project
        .cmd()
        .args(["build", "--spec", "spec.json", "AWS::S3::Bucket"])
        .assert()
        .success()
        .stdout(
            r#"AWSTemplateFormatVersion: "2010-09-09"

Resources:
  Bucket:
    Type: "AWS::S3::Bucket"
    Properties:
      BucketName: CHANGEME
      Rule:
        Id: CHANGEME
        Next: CIRCULAR
      Tags:
        - Key: CHANGEME
          Value: CHANGEME
      Versioned: false
"#,
        );
}

#[test]
fn test_build_bare() {
    let project = spec_project();

    project
        .cmd()
        .args(["build", "--spec", "spec.json", "--bare", "AWS::S3::Bucket"])
        .assert()
        .success()
        .stdout(
            "AWSTemplateFormatVersion: \"2010-09-09\"\n\nResources:\n  Bucket:\n    Type: \"AWS::S3::Bucket\"\n    Properties:\n      Versioned: false\n",
        );
}

#[test]
fn test_build_names_and_json() {
    let project = spec_project();

    let output = project
        .cmd()
        .args(["build", "-s", "spec.json", "--json", "Logs=AWS::S3::Bucket", "AWS::S3::Bucket", "AWS::SNS::Topic"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let resources = value["Resources"].as_object().unwrap();
    let mut names: Vec<&str> = resources.keys().map(String::as_str).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["Bucket", "Logs", "Topic"]);
    assert_eq!(value["Resources"]["Topic"]["Properties"]["TopicName"], "CHANGEME");
}

#[test]
fn test_build_output_parses_back() {
    let project = spec_project();

    let output = project.cmd().args(["build", "-s", "spec.json", "AWS::SNS::Topic"]).output().unwrap();
    assert!(output.status.success());
    project.write("built.yaml", &String::from_utf8(output.stdout).unwrap());

    project.cmd().args(["fmt", "--verify", "built.yaml"]).assert().success();
}

#[test]
fn test_build_unknown_type() {
    let project = spec_project();

    project
        .cmd()
        .args(["build", "--spec", "spec.json", "AWS::SNS::Topc"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown resource type: AWS::SNS::Topc"))
        .stderr(predicate::str::contains("Did you mean: AWS::SNS::Topic"));
}

#[test]
fn test_build_duplicate_name() {
    let project = spec_project();

    project
        .cmd()
        .args(["build", "--spec", "spec.json", "A=AWS::S3::Bucket", "A=AWS::SNS::Topic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Logical name 'A' is used more than once"));
}

#[test]
fn test_build_missing_spec() {
    let project = TestProject::new();

    project
        .cmd()
        .args(["build", "--spec", "nope.json", "AWS::S3::Bucket"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load specification nope.json"));
}

#[test]
fn test_build_requires_types() {
    let project = spec_project();

    project.cmd().args(["build", "--spec", "spec.json"]).assert().failure().code(2);
}
