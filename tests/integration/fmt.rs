//! Integration tests for the `fmt` command.

use cfnkit::test_utils::TemplateFixture;
use predicates::prelude::*;

use crate::common::TestProject;

const WEB_APP_CANONICAL: &str = r#"AWSTemplateFormatVersion: "2010-09-09"

Description: Static website

Parameters:
  Environment:
    Type: String
    Default: dev
    AllowedValues:
      - dev
      - prod

Resources:
  Logs:
    Type: "AWS::S3::Bucket"
    Properties:
      BucketName: !Sub ${Environment}-logs

  Site:
    Type: "AWS::S3::Bucket"
    Properties:
      BucketName: !Sub "${Environment}-${AWS::AccountId}-site"
      LoggingConfiguration:
        DestinationBucketName: !Ref Logs

Outputs:
  SiteUrl:
    Description: Website endpoint
    Value: !GetAtt Site.WebsiteURL
"#;

#[test]
fn test_fmt_file_to_stdout() {
    let project = TestProject::new();
    let fixture = TemplateFixture::web_app();
    project.write(&fixture.name, &fixture.content);

    project
        .cmd()
        .args(["fmt", &fixture.name])
        .assert()
        .success()
        .stdout(WEB_APP_CANONICAL);
}

#[test]
fn test_fmt_stdin() {
    let project = TestProject::new();
    project
        .cmd()
        .arg("fmt")
        .write_stdin(r#"{"foo": {"Ref": "bar"}}"#)
        .assert()
        .success()
        .stdout("foo: !Ref bar\n");

    project
        .cmd()
        .args(["fmt", "-"])
        .write_stdin("b: Yes\na: foo\n")
        .assert()
        .success()
        .stdout("a: foo\n\nb: \"Yes\"\n");
}

#[test]
fn test_fmt_is_idempotent() {
    let project = TestProject::new();
    project.write("canonical.yaml", WEB_APP_CANONICAL);

    project
        .cmd()
        .args(["fmt", "canonical.yaml"])
        .assert()
        .success()
        .stdout(WEB_APP_CANONICAL);
}

#[test]
fn test_fmt_write_in_place() {
    let project = TestProject::new();
    let fixture = TemplateFixture::web_app();
    project.write(&fixture.name, &fixture.content);

    project
        .cmd()
        .args(["fmt", "--write", &fixture.name])
        .assert()
        .success()
        .stdout("");

    assert_eq!(project.read(&fixture.name), WEB_APP_CANONICAL);
}

#[test]
fn test_fmt_json_style() {
    let project = TestProject::new();
    let fixture = TemplateFixture::web_app();
    project.write(&fixture.name, &fixture.content);

    let output = project.cmd().args(["fmt", "--json", &fixture.name]).output().unwrap();
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.starts_with("{\n  \"AWSTemplateFormatVersion\": \"2010-09-09\",\n"));
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        value["Outputs"]["SiteUrl"]["Value"],
        serde_json::json!({"Fn::GetAtt": ["Site", "WebsiteURL"]})
    );
    assert_eq!(value["Resources"]["Site"]["Properties"]["LoggingConfiguration"]["DestinationBucketName"]["Ref"], "Logs");
}

#[test]
fn test_fmt_compact() {
    let project = TestProject::new();
    let fixture = TemplateFixture::web_app();
    project.write(&fixture.name, &fixture.content);

    let expected: String = WEB_APP_CANONICAL
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| format!("{line}\n"))
        .collect();
    project
        .cmd()
        .args(["fmt", "--compact", &fixture.name])
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn test_fmt_unsorted_keeps_source_order() {
    let project = TestProject::new();
    project.write("t.yaml", "Resources:\n  B:\n    Type: T\n  A:\n    Type: T\nDescription: d\n");

    project
        .cmd()
        .args(["fmt", "--unsorted", "--compact", "t.yaml"])
        .assert()
        .success()
        .stdout("Resources:\n  B:\n    Type: T\n  A:\n    Type: T\nDescription: d\n");
}

#[test]
fn test_fmt_policy_key_order() {
    let project = TestProject::new();
    let fixture = TemplateFixture::iam_role();
    project.write(&fixture.name, &fixture.content);

    let expected = r#"Resources:
  Role:
    Type: "AWS::IAM::Role"
    Properties:
      AssumeRolePolicyDocument:
        Version: "2012-10-17"
        Statement:
          - Effect: Allow
            Principal:
              Service: lambda.amazonaws.com
            Action: "sts:AssumeRole"
      Policies:
        - PolicyName: logs
          PolicyDocument:
            Version: "2012-10-17"
            Statement:
              - Effect: Allow
                Action:
                  - "logs:*"
                Resource: "*"
"#;
    project
        .cmd()
        .args(["fmt", &fixture.name])
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn test_fmt_verify() {
    let project = TestProject::new();
    let fixture = TemplateFixture::web_app();
    project.write(&fixture.name, &fixture.content);

    project
        .cmd()
        .args(["fmt", "--verify", &fixture.name])
        .assert()
        .success()
        .stdout(predicate::str::contains("web_app.yaml"));

    project
        .cmd()
        .args(["fmt", "--verify", "--json", &fixture.name])
        .assert()
        .success();

    // Verification never rewrites the file
    assert_eq!(project.read(&fixture.name), fixture.content);
}

#[test]
fn test_fmt_short_tags_from_json_input() {
    let project = TestProject::new();
    project.write(
        "t.json",
        r#"{"Outputs": {"Arn": {"Value": {"Fn::GetAtt": ["Role", "Arn"]}, "Export": {"Name": {"Fn::Sub": "${AWS::StackName}-arn"}}}},
            "Resources": {"Role": {"Type": "AWS::IAM::Role"}}}"#,
    );

    project
        .cmd()
        .args(["fmt", "--compact", "t.json"])
        .assert()
        .success()
        .stdout(
            "Resources:\n  Role:\n    Type: \"AWS::IAM::Role\"\nOutputs:\n  Arn:\n    Value: !GetAtt Role.Arn\n    Export:\n      Name: !Sub \"${AWS::StackName}-arn\"\n",
        );
}
