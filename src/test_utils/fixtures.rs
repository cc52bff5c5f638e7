//! Sample templates and specifications for tests.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::builder::Specification;
use crate::parser::parse;
use crate::template::Template;

/// A named sample template.
#[derive(Clone, Debug)]
pub struct TemplateFixture {
    pub content: String,
    pub name: String,
}

impl TemplateFixture {
    /// Parameters, cross-referencing resources and outputs, in non-canonical order.
    pub fn web_app() -> Self {
        Self {
            name: "web_app.yaml".to_string(),
            content: r#"
Outputs:
  SiteUrl:
    Value: !GetAtt Site.WebsiteURL
    Description: Website endpoint
Resources:
  Site:
    Properties:
      BucketName: !Sub "${Environment}-${AWS::AccountId}-site"
      LoggingConfiguration:
        DestinationBucketName: !Ref Logs
    Type: AWS::S3::Bucket
  Logs:
    Type: AWS::S3::Bucket
    Properties:
      BucketName: !Sub "${Environment}-logs"
Parameters:
  Environment:
    Default: dev
    Type: String
    AllowedValues: [dev, prod]
Description: Static website
AWSTemplateFormatVersion: "2010-09-09"
"#
            .trim_start()
            .to_string(),
        }
    }

    /// An IAM role whose policy keys are out of canonical order.
    pub fn iam_role() -> Self {
        Self {
            name: "iam_role.json".to_string(),
            content: r#"{
  "Resources": {
    "Role": {
      "Type": "AWS::IAM::Role",
      "Properties": {
        "AssumeRolePolicyDocument": {
          "Statement": [
            {"Action": "sts:AssumeRole", "Principal": {"Service": "lambda.amazonaws.com"}, "Effect": "Allow"}
          ],
          "Version": "2012-10-17"
        },
        "Policies": [
          {
            "PolicyDocument": {
              "Statement": [{"Resource": "*", "Effect": "Allow", "Action": ["logs:*"]}],
              "Version": "2012-10-17"
            },
            "PolicyName": "logs"
          }
        ]
      }
    }
  }
}
"#
            .to_string(),
        }
    }

    /// A resource referencing a name nobody declares.
    pub fn unresolved() -> Self {
        Self {
            name: "unresolved.yaml".to_string(),
            content: "Resources:\n  Queue:\n    Type: AWS::SQS::Queue\n    Properties:\n      QueueName: !Ref QueueNam\nParameters:\n  QueueName:\n    Type: String\n".to_string(),
        }
    }

    /// Text that is not YAML.
    pub fn invalid_syntax() -> Self {
        Self {
            name: "invalid.yaml".to_string(),
            content: "Resources:\n  Bucket: [unclosed\n".to_string(),
        }
    }

    /// Parse the fixture, panicking on failure.
    pub fn parse(&self) -> Template {
        match parse(&self.content) {
            Ok(template) => template,
            Err(e) => panic!("fixture {} does not parse: {e}", self.name),
        }
    }

    /// Write the fixture into `dir` under its name.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.name);
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write fixture {}", path.display()))?;
        Ok(path)
    }
}

/// A small resource specification.
#[derive(Clone, Debug)]
pub struct SpecFixture {
    pub content: String,
}

impl SpecFixture {
    /// A bucket type with a self-referencing property type and a global `Tag`.
    pub fn basic() -> Self {
        Self {
            content: r#"{
  "PropertyTypes": {
    "AWS::S3::Bucket.Rule": {
      "Properties": {
        "Id": {"PrimitiveType": "String", "Required": true},
        "Next": {"Type": "Rule"}
      }
    },
    "Tag": {
      "Properties": {
        "Key": {"PrimitiveType": "String", "Required": true},
        "Value": {"PrimitiveType": "String", "Required": true}
      }
    }
  },
  "ResourceTypes": {
    "AWS::S3::Bucket": {
      "Properties": {
        "BucketName": {"PrimitiveType": "String"},
        "Rule": {"Type": "Rule"},
        "Tags": {"Type": "List", "ItemType": "Tag"},
        "Versioned": {"PrimitiveType": "Boolean", "Required": true}
      }
    },
    "AWS::SNS::Topic": {
      "Properties": {
        "TopicName": {"PrimitiveType": "String"}
      }
    }
  }
}
"#
            .to_string(),
        }
    }

    /// Deserialize the fixture, panicking on failure.
    pub fn parse(&self) -> Specification {
        match Specification::from_json(&self.content) {
            Ok(spec) => spec,
            Err(e) => panic!("specification fixture does not parse: {e}"),
        }
    }

    /// Write the fixture into `dir` as `spec.json`.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join("spec.json");
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write fixture {}", path.display()))?;
        Ok(path)
    }
}
