//! Formatting then parsing reproduces the template.

use cfnkit::diff::compare;
use cfnkit::format::{CommentStore, Options, Style, format, verify};
use cfnkit::parser::parse;
use cfnkit::template::{Node, Path, Template};
use proptest::prelude::*;
use serde_json::json;

use crate::strategies::{logical_name, template};

fn assert_round_trip(template: &Template, options: &Options<'_>) -> Result<(), TestCaseError> {
    let text = format(template, options);
    let reparsed = parse(&text).map_err(|e| TestCaseError::fail(format!("{e}\n---\n{text}")))?;
    let diff = compare(template.as_node(), reparsed.as_node());
    prop_assert!(diff.is_unchanged(), "output did not round trip:\n{}", text);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Block-style output parses back to the same tree
    #[test]
    fn prop_yaml_round_trip(template in template()) {
        assert_round_trip(&template, &Options::default())?;
        prop_assert!(verify(&template, &Options::default()).is_ok());
    }

    /// JSON output parses back to the same tree
    #[test]
    fn prop_json_round_trip(template in template()) {
        let options = Options::default().style(Style::Json);
        assert_round_trip(&template, &options)?;
    }

    /// Layout switches never change meaning
    #[test]
    fn prop_compact_unsorted_round_trip(
        template in template(),
        compact in any::<bool>(),
        unsorted in any::<bool>()
    ) {
        for style in [Style::Yaml, Style::Json] {
            let options = Options::default().style(style).compact(compact).unsorted(unsorted);
            prop_assert!(verify(&template, &options).is_ok());
        }
    }

    /// Formatting canonical output again is a fixed point
    #[test]
    fn prop_format_idempotent(template in template()) {
        let first = format(&template, &Options::default());
        let reparsed = parse(&first).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let second = format(&reparsed, &Options::default());
        prop_assert_eq!(first, second);
    }

    /// Comments are rendered but never change the parsed tree
    #[test]
    fn prop_comments_ignored(template in template(), comment in "[A-Za-z0-9 ,.]{1,20}") {
        let mut comments = CommentStore::new();
        comments.insert(Path::root(), comment.clone());
        for key in template.root().keys() {
            comments.insert(Path::root().key(key), comment.clone());
        }
        for style in [Style::Yaml, Style::Json] {
            let options = Options::default().style(style).comments(Some(&comments));
            prop_assert!(verify(&template, &options).is_ok());
        }
    }

    /// `Fn::GetAtt` pairs use the dotted short form and parse back as pairs
    #[test]
    fn prop_get_att_round_trip(resource in logical_name(), attribute in "[A-Z][A-Za-z0-9.]{0,10}") {
        let template = Template::from_node(Node::from(json!({
            "Value": {"Fn::GetAtt": [resource, attribute]}
        })))
        .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let text = format(&template, &Options::default());
        prop_assert_eq!(&text, &format!("Value: !GetAtt {resource}.{attribute}\n"));
        let reparsed = parse(&text).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(reparsed, template);
    }
}

#[test]
fn test_get_att_short_form() {
    let template = Template::from_node(Node::from(json!({"foo": {"Fn::GetAtt": ["A", "B"]}}))).unwrap();
    let text = format(&template, &Options::default());
    assert_eq!(text, "foo: !GetAtt A.B\n");
    assert_eq!(parse(&text).unwrap(), template);
}

#[test]
fn test_nested_intrinsics_round_trip() {
    let template = Template::from_node(Node::from(json!({
        "Value": {"Fn::Join": ["", ["arn:", {"Ref": "AWS::Partition"}, ":s3:::", {"Fn::GetAtt": ["Bucket", "Arn"]}]]},
        "Cond": {"Fn::If": ["IsProd", {"Fn::Sub": "${Name}-prod"}, {"Ref": "AWS::NoValue"}]},
        "Script": {"Fn::Sub": "#!/bin/sh\necho ${Name}\n"},
    })))
    .unwrap();

    for style in [Style::Yaml, Style::Json] {
        verify(&template, &Options::default().style(style)).unwrap();
    }
}
