//! Concrete end-to-end cases for each engine component.

use cfnkit::core::{CfnError, Element};
use cfnkit::diff::{Diff, Mode, compare};
use cfnkit::format::{Options, format};
use cfnkit::graph::Graph;
use cfnkit::parser::parse;
use cfnkit::template::{Node, Template};
use cfnkit::test_utils::{TemplateFixture, init_test_logging};
use serde_json::json;

fn template(value: serde_json::Value) -> Template {
    init_test_logging(None);
    Template::from_node(Node::from(value)).unwrap()
}

#[test]
fn test_added_key_marks_mapping_changed() {
    let diff = compare(&Node::from(json!({"foo": "bar"})), &Node::from(json!({"foo": "bar", "baz": "quux"})));
    assert_eq!(diff.mode(), Mode::Changed);

    let Diff::Mapping { entries, .. } = diff else {
        panic!("expected a mapping diff");
    };
    assert_eq!(entries["baz"], Diff::Value { mode: Mode::Added, value: Node::from("quux") });
    assert_eq!(entries["foo"], Diff::Value { mode: Mode::Unchanged, value: Node::from("bar") });
}

#[test]
fn test_emptied_sequence_is_removed() {
    let diff = compare(&Node::from(json!(["foo"])), &Node::from(json!([])));
    assert_eq!(diff.mode(), Mode::Removed);

    let Diff::Sequence { items, .. } = diff else {
        panic!("expected a sequence diff");
    };
    assert_eq!(items, vec![Diff::Value { mode: Mode::Removed, value: Node::from("foo") }]);
}

#[test]
fn test_recipe_graph_order() {
    let mut graph = Graph::new();
    graph.add(Element::resource("Cake"), [Element::resource("Eggs"), Element::resource("Butter")]);
    graph.add(Element::resource("Eggs"), [Element::resource("Chicken")]);
    graph.add(Element::resource("Dinner"), [Element::resource("Chicken"), Element::resource("Cake")]);

    let names: Vec<String> = graph.nodes().into_iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["Butter", "Chicken", "Eggs", "Cake", "Dinner"]);
}

#[test]
fn test_ref_short_form() {
    let text = format(&template(json!({"foo": {"Ref": "bar"}})), &Options::default());
    assert_eq!(text, "foo: !Ref bar\n");
}

#[test]
fn test_resources_follow_dependencies() {
    let template = template(json!({
        "Parameters": {"Name": {"Type": "String"}},
        "Resources": {
            "Bucket1": {"Type": "AWS::S3::Bucket", "Properties": {"BucketName": {"Fn::Sub": "${Bucket2}-copy"}}},
            "Bucket2": {"Type": "AWS::S3::Bucket", "Properties": {"BucketName": {"Ref": "Name"}}},
        },
    }));

    let text = format(&template, &Options::default());
    let first = text.find("  Bucket2:").unwrap();
    let second = text.find("  Bucket1:").unwrap();
    assert!(first < second, "{text}");
}

#[test]
fn test_reserved_words_quoted() {
    let text = format(&template(json!({"a": "Yes", "b": "foo"})), &Options::default().compact(true));
    assert_eq!(text, "a: \"Yes\"\nb: foo\n");
}

#[test]
fn test_leading_zero_and_dates_stay_strings() {
    let parsed = parse("version: 0123\ndate: 2024-01-01\nnumber: 123\nfloat: 1.5\n").unwrap();
    assert_eq!(
        parsed.as_node(),
        &Node::from(json!({"version": "0123", "date": "2024-01-01", "number": 123, "float": 1.5}))
    );

    let text = format(&parsed, &Options::default().compact(true));
    assert_eq!(text, "date: \"2024-01-01\"\nfloat: 1.5\nnumber: 123\nversion: \"0123\"\n");
}

#[test]
fn test_short_tags_expand() {
    let parsed = parse(
        "a: !GetAtt Site.Url\nb: !Sub ${X}\nc: !Join [\"-\", [!Ref A, !Ref B]]\nd: !GetAtt [R, Attr]\n",
    )
    .unwrap();
    assert_eq!(
        parsed.as_node(),
        &Node::from(json!({
            "a": {"Fn::GetAtt": ["Site", "Url"]},
            "b": {"Fn::Sub": "${X}"},
            "c": {"Fn::Join": ["-", [{"Ref": "A"}, {"Ref": "B"}]]},
            "d": {"Fn::GetAtt": ["R", "Attr"]},
        }))
    );
}

#[test]
fn test_unresolved_reference_is_fatal() {
    let template = parse("Resources:\n  A:\n    Type: T\n    Properties:\n      X: !Ref Missing\n").unwrap();
    let err = Graph::build(&template).unwrap_err();
    assert!(matches!(err, CfnError::UnresolvedReference { ref name, .. } if name == "Missing"));
}

#[test]
fn test_escaped_sub_is_not_a_reference() {
    let template = parse("Resources:\n  A:\n    Type: T\n    Properties:\n      X: !Sub \"${!Literal}-${AWS::Region}\"\n").unwrap();
    let graph = Graph::build(&template).unwrap();
    assert_eq!(graph.get(&Element::resource("A")), vec![Element::pseudo("AWS::Region")]);
}

#[test]
fn test_sub_variable_map() {
    let template = template(json!({
        "Parameters": {"Env": {"Type": "String"}},
        "Resources": {
            "Queue": {"Type": "AWS::SQS::Queue"},
            "Topic": {
                "Type": "AWS::SNS::Topic",
                "Properties": {"TopicName": {"Fn::Sub": ["${Env}-${QueueName}", {"QueueName": {"Fn::GetAtt": ["Queue", "QueueName"]}}]}},
            },
        },
    }));

    let graph = Graph::build(&template).unwrap();
    assert_eq!(
        graph.get(&Element::resource("Topic")),
        vec![Element::parameter("Env"), Element::resource("Queue")]
    );
}

#[test]
fn test_fixture_resources_ordered_by_dependencies() {
    init_test_logging(None);
    let template = TemplateFixture::web_app().parse();
    let resources: Vec<&str> = template.section("Resources").unwrap().keys().map(String::as_str).collect();
    assert_eq!(resources, vec!["Site", "Logs"]);

    let text = format(&template, &Options::default());
    assert!(text.find("  Logs:").unwrap() < text.find("  Site:").unwrap());
}
