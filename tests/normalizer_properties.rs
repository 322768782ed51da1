//! Behavioral guarantees of element normalization, checked over a corpus of
//! malformed and well-formed candidates.

use pagecraft::{
    default_props_for, is_valid, normalize, normalize_all, CollectingObserver, Diagnostic,
    ElementNormalizer, ElementType, NormalizerConfig,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

/// Candidates that are not objects.
fn non_objects() -> Vec<Value> {
    vec![
        json!(null),
        json!(true),
        json!(0),
        json!(-1.5),
        json!(""),
        json!("heading"),
        json!([]),
        json!([{"id": "a", "type": "button", "props": {}}]),
    ]
}

/// Objects ranging from empty to fully formed, with every field malformed somewhere.
fn objects() -> Vec<Value> {
    vec![
        json!({}),
        json!({"id": ""}),
        json!({"id": null, "type": null, "props": null, "children": null, "parentId": null}),
        json!({"id": 12, "type": 3, "props": [], "children": "none"}),
        json!({"id": "a", "type": "button", "props": {"text": "Go"}, "children": []}),
        json!({"id": "b", "type": "image", "props": {}}),
        json!({"type": "heading", "props": {"text": "Hi", "level": 1}}),
        json!({"id": "c", "type": "vendor-widget", "props": {"x": 1}, "children": [null, 1]}),
        json!({"id": "d", "type": "card", "props": {}, "children": [], "parentId": "root"}),
        json!({"id": "e", "type": "divider", "props": {}, "parentId": 5, "extra": true}),
    ]
}

#[test]
fn test_non_objects_are_rejected() {
    for candidate in non_objects() {
        assert!(
            normalize(&candidate).is_err(),
            "{} should be rejected",
            candidate
        );
    }
}

#[test]
fn test_normalized_objects_are_valid() {
    for candidate in objects() {
        let element = normalize(&candidate).unwrap();
        let value = element.to_value();

        assert!(value["props"].is_object(), "props of {}", candidate);
        assert!(value["children"].is_array(), "children of {}", candidate);
        assert!(!element.id.as_str().is_empty());
        assert!(!element.element_type.as_str().is_empty());
        assert!(is_valid(&value), "{} normalized to invalid {}", candidate, value);
    }
}

#[test]
fn test_normalization_is_idempotent() {
    let normalizer = ElementNormalizer::new();
    for candidate in objects() {
        let once = normalizer.normalize(&candidate).unwrap();
        let twice = normalizer.normalize_with_outcome(&once.to_value()).unwrap();

        assert_eq!(twice.element, once);
        assert!(twice.is_unchanged(), "second pass over {} coerced", candidate);
    }
}

#[test]
fn test_tree_normalization_is_idempotent() {
    let normalizer = ElementNormalizer::new();
    let candidate = json!({
        "type": "container",
        "children": [
            {"type": "columns", "children": [{"type": "card"}, 7, {"id": 3}]},
            {"id": "x", "type": "spacer", "props": {}, "children": []}
        ]
    });

    let once = normalizer.normalize_tree(&candidate).unwrap();
    let twice = normalizer
        .normalize_tree_with_outcome(&once.to_value())
        .unwrap();

    assert_eq!(twice.element, once);
    assert!(twice.is_unchanged());
}

#[test]
fn test_input_is_not_mutated() {
    let candidate = json!({"type": "heading", "props": "oops", "children": [{}]});
    let before = candidate.clone();
    let _ = ElementNormalizer::new().normalize_tree(&candidate).unwrap();
    assert_eq!(candidate, before);
}

#[test]
fn test_batch_output_never_grows() {
    let mut mixed = objects();
    mixed.extend(non_objects());
    let input = Value::Array(mixed);

    let elements = normalize_all(&input);
    assert_eq!(elements.len(), objects().len());
    assert!(elements.len() <= input.as_array().map(Vec::len).unwrap_or(0));
}

#[test]
fn test_batch_on_non_sequence_is_empty() {
    for candidate in [json!(null), json!({}), json!("[]"), json!(3)] {
        assert!(normalize_all(&candidate).is_empty());
    }
}

#[test]
fn test_documented_examples() {
    let empty = normalize(&json!({})).unwrap();
    assert_eq!(empty.element_type, ElementType::Paragraph);
    assert!(empty.props.is_empty());
    assert!(empty.children.is_empty());
    assert_eq!(empty.parent_id, None);

    let button = json!({"id": "a", "type": "button", "props": {"text": "Go"}, "children": []});
    assert_eq!(normalize(&button).unwrap().to_value(), button);

    let batch = normalize_all(&json!([{}, null, {"id": "b", "type": "image", "props": {}}]));
    assert_eq!(batch.len(), 2);
    assert_eq!(batch[1].id.as_str(), "b");
}

#[test]
fn test_generated_ids_are_unique_within_a_batch() {
    let batch = normalize_all(&Value::Array(vec![json!({}); 200]));
    let mut ids: Vec<&str> = batch.iter().map(|e| e.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 200);
}

#[test]
fn test_dropped_entries_are_reported_to_the_observer() {
    let observer = CollectingObserver::new();
    let normalizer =
        ElementNormalizer::with_observer(&NormalizerConfig::default(), &observer).unwrap();

    let report = normalizer.normalize_all_with_report(&json!([null, {}, "x"]));

    assert_eq!(report.dropped, vec![0, 2]);
    let dropped: Vec<Diagnostic> = observer
        .events()
        .into_iter()
        .filter(|event| matches!(event, Diagnostic::EntryDropped { .. }))
        .collect();
    assert_eq!(
        dropped,
        vec![
            Diagnostic::EntryDropped {
                index: 0,
                kind: "null"
            },
            Diagnostic::EntryDropped {
                index: 2,
                kind: "string"
            },
        ]
    );
}

#[test]
fn test_is_valid_ignores_children_and_parent() {
    assert!(is_valid(&json!({
        "id": "a",
        "type": "list",
        "props": {},
        "children": "not checked",
        "parentId": 42
    })));
    assert!(!is_valid(&json!({"id": "a", "type": "list", "props": []})));
}

#[test]
fn test_heading_defaults() {
    insta::assert_snapshot!(
        serde_json::to_string_pretty(&default_props_for("heading")).unwrap(),
        @r###"
    {
      "text": "Your Heading Here",
      "level": 2,
      "align": "left",
      "color": "#111827",
      "fontSize": "2rem",
      "fontWeight": "bold"
    }
    "###
    );
    assert!(default_props_for("unknown-type-xyz").is_empty());
}

#[test]
fn test_typed_props_follow_the_element_type() {
    let element = normalize(&json!({
        "id": "quote",
        "type": "testimonial",
        "props": {"quote": "Fast and friendly", "rating": 4}
    }))
    .unwrap();

    match element.typed_props() {
        pagecraft::ElementProps::Testimonial(props) => {
            assert_eq!(props.quote, "Fast and friendly");
            assert_eq!(props.rating, 4);
            assert_eq!(props.author, "Jane Doe");
        }
        other => panic!("expected testimonial props, got {:?}", other),
    }
}
