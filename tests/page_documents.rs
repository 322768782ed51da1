//! Loading stored page documents from disk and writing them back.

use pagecraft::{
    measure_elements, AppError, DocumentShape, DroppedChild, ElementId, ElementNormalizer,
    NormalizerConfig, PageDocument, SilentObserver, Traversal,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::fs;

fn normalizer() -> ElementNormalizer<SilentObserver> {
    ElementNormalizer::with_observer(&NormalizerConfig::default(), SilentObserver)
        .expect("default config is valid")
}

const LANDING_PAGE: &str = r##"{
    "title": "Spring launch",
    "slug": "/spring",
    "elements": [
        {
            "id": "hero",
            "type": "container",
            "props": {"backgroundColor": "#0f172a"},
            "children": [
                {"id": "hero-title", "type": "heading", "props": {"text": "Meet the new line"}},
                {"type": "button", "props": {"text": "Shop now", "url": "/products"}},
                null
            ]
        },
        {"id": "signup", "type": "newsletter-form"},
        "<div>legacy markup</div>",
        {"id": "quote", "type": "testimonial", "props": {"quote": "Love it"}, "children": []}
    ]
}"##;

#[test]
fn test_loads_and_normalizes_a_document_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spring.json");
    fs::write(&path, LANDING_PAGE).unwrap();

    let loaded = PageDocument::from_path(&path, &normalizer(), Traversal::Shallow).unwrap();

    assert_eq!(loaded.report.input_len, 4);
    assert_eq!(loaded.report.dropped, vec![2]);
    assert_eq!(loaded.document.elements.len(), 3);
    match &loaded.document.shape {
        DocumentShape::Wrapped { metadata } => {
            assert_eq!(metadata.get("slug"), Some(&json!("/spring")));
        }
        DocumentShape::BareList => panic!("expected a wrapped document"),
    }

    // Shallow loading leaves the hero's children exactly as stored.
    assert_eq!(loaded.document.elements[0].children.len(), 3);
    assert_eq!(loaded.document.elements[0].children[2], Value::Null);
}

#[test]
fn test_recursive_loading_cleans_the_whole_tree() {
    let loaded =
        PageDocument::from_json_str(LANDING_PAGE, &normalizer(), Traversal::Recursive).unwrap();

    let hero = &loaded.document.elements[0];
    assert_eq!(hero.children.len(), 2);
    assert_eq!(hero.children[1]["type"], json!("button"));
    assert_eq!(hero.children[1]["parentId"], json!("hero"));
    assert!(hero.children[1]["id"].as_str().is_some_and(|id| !id.is_empty()));

    let stats = measure_elements(&loaded.document.elements);
    assert_eq!(stats.total_elements, 5);
    assert_eq!(stats.deepest_nesting, 2);
    assert_eq!(stats.by_type.get("heading"), Some(&1));

    assert_eq!(loaded.report.dropped, vec![2]);
    assert_eq!(
        loaded.report.dropped_children,
        vec![DroppedChild {
            parent_id: ElementId::new("hero").unwrap(),
            index: 2
        }]
    );
    assert_eq!(loaded.report.data_loss_count(), 2);
    assert!(!loaded.report.is_lossless());
}

#[test]
fn test_written_documents_reload_unchanged() {
    let first =
        PageDocument::from_json_str(LANDING_PAGE, &normalizer(), Traversal::Recursive).unwrap();
    let json = first.document.to_json_pretty().unwrap();

    let second = PageDocument::from_json_str(&json, &normalizer(), Traversal::Recursive).unwrap();

    assert_eq!(second.document, first.document);
    assert_eq!(second.report.coerced_count(), 0);
    assert!(second.report.is_lossless());
}

#[test]
fn test_parse_errors_carry_the_file_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{\"elements\": [").unwrap();

    match PageDocument::from_path(&path, &normalizer(), Traversal::Shallow) {
        Err(AppError::JsonParseError { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected a JSON parse error, got {:?}", other.map(|d| d.document)),
    }
}

#[test]
fn test_missing_files_are_io_errors() {
    let dir = tempfile::tempdir().unwrap();
    let result = PageDocument::from_path(
        &dir.path().join("absent.json"),
        &normalizer(),
        Traversal::Shallow,
    );
    assert!(matches!(result, Err(AppError::Io(_))));
}
