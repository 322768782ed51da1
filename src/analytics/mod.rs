// src/analytics/mod.rs
//! Content measurement and statistics for page element trees.

use crate::model::PageElement;
use serde_json::Value;
use std::collections::BTreeMap;

/// Detailed breakdown of a normalized element tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementMeasurement {
    /// Elements at every level, including nested children.
    pub total_elements: usize,
    /// 1 for a flat list, 0 for an empty one.
    pub deepest_nesting: usize,
    /// Element count per type tag.
    pub by_type: BTreeMap<String, usize>,
    /// Elements whose tag is not one the builder knows about.
    pub custom_elements: usize,
}

/// Measures a list of top-level elements and everything nested below them.
pub fn measure_elements(elements: &[PageElement]) -> ElementMeasurement {
    let mut measurement = ElementMeasurement::default();
    for element in elements {
        measurement.total_elements += 1;
        *measurement
            .by_type
            .entry(element.element_type.to_string())
            .or_default() += 1;
        if !element.element_type.is_known() {
            measurement.custom_elements += 1;
        }
        measurement.deepest_nesting = measurement.deepest_nesting.max(1);
        walk_children(&mut measurement, &element.children, 2);
    }
    measurement
}

/// Children are raw values; anything that is not an object is skipped.
fn walk_children(measurement: &mut ElementMeasurement, children: &[Value], depth: usize) {
    for child in children {
        let Some(fields) = child.as_object() else {
            continue;
        };
        measurement.total_elements += 1;
        measurement.deepest_nesting = measurement.deepest_nesting.max(depth);

        let tag = fields
            .get("type")
            .and_then(Value::as_str)
            .filter(|tag| !tag.is_empty())
            .unwrap_or(crate::constants::DEFAULT_ELEMENT_TAG);
        *measurement.by_type.entry(tag.to_string()).or_default() += 1;
        if crate::types::ElementType::parse(tag).is_ok_and(|t| !t.is_known()) {
            measurement.custom_elements += 1;
        }

        if let Some(Value::Array(grandchildren)) = fields.get("children") {
            walk_children(measurement, grandchildren, depth + 1);
        }
    }
}
