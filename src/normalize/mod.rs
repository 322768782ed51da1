//! Element normalization: coerces loosely typed values into page elements.
//!
//! Every ingestion boundary of the page builder (loading a stored page,
//! paste, drag-drop) runs candidates through an [`ElementNormalizer`]
//! before anything is rendered or persisted. Normalization borrows its
//! input and builds a new element, so the caller's value is never touched.
//!
//! Recovery is local: missing or malformed fields are replaced by defaults
//! and recorded as [`Coercion`]s, and only non-object candidates are
//! rejected. Rejected entries are dropped from batches, with a
//! [`Diagnostic`] sent to the configured observer.

pub mod diagnostics;

use crate::config::NormalizerConfig;
use crate::constants::{ELEMENT_FIELDS, MAX_TREE_DEPTH};
use crate::error::{json_kind, preview_value, ElementError};
use crate::model::{PageElement, Props};
use crate::types::{ElementId, ElementType, IdGenerator, ValidationError};
use diagnostics::{Diagnostic, DiagnosticObserver, LogObserver};
use serde_json::Value;
use std::fmt;

/// A default applied while producing an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Coercion {
    /// `id` was missing, empty or not a string/number; a fresh one was minted.
    GeneratedId,
    /// `id` was a number and was rendered as a string.
    StringifiedId,
    /// `type` was missing, empty or not a string.
    DefaultedType,
    /// `props` was missing or not an object.
    DefaultedProps,
    /// `children` was missing or not an array.
    DefaultedChildren,
    /// `parentId` was present but not a non-empty string.
    DiscardedParentId,
    /// Top-level fields outside the element shape were dropped.
    DroppedFields(Vec<String>),
    /// Tree normalization changed at least one child.
    RewroteChildren,
}

impl fmt::Display for Coercion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GeneratedId => write!(f, "id generated"),
            Self::StringifiedId => write!(f, "numeric id stringified"),
            Self::DefaultedType => write!(f, "type defaulted"),
            Self::DefaultedProps => write!(f, "props defaulted to {{}}"),
            Self::DefaultedChildren => write!(f, "children defaulted to []"),
            Self::DiscardedParentId => write!(f, "parentId discarded"),
            Self::DroppedFields(fields) => write!(f, "fields dropped: {}", fields.join(", ")),
            Self::RewroteChildren => write!(f, "children normalized"),
        }
    }
}

/// A child entry removed from an element's `children` during tree
/// normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedChild {
    /// Id of the element whose `children` held the entry.
    pub parent_id: ElementId,
    /// Position of the entry in the parent's original `children`.
    pub index: usize,
}

/// An element together with the defaults that were applied to produce it.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub element: PageElement,
    pub coercions: Vec<Coercion>,
    /// Children rejected anywhere below this element, outermost first.
    pub dropped_children: Vec<DroppedChild>,
}

impl Normalized {
    /// True when the candidate already had the element shape.
    pub fn is_unchanged(&self) -> bool {
        self.coercions.is_empty()
    }

    pub fn into_element(self) -> PageElement {
        self.element
    }
}

/// Outcome of normalizing a batch of candidates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchReport {
    /// Surviving entries, in input order.
    pub entries: Vec<Normalized>,
    /// Input positions of rejected entries.
    pub dropped: Vec<usize>,
    /// Nested children rejected by tree normalization.
    pub dropped_children: Vec<DroppedChild>,
    /// Number of candidates in the input; zero when it was not an array.
    pub input_len: usize,
    /// False when the input was not an array at all.
    pub was_sequence: bool,
}

impl BatchReport {
    pub fn elements(&self) -> impl Iterator<Item = &PageElement> {
        self.entries.iter().map(|entry| &entry.element)
    }

    pub fn into_elements(self) -> Vec<PageElement> {
        self.entries.into_iter().map(Normalized::into_element).collect()
    }

    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }

    pub fn coerced_count(&self) -> usize {
        self.entries.iter().filter(|entry| !entry.is_unchanged()).count()
    }

    /// Top-level entries and nested children that were rejected.
    pub fn data_loss_count(&self) -> usize {
        self.dropped.len() + self.dropped_children.len()
    }

    /// True when every candidate and every nested child survived.
    pub fn is_lossless(&self) -> bool {
        self.was_sequence && self.dropped.is_empty() && self.dropped_children.is_empty()
    }
}

/// Coerces candidate values into [`PageElement`]s.
#[derive(Debug)]
pub struct ElementNormalizer<O = LogObserver> {
    default_type: ElementType,
    max_depth: usize,
    ids: IdGenerator,
    observer: O,
}

impl ElementNormalizer {
    /// A normalizer with default configuration that logs diagnostics.
    pub fn new() -> Self {
        Self {
            default_type: ElementType::default(),
            max_depth: MAX_TREE_DEPTH,
            ids: IdGenerator::default(),
            observer: LogObserver,
        }
    }

    pub fn from_config(config: &NormalizerConfig) -> Result<Self, ValidationError> {
        Self::with_observer(config, LogObserver)
    }
}

impl Default for ElementNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: DiagnosticObserver> ElementNormalizer<O> {
    pub fn with_observer(config: &NormalizerConfig, observer: O) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self {
            default_type: config.default_type.clone(),
            max_depth: config.max_depth,
            ids: config.id_generator()?,
            observer,
        })
    }

    /// Normalize a single candidate, or reject it if it is not an object.
    ///
    /// Children are passed through as-is; see [`Self::normalize_tree`].
    pub fn normalize(&self, candidate: &Value) -> Result<PageElement, ElementError> {
        self.normalize_with_outcome(candidate)
            .map(Normalized::into_element)
    }

    /// Like [`Self::normalize`], also reporting which defaults were applied.
    pub fn normalize_with_outcome(&self, candidate: &Value) -> Result<Normalized, ElementError> {
        let Some(fields) = candidate.as_object() else {
            self.observer.observe(&Diagnostic::Rejected {
                kind: json_kind(candidate),
                preview: preview_value(candidate),
            });
            return Err(ElementError::invalid_shape(candidate));
        };

        let mut coercions = Vec::new();

        let id = self.resolve_id(fields.get("id"), &mut coercions);

        let element_type = fields
            .get("type")
            .and_then(Value::as_str)
            .and_then(|tag| ElementType::parse(tag).ok())
            .unwrap_or_else(|| {
                coercions.push(Coercion::DefaultedType);
                self.default_type.clone()
            });

        let props = match fields.get("props") {
            Some(Value::Object(props)) => props.clone(),
            _ => {
                coercions.push(Coercion::DefaultedProps);
                Props::new()
            }
        };

        let children = match fields.get("children") {
            Some(Value::Array(children)) => children.clone(),
            _ => {
                coercions.push(Coercion::DefaultedChildren);
                Vec::new()
            }
        };

        let parent_id = match fields.get("parentId") {
            None | Some(Value::Null) => None,
            Some(Value::String(parent)) if !parent.is_empty() => {
                ElementId::new(parent.as_str()).ok()
            }
            Some(_) => {
                coercions.push(Coercion::DiscardedParentId);
                None
            }
        };

        let dropped: Vec<String> = fields
            .keys()
            .filter(|key| !ELEMENT_FIELDS.contains(&key.as_str()))
            .cloned()
            .collect();
        if !dropped.is_empty() {
            coercions.push(Coercion::DroppedFields(dropped));
        }

        if !coercions.is_empty() {
            self.observer.observe(&Diagnostic::Coerced {
                id: id.to_string(),
                coercions: coercions.clone(),
            });
        }

        Ok(Normalized {
            element: PageElement {
                id,
                element_type,
                props,
                children,
                parent_id,
            },
            coercions,
            dropped_children: Vec::new(),
        })
    }

    /// Normalize every entry of an array, dropping rejected entries.
    ///
    /// A non-array input yields an empty vec.
    pub fn normalize_all(&self, candidates: &Value) -> Vec<PageElement> {
        self.normalize_all_with_report(candidates).into_elements()
    }

    /// Like [`Self::normalize_all`], also reporting dropped positions and coercions.
    pub fn normalize_all_with_report(&self, candidates: &Value) -> BatchReport {
        self.collect_batch(candidates, |candidate| self.normalize_with_outcome(candidate))
    }

    /// Normalize a candidate and, recursively, its children.
    ///
    /// Rejected children are dropped and listed in
    /// [`Normalized::dropped_children`]. Children without a `parentId` get the
    /// id of the element that contains them. Descent stops at the configured
    /// depth limit, leaving deeper children untouched.
    pub fn normalize_tree(&self, candidate: &Value) -> Result<PageElement, ElementError> {
        self.tree_outcome(candidate, 0).map(Normalized::into_element)
    }

    pub fn normalize_tree_with_outcome(&self, candidate: &Value) -> Result<Normalized, ElementError> {
        self.tree_outcome(candidate, 0)
    }

    /// Tree normalization applied to every entry of an array.
    pub fn normalize_all_trees_with_report(&self, candidates: &Value) -> BatchReport {
        self.collect_batch(candidates, |candidate| self.tree_outcome(candidate, 0))
    }

    fn resolve_id(&self, raw: Option<&Value>, coercions: &mut Vec<Coercion>) -> ElementId {
        match raw {
            Some(Value::String(value)) => {
                if let Ok(id) = ElementId::new(value.as_str()) {
                    return id;
                }
            }
            Some(Value::Number(number)) => {
                if let Ok(id) = ElementId::new(number.to_string()) {
                    coercions.push(Coercion::StringifiedId);
                    return id;
                }
            }
            _ => {}
        }
        coercions.push(Coercion::GeneratedId);
        self.ids.next_id()
    }

    fn tree_outcome(&self, candidate: &Value, depth: usize) -> Result<Normalized, ElementError> {
        let mut outcome = self.normalize_with_outcome(candidate)?;
        let element = &mut outcome.element;

        if element.children.is_empty() {
            return Ok(outcome);
        }
        if depth >= self.max_depth {
            self.observer.observe(&Diagnostic::DepthLimitReached {
                id: element.id.to_string(),
                depth,
            });
            return Ok(outcome);
        }

        let parent_id = element.id.clone();
        let mut children = Vec::with_capacity(element.children.len());
        let mut dropped_here = Vec::new();
        let mut dropped_below = Vec::new();
        for (index, child) in element.children.iter().enumerate() {
            match self.tree_outcome(child, depth + 1) {
                Ok(normalized) => {
                    let mut child_element = normalized.element;
                    if child_element.parent_id.is_none() {
                        child_element.parent_id = Some(parent_id.clone());
                    }
                    children.push(child_element.to_value());
                    dropped_below.extend(normalized.dropped_children);
                }
                Err(_) => {
                    self.observer.observe(&Diagnostic::ChildDropped {
                        parent_id: parent_id.to_string(),
                        index,
                        kind: json_kind(child),
                    });
                    dropped_here.push(DroppedChild {
                        parent_id: parent_id.clone(),
                        index,
                    });
                }
            }
        }

        if children != element.children {
            element.children = children;
            outcome.coercions.push(Coercion::RewroteChildren);
        }
        outcome.dropped_children = dropped_here;
        outcome.dropped_children.extend(dropped_below);
        Ok(outcome)
    }

    fn collect_batch<F>(&self, candidates: &Value, mut normalize_entry: F) -> BatchReport
    where
        F: FnMut(&Value) -> Result<Normalized, ElementError>,
    {
        let Some(entries) = candidates.as_array() else {
            self.observer.observe(&Diagnostic::NotASequence {
                kind: json_kind(candidates),
                preview: preview_value(candidates),
            });
            return BatchReport::default();
        };

        let mut report = BatchReport {
            entries: Vec::with_capacity(entries.len()),
            dropped: Vec::new(),
            dropped_children: Vec::new(),
            input_len: entries.len(),
            was_sequence: true,
        };
        for (index, entry) in entries.iter().enumerate() {
            match normalize_entry(entry) {
                Ok(mut outcome) => {
                    report
                        .dropped_children
                        .append(&mut outcome.dropped_children);
                    report.entries.push(outcome);
                }
                Err(_) => {
                    self.observer.observe(&Diagnostic::EntryDropped {
                        index,
                        kind: json_kind(entry),
                    });
                    report.dropped.push(index);
                }
            }
        }
        report
    }
}

/// Normalize one candidate with a default, logging normalizer.
pub fn normalize(candidate: &Value) -> Result<PageElement, ElementError> {
    ElementNormalizer::new().normalize(candidate)
}

/// Normalize an array of candidates with a default, logging normalizer.
pub fn normalize_all(candidates: &Value) -> Vec<PageElement> {
    ElementNormalizer::new().normalize_all(candidates)
}

/// Whether `candidate` already has the minimal element shape: an object
/// with string `id`, string `type` and object `props`.
///
/// `children` and `parentId` are not inspected.
pub fn is_valid(candidate: &Value) -> bool {
    candidate.as_object().is_some_and(|fields| {
        fields.get("id").is_some_and(Value::is_string)
            && fields.get("type").is_some_and(Value::is_string)
            && fields.get("props").is_some_and(Value::is_object)
    })
}
