// src/document.rs
//! Persisted page documents.
//!
//! The builder stores a page either as a bare array of elements or as an
//! object whose `elements` field holds that array next to page-level
//! metadata (title, slug, SEO fields). Both shapes are accepted; the
//! metadata is carried through untouched and the shape is preserved on
//! output.

use crate::config::InputSource;
use crate::error::{json_kind, AppError};
use crate::model::{PageElement, Props};
use crate::normalize::diagnostics::DiagnosticObserver;
use crate::normalize::{BatchReport, ElementNormalizer};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Field holding the element list in wrapped documents.
const ELEMENTS_FIELD: &str = "elements";

/// How children are treated while loading a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Traversal {
    /// Top-level elements only; children pass through untouched.
    #[default]
    Shallow,
    /// Every level of the tree is normalized.
    Recursive,
}

/// The outer shape a document was stored in.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentShape {
    /// A bare JSON array of elements.
    BareList,
    /// An object with an `elements` array; other fields kept verbatim.
    Wrapped { metadata: Props },
}

/// Read and parse a document without normalizing it.
///
/// Parse failures name where the text came from.
pub fn read_raw_document(source: &InputSource) -> Result<Value, AppError> {
    let contents = match source {
        InputSource::Stdin => {
            log::info!("Reading page document from stdin");
            let mut contents = String::new();
            std::io::stdin().read_to_string(&mut contents)?;
            contents
        }
        InputSource::File(path) => {
            log::info!("Reading page document from {}", path.display());
            std::fs::read_to_string(path)?
        }
    };
    parse_raw_document(&contents, source)
}

fn parse_raw_document(contents: &str, source: &InputSource) -> Result<Value, AppError> {
    serde_json::from_str(contents).map_err(|err| match source {
        InputSource::Stdin => AppError::StdinParseError { source: err },
        InputSource::File(path) => AppError::JsonParseError {
            path: path.clone(),
            source: err,
        },
    })
}

/// A page document whose elements have been normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct PageDocument {
    pub shape: DocumentShape,
    pub elements: Vec<PageElement>,
}

/// A normalized document plus what normalization had to do to get there.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub document: PageDocument,
    pub report: BatchReport,
}

impl PageDocument {
    /// Normalize an already-parsed document value.
    pub fn from_value<O: DiagnosticObserver>(
        value: &Value,
        normalizer: &ElementNormalizer<O>,
        traversal: Traversal,
    ) -> Result<LoadedDocument, AppError> {
        let (shape, raw_elements) = match value {
            Value::Array(_) => (DocumentShape::BareList, value),
            Value::Object(fields) => {
                let raw_elements = fields.get(ELEMENTS_FIELD).ok_or_else(|| {
                    AppError::MalformedDocument(format!(
                        "object document has no '{}' field",
                        ELEMENTS_FIELD
                    ))
                })?;
                let metadata: Props = fields
                    .iter()
                    .filter(|(key, _)| key.as_str() != ELEMENTS_FIELD)
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect();
                (DocumentShape::Wrapped { metadata }, raw_elements)
            }
            other => {
                return Err(AppError::MalformedDocument(format!(
                    "expected an array or object document, got {}",
                    json_kind(other)
                )))
            }
        };

        let report = match traversal {
            Traversal::Shallow => normalizer.normalize_all_with_report(raw_elements),
            Traversal::Recursive => normalizer.normalize_all_trees_with_report(raw_elements),
        };
        log::debug!(
            "Normalized {} of {} elements ({} coerced, {} dropped, {} nested children dropped)",
            report.entries.len(),
            report.input_len,
            report.coerced_count(),
            report.dropped_count(),
            report.dropped_children.len()
        );

        let document = PageDocument {
            shape,
            elements: report.elements().cloned().collect(),
        };
        Ok(LoadedDocument { document, report })
    }

    /// Parse and normalize a document from JSON text.
    pub fn from_json_str<O: DiagnosticObserver>(
        json: &str,
        normalizer: &ElementNormalizer<O>,
        traversal: Traversal,
    ) -> Result<LoadedDocument, AppError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value, normalizer, traversal)
    }

    /// Read, parse and normalize a document file.
    pub fn from_path<O: DiagnosticObserver>(
        path: &Path,
        normalizer: &ElementNormalizer<O>,
        traversal: Traversal,
    ) -> Result<LoadedDocument, AppError> {
        let value = read_raw_document(&InputSource::File(path.to_path_buf()))?;
        Self::from_value(&value, normalizer, traversal)
    }

    /// The document in its stored shape.
    pub fn to_value(&self) -> Value {
        let elements = Value::Array(self.elements.iter().map(PageElement::to_value).collect());
        match &self.shape {
            DocumentShape::BareList => elements,
            DocumentShape::Wrapped { metadata } => {
                let mut fields = metadata.clone();
                fields.insert(ELEMENTS_FIELD.to_string(), elements);
                Value::Object(fields)
            }
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(&self.to_value())?)
    }

    pub fn to_json_compact(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string(&self.to_value())?)
    }
}
