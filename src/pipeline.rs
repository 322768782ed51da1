// src/pipeline.rs
//! Pipeline capability traits for the three stages of the `pagecraft` binary:
//! read a page document, normalize it, deliver the result.
//!
//! Each trait describes a single capability, enabling testing each stage in isolation.

use crate::analytics::{measure_elements, ElementMeasurement};
use crate::config::{InputSource, PipelineConfig};
use crate::document::{read_raw_document, LoadedDocument, PageDocument, Traversal};
use crate::error::AppError;
use crate::normalize::diagnostics::DiagnosticObserver;
use crate::normalize::{DroppedChild, ElementNormalizer};
use crate::output::{deliver, DeliveryTarget};
use serde_json::Value;

/// Reads a raw page document.
pub trait DocumentSource {
    fn read_document(&self) -> Result<Value, AppError>;
}

/// Turns a raw page document into a normalized one.
pub trait DocumentNormalization {
    fn normalize_document(&self, raw: &Value) -> Result<LoadedDocument, AppError>;
}

/// Delivers a normalized page document to its destination, returning the
/// number of bytes written.
pub trait DocumentDelivery {
    fn deliver(&self, document: &PageDocument) -> Result<usize, AppError>;
}

/// Summary of one pipeline run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub input_entries: usize,
    pub kept: usize,
    pub coerced: usize,
    pub dropped: Vec<usize>,
    pub dropped_children: Vec<DroppedChild>,
    pub measurement: ElementMeasurement,
    pub target: DeliveryTarget,
    pub bytes_written: usize,
}

impl RunSummary {
    /// True when neither top-level entries nor nested children were dropped.
    pub fn is_lossless(&self) -> bool {
        self.dropped.is_empty() && self.dropped_children.is_empty()
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} of {} elements kept ({} coerced, {} dropped, {} nested children dropped); \
             {} elements in tree, depth {}; {} bytes written to {}",
            self.kept,
            self.input_entries,
            self.coerced,
            self.dropped.len(),
            self.dropped_children.len(),
            self.measurement.total_elements,
            self.measurement.deepest_nesting,
            self.bytes_written,
            self.target
        )?;
        if !self.dropped.is_empty() {
            let positions: Vec<String> = self.dropped.iter().map(|i| i.to_string()).collect();
            write!(f, "; dropped positions: {}", positions.join(", "))?;
        }
        if !self.dropped_children.is_empty() {
            let children: Vec<String> = self
                .dropped_children
                .iter()
                .map(|child| format!("{}[{}]", child.parent_id, child.index))
                .collect();
            write!(f, "; dropped children: {}", children.join(", "))?;
        }
        Ok(())
    }
}

/// Drives read → normalize → deliver for one configuration.
pub struct NormalizationPipeline<'a, O: DiagnosticObserver> {
    config: &'a PipelineConfig,
    source: InputSource,
    normalizer: ElementNormalizer<O>,
}

impl<'a, O: DiagnosticObserver> NormalizationPipeline<'a, O> {
    pub fn new(
        config: &'a PipelineConfig,
        source: InputSource,
        observer: O,
    ) -> Result<Self, AppError> {
        let normalizer = ElementNormalizer::with_observer(&config.normalizer, observer)?;
        Ok(Self {
            config,
            source,
            normalizer,
        })
    }

    /// Runs every stage, stopping at the first failure.
    pub fn run(&self) -> Result<RunSummary, AppError> {
        let raw = self.read_document()?;
        let loaded = self.normalize_document(&raw)?;
        let bytes_written = DocumentDelivery::deliver(self, &loaded.document)?;

        Ok(RunSummary {
            input_entries: loaded.report.input_len,
            kept: loaded.document.elements.len(),
            coerced: loaded.report.coerced_count(),
            dropped: loaded.report.dropped.clone(),
            dropped_children: loaded.report.dropped_children.clone(),
            measurement: measure_elements(&loaded.document.elements),
            target: self.target(),
            bytes_written,
        })
    }

    fn traversal(&self) -> Traversal {
        if self.config.recursive {
            Traversal::Recursive
        } else {
            Traversal::Shallow
        }
    }

    fn target(&self) -> DeliveryTarget {
        DeliveryTarget::from_output_file(self.config.output_file.as_deref())
    }
}

impl<O: DiagnosticObserver> DocumentSource for NormalizationPipeline<'_, O> {
    fn read_document(&self) -> Result<Value, AppError> {
        read_raw_document(&self.source)
    }
}

impl<O: DiagnosticObserver> DocumentNormalization for NormalizationPipeline<'_, O> {
    fn normalize_document(&self, raw: &Value) -> Result<LoadedDocument, AppError> {
        PageDocument::from_value(raw, &self.normalizer, self.traversal())
    }
}

impl<O: DiagnosticObserver> DocumentDelivery for NormalizationPipeline<'_, O> {
    fn deliver(&self, document: &PageDocument) -> Result<usize, AppError> {
        let content = if self.config.compact {
            document.to_json_compact()?
        } else {
            document.to_json_pretty()?
        };
        deliver(&self.target(), &content)
    }
}
