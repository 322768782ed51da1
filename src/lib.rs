// src/lib.rs
//! pagecraft library: normalizes page-builder element trees.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ElementError`, `ValidationError`
//! - **Configuration**: `NormalizerConfig`, `PipelineConfig`
//! - **Domain model**: `PageElement`, `ElementType`, `ElementProps`, typed props
//! - **Normalization**: `ElementNormalizer`, `normalize`, `normalize_all`, `is_valid`
//! - **Diagnostics**: `Diagnostic`, `DiagnosticObserver` and its implementations
//! - **Documents**: `PageDocument`, `Traversal`
//! - **Pipeline**: `NormalizationPipeline` and its stage traits

mod analytics;
mod config;
mod constants;
mod document;
mod error;
mod model;
mod normalize;
mod output;
mod pipeline;
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, ElementError, Result};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{
    Command, CommandLineInput, InputSource, NormalizerConfig, PipelineConfig, DEFAULT_TYPE_ENV,
};
pub use crate::constants::{DEFAULT_ELEMENT_TAG, GENERATED_ID_PREFIX, MAX_TREE_DEPTH};

// --- Domain Model ---
pub use crate::model::{default_props_for, PageElement, Props};

// --- Typed Props ---
pub use crate::model::props::{
    ButtonProps, ButtonSize, ButtonVariant, CardProps, ColumnsProps, ContainerProps, DividerProps,
    ElementProps, HeadingProps, ImageProps, LineStyle, ListProps, NewsletterFormProps,
    ParagraphProps, SpacerProps, TestimonialProps, TextAlign,
};

// --- Domain Types ---
pub use crate::types::{ElementId, ElementType, IdGenerator, IdStrategy};

// --- Normalization ---
pub use crate::normalize::diagnostics::{
    CollectingObserver, Diagnostic, DiagnosticObserver, LogObserver, SilentObserver,
};
pub use crate::normalize::{
    is_valid, normalize, normalize_all, BatchReport, Coercion, DroppedChild, ElementNormalizer,
    Normalized,
};

// --- Documents ---
pub use crate::document::{
    read_raw_document, DocumentShape, LoadedDocument, PageDocument, Traversal,
};

// --- Analytics ---
pub use crate::analytics::{measure_elements, ElementMeasurement};

// --- Output ---
pub use crate::output::{deliver, DeliveryTarget};

// --- Pipeline Traits ---
pub use crate::pipeline::{
    DocumentDelivery, DocumentNormalization, DocumentSource, NormalizationPipeline, RunSummary,
};
