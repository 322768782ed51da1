// src/constants.rs
//! Domain constants that define the operational boundaries of the normalizer.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

// ---------------------------------------------------------------------------
// Element defaults
// ---------------------------------------------------------------------------

/// Tag assigned to elements whose `type` is missing or empty.
pub const DEFAULT_ELEMENT_TAG: &str = "paragraph";

/// Prefix for identifiers generated for elements that arrive without one.
pub const GENERATED_ID_PREFIX: &str = "element";

/// Top-level fields a page element carries. Anything else is dropped.
pub const ELEMENT_FIELDS: [&str; 5] = ["id", "type", "props", "children", "parentId"];

// ---------------------------------------------------------------------------
// Tree boundaries
// ---------------------------------------------------------------------------

/// Maximum nesting depth when recursively normalizing element trees.
///
/// Page builders rarely nest past a handful of containers. Anything deeper
/// than this is left un-normalized rather than risking stack exhaustion on
/// hostile input.
pub const MAX_TREE_DEPTH: usize = 64;

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// Maximum characters of an offending value shown in diagnostics.
pub const DIAGNOSTIC_PREVIEW_LENGTH: usize = 120;
