//! Structured diagnostics emitted while normalizing.
//!
//! The normalizer never logs directly. It reports what it recovered from to
//! a [`DiagnosticObserver`] chosen by the caller.

use super::Coercion;
use std::cell::RefCell;
use std::fmt;

/// Something the normalizer recovered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A candidate was not an object and was rejected.
    Rejected { kind: &'static str, preview: String },
    /// A batch input was not an array; nothing was normalized.
    NotASequence { kind: &'static str, preview: String },
    /// A rejected entry was dropped from a batch.
    EntryDropped { index: usize, kind: &'static str },
    /// A rejected child was dropped from an element's `children`.
    ChildDropped {
        parent_id: String,
        index: usize,
        kind: &'static str,
    },
    /// Defaults were substituted while producing an element.
    Coerced { id: String, coercions: Vec<Coercion> },
    /// Tree normalization stopped descending at the depth limit.
    DepthLimitReached { id: String, depth: usize },
}

impl Diagnostic {
    /// Whether the event means input data was lost.
    pub fn is_data_loss(&self) -> bool {
        matches!(
            self,
            Self::Rejected { .. }
                | Self::NotASequence { .. }
                | Self::EntryDropped { .. }
                | Self::ChildDropped { .. }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected { kind, preview } => {
                write!(f, "rejected element candidate of kind {}: {}", kind, preview)
            }
            Self::NotASequence { kind, preview } => {
                write!(f, "expected an array of elements, got {}: {}", kind, preview)
            }
            Self::EntryDropped { index, kind } => {
                write!(f, "dropped entry {} ({})", index, kind)
            }
            Self::ChildDropped {
                parent_id,
                index,
                kind,
            } => write!(
                f,
                "dropped child {} of element {} ({})",
                index, parent_id, kind
            ),
            Self::Coerced { id, coercions } => {
                let applied: Vec<String> = coercions.iter().map(|c| c.to_string()).collect();
                write!(f, "element {} coerced: {}", id, applied.join(", "))
            }
            Self::DepthLimitReached { id, depth } => write!(
                f,
                "children of element {} left un-normalized at depth {}",
                id, depth
            ),
        }
    }
}

/// Receives diagnostics from the normalizer.
pub trait DiagnosticObserver {
    fn observe(&self, diagnostic: &Diagnostic);
}

impl<T: DiagnosticObserver + ?Sized> DiagnosticObserver for &T {
    fn observe(&self, diagnostic: &Diagnostic) {
        (**self).observe(diagnostic)
    }
}

/// Forwards diagnostics to the `log` facade.
///
/// Data loss is logged at warn level; coercions and depth cut-offs at debug.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl DiagnosticObserver for LogObserver {
    fn observe(&self, diagnostic: &Diagnostic) {
        if diagnostic.is_data_loss() {
            log::warn!("Element normalization: {}", diagnostic);
        } else {
            log::debug!("Element normalization: {}", diagnostic);
        }
    }
}

/// Discards every diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl DiagnosticObserver for SilentObserver {
    fn observe(&self, _diagnostic: &Diagnostic) {}
}

/// Records diagnostics in memory, for tests and end-of-run reports.
#[derive(Debug, Default)]
pub struct CollectingObserver {
    events: RefCell<Vec<Diagnostic>>,
}

impl CollectingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything observed so far.
    pub fn events(&self) -> Vec<Diagnostic> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn data_loss_count(&self) -> usize {
        self.events.borrow().iter().filter(|d| d.is_data_loss()).count()
    }

    pub fn take(&self) -> Vec<Diagnostic> {
        self.events.take()
    }
}

impl DiagnosticObserver for CollectingObserver {
    fn observe(&self, diagnostic: &Diagnostic) {
        self.events.borrow_mut().push(diagnostic.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_observer_records_in_order() {
        let observer = CollectingObserver::new();
        let by_ref = &observer;

        by_ref.observe(&Diagnostic::EntryDropped {
            index: 1,
            kind: "null",
        });
        by_ref.observe(&Diagnostic::Coerced {
            id: "a".to_string(),
            coercions: vec![Coercion::DefaultedProps],
        });

        assert_eq!(observer.len(), 2);
        assert_eq!(observer.data_loss_count(), 1);
        assert_eq!(
            observer.take()[0],
            Diagnostic::EntryDropped {
                index: 1,
                kind: "null"
            }
        );
        assert!(observer.is_empty());
    }

    #[test]
    fn test_display_is_readable() {
        let diagnostic = Diagnostic::Coerced {
            id: "hero".to_string(),
            coercions: vec![Coercion::DefaultedType, Coercion::DefaultedChildren],
        };
        assert_eq!(
            diagnostic.to_string(),
            "element hero coerced: type defaulted, children defaulted to []"
        );

        let child = Diagnostic::ChildDropped {
            parent_id: "row".to_string(),
            index: 3,
            kind: "string",
        };
        assert_eq!(child.to_string(), "dropped child 3 of element row (string)");
        assert!(child.is_data_loss());
    }
}
