// src/output/mod.rs
//! Output handling: where a normalized document goes once it is rendered.
//!
//! [`deliver`] is the only place that touches the filesystem or stdout.

mod writer;

use std::fmt;
use std::path::{Path, PathBuf};

pub use writer::deliver;

/// Destination of a rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryTarget {
    /// Write to a file, creating parent directories
    File(PathBuf),
    /// Print to stdout
    Stdout,
}

impl DeliveryTarget {
    /// The file target when a path is given, stdout otherwise.
    pub fn from_output_file(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::File(path.to_path_buf()),
            None => Self::Stdout,
        }
    }
}

impl fmt::Display for DeliveryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdout => write!(f, "stdout"),
        }
    }
}
