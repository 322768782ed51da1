use thiserror::Error;

mod element_type;
mod ids;

pub use element_type::*;
pub use ids::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Empty required field: {0}")]
    EmptyField(&'static str),

    #[error("Invalid id prefix: {prefix:?} - {reason}")]
    InvalidIdPrefix { prefix: String, reason: String },

    #[error("Value out of bounds: {value}, expected {min}..={max}")]
    OutOfBounds { value: usize, min: usize, max: usize },
}
