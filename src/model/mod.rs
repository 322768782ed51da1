mod defaults;
mod element;
pub mod props;

pub use defaults::default_props_for;
pub use element::{PageElement, Props};
pub use props::*;
