use super::element::Props;
use super::props::ElementProps;
use crate::types::ElementType;

/// Default properties for a newly created element of kind `tag`.
///
/// Total over all strings: unknown or empty tags yield an empty map.
pub fn default_props_for(tag: &str) -> Props {
    match ElementType::parse(tag) {
        Ok(element_type) => ElementProps::defaults_for(&element_type).into_props(),
        Err(_) => Props::new(),
    }
}
