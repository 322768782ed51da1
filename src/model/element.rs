use super::props::ElementProps;
use crate::types::{ElementId, ElementType, IdGenerator};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Untyped element properties, keyed by property name.
pub type Props = Map<String, Value>;

/// A node in a page's layout tree.
///
/// `children` holds raw values: shallow normalization passes them through
/// untouched, tree normalization replaces each one with a normalized
/// element value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageElement {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    #[serde(default)]
    pub props: Props,
    #[serde(default)]
    pub children: Vec<Value>,
    #[serde(rename = "parentId", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ElementId>,
}

impl PageElement {
    /// A fresh element of the given kind, seeded with its default properties.
    pub fn create(element_type: ElementType, ids: &IdGenerator) -> Self {
        let props = ElementProps::defaults_for(&element_type).into_props();
        Self {
            id: ids.next_id(),
            element_type,
            props,
            children: Vec::new(),
            parent_id: None,
        }
    }

    pub fn with_children(mut self, children: Vec<PageElement>) -> Self {
        self.children = children.iter().map(PageElement::to_value).collect();
        self
    }

    /// Decode the raw props into the typed record for this element's kind.
    pub fn typed_props(&self) -> ElementProps {
        ElementProps::decode(&self.element_type, &self.props)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// The element in its wire shape. Agrees with the `Serialize` impl.
    pub fn to_value(&self) -> Value {
        let mut fields = Map::new();
        fields.insert("id".to_string(), Value::String(self.id.to_string()));
        fields.insert(
            "type".to_string(),
            Value::String(self.element_type.to_string()),
        );
        fields.insert("props".to_string(), Value::Object(self.props.clone()));
        fields.insert("children".to_string(), Value::Array(self.children.clone()));
        if let Some(parent_id) = &self.parent_id {
            fields.insert("parentId".to_string(), Value::String(parent_id.to_string()));
        }
        Value::Object(fields)
    }
}
