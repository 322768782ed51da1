use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Process-wide sequence shared by every sequential generator, so two
/// generators created in the same session never hand out the same id.
static ELEMENT_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Identifier of a page element. Always non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(String);

impl ElementId {
    /// Create an element id, rejecting the empty string.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::EmptyField("id"));
        }
        Ok(Self(value))
    }

    /// Get the ID as a string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for ElementId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ElementId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

/// How fresh element ids are minted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStrategy {
    /// `<prefix>-<unix millis>-<sequence>`; unique within the process.
    #[default]
    Sequential,
    /// `<prefix>-<uuid v4 simple>`; unique across processes as well.
    Uuid,
}

/// Mints identifiers for elements that arrive without one.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    prefix: String,
    strategy: IdStrategy,
}

impl IdGenerator {
    /// Create a generator. The prefix must be non-empty and free of whitespace.
    pub fn new(prefix: impl Into<String>, strategy: IdStrategy) -> Result<Self, ValidationError> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(ValidationError::InvalidIdPrefix {
                prefix,
                reason: "prefix cannot be empty".to_string(),
            });
        }
        if prefix.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidIdPrefix {
                prefix,
                reason: "prefix cannot contain whitespace".to_string(),
            });
        }
        Ok(Self { prefix, strategy })
    }

    /// Produce the next identifier.
    pub fn next_id(&self) -> ElementId {
        let value = match self.strategy {
            IdStrategy::Sequential => {
                let sequence = ELEMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
                let millis = chrono::Utc::now().timestamp_millis();
                format!("{}-{}-{}", self.prefix, millis, sequence)
            }
            IdStrategy::Uuid => format!("{}-{}", self.prefix, Uuid::new_v4().as_simple()),
        };
        ElementId(value)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self {
            prefix: crate::constants::GENERATED_ID_PREFIX.to_string(),
            strategy: IdStrategy::Sequential,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_empty_id_is_rejected() {
        assert_eq!(ElementId::new(""), Err(ValidationError::EmptyField("id")));
        assert_eq!(ElementId::new("hero").unwrap().as_str(), "hero");
    }

    #[test]
    fn test_deserialize_rejects_empty_id() {
        assert!(serde_json::from_str::<ElementId>("\"\"").is_err());
        let id: ElementId = serde_json::from_str("\"cta-1\"").unwrap();
        assert_eq!(id.to_string(), "cta-1");
    }

    #[test]
    fn test_sequential_ids_do_not_collide() {
        let first = IdGenerator::default();
        let second = IdGenerator::default();

        let ids: HashSet<ElementId> = (0..500)
            .flat_map(|_| [first.next_id(), second.next_id()])
            .collect();

        assert_eq!(ids.len(), 1000);
        assert!(ids.iter().all(|id| id.as_str().starts_with("element-")));
    }

    #[test]
    fn test_uuid_strategy_uses_prefix() {
        let generator = IdGenerator::new("block", IdStrategy::Uuid).unwrap();
        let id = generator.next_id();
        assert!(id.as_str().starts_with("block-"));
        assert_eq!(id.as_str().len(), "block-".len() + 32);
    }

    #[test]
    fn test_invalid_prefixes() {
        assert!(IdGenerator::new("", IdStrategy::Sequential).is_err());
        assert!(IdGenerator::new("my block", IdStrategy::Sequential).is_err());
    }
}
