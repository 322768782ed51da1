use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a page element.
///
/// Known tags get their own variant; any other non-empty tag is kept
/// verbatim in [`ElementType::Custom`] so that element kinds added by newer
/// builders survive a round trip through older ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ElementType {
    Heading,
    #[default]
    Paragraph,
    Button,
    Image,
    Container,
    Columns,
    Card,
    NewsletterForm,
    Spacer,
    Divider,
    List,
    Testimonial,
    Custom(String),
}

impl ElementType {
    /// Every tag the builder ships default properties for.
    pub const KNOWN_TAGS: [&'static str; 12] = [
        "heading",
        "paragraph",
        "button",
        "image",
        "container",
        "columns",
        "card",
        "newsletter-form",
        "spacer",
        "divider",
        "list",
        "testimonial",
    ];

    /// Parse a type tag. Unknown tags become `Custom`; only the empty tag fails.
    pub fn parse(tag: &str) -> Result<Self, ValidationError> {
        let element_type = match tag {
            "" => return Err(ValidationError::EmptyField("type")),
            "heading" => Self::Heading,
            "paragraph" => Self::Paragraph,
            "button" => Self::Button,
            "image" => Self::Image,
            "container" => Self::Container,
            "columns" => Self::Columns,
            "card" => Self::Card,
            "newsletter-form" => Self::NewsletterForm,
            "spacer" => Self::Spacer,
            "divider" => Self::Divider,
            "list" => Self::List,
            "testimonial" => Self::Testimonial,
            other => Self::Custom(other.to_string()),
        };
        Ok(element_type)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Heading => "heading",
            Self::Paragraph => "paragraph",
            Self::Button => "button",
            Self::Image => "image",
            Self::Container => "container",
            Self::Columns => "columns",
            Self::Card => "card",
            Self::NewsletterForm => "newsletter-form",
            Self::Spacer => "spacer",
            Self::Divider => "divider",
            Self::List => "list",
            Self::Testimonial => "testimonial",
            Self::Custom(tag) => tag,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl std::str::FromStr for ElementType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ElementType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ElementType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Self::parse(&tag).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tags_round_trip() {
        for tag in ElementType::KNOWN_TAGS {
            let parsed = ElementType::parse(tag).unwrap();
            assert!(parsed.is_known(), "{} should be known", tag);
            assert_eq!(parsed.as_str(), tag);
        }
    }

    #[test]
    fn test_unknown_tags_are_preserved_verbatim() {
        let parsed = ElementType::parse("Pricing-Table").unwrap();
        assert_eq!(parsed, ElementType::Custom("Pricing-Table".to_string()));
        assert_eq!(parsed.to_string(), "Pricing-Table");
        assert!(!parsed.is_known());
    }

    #[test]
    fn test_empty_tag_is_rejected() {
        assert_eq!(
            ElementType::parse(""),
            Err(ValidationError::EmptyField("type"))
        );
    }
}
