//! Strongly typed property records, one per known element kind.
//!
//! Every record deserializes with `#[serde(default)]`, so a partial props
//! map decodes by filling in the kind's defaults. The same `Default` impls
//! back [`default_props_for`](super::default_props_for).

use super::element::Props;
use crate::types::ElementType;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Horizontal alignment shared by text-bearing elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Outline,
    Ghost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ButtonSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeadingProps {
    pub text: String,
    /// HTML heading level, 1 through 6.
    pub level: u8,
    pub align: TextAlign,
    pub color: String,
    pub font_size: String,
    pub font_weight: String,
}

impl Default for HeadingProps {
    fn default() -> Self {
        Self {
            text: "Your Heading Here".to_string(),
            level: 2,
            align: TextAlign::Left,
            color: "#111827".to_string(),
            font_size: "2rem".to_string(),
            font_weight: "bold".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParagraphProps {
    pub text: String,
    pub align: TextAlign,
    pub color: String,
    pub font_size: String,
    pub line_height: String,
}

impl Default for ParagraphProps {
    fn default() -> Self {
        Self {
            text: "Start writing your content here.".to_string(),
            align: TextAlign::Left,
            color: "#374151".to_string(),
            font_size: "1rem".to_string(),
            line_height: "1.6".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonProps {
    pub text: String,
    pub url: String,
    pub variant: ButtonVariant,
    pub size: ButtonSize,
    pub align: TextAlign,
    pub background_color: String,
    pub text_color: String,
    pub border_radius: String,
    pub open_in_new_tab: bool,
}

impl Default for ButtonProps {
    fn default() -> Self {
        Self {
            text: "Click me".to_string(),
            url: "#".to_string(),
            variant: ButtonVariant::Primary,
            size: ButtonSize::Medium,
            align: TextAlign::Left,
            background_color: "#2563eb".to_string(),
            text_color: "#ffffff".to_string(),
            border_radius: "0.375rem".to_string(),
            open_in_new_tab: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageProps {
    pub src: String,
    pub alt: String,
    pub width: String,
    pub height: String,
    pub object_fit: String,
    pub border_radius: String,
}

impl Default for ImageProps {
    fn default() -> Self {
        Self {
            src: String::new(),
            alt: "Image description".to_string(),
            width: "100%".to_string(),
            height: "auto".to_string(),
            object_fit: "cover".to_string(),
            border_radius: "0".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContainerProps {
    pub background_color: String,
    pub padding: String,
    pub max_width: String,
    pub border_radius: String,
}

impl Default for ContainerProps {
    fn default() -> Self {
        Self {
            background_color: "transparent".to_string(),
            padding: "2rem".to_string(),
            max_width: "1200px".to_string(),
            border_radius: "0".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnsProps {
    pub columns: u8,
    pub gap: String,
    pub stack_on_mobile: bool,
}

impl Default for ColumnsProps {
    fn default() -> Self {
        Self {
            columns: 2,
            gap: "1.5rem".to_string(),
            stack_on_mobile: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardProps {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub background_color: String,
    pub padding: String,
    pub border_radius: String,
    pub shadow: bool,
}

impl Default for CardProps {
    fn default() -> Self {
        Self {
            title: "Card Title".to_string(),
            description: "Card description goes here.".to_string(),
            image_url: String::new(),
            background_color: "#ffffff".to_string(),
            padding: "1.5rem".to_string(),
            border_radius: "0.5rem".to_string(),
            shadow: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewsletterFormProps {
    pub title: String,
    pub description: String,
    pub placeholder: String,
    pub button_text: String,
    pub success_message: String,
    pub background_color: String,
}

impl Default for NewsletterFormProps {
    fn default() -> Self {
        Self {
            title: "Subscribe to our newsletter".to_string(),
            description: "Get the latest updates delivered to your inbox.".to_string(),
            placeholder: "Enter your email".to_string(),
            button_text: "Subscribe".to_string(),
            success_message: "Thanks for subscribing!".to_string(),
            background_color: "#f9fafb".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpacerProps {
    pub height: String,
}

impl Default for SpacerProps {
    fn default() -> Self {
        Self {
            height: "2rem".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DividerProps {
    pub color: String,
    pub thickness: String,
    pub style: LineStyle,
    pub margin: String,
}

impl Default for DividerProps {
    fn default() -> Self {
        Self {
            color: "#e5e7eb".to_string(),
            thickness: "1px".to_string(),
            style: LineStyle::Solid,
            margin: "1.5rem 0".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListProps {
    pub items: Vec<String>,
    pub ordered: bool,
    pub color: String,
}

impl Default for ListProps {
    fn default() -> Self {
        Self {
            items: vec![
                "First item".to_string(),
                "Second item".to_string(),
                "Third item".to_string(),
            ],
            ordered: false,
            color: "#374151".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestimonialProps {
    pub quote: String,
    pub author: String,
    pub role: String,
    pub avatar_url: String,
    /// Star rating, 0 through 5.
    pub rating: u8,
}

impl Default for TestimonialProps {
    fn default() -> Self {
        Self {
            quote: "This product changed the way we work.".to_string(),
            author: "Jane Doe".to_string(),
            role: "CEO, Company".to_string(),
            avatar_url: String::new(),
            rating: 5,
        }
    }
}

/// Element properties as a discriminated union keyed by element kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementProps {
    Heading(HeadingProps),
    Paragraph(ParagraphProps),
    Button(ButtonProps),
    Image(ImageProps),
    Container(ContainerProps),
    Columns(ColumnsProps),
    Card(CardProps),
    NewsletterForm(NewsletterFormProps),
    Spacer(SpacerProps),
    Divider(DividerProps),
    List(ListProps),
    Testimonial(TestimonialProps),
    /// Unknown kinds, and known kinds whose props do not fit their record.
    Custom(Props),
}

/// Generates the per-kind dispatch between `ElementType`, `ElementProps`
/// and the typed records.
macro_rules! known_props {
    ($($variant:ident => $record:ident),* $(,)?) => {
        impl ElementProps {
            /// Decode raw props for `element_type`.
            ///
            /// Props that do not fit the kind's record (say, a string `level`
            /// on a heading) are kept as `Custom` rather than discarded.
            pub fn decode(element_type: &ElementType, props: &Props) -> Self {
                let raw = Value::Object(props.clone());
                match element_type {
                    $(ElementType::$variant => match serde_json::from_value::<$record>(raw) {
                        Ok(record) => ElementProps::$variant(record),
                        Err(err) => {
                            log::debug!(
                                "Props for {} element kept untyped: {}",
                                element_type,
                                err
                            );
                            ElementProps::Custom(props.clone())
                        }
                    },)*
                    ElementType::Custom(_) => ElementProps::Custom(props.clone()),
                }
            }

            /// The default record for `element_type`; `Custom({})` for unknown kinds.
            pub fn defaults_for(element_type: &ElementType) -> Self {
                match element_type {
                    $(ElementType::$variant => ElementProps::$variant($record::default()),)*
                    ElementType::Custom(_) => ElementProps::Custom(Props::new()),
                }
            }

            /// Back to the untyped wire map.
            pub fn into_props(self) -> Props {
                let value = match self {
                    $(ElementProps::$variant(record) => serde_json::to_value(record),)*
                    ElementProps::Custom(props) => return props,
                };
                match value {
                    Ok(Value::Object(map)) => map,
                    Ok(_) | Err(_) => Props::new(),
                }
            }

            pub fn is_custom(&self) -> bool {
                matches!(self, ElementProps::Custom(_))
            }
        }
    };
}

known_props! {
    Heading => HeadingProps,
    Paragraph => ParagraphProps,
    Button => ButtonProps,
    Image => ImageProps,
    Container => ContainerProps,
    Columns => ColumnsProps,
    Card => CardProps,
    NewsletterForm => NewsletterFormProps,
    Spacer => SpacerProps,
    Divider => DividerProps,
    List => ListProps,
    Testimonial => TestimonialProps,
}
