use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use crate::models::common::Rect;
use crate::models::form::{lenient_string_list, FieldValue};

/// Position key → rectangle in pixels.
pub type PositionedElements = IndexMap<String, Rect>;

/// Colors of a decorative shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub fill: String,
    pub stroke: String,
}

/// The raw value stored per element under `_elementContent`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ElementValue {
    Shape(ShapeStyle),
    Field(FieldValue),
}

impl ElementValue {
    /// Decodes a persisted value. Anything unrecognised becomes empty text.
    pub fn from_json(value: &JsonValue) -> Self {
        if let JsonValue::Object(map) = value {
            let color = |key: &str| map.get(key).and_then(JsonValue::as_str).map(str::to_owned);
            if let (Some(fill), Some(stroke)) = (color("fill"), color("stroke")) {
                return ElementValue::Shape(ShapeStyle { fill, stroke });
            }
        }
        ElementValue::Field(FieldValue::from_json(value).unwrap_or_default())
    }

    pub fn as_field(&self) -> Option<&FieldValue> {
        match self {
            ElementValue::Field(value) => Some(value),
            ElementValue::Shape(_) => None,
        }
    }

    pub fn as_shape(&self) -> Option<&ShapeStyle> {
        match self {
            ElementValue::Shape(style) => Some(style),
            ElementValue::Field(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for ElementValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = JsonValue::deserialize(deserializer)?;
        Ok(ElementValue::from_json(&value))
    }
}

/// Slide content in the shape slide renderers consume.
///
/// Bucket arrays are filled in layout order. Flat keys (`title`, `title-1`, `description`,
/// `tagline`, `features`, `contact`, ...) are kept next to them for older renderers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedContent {
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub titles: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub descriptions: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub bullets: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub logos: Vec<String>,
    #[serde(
        rename = "_elementContent",
        default,
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub element_content: IndexMap<String, ElementValue>,
    #[serde(flatten)]
    pub fields: IndexMap<String, JsonValue>,
}

impl ResolvedContent {
    /// Non-blank string stored under a flat key.
    pub fn field_text(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(JsonValue::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    pub fn set_field(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        self.fields.insert(key.into(), value.into());
    }

    /// The headline of the slide, whichever shape it was saved in.
    pub fn primary_title(&self) -> Option<&str> {
        self.titles
            .iter()
            .map(String::as_str)
            .find(|s| !s.trim().is_empty())
            .or_else(|| self.field_text("title"))
    }

    /// True when nothing renderable is present.
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
            && self.descriptions.is_empty()
            && self.bullets.is_empty()
            && self.logos.is_empty()
            && self.element_content.is_empty()
            && self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_content_keeps_flat_fields_and_element_values() {
        let content: ResolvedContent = serde_json::from_value(json!({
            "titles": ["Hello"],
            "bullets": "single bullet",
            "title": "Hello",
            "title-1": "Again",
            "contact": "ceo@example.com",
            "_elementContent": {
                "t1": "Hello",
                "b1": ["a", "b"],
                "s1": { "fill": "#3b82f6", "stroke": "#000000" },
                "n1": 42,
                "x1": null
            }
        }))
        .unwrap();

        assert_eq!(content.titles, vec!["Hello"]);
        assert_eq!(content.bullets, vec!["single bullet"]);
        assert!(content.descriptions.is_empty());
        assert_eq!(content.field_text("title-1"), Some("Again"));
        assert_eq!(content.field_text("contact"), Some("ceo@example.com"));
        assert!(!content.fields.contains_key("titles"));

        let values = &content.element_content;
        assert_eq!(values["t1"], ElementValue::Field(FieldValue::from("Hello")));
        assert_eq!(
            values["s1"].as_shape().map(|s| s.fill.as_str()),
            Some("#3b82f6")
        );
        assert_eq!(values["n1"], ElementValue::Field(FieldValue::from("42")));
        assert_eq!(values["x1"], ElementValue::Field(FieldValue::default()));
    }

    #[test]
    fn test_primary_title_prefers_bucket() {
        let mut content = ResolvedContent::default();
        assert!(content.is_empty());
        content.set_field("title", "Legacy");
        assert_eq!(content.primary_title(), Some("Legacy"));
        content.titles.push("New".to_string());
        assert_eq!(content.primary_title(), Some("New"));
    }
}
