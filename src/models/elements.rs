// src/models/elements.rs

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::models::common::Zone;
use crate::models::form::{lenient_field_value, FieldValue};

/// The `type` discriminator of a layout element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Text,
    Image,
    Logo,
    Data,
    Shape,
}

impl ElementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Text => "text",
            ElementType::Image => "image",
            ElementType::Logo => "logo",
            ElementType::Data => "data",
            ElementType::Shape => "shape",
        }
    }
}

/// Configuration of a text placeholder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(
        deserialize_with = "lenient_field_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<FieldValue>,
    /// Styling keys (font size, color, alignment...) kept for round-tripping.
    #[serde(flatten)]
    pub extra: IndexMap<String, JsonValue>,
}

/// Configuration shared by image and logo placeholders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(
        deserialize_with = "lenient_field_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<FieldValue>,
    /// `"logo"` marks an image slot as the brand logo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, JsonValue>,
}

/// Configuration of a chart/metric placeholder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DataConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(
        deserialize_with = "lenient_field_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<FieldValue>,
    #[serde(flatten)]
    pub extra: IndexMap<String, JsonValue>,
}

/// Configuration of a decorative shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShapeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(flatten)]
    pub extra: IndexMap<String, JsonValue>,
}

/// The element kind together with the configuration relevant to it.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Text(TextConfig),
    Image(ImageConfig),
    Logo(ImageConfig),
    Data(DataConfig),
    Shape(ShapeConfig),
}

impl ElementKind {
    pub fn element_type(&self) -> ElementType {
        match self {
            ElementKind::Text(_) => ElementType::Text,
            ElementKind::Image(_) => ElementType::Image,
            ElementKind::Logo(_) => ElementType::Logo,
            ElementKind::Data(_) => ElementType::Data,
            ElementKind::Shape(_) => ElementType::Shape,
        }
    }
}

/// One placeholder region of a template layout.
///
/// JSON shape: `{"id": "t1", "type": "text", "config": {...}, "zone": {...}}`.
/// The untyped `config` object is decoded into the variant matching `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLayoutElement", into = "RawLayoutElement")]
pub struct LayoutElement {
    pub id: String,
    pub kind: ElementKind,
    pub zone: Option<Zone>,
}

impl LayoutElement {
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        LayoutElement {
            id: id.into(),
            kind,
            zone: None,
        }
    }

    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zone = Some(zone);
        self
    }

    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    pub fn label(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Text(c) => c.label.as_deref(),
            ElementKind::Image(c) | ElementKind::Logo(c) => c.label.as_deref(),
            ElementKind::Data(c) => c.label.as_deref(),
            ElementKind::Shape(c) => c.label.as_deref(),
        }
    }

    pub fn placeholder(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Text(c) => c.placeholder.as_deref(),
            ElementKind::Image(c) | ElementKind::Logo(c) => c.placeholder.as_deref(),
            ElementKind::Data(c) => c.placeholder.as_deref(),
            ElementKind::Shape(_) => None,
        }
    }

    pub fn default_value(&self) -> Option<&FieldValue> {
        match &self.kind {
            ElementKind::Text(c) => c.default_value.as_ref(),
            ElementKind::Image(c) | ElementKind::Logo(c) => c.default_value.as_ref(),
            ElementKind::Data(c) => c.default_value.as_ref(),
            ElementKind::Shape(_) => None,
        }
    }

    pub fn media_type(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Image(c) | ElementKind::Logo(c) => c.media_type.as_deref(),
            _ => None,
        }
    }

    /// Image and logo slots use composite form keys.
    pub fn is_media(&self) -> bool {
        matches!(self.kind, ElementKind::Image(_) | ElementKind::Logo(_))
    }
}

/// Wire representation of [`LayoutElement`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawLayoutElement {
    id: String,
    #[serde(rename = "type")]
    element_type: ElementType,
    #[serde(default)]
    config: JsonValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    zone: Option<Zone>,
}

fn decode_config<T>(config: JsonValue) -> Result<T, serde_json::Error>
where
    T: Default + serde::de::DeserializeOwned,
{
    match config {
        JsonValue::Null => Ok(T::default()),
        other => serde_json::from_value(other),
    }
}

impl TryFrom<RawLayoutElement> for LayoutElement {
    type Error = serde_json::Error;

    fn try_from(raw: RawLayoutElement) -> Result<Self, Self::Error> {
        let kind = match raw.element_type {
            ElementType::Text => ElementKind::Text(decode_config(raw.config)?),
            ElementType::Image => ElementKind::Image(decode_config(raw.config)?),
            ElementType::Logo => ElementKind::Logo(decode_config(raw.config)?),
            ElementType::Data => ElementKind::Data(decode_config(raw.config)?),
            ElementType::Shape => ElementKind::Shape(decode_config(raw.config)?),
        };
        Ok(LayoutElement {
            id: raw.id,
            kind,
            zone: raw.zone,
        })
    }
}

impl From<LayoutElement> for RawLayoutElement {
    fn from(element: LayoutElement) -> Self {
        let element_type = element.element_type();
        let config = match element.kind {
            ElementKind::Text(c) => serde_json::to_value(c),
            ElementKind::Image(c) | ElementKind::Logo(c) => serde_json::to_value(c),
            ElementKind::Data(c) => serde_json::to_value(c),
            ElementKind::Shape(c) => serde_json::to_value(c),
        }
        .unwrap_or(JsonValue::Null);
        RawLayoutElement {
            id: element.id,
            element_type,
            config,
            zone: element.zone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_layout_element_config_by_type() {
        let elements: Vec<LayoutElement> = serde_json::from_value(json!([
            { "id": "t1", "type": "text", "config": { "label": "Title", "fontSize": 32 },
              "zone": { "x": 0, "y": 0, "width": 400, "height": 50 } },
            { "id": "brand", "type": "image", "config": { "label": "Logo", "mediaType": "logo" } },
            { "id": "rev", "type": "data", "config": { "label": "Revenue", "defaultValue": 1200 } },
            { "id": "s1", "type": "shape", "config": { "fill": "#ff0000", "strokeWidth": 2 } },
            { "id": "bare", "type": "text" }
        ]))
        .unwrap();

        assert_eq!(elements[0].label(), Some("Title"));
        assert!(elements[0].zone.is_some());
        match &elements[0].kind {
            ElementKind::Text(c) => assert_eq!(c.extra.get("fontSize"), Some(&json!(32))),
            other => panic!("expected text, got {:?}", other),
        }
        assert_eq!(elements[1].media_type(), Some("logo"));
        assert!(elements[1].is_media());
        assert_eq!(elements[2].default_value(), Some(&FieldValue::from("1200")));
        match &elements[3].kind {
            ElementKind::Shape(c) => {
                assert_eq!(c.fill.as_deref(), Some("#ff0000"));
                assert_eq!(c.stroke_width, Some(2.0));
            }
            other => panic!("expected shape, got {:?}", other),
        }
        assert_eq!(elements[4].label(), None);
        assert_eq!(elements[4].element_type(), ElementType::Text);
    }

    #[test]
    fn test_layout_element_serializes_back_to_wire_shape() {
        let source = json!({
            "id": "t1",
            "type": "text",
            "config": { "label": "Headline", "placeholder": "Say it", "color": "#111" }
        });
        let element: LayoutElement = serde_json::from_value(source.clone()).unwrap();
        assert_eq!(serde_json::to_value(&element).unwrap(), source);
    }

    #[test]
    fn test_unknown_element_type_is_rejected() {
        let result: Result<LayoutElement, _> =
            serde_json::from_value(json!({ "id": "v", "type": "video" }));
        assert!(result.is_err());
    }
}
