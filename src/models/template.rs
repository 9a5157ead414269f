use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::models::common::{Coordinate, Zone};
use crate::models::content::PositionedElements;
use crate::models::elements::{
    DataConfig, ElementKind, ImageConfig, LayoutElement, ShapeConfig, TextConfig,
};
use crate::models::form::{lenient_field_value, null_as_default, FieldValue};

/// Who may apply a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessTier {
    #[default]
    Free,
    Premium,
}

/// A field of a template's content schema.
/// Older templates describe their editable content only through these fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchemaField {
    pub id: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(
        deserialize_with = "lenient_field_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<FieldValue>,
    pub required: bool,
}

impl SchemaField {
    /// Views the schema field as a layout element without a zone, so it can be classified
    /// with the same rules as element-based templates.
    pub fn to_layout_element(&self) -> LayoutElement {
        let label = self.label.clone();
        let placeholder = self.placeholder.clone();
        let default_value = self.default_value.clone();
        let kind = match self.field_type.as_deref() {
            Some("image") => ElementKind::Image(ImageConfig {
                label,
                placeholder,
                default_value,
                ..Default::default()
            }),
            Some("logo") => ElementKind::Logo(ImageConfig {
                label,
                placeholder,
                default_value,
                media_type: Some("logo".to_string()),
                ..Default::default()
            }),
            Some("data") => ElementKind::Data(DataConfig {
                label,
                placeholder,
                default_value,
                ..Default::default()
            }),
            Some("shape") => ElementKind::Shape(ShapeConfig {
                label,
                ..Default::default()
            }),
            _ => ElementKind::Text(TextConfig {
                label,
                placeholder,
                default_value,
                ..Default::default()
            }),
        };
        LayoutElement::new(self.id.clone(), kind)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSchema {
    #[serde(deserialize_with = "null_as_default")]
    pub fields: Vec<SchemaField>,
}

impl ContentSchema {
    pub fn field(&self, id: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.id == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateLayout {
    #[serde(deserialize_with = "null_as_default")]
    pub elements: Vec<LayoutElement>,
}

/// Canvas size the template was authored on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Canvas {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Coordinate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Coordinate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

impl Canvas {
    /// Canvas dimensions in pixels, as a zone anchored at the origin.
    pub fn size(&self) -> (f64, f64) {
        let rect = Zone {
            x: None,
            y: None,
            width: self.width.clone(),
            height: self.height.clone(),
        }
        .to_rect();
        (rect.width, rect.height)
    }
}

/// A reusable slide layout ("theme") as served by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Template {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub content_schema: ContentSchema,
    #[serde(deserialize_with = "null_as_default")]
    pub layout: TemplateLayout,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_styling: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canvas: Option<Canvas>,
    /// Fixed positions used by templates that predate `layout.elements`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positioning_rules: Option<PositionedElements>,
    #[serde(deserialize_with = "null_as_default")]
    pub access_tier: AccessTier,
    #[serde(deserialize_with = "null_as_default")]
    pub is_locked: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_default: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub usage_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

impl Template {
    pub fn layout_elements(&self) -> &[LayoutElement] {
        &self.layout.elements
    }

    /// True for templates built from `layout.elements`; false for the older
    /// schema + positioning-rules shape.
    pub fn is_element_based(&self) -> bool {
        !self.layout.elements.is_empty()
    }

    pub fn is_premium(&self) -> bool {
        self.access_tier == AccessTier::Premium || self.is_locked
    }
}
