use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::models::elements::LayoutElement;
use crate::models::form::lenient_string_list;
use crate::models::template::{ContentSchema, Template};

/// What the content generator knows about the company behind the deck.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BusinessProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_market: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_proposition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, JsonValue>,
}

/// Body of `POST /api/generate-template-content`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub template_category: String,
    pub template_name: String,
    pub business_profile: BusinessProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_schema: Option<ContentSchema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_elements: Option<Vec<LayoutElement>>,
}

impl GenerateContentRequest {
    /// Builds the request for `template`, attaching whichever description of the
    /// template's fields it carries.
    pub fn for_template(
        template: &Template,
        business_profile: BusinessProfile,
        project_id: Option<String>,
    ) -> Self {
        GenerateContentRequest {
            template_category: template.category.clone().unwrap_or_default(),
            template_name: template.name.clone(),
            business_profile,
            project_id,
            template_schema: (!template.content_schema.fields.is_empty())
                .then(|| template.content_schema.clone()),
            layout_elements: template
                .is_element_based()
                .then(|| template.layout.elements.clone()),
        }
    }
}

/// Response of the content-generation endpoint. Every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratedContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(deserialize_with = "lenient_string_list")]
    pub bullets: Vec<String>,
    #[serde(deserialize_with = "lenient_string_list")]
    pub stats: Vec<String>,
    #[serde(deserialize_with = "lenient_string_list")]
    pub images: Vec<String>,
    /// Generated values keyed by layout element id.
    pub element_content: IndexMap<String, JsonValue>,
}
