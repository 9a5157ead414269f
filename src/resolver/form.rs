//! Seeds the editable form state, either from a template's defaults or from a slide
//! that was saved earlier.

use std::collections::HashSet;

use log::debug;

use super::allocator::{plan_layout, IndexAllocator};
use super::constants::*;
use super::content::shape_style;
use super::rules::{Category, FieldRole, DEFAULT_RULES};
use crate::models::content::{ElementValue, ResolvedContent};
use crate::models::elements::{ElementKind, LayoutElement, ShapeConfig};
use crate::models::form::{FieldValue, FormState};
use crate::models::slide::Slide;
use crate::models::template::Template;

/// One entry of the content-customization form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    /// Form state key (composite for images and logos).
    pub key: String,
    pub element_id: String,
    pub label: String,
    pub role: FieldRole,
    pub default_value: Option<FieldValue>,
    /// Shapes present in the layout but missing from the content schema.
    pub synthesized: bool,
    /// Index in `layout.elements`; `None` for schema-only templates.
    pub layout_index: Option<usize>,
    /// Ordinal among fields of the same category.
    pub category_ordinal: usize,
}

/// The editable fields of `template`, in form order.
///
/// For element-based templates the position of a field in this list is the ordinal used
/// in composite image keys, matching what the resolver computes.
pub fn form_fields(template: &Template) -> Vec<FormField> {
    if !template.is_element_based() {
        return schema_fields(template);
    }

    let schema = &template.content_schema;
    let mut synthesized_shapes = 0;
    plan_layout(template.layout_elements(), &DEFAULT_RULES)
        .into_iter()
        .filter(|planned| planned.editable)
        .map(|planned| {
            let element = planned.element;
            let schema_field = schema.field(&element.id);
            let synthesized = planned.role == FieldRole::Shape && schema_field.is_none();

            let label = if synthesized {
                synthesized_shapes += 1;
                format!("Shape {}", synthesized_shapes)
            } else {
                element
                    .label()
                    .filter(|l| !l.trim().is_empty())
                    .or_else(|| schema_field.and_then(|f| f.label.as_deref()))
                    .unwrap_or(element.id.as_str())
                    .to_string()
            };

            let default_value = schema_field
                .and_then(|f| f.default_value.clone())
                .or_else(|| element.default_value().cloned());

            FormField {
                key: planned.form_key().unwrap_or_else(|| element.id.clone()),
                element_id: element.id.clone(),
                label,
                role: planned.role,
                default_value,
                synthesized,
                layout_index: Some(planned.layout_index),
                category_ordinal: planned.allocation.category_ordinal,
            }
        })
        .collect()
}

fn schema_fields(template: &Template) -> Vec<FormField> {
    let mut allocator = IndexAllocator::new();
    template
        .content_schema
        .fields
        .iter()
        .map(|field| {
            let role = DEFAULT_RULES.render_role(&field.to_layout_element());
            let allocation = allocator.allocate(role.category(), true);
            FormField {
                key: field.id.clone(),
                element_id: field.id.clone(),
                label: field.label.clone().unwrap_or_else(|| field.id.clone()),
                role,
                default_value: field.default_value.clone(),
                synthesized: false,
                layout_index: None,
                category_ordinal: allocation.category_ordinal,
            }
        })
        .collect()
}

/// Builds the form state for a new application of `template`, or for reopening
/// `existing`.
pub fn initialize(template: &Template, existing: Option<&Slide>) -> FormState {
    match existing {
        Some(slide) => from_slide(template, slide),
        None => template_defaults(template),
    }
}

/// Default value of every field; shapes get their fill and stroke colors.
pub fn template_defaults(template: &Template) -> FormState {
    let mut form = FormState::new();
    for field in form_fields(template) {
        if field.role == FieldRole::Shape {
            // Schema-only shapes have no layout config and take the default colors.
            let config = match field
                .layout_index
                .and_then(|i| template.layout_elements().get(i))
                .map(|e| &e.kind)
            {
                Some(ElementKind::Shape(config)) => config.clone(),
                _ => ShapeConfig::default(),
            };
            let style = shape_style(&field.element_id, &config, &FormState::new());
            form.insert(fill_key(&field.element_id), style.fill);
            form.insert(stroke_key(&field.element_id), style.stroke);
            continue;
        }
        form.insert(field.key, field.default_value.unwrap_or_default());
    }
    form
}

/// Rebuilds the editing state of a saved slide.
///
/// Multi-value lists win over the single-value fields older slides carry; a lone
/// `title`/`description`/`styling.logoUrl` is promoted into a one-element list and the
/// single-value key dropped, so the next save writes the list shape. Only the returned
/// state changes, never `slide`.
pub fn from_slide(template: &Template, slide: &Slide) -> FormState {
    let mut form = template_defaults(template);
    let content = &slide.content;

    for (key, value) in &content.fields {
        if let Some(value) = FieldValue::from_json(value) {
            form.insert(key.clone(), value);
        }
    }

    promote_to_list(&mut form, TITLES_KEY, &content.titles, TITLE_KEY);
    promote_to_list(&mut form, DESCRIPTIONS_KEY, &content.descriptions, DESCRIPTION_KEY);

    let logos = if !content.logos.is_empty() {
        content.logos.clone()
    } else {
        slide
            .styling
            .logo_url
            .iter()
            .filter(|url| !url.trim().is_empty())
            .cloned()
            .collect()
    };
    if !logos.is_empty() {
        form.insert(LOGOS_KEY, logos);
    }
    if !content.bullets.is_empty() {
        form.insert(BULLETS_KEY, content.bullets.clone());
    }

    if template.is_element_based() {
        restore_elements(template.layout_elements(), content, &mut form);
    }

    debug!(
        "[from_slide] Slide '{}' reopened with {} form keys",
        slide.id,
        form.len()
    );
    form
}

fn promote_to_list(form: &mut FormState, list_key: &str, bucket: &[String], flat_key: &str) {
    let single = form.remove(flat_key);
    if !bucket.is_empty() {
        form.insert(list_key, bucket.to_vec());
    } else if let Some(single) = single.filter(|v| !v.is_blank()) {
        form.insert(list_key, single.into_list());
    }
}

/// Maps `_elementContent` back onto form keys, then fills the rest by bucket index.
fn restore_elements(elements: &[LayoutElement], content: &ResolvedContent, form: &mut FormState) {
    let plan = plan_layout(elements, &DEFAULT_RULES);
    let mut restored: HashSet<String> = HashSet::new();

    for planned in &plan {
        let element = planned.element;
        if let ElementKind::Shape(_) = element.kind {
            if let Some(style) = content
                .element_content
                .get(&element.id)
                .and_then(ElementValue::as_shape)
            {
                form.insert(fill_key(&element.id), style.fill.clone());
                form.insert(stroke_key(&element.id), style.stroke.clone());
            }
            continue;
        }

        let Some(key) = planned.form_key() else {
            continue;
        };
        let stored = content
            .element_content
            .get(&planned.content_key())
            .or_else(|| {
                element
                    .is_media()
                    .then(|| content.element_content.get(&element.id))
                    .flatten()
            })
            .and_then(ElementValue::as_field);
        if let Some(value) = stored {
            form.insert(key.clone(), value.clone());
            restored.insert(key);
        }
    }

    let list = |form: &FormState, key: &str| -> Vec<String> {
        form.get(key).cloned().map(FieldValue::into_list).unwrap_or_default()
    };
    let titles = list(form, TITLES_KEY);
    let descriptions = list(form, DESCRIPTIONS_KEY);
    let bullets = list(form, BULLETS_KEY);
    let logos = list(form, LOGOS_KEY);

    for planned in &plan {
        let Some(key) = planned.form_key() else {
            continue;
        };
        if restored.contains(&key) {
            continue;
        }
        let bucket = match planned.role.category() {
            Category::Title => &titles,
            Category::Description => &descriptions,
            Category::Bullet => &bullets,
            Category::Logo => &logos,
            _ => continue,
        };
        if let Some(value) = bucket
            .get(planned.allocation.category_ordinal)
            .filter(|v| !v.trim().is_empty())
        {
            form.insert(key, value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::content::resolve_template;
    use serde_json::json;

    fn template(value: serde_json::Value) -> Template {
        serde_json::from_value(value).unwrap()
    }

    fn pitch_template() -> Template {
        template(json!({
            "id": "tpl",
            "name": "Cover",
            "contentSchema": { "fields": [
                { "id": "t1", "label": "Title", "defaultValue": "Your company" },
                { "id": "s1", "type": "shape", "label": "Accent bar" }
            ]},
            "layout": { "elements": [
                { "id": "t1", "type": "text", "config": { "label": "Title", "defaultValue": "ignored" } },
                { "id": "d1", "type": "text", "config": { "label": "Subheading" } },
                { "id": "note", "type": "text" },
                { "id": "logo", "type": "image", "config": { "label": "Logo", "mediaType": "logo" } },
                { "id": "s1", "type": "shape", "config": { "fill": "#111111" } },
                { "id": "s2", "type": "shape", "config": { "stroke": "#222222" } },
                { "id": "s3", "type": "shape" }
            ]}
        }))
    }

    #[test]
    fn test_form_fields_and_synthesized_shapes() {
        let fields = form_fields(&pitch_template());
        let summary: Vec<_> = fields
            .iter()
            .map(|f| (f.key.as_str(), f.label.as_str(), f.synthesized))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("t1", "Title", false),
                ("d1", "Subheading", false),
                ("logo-2", "Logo", false),
                ("s1", "Accent bar", false),
                ("s2", "Shape 1", true),
                ("s3", "Shape 2", true),
            ]
        );
        assert_eq!(fields[0].default_value, Some(FieldValue::from("Your company")));
    }

    #[test]
    fn test_template_defaults() {
        let form = initialize(&pitch_template(), None);

        assert_eq!(form.get_text("t1"), Some("Your company"));
        assert_eq!(form.get("d1"), Some(&FieldValue::from("")));
        assert!(!form.contains_key("note"));
        assert!(form.contains_key("logo-2"));
        assert_eq!(form.get_text("s1_fill"), Some("#111111"));
        assert_eq!(form.get_text("s1_stroke"), Some(DEFAULT_SHAPE_STROKE));
        assert_eq!(form.get_text("s2_fill"), Some(DEFAULT_SHAPE_FILL));
        assert_eq!(form.get_text("s2_stroke"), Some("#222222"));
        assert!(!form.contains_key("s1"));
    }

    #[test]
    fn test_legacy_description_is_promoted() {
        let slide: Slide = serde_json::from_value(json!({
            "id": "s",
            "content": { "description": "X" }
        }))
        .unwrap();
        let form = initialize(&pitch_template(), Some(&slide));

        assert_eq!(
            form.get("descriptions"),
            Some(&FieldValue::List(vec!["X".to_string()]))
        );
        assert!(!form.contains_key("description"));
        // The slide itself is untouched.
        assert_eq!(slide.content.field_text("description"), Some("X"));
        // Index matching puts it into the first description element.
        assert_eq!(form.get_text("d1"), Some("X"));
    }

    #[test]
    fn test_lists_win_over_single_values() {
        let slide: Slide = serde_json::from_value(json!({
            "id": "s",
            "content": { "titles": ["New"], "title": "Old" },
            "styling": { "logoUrl": "https://old/logo.png" }
        }))
        .unwrap();
        let form = initialize(&pitch_template(), Some(&slide));

        assert_eq!(form.get("titles"), Some(&FieldValue::List(vec!["New".to_string()])));
        assert!(!form.contains_key("title"));
        assert_eq!(form.get_text("t1"), Some("New"));
        assert_eq!(
            form.get("logos"),
            Some(&FieldValue::List(vec!["https://old/logo.png".to_string()]))
        );
        assert_eq!(form.get_text("logo-2"), Some("https://old/logo.png"));
    }

    #[test]
    fn test_element_content_round_trip() {
        let template = pitch_template();
        let mut form = initialize(&template, None);
        form.insert("t1", "Acme Rockets");
        form.insert("d1", "Reusable launch for small satellites");
        form.insert("logo-2", "https://acme/logo.png");
        form.insert("s3_fill", "#abcdef");

        let resolution = resolve_template(&template, &form, None);
        let slide = Slide {
            id: "s".to_string(),
            content: resolution.content.clone(),
            positioned_elements: resolution.positioned_elements.clone(),
            ..Default::default()
        };

        let reopened = initialize(&template, Some(&slide));
        for key in ["t1", "d1", "logo-2", "s3_fill", "s1_fill"] {
            assert_eq!(reopened.get(key), form.get(key), "key {}", key);
        }
        assert_eq!(resolve_template(&template, &reopened, None), resolution);
    }

    #[test]
    fn test_element_content_beats_index_matching() {
        let slide: Slide = serde_json::from_value(json!({
            "id": "s",
            "content": {
                "titles": ["From bucket"],
                "_elementContent": { "t1": "From element" }
            }
        }))
        .unwrap();
        let form = initialize(&pitch_template(), Some(&slide));
        assert_eq!(form.get_text("t1"), Some("From element"));
    }

    #[test]
    fn test_schema_only_template() {
        let template = template(json!({
            "id": "old",
            "name": "Old",
            "contentSchema": { "fields": [
                { "id": "title", "label": "Title", "defaultValue": "Welcome" },
                { "id": "bullets", "label": "Bullet points" }
            ]}
        }));
        let fields = form_fields(&template);
        assert_eq!(fields[0].role, FieldRole::Title);
        assert_eq!(fields[1].role, FieldRole::Bullet);
        assert_eq!(fields[1].layout_index, None);

        let form = initialize(&template, None);
        assert_eq!(form.get_text("title"), Some("Welcome"));

        let slide: Slide =
            serde_json::from_value(json!({ "id": "s", "content": { "title": "Saved" } })).unwrap();
        let reopened = initialize(&template, Some(&slide));
        assert!(!reopened.contains_key("title"));
        assert_eq!(
            resolve_template(&template, &reopened, None).content.titles,
            vec!["Saved"]
        );
    }

    #[test]
    fn test_schema_only_shapes_get_default_colors() {
        let template = template(json!({
            "id": "old",
            "name": "Old",
            "contentSchema": { "fields": [
                { "id": "title", "label": "Title" },
                { "id": "bar", "type": "shape", "label": "Bar" }
            ]}
        }));
        let fields = form_fields(&template);
        assert_eq!(fields[1].role, FieldRole::Shape);
        assert_eq!(fields[1].layout_index, None);

        let form = initialize(&template, None);
        assert_eq!(form.get_text("bar_fill"), Some(DEFAULT_SHAPE_FILL));
        assert_eq!(form.get_text("bar_stroke"), Some(DEFAULT_SHAPE_STROKE));
        assert!(!form.contains_key("bar"));
    }
}
