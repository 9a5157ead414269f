//! Builds slide content and element positions from a layout and a form state.

use log::debug;

use super::allocator::{plan_layout, PlannedElement};
use super::constants::*;
use super::legacy::resolve_legacy;
use super::rules::{Category, FieldRole, DEFAULT_RULES};
use crate::models::brand_kit::BrandKit;
use crate::models::content::{ElementValue, PositionedElements, ResolvedContent, ShapeStyle};
use crate::models::elements::{ElementKind, LayoutElement, ShapeConfig};
use crate::models::form::{FieldValue, FormState};
use crate::models::template::Template;

/// Output of content resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub content: ResolvedContent,
    pub positioned_elements: PositionedElements,
}

/// Resolves a template against a form state.
///
/// Templates without `layout.elements` go through the flat-field path and reuse the
/// template's `positioningRules`.
pub fn resolve_template(
    template: &Template,
    form: &FormState,
    brand_kit: Option<&BrandKit>,
) -> Resolution {
    if template.is_element_based() {
        resolve(template.layout_elements(), form, brand_kit)
    } else {
        debug!(
            "[resolve_template] Template '{}' has no layout elements, using legacy fields.",
            template.id
        );
        resolve_legacy(form, template.positioning_rules.as_ref())
    }
}

/// Resolves `elements` in layout order.
///
/// Total: missing values fall back to placeholders, defaults or empty values.
pub fn resolve(
    elements: &[LayoutElement],
    form: &FormState,
    brand_kit: Option<&BrandKit>,
) -> Resolution {
    if elements.is_empty() {
        return resolve_legacy(form, None);
    }

    let mut resolution = Resolution::default();
    for planned in plan_layout(elements, &DEFAULT_RULES) {
        resolve_element(&planned, form, brand_kit, &mut resolution.content);

        if let Some(zone) = &planned.element.zone {
            resolution
                .positioned_elements
                .insert(planned.allocation.position_key.clone(), zone.to_rect());
        }
    }

    debug!(
        "[resolve_content] {} elements -> {} titles, {} descriptions, {} bullets, {} logos, {} positions",
        elements.len(),
        resolution.content.titles.len(),
        resolution.content.descriptions.len(),
        resolution.content.bullets.len(),
        resolution.content.logos.len(),
        resolution.positioned_elements.len()
    );
    resolution
}

fn resolve_element(
    planned: &PlannedElement<'_>,
    form: &FormState,
    brand_kit: Option<&BrandKit>,
    content: &mut ResolvedContent,
) {
    let element = planned.element;
    match &element.kind {
        ElementKind::Text(_) => {
            let value = text_value(element, form);
            debug!(
                "[resolve_content] text '{}' ({:?}) -> {}",
                element.id, planned.role, planned.allocation.position_key
            );
            push_text(planned, &value, content);
            content
                .element_content
                .insert(planned.content_key(), ElementValue::Field(value));
        }
        ElementKind::Image(_) | ElementKind::Logo(_) => {
            let mut url = planned
                .form_key()
                .and_then(|key| form.get_text(&key).map(str::to_owned));
            if planned.role == FieldRole::Logo && url.is_none() {
                url = brand_kit.and_then(BrandKit::logo).map(str::to_owned);
            }
            let url = url.unwrap_or_default();
            debug!(
                "[resolve_content] {} '{}' -> {} ({})",
                element.element_type().as_str(),
                element.id,
                planned.content_key(),
                if url.is_empty() { "empty" } else { "set" }
            );
            if planned.role == FieldRole::Logo && !url.is_empty() {
                content.logos.push(url.clone());
            }
            content
                .element_content
                .insert(planned.content_key(), ElementValue::Field(FieldValue::Text(url)));
        }
        ElementKind::Data(_) => {
            let value = form
                .get_filled(&element.id)
                .cloned()
                .or_else(|| element.default_value().filter(|v| !v.is_blank()).cloned())
                .unwrap_or_else(|| FieldValue::from(DEFAULT_DATA_PLACEHOLDER));
            content
                .element_content
                .insert(planned.content_key(), ElementValue::Field(value));
        }
        ElementKind::Shape(config) => {
            let style = shape_style(&element.id, config, form);
            content
                .element_content
                .insert(planned.content_key(), ElementValue::Shape(style));
        }
    }
}

/// Form value, then placeholder, then default value, then empty text.
fn text_value(element: &LayoutElement, form: &FormState) -> FieldValue {
    form.get_filled(&element.id)
        .cloned()
        .or_else(|| non_blank(element.placeholder()).map(FieldValue::from))
        .or_else(|| element.default_value().filter(|v| !v.is_blank()).cloned())
        .unwrap_or_default()
}

/// Form colors first, then the element config, then the fixed defaults.
pub(crate) fn shape_style(id: &str, config: &ShapeConfig, form: &FormState) -> ShapeStyle {
    ShapeStyle {
        fill: pick_color(form, &fill_key(id), config.fill.as_deref(), DEFAULT_SHAPE_FILL),
        stroke: pick_color(
            form,
            &stroke_key(id),
            config.stroke.as_deref(),
            DEFAULT_SHAPE_STROKE,
        ),
    }
}

fn pick_color(form: &FormState, key: &str, configured: Option<&str>, fallback: &str) -> String {
    form.get_text(key)
        .or_else(|| non_blank(configured))
        .unwrap_or(fallback)
        .to_string()
}

fn push_text(planned: &PlannedElement<'_>, value: &FieldValue, content: &mut ResolvedContent) {
    let position_key = &planned.allocation.position_key;
    match planned.role.category() {
        Category::Title => {
            let text = value.first_text().unwrap_or_default().to_string();
            content.set_field(position_key.clone(), text.clone());
            content.titles.push(text);
        }
        Category::Description => {
            let text = value.first_text().unwrap_or_default().to_string();
            content.set_field(position_key.clone(), text.clone());
            if planned.role == FieldRole::Tagline && !content.fields.contains_key(TAGLINE_KEY) {
                content.set_field(TAGLINE_KEY, text.clone());
            }
            content.descriptions.push(text);
        }
        Category::Bullet => match value {
            FieldValue::Text(text) => content.bullets.push(text.clone()),
            FieldValue::List(items) => content.bullets.extend(items.iter().cloned()),
        },
        _ => {}
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
