//! Resolution for templates saved before `layout.elements` existed.
//!
//! These templates expose a fixed set of flat form fields and carry their element
//! positions in `positioningRules`.

use log::debug;
use serde_json::Value as JsonValue;

use super::constants::*;
use super::content::Resolution;
use crate::models::content::{PositionedElements, ResolvedContent};
use crate::models::form::{FieldValue, FormState};

/// Builds content from the flat `title`/`description`/`tagline`/`bullets`/`features`/
/// `stats`/`contact` fields and copies `positioning_rules` as the element positions.
///
/// A reopened slide keeps its title and description in the `titles`/`descriptions`
/// lists, so those are read when the flat field is absent.
pub fn resolve_legacy(
    form: &FormState,
    positioning_rules: Option<&PositionedElements>,
) -> Resolution {
    let mut content = ResolvedContent::default();

    if let Some(title) = flat_or_first(form, TITLE_KEY, TITLES_KEY) {
        content.set_field(TITLE_KEY, title.clone());
        content.titles.push(title);
    }
    if let Some(description) = flat_or_first(form, DESCRIPTION_KEY, DESCRIPTIONS_KEY) {
        content.set_field(DESCRIPTION_KEY, description.clone());
        content.descriptions.push(description);
    }
    if let Some(tagline) = form.get_text(TAGLINE_KEY) {
        content.set_field(TAGLINE_KEY, tagline);
    }
    if let Some(bullets) = form.get_filled(BULLETS_KEY) {
        content.bullets = split_lines(bullets);
    }
    for key in [FEATURES_KEY, STATS_KEY] {
        if let Some(items) = form.get_filled(key) {
            let items: Vec<JsonValue> = split_lines(items).into_iter().map(JsonValue::from).collect();
            content.set_field(key, items);
        }
    }
    if let Some(contact) = form.get_text(CONTACT_KEY) {
        content.set_field(CONTACT_KEY, contact);
    }
    if let Some(logos) = form.get_filled(LOGOS_KEY) {
        content.logos = logos.clone().into_list();
    }

    let positioned_elements = positioning_rules.cloned().unwrap_or_default();
    debug!(
        "[resolve_legacy] {} flat fields, {} positions",
        content.fields.len(),
        positioned_elements.len()
    );

    Resolution {
        content,
        positioned_elements,
    }
}

fn flat_or_first(form: &FormState, flat_key: &str, list_key: &str) -> Option<String> {
    form.get_text(flat_key)
        .or_else(|| form.get_text(list_key))
        .map(str::to_owned)
}

/// Lists are kept as-is; text is split into one entry per non-blank line.
fn split_lines(value: &FieldValue) -> Vec<String> {
    match value {
        FieldValue::List(items) => items.clone(),
        FieldValue::Text(text) => text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::Rect;
    use serde_json::json;

    #[test]
    fn test_flat_fields() {
        let form: FormState = serde_json::from_value(json!({
            "title": "Acme",
            "description": "Rockets for everyone",
            "tagline": "Up we go",
            "bullets": "Fast\n\n  Cheap \nSafe",
            "features": ["Reusable"],
            "stats": "10x cheaper",
            "contact": "hello@acme.test"
        }))
        .unwrap();

        let content = resolve_legacy(&form, None).content;
        assert_eq!(content.titles, vec!["Acme"]);
        assert_eq!(content.field_text("title"), Some("Acme"));
        assert_eq!(content.descriptions, vec!["Rockets for everyone"]);
        assert_eq!(content.field_text("tagline"), Some("Up we go"));
        assert_eq!(content.bullets, vec!["Fast", "Cheap", "Safe"]);
        assert_eq!(content.fields["features"], json!(["Reusable"]));
        assert_eq!(content.fields["stats"], json!(["10x cheaper"]));
        assert_eq!(content.field_text("contact"), Some("hello@acme.test"));
    }

    #[test]
    fn test_reads_migrated_lists_and_copies_rules() {
        let form: FormState =
            serde_json::from_value(json!({ "titles": ["Migrated"], "descriptions": [] })).unwrap();
        let mut rules = PositionedElements::new();
        rules.insert("title".to_string(), Rect::new(1.0, 2.0, 3.0, 4.0));
        rules.insert("bullets".to_string(), Rect::new(5.0, 6.0, 7.0, 8.0));

        let resolution = resolve_legacy(&form, Some(&rules));
        assert_eq!(resolution.content.titles, vec!["Migrated"]);
        assert!(resolution.content.descriptions.is_empty());
        assert_eq!(resolution.positioned_elements, rules);
    }

    #[test]
    fn test_empty_form() {
        let resolution = resolve_legacy(&FormState::new(), None);
        assert!(resolution.content.is_empty());
        assert!(resolution.positioned_elements.is_empty());
    }
}
