//! Routes AI-generated content into form keys.

use std::collections::HashSet;

use log::debug;

use super::constants::*;
use super::form::{form_fields, FormField};
use super::rules::FieldRole;
use crate::models::form::{FieldValue, FormState};
use crate::models::generation::GeneratedContent;
use crate::models::template::Template;

/// Merges `generated` into `form` and returns how many form keys were written.
///
/// Values generated for a specific element id are applied first. Remaining fields are
/// matched by role: the first title/description field takes `title`/`description`,
/// tagline fields take `tagline`, bullet fields take `bullets` (or `stats` for
/// stat-labelled fields) by ordinal, image fields take `images` by ordinal.
pub fn merge_generated(template: &Template, form: &mut FormState, generated: &GeneratedContent) -> usize {
    if !template.is_element_based() {
        return merge_flat(form, generated);
    }

    let fields = form_fields(template);
    let mut written: HashSet<String> = HashSet::new();

    for field in fields.iter().filter(|f| f.role != FieldRole::Shape) {
        if let Some(value) = generated
            .element_content
            .get(&field.element_id)
            .and_then(FieldValue::from_json)
            .filter(|v| !v.is_blank())
        {
            form.insert(field.key.clone(), value);
            written.insert(field.key.clone());
        }
    }

    let mut heuristic = HeuristicCursor::default();
    for field in &fields {
        // The cursor advances for every field so ordinals stay aligned with the layout.
        let value = heuristic.next_value(field, generated);
        if written.contains(&field.key) {
            continue;
        }
        if let Some(value) = value {
            form.insert(field.key.clone(), value);
            written.insert(field.key.clone());
        }
    }

    debug!(
        "[merge_generated] Template '{}': {} of {} fields filled",
        template.id,
        written.len(),
        fields.len()
    );
    written.len()
}

/// Per-role positions in the generated lists.
#[derive(Debug, Default)]
struct HeuristicCursor {
    titles: usize,
    descriptions: usize,
    bullets: usize,
    stats: usize,
    images: usize,
}

impl HeuristicCursor {
    fn next_value(&mut self, field: &FormField, generated: &GeneratedContent) -> Option<String> {
        let value = match field.role {
            FieldRole::Title => {
                self.titles += 1;
                (self.titles == 1).then(|| generated.title.clone()).flatten()
            }
            FieldRole::Tagline => generated
                .tagline
                .clone()
                .or_else(|| generated.description.clone()),
            FieldRole::Description => {
                self.descriptions += 1;
                (self.descriptions == 1)
                    .then(|| generated.description.clone())
                    .flatten()
            }
            FieldRole::Bullet if is_stat_field(field) && !generated.stats.is_empty() => {
                self.stats += 1;
                generated.stats.get(self.stats - 1).cloned()
            }
            FieldRole::Bullet => {
                self.bullets += 1;
                generated.bullets.get(self.bullets - 1).cloned()
            }
            FieldRole::Image => {
                self.images += 1;
                generated.images.get(self.images - 1).cloned()
            }
            FieldRole::Logo | FieldRole::Data | FieldRole::Shape => None,
        };
        value.filter(|v| !v.trim().is_empty())
    }
}

fn is_stat_field(field: &FormField) -> bool {
    field.label.to_lowercase().contains("stat")
}

/// Schema-only templates use the generated keys as form keys directly.
fn merge_flat(form: &mut FormState, generated: &GeneratedContent) -> usize {
    let mut written = 0;
    let texts = [
        (TITLE_KEY, &generated.title),
        (DESCRIPTION_KEY, &generated.description),
        (TAGLINE_KEY, &generated.tagline),
    ];
    for (key, value) in texts {
        if let Some(value) = value.as_ref().filter(|v| !v.trim().is_empty()) {
            form.insert(key, value.clone());
            written += 1;
        }
    }
    for (key, items) in [(BULLETS_KEY, &generated.bullets), (STATS_KEY, &generated.stats)] {
        if !items.is_empty() {
            form.insert(key, items.clone());
            written += 1;
        }
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn template() -> Template {
        serde_json::from_value(json!({
            "id": "tpl",
            "name": "Traction",
            "layout": { "elements": [
                { "id": "t1", "type": "text", "config": { "label": "Title" } },
                { "id": "t2", "type": "text", "config": { "label": "Section title" } },
                { "id": "tag", "type": "text", "config": { "label": "Tagline" } },
                { "id": "d1", "type": "text", "config": { "label": "Summary" } },
                { "id": "b1", "type": "text", "config": { "label": "Bullet 1" } },
                { "id": "b2", "type": "text", "config": { "label": "Bullet 2" } },
                { "id": "k1", "type": "text", "config": { "label": "Key stat" } },
                { "id": "hero", "type": "image", "config": { "label": "Hero" } },
                { "id": "logo", "type": "image", "config": { "label": "Logo", "mediaType": "logo" } },
                { "id": "s1", "type": "shape" }
            ]}
        }))
        .unwrap()
    }

    #[test]
    fn test_heuristic_routing() {
        let generated: GeneratedContent = serde_json::from_value(json!({
            "title": "Acme",
            "description": "We launch rockets",
            "tagline": "Up we go",
            "bullets": ["Cheap", "Fast"],
            "stats": ["10x"],
            "images": ["https://img/hero.png"]
        }))
        .unwrap();
        let mut form = FormState::new();

        let written = merge_generated(&template(), &mut form, &generated);

        assert_eq!(form.get_text("t1"), Some("Acme"));
        assert_eq!(form.get("t2"), None);
        assert_eq!(form.get_text("tag"), Some("Up we go"));
        assert_eq!(form.get_text("d1"), Some("We launch rockets"));
        assert_eq!(form.get_text("b1"), Some("Cheap"));
        assert_eq!(form.get_text("b2"), Some("Fast"));
        assert_eq!(form.get_text("k1"), Some("10x"));
        assert_eq!(form.get_text("hero-7"), Some("https://img/hero.png"));
        assert_eq!(form.get("logo-8"), None);
        assert_eq!(written, 7);
    }

    #[test]
    fn test_element_content_takes_priority() {
        let generated: GeneratedContent = serde_json::from_value(json!({
            "title": "Heuristic title",
            "elementContent": { "t1": "Element title", "hero": "https://img/el.png", "s1": "ignored" }
        }))
        .unwrap();
        let mut form = FormState::new();

        merge_generated(&template(), &mut form, &generated);

        assert_eq!(form.get_text("t1"), Some("Element title"));
        // The generated title belongs to the first title field, which is already taken.
        assert_eq!(form.get_text("t2"), None);
        assert_eq!(form.get_text("hero-7"), Some("https://img/el.png"));
        assert!(!form.contains_key("s1"));
    }

    #[test]
    fn test_flat_templates() {
        let template: Template =
            serde_json::from_value(json!({ "id": "old", "name": "Old" })).unwrap();
        let generated = GeneratedContent {
            title: Some("Acme".to_string()),
            tagline: Some(" ".to_string()),
            bullets: vec!["One".to_string()],
            ..Default::default()
        };
        let mut form = FormState::new();

        assert_eq!(merge_generated(&template, &mut form, &generated), 2);
        assert_eq!(form.get_text("title"), Some("Acme"));
        assert!(!form.contains_key("tagline"));
        assert_eq!(form.get("bullets"), Some(&FieldValue::List(vec!["One".to_string()])));
    }
}
