use crate::models::content::ResolvedContent;
use crate::models::slide::Slide;
use crate::resolver::constants::{DESCRIPTION_KEY, TAGLINE_KEY, TITLE_KEY};
use std::fmt::Write; // Import Write trait for formatting

// --- Text Extraction Logic ---

/// Non-blank, trimmed entries of a bucket list.
fn non_blank(items: &[String]) -> impl Iterator<Item = &str> {
    items.iter().map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Titles of a slide; older slides only carry the flat `title` key.
fn slide_titles(content: &ResolvedContent) -> Vec<&str> {
    let titles: Vec<&str> = non_blank(&content.titles).collect();
    if titles.is_empty() {
        content.field_text(TITLE_KEY).map(str::trim).into_iter().collect()
    } else {
        titles
    }
}

fn slide_descriptions(content: &ResolvedContent) -> Vec<&str> {
    let descriptions: Vec<&str> = non_blank(&content.descriptions).collect();
    if descriptions.is_empty() {
        content
            .field_text(DESCRIPTION_KEY)
            .map(str::trim)
            .into_iter()
            .collect()
    } else {
        descriptions
    }
}

/// Extracts the text blocks of one slide: headings, tagline, paragraphs, then the bullet list.
fn extract_text_from_slide(slide: &Slide) -> Option<String> {
    let content = &slide.content;
    let mut slide_parts: Vec<String> = Vec::new();

    for title in slide_titles(content) {
        slide_parts.push(format!("### {}", title));
    }
    if let Some(tagline) = content.field_text(TAGLINE_KEY) {
        slide_parts.push(format!("_{}_", tagline.trim()));
    }
    for description in slide_descriptions(content) {
        slide_parts.push(description.to_string());
    }

    let bullets: Vec<String> = non_blank(&content.bullets)
        .map(|b| format!("- {}", b))
        .collect();
    if !bullets.is_empty() {
        slide_parts.push(bullets.join("\n"));
    }

    if !slide_parts.is_empty() {
        Some(slide_parts.join("\n\n"))
    } else {
        None // Nothing to outline on this slide
    }
}

// --- Public API Function ---

/// Renders a deck as a Markdown outline.
///
/// Slides are sorted by `order`; slides without text keep their number but get no section.
///
/// # Arguments
///
/// * `title` - Deck title for the top-level heading.
/// * `slides` - The deck's slides, in any order.
///
/// # Returns
///
/// A `String` with one `## Slide n` section per slide that has text, separated by `---`.
pub fn deck_to_markdown(title: Option<&str>, slides: &[Slide]) -> String {
    let mut full_text = String::new();

    let _ = writeln!(full_text, "# {}\n", title.unwrap_or("Pitch Deck"));

    let mut sorted: Vec<&Slide> = slides.iter().collect();
    sorted.sort_by_key(|s| s.order);

    let mut first_slide = true;
    for (index, slide) in sorted.into_iter().enumerate() {
        let Some(slide_content) = extract_text_from_slide(slide) else {
            continue;
        };
        if !first_slide {
            let _ = writeln!(full_text, "\n---\n");
        } else {
            first_slide = false;
        }
        let _ = writeln!(full_text, "## Slide {}\n", index + 1);
        let _ = writeln!(full_text, "{}", slide_content);
    }

    full_text
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn slide(order: u32, content: serde_json::Value) -> Slide {
        Slide {
            id: format!("s{}", order),
            order,
            content: serde_json::from_value(content).unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn test_deck_outline() {
        let slides = vec![
            slide(
                1,
                json!({ "titles": ["Traction"], "bullets": ["10k users", " ", "3 pilots"] }),
            ),
            slide(
                0,
                json!({ "title": "Acme", "tagline": "Rockets for all", "description": "We launch rockets" }),
            ),
        ];

        let outline = deck_to_markdown(Some("Acme Seed Deck"), &slides);

        assert_eq!(
            outline,
            "# Acme Seed Deck\n\n\
             ## Slide 1\n\n### Acme\n\n_Rockets for all_\n\nWe launch rockets\n\
             \n---\n\n\
             ## Slide 2\n\n### Traction\n\n- 10k users\n- 3 pilots\n"
        );
    }

    #[test]
    fn test_empty_slides_are_skipped_but_counted() {
        let slides = vec![
            slide(0, json!({})),
            slide(1, json!({ "descriptions": ["Only text"] })),
        ];

        let outline = deck_to_markdown(None, &slides);

        assert!(outline.starts_with("# Pitch Deck\n\n## Slide 2\n\nOnly text\n"));
        assert!(!outline.contains("## Slide 1"));
        assert!(!outline.contains("---"));
    }
}
