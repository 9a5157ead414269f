use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::models::content::{PositionedElements, ResolvedContent};
use crate::models::form::null_as_default;

/// Per-slide styling overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SlideStyling {
    /// Single logo used by slides saved before `content.logos` existed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, JsonValue>,
}

/// A slide of a deck as persisted by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Slide {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deck_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub order: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub content: ResolvedContent,
    #[serde(deserialize_with = "null_as_default")]
    pub styling: SlideStyling,
    #[serde(deserialize_with = "null_as_default")]
    pub positioned_elements: PositionedElements,
}

/// One entry of a reorder request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideOrder {
    pub slide_id: String,
    pub order: u32,
}

/// Body of `POST /api/decks/{deckId}/slides/reorder`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub slide_orders: Vec<SlideOrder>,
}

/// Moves the slide at `from` to `to` and returns the new order of every slide.
///
/// Slides are first sorted by their current `order`. Out-of-range indices leave the
/// order untouched.
pub fn reorder_slides(slides: &[Slide], from: usize, to: usize) -> Vec<SlideOrder> {
    let mut ids: Vec<(&str, u32)> = slides.iter().map(|s| (s.id.as_str(), s.order)).collect();
    ids.sort_by_key(|(_, order)| *order);
    let mut ids: Vec<&str> = ids.into_iter().map(|(id, _)| id).collect();

    if from < ids.len() && to < ids.len() {
        let moved = ids.remove(from);
        ids.insert(to, moved);
    }

    ids.into_iter()
        .enumerate()
        .map(|(index, id)| SlideOrder {
            slide_id: id.to_string(),
            order: index as u32,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn slide(id: &str, order: u32) -> Slide {
        Slide {
            id: id.to_string(),
            order,
            ..Default::default()
        }
    }

    #[test]
    fn test_reorder_moves_slide_and_renumbers() {
        let slides = vec![slide("c", 2), slide("a", 0), slide("b", 1)];
        let orders = reorder_slides(&slides, 2, 0);
        let ids: Vec<_> = orders.iter().map(|o| (o.slide_id.as_str(), o.order)).collect();
        assert_eq!(ids, vec![("c", 0), ("a", 1), ("b", 2)]);
    }

    #[test]
    fn test_reorder_out_of_range_keeps_order() {
        let slides = vec![slide("a", 0), slide("b", 1)];
        let orders = reorder_slides(&slides, 5, 0);
        assert_eq!(orders[0].slide_id, "a");
        assert_eq!(orders[1].order, 1);
    }

    #[test]
    fn test_reorder_request_wire_shape() {
        let request = ReorderRequest {
            slide_orders: vec![SlideOrder {
                slide_id: "s1".to_string(),
                order: 3,
            }],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "slideOrders": [{ "slideId": "s1", "order": 3 }] })
        );
    }

    #[test]
    fn test_slide_from_backend_json() {
        let slide: Slide = serde_json::from_value(json!({
            "id": "s1",
            "deckId": "d1",
            "order": 2,
            "content": { "title": "Legacy title" },
            "styling": { "logoUrl": "https://cdn.example.com/logo.png", "gradient": "none" },
            "positionedElements": { "title": { "x": 0, "y": 0, "width": 400, "height": 50 } }
        }))
        .unwrap();

        assert_eq!(slide.content.field_text("title"), Some("Legacy title"));
        assert_eq!(
            slide.styling.logo_url.as_deref(),
            Some("https://cdn.example.com/logo.png")
        );
        assert_eq!(slide.styling.extra.get("gradient"), Some(&json!("none")));
        assert_eq!(slide.positioned_elements["title"].width, 400.0);
    }

    #[test]
    fn test_null_columns_decode_as_defaults() {
        let slide: Slide = serde_json::from_value(json!({
            "id": "s1",
            "order": null,
            "content": null,
            "styling": null,
            "positionedElements": null
        }))
        .unwrap();

        assert_eq!(slide.order, 0);
        assert!(slide.content.is_empty());
        assert_eq!(slide.styling, SlideStyling::default());
        assert!(slide.positioned_elements.is_empty());
    }
}
