//! Ordinal bookkeeping for layout elements.
//!
//! Two ordinal spaces are tracked side by side:
//! * the per-category ordinal, which names the position key (`title`, `title-1`, ...);
//! * the form-field ordinal, the index among editable elements, which names the composite
//!   form key of image and logo fields (`"{id}-{ordinal}"`).
//!
//! [`plan_layout`] is the single walk over a layout that the resolver, the form
//! initializer and the generated-content merge all share.

use std::collections::HashMap;

use super::constants::LAYOUT_KEY_INFIX;
use super::rules::{Category, FieldRole, RuleTable};
use crate::models::elements::LayoutElement;

/// Position key of the `ordinal`-th element of `category`.
///
/// Ordinal 0 uses the bare name. Bullets are plural when bare and singular when suffixed
/// (`bullets`, `bullet-1`); renderers read these exact strings.
pub fn position_key(category: Category, ordinal: usize) -> String {
    match (category, ordinal) {
        (Category::Bullet, 0) => "bullets".to_string(),
        (category, 0) => category.as_str().to_string(),
        (category, n) => format!("{}-{}", category.as_str(), n),
    }
}

/// Composite form key of an image or logo field.
pub fn composite_key(id: &str, field_ordinal: usize) -> String {
    format!("{}-{}", id, field_ordinal)
}

/// `_elementContent` key of an image or logo element.
pub fn layout_key(id: &str, layout_index: usize) -> String {
    format!("{}{}{}", id, LAYOUT_KEY_INFIX, layout_index)
}

/// The ordinals handed out for one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub position_key: String,
    pub category_ordinal: usize,
    /// `None` for elements left out of the form.
    pub field_ordinal: Option<usize>,
}

/// Running counters, one per category plus one for editable form fields.
#[derive(Debug, Clone, Default)]
pub struct IndexAllocator {
    counters: HashMap<Category, usize>,
    next_field: usize,
}

impl IndexAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out the next ordinals for an element of `category`.
    pub fn allocate(&mut self, category: Category, editable: bool) -> Allocation {
        let counter = self.counters.entry(category).or_insert(0);
        let category_ordinal = *counter;
        *counter += 1;

        let field_ordinal = editable.then(|| {
            let ordinal = self.next_field;
            self.next_field += 1;
            ordinal
        });

        Allocation {
            position_key: position_key(category, category_ordinal),
            category_ordinal,
            field_ordinal,
        }
    }

    /// Number of elements of `category` allocated so far.
    pub fn count(&self, category: Category) -> usize {
        self.counters.get(&category).copied().unwrap_or(0)
    }
}

/// One layout element with everything the resolver needs to know about it.
#[derive(Debug, Clone)]
pub struct PlannedElement<'a> {
    pub element: &'a LayoutElement,
    pub layout_index: usize,
    /// Role used for rendering; unlabeled elements get their type's fallback role.
    pub role: FieldRole,
    /// False for unlabeled non-shape elements.
    pub editable: bool,
    pub allocation: Allocation,
}

impl PlannedElement<'_> {
    /// Key under which the form stores this element's value.
    ///
    /// Image and logo fields use the composite key and have none when they are not part
    /// of the form. Shapes use [`super::constants::fill_key`]/`stroke_key` instead.
    pub fn form_key(&self) -> Option<String> {
        if self.element.is_media() {
            self.allocation
                .field_ordinal
                .map(|ordinal| composite_key(&self.element.id, ordinal))
        } else {
            Some(self.element.id.clone())
        }
    }

    /// Key under which resolved content stores this element's value.
    pub fn content_key(&self) -> String {
        if self.element.is_media() {
            layout_key(&self.element.id, self.layout_index)
        } else {
            self.element.id.clone()
        }
    }
}

/// Classifies and allocates every element of `elements`, in layout order.
pub fn plan_layout<'a>(elements: &'a [LayoutElement], rules: &RuleTable) -> Vec<PlannedElement<'a>> {
    let mut allocator = IndexAllocator::new();
    elements
        .iter()
        .enumerate()
        .map(|(layout_index, element)| {
            let editable = rules.classify_role(element).is_some();
            let role = rules.render_role(element);
            let allocation = allocator.allocate(role.category(), editable);
            PlannedElement {
                element,
                layout_index,
                role,
                editable,
                allocation,
            }
        })
        .collect()
}
