//! Template content resolution.
//!
//! Turns a template's declarative layout plus the editor's flat form state into
//! renderable slide content, and back.
//!
//! # Pipeline
//! *   [`rules`] classifies each layout element (title, description, bullet, logo, image,
//!     data, shape) from its type and label.
//! *   [`allocator`] hands out per-category position keys and form-field ordinals in
//!     layout order. Every other step walks the same [`allocator::plan_layout`] output.
//! *   [`content`] builds [`Resolution`]s; [`legacy`] handles templates that predate
//!     `layout.elements`.
//! *   [`form`] seeds form state from template defaults or from a saved slide.
//! *   [`merge`] folds generated content into form state.
//!
//! Resolution never fails: missing values resolve to placeholders, defaults or empty
//! values.

pub mod allocator;
pub mod constants;
pub mod content;
pub mod form;
pub mod legacy;
pub mod merge;
pub mod rules;

pub use allocator::{plan_layout, position_key, Allocation, IndexAllocator, PlannedElement};
pub use content::{resolve, resolve_template, Resolution};
pub use form::{form_fields, initialize, template_defaults, FormField};
pub use legacy::resolve_legacy;
pub use merge::merge_generated;
pub use rules::{classify, classify_role, Category, FieldRole, RuleTable, DEFAULT_RULES};
