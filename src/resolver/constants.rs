//! Defines constants used throughout content resolution.

// Shape colors used when neither the form nor the element config provides one.
pub const DEFAULT_SHAPE_FILL: &str = "#3b82f6";
pub const DEFAULT_SHAPE_STROKE: &str = "#000000";

// Shown for data elements without a value or default.
pub const DEFAULT_DATA_PLACEHOLDER: &str = "[Data]";

// Form key suffixes of a shape's colors.
pub const FILL_SUFFIX: &str = "_fill";
pub const STROKE_SUFFIX: &str = "_stroke";

// Infix of the `_elementContent` key of image and logo elements.
pub const LAYOUT_KEY_INFIX: &str = "-layout-";

// Flat keys read and written by the schema-only (pre-layout) templates.
pub const TITLE_KEY: &str = "title";
pub const DESCRIPTION_KEY: &str = "description";
pub const TAGLINE_KEY: &str = "tagline";
pub const BULLETS_KEY: &str = "bullets";
pub const FEATURES_KEY: &str = "features";
pub const STATS_KEY: &str = "stats";
pub const CONTACT_KEY: &str = "contact";

// Multi-value form keys written when a saved slide is reopened.
pub const TITLES_KEY: &str = "titles";
pub const DESCRIPTIONS_KEY: &str = "descriptions";
pub const LOGOS_KEY: &str = "logos";

/// Form key of a shape's fill color.
pub fn fill_key(id: &str) -> String {
    format!("{}{}", id, FILL_SUFFIX)
}

/// Form key of a shape's stroke color.
pub fn stroke_key(id: &str) -> String {
    format!("{}{}", id, STROKE_SUFFIX)
}
