use crate::diff::formatting::{generate_json_diff, generate_readable_summary};
use crate::diff::structured::{Change, ChangeCollector};
use crate::models::content::ResolvedContent;
use serde_json::Value as JsonValue;
use treediff::diff;

use super::error::DiffError;

/// Builder for creating a `Comparer`.
pub struct ComparerBuilder {
    base: Option<ResolvedContent>,
    include_element_content: bool,
}

impl Default for ComparerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ComparerBuilder {
    pub fn new() -> Self {
        Self {
            base: None,
            include_element_content: true,
        }
    }

    /// Sets the base content to compare against.
    pub fn set_base(mut self, base: ResolvedContent) -> Self {
        self.base = Some(base);
        self
    }

    /// Whether `_elementContent` takes part in the comparison (default: yes).
    pub fn set_include_element_content(mut self, include: bool) -> Self {
        self.include_element_content = include;
        self
    }

    /// Fails if no base content was set.
    pub fn build(self) -> Result<Comparer, DiffError> {
        let base = self
            .base
            .ok_or_else(|| DiffError::MissingBase("call set_base before build".to_string()))?;
        Ok(Comparer {
            base,
            include_element_content: self.include_element_content,
        })
    }
}

/// Compares slide content against a stored base.
pub struct Comparer {
    base: ResolvedContent,
    include_element_content: bool,
}

impl Comparer {
    fn to_json(&self, content: &ResolvedContent) -> Result<JsonValue, DiffError> {
        let mut value = serde_json::to_value(content)?;
        if !self.include_element_content {
            if let Some(map) = value.as_object_mut() {
                map.remove("_elementContent");
            }
        }
        Ok(value)
    }

    /// Compares the base content against `other`.
    pub fn compare(&self, other: &ResolvedContent) -> Result<ComparisonResult, DiffError> {
        let base_val = self.to_json(&self.base)?;
        let other_val = self.to_json(other)?;

        let mut collector = ChangeCollector::new();
        diff(&base_val, &other_val, &mut collector);

        Ok(ComparisonResult {
            base: base_val,
            compared: other_val,
            changes: collector.changes,
        })
    }
}

/// Outcome of one comparison.
pub struct ComparisonResult {
    base: JsonValue,
    compared: JsonValue,
    changes: Vec<Change>,
}

impl ComparisonResult {
    pub fn get_structured_diff(&self) -> &[Change] {
        &self.changes
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Unified diff of the pretty-printed JSON of both sides.
    pub fn get_json_diff(&self) -> Result<String, DiffError> {
        generate_json_diff(&self.base, &self.compared)
    }

    /// One line per change, grouped by content bucket.
    pub fn get_readable_diff(&self) -> Result<String, DiffError> {
        generate_readable_summary(&self.changes)
    }
}
