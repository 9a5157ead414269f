use similar::{ChangeTag, TextDiff};
use std::fmt::Write;

/// Unified diff of two Markdown deck outlines, prefixed by a summary of line counts.
///
/// # Arguments
/// * `base_text` - The earlier outline, e.g. from [`crate::converters::markdown::deck_to_markdown`].
/// * `changed_text` - The later outline.
/// * `base_filename` - Name of the old side in the diff header (e.g. "a/deck.md").
/// * `changed_filename` - Name of the new side in the diff header (e.g. "b/deck.md").
pub fn generate_outline_diff(
    base_text: &str,
    changed_text: &str,
    base_filename: &str,
    changed_filename: &str,
) -> String {
    let diff = TextDiff::from_lines(base_text, changed_text);

    let (added_lines, removed_lines) =
        diff.iter_all_changes()
            .fold((0, 0), |(added, removed), change| match change.tag() {
                ChangeTag::Insert => (added + 1, removed),
                ChangeTag::Delete => (added, removed + 1),
                ChangeTag::Equal => (added, removed),
            });

    let mut output = format!(
        "## Summary of Changes (Outline)\n\n- Lines Added: {}\n- Lines Removed: {}\n\n---\n\n",
        added_lines, removed_lines
    );
    // Writing into a String cannot fail.
    let _ = write!(
        output,
        "{}",
        diff.unified_diff().header(base_filename, changed_filename)
    );
    output
}
