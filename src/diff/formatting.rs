use super::error::DiffError;
use crate::diff::structured::{Change, ChangeType, ValueRepr};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use similar::TextDiff;
use std::fmt::Write;

/// Unified diff of the pretty-printed JSON of two content values.
pub(crate) fn generate_json_diff(old: &JsonValue, new: &JsonValue) -> Result<String, DiffError> {
    let old_str = serde_json::to_string_pretty(old)?;
    let new_str = serde_json::to_string_pretty(new)?;

    let mut output = String::new();
    if old_str == new_str {
        writeln!(output, "--- a/content.json")?;
        writeln!(output, "+++ b/content.json")?;
        output.push_str("\nNo changes detected.\n");
        return Ok(output);
    }

    let diff = TextDiff::from_lines(&old_str, &new_str);
    write!(
        output,
        "{}",
        diff.unified_diff()
            .context_radius(3)
            .header("a/content.json", "b/content.json")
    )?;
    Ok(output)
}

/// Top-level content key of a change path (`titles[0]` -> `titles`).
fn root_key(path: &str) -> &str {
    let end = path.find(['.', '[']).unwrap_or(path.len());
    &path[..end]
}

fn section_name(root: &str) -> &'static str {
    match root {
        "titles" => "Titles",
        "descriptions" => "Descriptions",
        "bullets" => "Bullets",
        "logos" => "Logos",
        "_elementContent" => "Elements",
        _ => "Fields",
    }
}

fn show(value: &Option<ValueRepr>) -> String {
    value
        .as_ref()
        .map_or_else(|| "?".to_string(), ValueRepr::format_for_display)
}

fn describe(change: &Change) -> String {
    match change.change_type {
        ChangeType::Added => format!("- Added `{}`: {}", change.path, show(&change.new_value)),
        ChangeType::Removed => format!("- Removed `{}`: {}", change.path, show(&change.old_value)),
        ChangeType::Modified => format!(
            "- Modified `{}`: {} -> {}",
            change.path,
            show(&change.old_value),
            show(&change.new_value)
        ),
    }
}

/// Human-readable summary, one `## Section` per content bucket in first-seen order.
pub(crate) fn generate_readable_summary(changes: &[Change]) -> Result<String, DiffError> {
    let mut output = String::new();
    if changes.is_empty() {
        output.push_str("No changes.\n");
        return Ok(output);
    }

    let mut sections: IndexMap<&'static str, Vec<String>> = IndexMap::new();
    for change in changes {
        sections
            .entry(section_name(root_key(&change.path)))
            .or_default()
            .push(describe(change));
    }

    let (added, removed, modified) =
        changes
            .iter()
            .fold((0, 0, 0), |(a, r, m), c| match c.change_type {
                ChangeType::Added => (a + 1, r, m),
                ChangeType::Removed => (a, r + 1, m),
                ChangeType::Modified => (a, r, m + 1),
            });
    writeln!(
        output,
        "{} changes ({} added, {} removed, {} modified)",
        changes.len(),
        added,
        removed,
        modified
    )?;

    for (section, lines) in sections {
        writeln!(output, "\n## {}", section)?;
        for line in lines {
            writeln!(output, "{}", line)?;
        }
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn change(path: &str, change_type: ChangeType, old: Option<&str>, new: Option<&str>) -> Change {
        Change {
            path: path.to_string(),
            change_type,
            old_value: old.map(|s| ValueRepr::String(s.to_string())),
            new_value: new.map(|s| ValueRepr::String(s.to_string())),
        }
    }

    #[test]
    fn test_readable_summary_groups_by_bucket() {
        let changes = vec![
            change("titles[0]", ChangeType::Modified, Some("Acme"), Some("Acme Rockets")),
            change("title", ChangeType::Modified, Some("Acme"), Some("Acme Rockets")),
            change("bullets[1]", ChangeType::Added, None, Some("Cheap")),
            change("_elementContent.hero-layout-3", ChangeType::Removed, Some("https://img"), None),
        ];

        let summary = generate_readable_summary(&changes).unwrap();

        assert_eq!(
            summary,
            "4 changes (1 added, 1 removed, 2 modified)\n\
             \n## Titles\n- Modified `titles[0]`: \"Acme\" -> \"Acme Rockets\"\n\
             \n## Fields\n- Modified `title`: \"Acme\" -> \"Acme Rockets\"\n\
             \n## Bullets\n- Added `bullets[1]`: \"Cheap\"\n\
             \n## Elements\n- Removed `_elementContent.hero-layout-3`: \"https://img\"\n"
        );
    }

    #[test]
    fn test_json_diff() {
        let old = json!({ "titles": ["Acme"] });
        let new = json!({ "titles": ["Acme Rockets"] });

        let diff = generate_json_diff(&old, &new).unwrap();
        assert!(diff.contains("--- a/content.json"));
        assert!(diff.contains("+++ b/content.json"));
        assert!(diff.contains("-    \"Acme\""));
        assert!(diff.contains("+    \"Acme Rockets\""));

        let same = generate_json_diff(&old, &old).unwrap();
        assert!(same.ends_with("No changes detected.\n"));
    }
}
