use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use treediff::{value::Key, Delegate};

/// Short view of a changed value. Arrays and objects are summarized.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum ValueRepr {
    String(String),
    Number(serde_json::Number),
    Boolean(bool),
    Null,
    Array(usize),
    Object(usize),
}

impl ValueRepr {
    fn from_json_value(val: &JsonValue) -> Self {
        match val {
            JsonValue::Null => ValueRepr::Null,
            JsonValue::Bool(b) => ValueRepr::Boolean(*b),
            JsonValue::Number(n) => ValueRepr::Number(n.clone()),
            JsonValue::String(s) => ValueRepr::String(s.clone()),
            JsonValue::Array(items) => ValueRepr::Array(items.len()),
            JsonValue::Object(map) => ValueRepr::Object(map.len()),
        }
    }

    /// Formats the value for a one-line summary. Strings are quoted and escaped.
    pub fn format_for_display(&self) -> String {
        match self {
            ValueRepr::String(s) => {
                let escaped = s
                    .replace('\\', "\\\\") // backslash first
                    .replace('\n', "\\n")
                    .replace('\t', "\\t")
                    .replace('"', "\\\"");
                format!("\"{}\"", escaped)
            }
            ValueRepr::Number(n) => n.to_string(),
            ValueRepr::Boolean(b) => b.to_string(),
            ValueRepr::Null => "null".to_string(),
            ValueRepr::Array(len) => format!("[{} items]", len),
            ValueRepr::Object(len) => format!("{{{} keys}}", len),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeType {
    Added,
    Removed,
    Modified,
}

/// One difference between two content values.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Change {
    /// Dotted path with bracketed indices, e.g. `titles[1]` or `_elementContent.s1.fill`.
    pub path: String,
    pub change_type: ChangeType,
    /// None for `Added`.
    pub old_value: Option<ValueRepr>,
    /// None for `Removed`.
    pub new_value: Option<ValueRepr>,
}

/// `treediff` delegate collecting leaf changes into `Vec<Change>`.
#[derive(Debug, Default)]
pub(crate) struct ChangeCollector {
    pub(crate) changes: Vec<Change>,
    current_path: Vec<String>,
}

impl ChangeCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn segment(&self, key: &Key) -> String {
        match key {
            Key::String(s) if self.current_path.is_empty() => s.clone(),
            Key::String(s) => format!(".{}", s),
            Key::Index(i) => format!("[{}]", i),
        }
    }

    /// Current path, extended by `key` for additions and removals, which `treediff`
    /// reports on the parent.
    fn format_path(&self, key: Option<&Key>) -> String {
        let mut path = self.current_path.concat();
        if let Some(key) = key {
            path.push_str(&self.segment(key));
        }
        path
    }

    fn record(
        &mut self,
        change_type: ChangeType,
        key: Option<&Key>,
        old: Option<&JsonValue>,
        new: Option<&JsonValue>,
    ) {
        self.changes.push(Change {
            path: self.format_path(key),
            change_type,
            old_value: old.map(ValueRepr::from_json_value),
            new_value: new.map(ValueRepr::from_json_value),
        });
    }
}

impl<'a> Delegate<'a, Key, JsonValue> for ChangeCollector {
    fn push(&mut self, segment: &Key) {
        let segment = self.segment(segment);
        self.current_path.push(segment);
    }

    fn pop(&mut self) {
        self.current_path.pop();
    }

    fn removed<'b>(&mut self, key: &'b Key, value: &'a JsonValue) {
        self.record(ChangeType::Removed, Some(key), Some(value), None);
    }

    fn added<'b>(&mut self, key: &'b Key, value: &'a JsonValue) {
        self.record(ChangeType::Added, Some(key), None, Some(value));
    }

    fn modified(&mut self, old: &'a JsonValue, new: &'a JsonValue) {
        self.record(ChangeType::Modified, None, Some(old), Some(new));
    }
}
