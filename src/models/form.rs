use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

/// A single form value: free text, or a list of strings (bullets, stats, logos).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    /// Converts an arbitrary JSON value into a form value.
    /// Numbers and booleans become text; `null` and objects have no form representation.
    pub fn from_json(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::String(s) => Some(FieldValue::Text(s.clone())),
            JsonValue::Number(n) => Some(FieldValue::Text(n.to_string())),
            JsonValue::Bool(b) => Some(FieldValue::Text(b.to_string())),
            JsonValue::Array(items) => Some(FieldValue::List(
                items.iter().filter_map(scalar_to_string).collect(),
            )),
            JsonValue::Null | JsonValue::Object(_) => None,
        }
    }

    /// True for empty/whitespace text and for lists with no non-blank entry.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::List(items) => items.iter().all(|s| s.trim().is_empty()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::List(_) => None,
        }
    }

    /// The text itself, or the first list entry.
    pub fn first_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::List(items) => items.first().map(String::as_str),
        }
    }

    /// Text values become a one-element list; empty text becomes an empty list.
    pub fn into_list(self) -> Vec<String> {
        match self {
            FieldValue::Text(s) if s.is_empty() => Vec::new(),
            FieldValue::Text(s) => vec![s],
            FieldValue::List(items) => items,
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            FieldValue::Text(s) => JsonValue::String(s.clone()),
            FieldValue::List(items) => {
                JsonValue::Array(items.iter().cloned().map(JsonValue::String).collect())
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

fn scalar_to_string(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Accepts a single value or an array and keeps only the scalar entries as strings.
pub(crate) fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(match value {
        JsonValue::Array(items) => items.iter().filter_map(scalar_to_string).collect(),
        JsonValue::Null => Vec::new(),
        other => scalar_to_string(&other).into_iter().collect(),
    })
}

/// Treats an explicit `null` like a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts any JSON value for an optional form value (`defaultValue` and friends).
pub(crate) fn lenient_field_value<'de, D>(deserializer: D) -> Result<Option<FieldValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(FieldValue::from_json(&value))
}

/// The live key/value store behind the content-customization form.
///
/// Keys are element ids, composite image keys (`"{id}-{ordinal}"`) or shape color keys
/// (`"{id}_fill"`, `"{id}_stroke"`). Insertion order is kept so the form renders stably.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormState(IndexMap<String, FieldValue>);

impl<'de> Deserialize<'de> for FormState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = IndexMap::<String, JsonValue>::deserialize(deserializer)?;
        Ok(FormState(
            raw.into_iter()
                .filter_map(|(key, value)| FieldValue::from_json(&value).map(|v| (key, v)))
                .collect(),
        ))
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    /// Non-blank value stored under `key`.
    pub fn get_filled(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key).filter(|v| !v.is_blank())
    }

    /// Non-blank text (or first list entry) stored under `key`.
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get_filled(key)
            .and_then(FieldValue::first_text)
            .filter(|s| !s.trim().is_empty())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Removes `key`, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.0.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when any entry is non-blank and differs from the value seeded in `defaults`.
    pub fn has_meaningful_values(&self, defaults: &FormState) -> bool {
        self.0
            .iter()
            .any(|(key, value)| !value.is_blank() && defaults.get(key) != Some(value))
    }
}

impl FromIterator<(String, FieldValue)> for FormState {
    fn from_iter<T: IntoIterator<Item = (String, FieldValue)>>(iter: T) -> Self {
        FormState(iter.into_iter().collect())
    }
}
