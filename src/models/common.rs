use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A single zone coordinate as stored by the template editor.
/// Templates saved by older editors keep numbers as strings (e.g. `"10.5"` or `"120px"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    /// A plain JSON number.
    Number(f64),
    /// A number stored as text.
    Text(String),
    /// Anything else (`true`, objects, ...). Always resolves to 0.
    Other(JsonValue),
}

impl Coordinate {
    /// Resolves the coordinate to pixels. Non-numeric values resolve to 0.
    pub fn to_px(&self) -> f64 {
        match self {
            Coordinate::Number(n) if n.is_finite() => *n,
            Coordinate::Text(s) => parse_leading_float(s).unwrap_or(0.0),
            _ => 0.0,
        }
    }
}

impl From<f64> for Coordinate {
    fn from(value: f64) -> Self {
        Coordinate::Number(value)
    }
}

impl From<&str> for Coordinate {
    fn from(value: &str) -> Self {
        Coordinate::Text(value.to_string())
    }
}

/// The rectangle a layout element occupies on the template canvas, as authored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Zone {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Coordinate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Coordinate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Coordinate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Coordinate>,
}

impl Zone {
    /// Parses every coordinate into pixels. Missing or non-numeric values become 0.
    pub fn to_rect(&self) -> Rect {
        let px = |c: &Option<Coordinate>| c.as_ref().map_or(0.0, Coordinate::to_px);
        Rect {
            x: px(&self.x),
            y: px(&self.y),
            width: px(&self.width),
            height: px(&self.height),
        }
    }
}

/// A positioned rectangle in pixels.
///
/// Deserialization goes through [`Zone`] so persisted rectangles holding numeric strings
/// are still accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Zone")]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

impl From<Zone> for Rect {
    fn from(zone: Zone) -> Self {
        zone.to_rect()
    }
}

/// Parses the longest leading decimal number of `input`, ignoring leading whitespace.
///
/// `"10.5px"` yields `10.5`, `"abc"` yields `None`. Exponents are accepted when complete.
pub fn parse_leading_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let int_digits = end - int_start;

    let mut frac_digits = 0;
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        frac_digits = frac_end - end - 1;
        if frac_digits > 0 {
            end = frac_end;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}
