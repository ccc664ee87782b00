//! Per-language content tree and dotted key resolution

use serde_json::Value;

/// A parsed language dictionary.
///
/// Values are strings, arrays of strings, arrays of infographic records or
/// nested mappings. A dictionary is immutable once loaded and belongs to the
/// render pass that fetched it.
#[derive(Debug, Clone, PartialEq)]
pub struct Dictionary {
    root: Value,
}

impl Dictionary {
    /// Wrap an already parsed JSON value
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Parse a dictionary from JSON bytes
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes).map(Self::from_value)
    }

    /// Parse a dictionary from JSON text
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text).map(Self::from_value)
    }

    /// The whole content tree
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Resolve a dotted path such as `hero.title`.
    ///
    /// Segments descend through objects by key; a canonical decimal segment
    /// (`0`, `12`, never `01` or `+1`) also indexes into an array. Any missing
    /// segment, or an intermediate value that is neither an object nor an
    /// array, yields `None`.
    pub fn resolve(&self, path: &str) -> Option<&Value> {
        path.split('.').try_fold(&self.root, |node, segment| match node {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => array_index(segment).and_then(|i| items.get(i)),
            _ => None,
        })
    }

    /// Resolve a path and render it as display text when it is a scalar
    pub fn resolve_text(&self, path: &str) -> Option<String> {
        self.resolve(path).and_then(scalar_text)
    }

    /// Resolve a path that must point at an array
    pub fn resolve_array(&self, path: &str) -> Option<&[Value]> {
        match self.resolve(path)? {
            Value::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

/// Array position named by `segment`, accepting only canonical decimal form
fn array_index(segment: &str) -> Option<usize> {
    let digits = !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit());
    if !digits || (segment.len() > 1 && segment.starts_with('0')) {
        return None;
    }
    segment.parse().ok()
}

/// Display text for a scalar JSON value.
///
/// Strings are returned verbatim, numbers and booleans in their JSON form.
/// `null`, arrays and objects have no display text.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
