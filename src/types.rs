//! Element model for loaded JSON.
//!
//! Every item of the top-level array is surfaced to transforms as an [`Element`], the
//! `serde_json` tagged union. Transforms narrow it to the shape they expect.

use std::fmt;

/// One JSON-decoded value from the top-level array.
pub type Element = serde_json::Value;

/// The variant of an [`Element`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// `null`.
    Null,
    /// `true` / `false`.
    Bool,
    /// Any JSON number.
    Number,
    /// A JSON string.
    String,
    /// A JSON array.
    Array,
    /// A JSON object.
    Object,
}

impl ElementKind {
    /// Classify an element.
    pub fn of(element: &Element) -> Self {
        match element {
            Element::Null => Self::Null,
            Element::Bool(_) => Self::Bool,
            Element::Number(_) => Self::Number,
            Element::String(_) => Self::String,
            Element::Array(_) => Self::Array,
            Element::Object(_) => Self::Object,
        }
    }

    /// Lowercase JSON type name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::ElementKind;

    #[test]
    fn classifies_every_json_variant() {
        let cases = [
            (json!(null), ElementKind::Null),
            (json!(false), ElementKind::Bool),
            (json!(1.5), ElementKind::Number),
            (json!("x"), ElementKind::String),
            (json!([1, 2]), ElementKind::Array),
            (json!({"a": 1}), ElementKind::Object),
        ];
        for (v, kind) in cases {
            assert_eq!(ElementKind::of(&v), kind);
        }
        assert_eq!(ElementKind::Object.to_string(), "object");
    }
}
