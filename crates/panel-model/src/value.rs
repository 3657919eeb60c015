//! Loosely-typed values found in source columns and CNC parameter maps.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A column cell or a free-form parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl ParamValue {
    /// Numeric view of the value; text is parsed leniently (`,` as decimal separator).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Number(value) => Some(*value),
            ParamValue::Text(text) => text.trim().replace(',', ".").parse::<f64>().ok(),
            ParamValue::Flag(_) => None,
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            ParamValue::Flag(flag) => flag.to_string(),
            ParamValue::Number(value) => value.to_string(),
            ParamValue::Text(text) => text.trim().to_string(),
        }
    }

    /// True for empty or whitespace-only text.
    pub fn is_blank(&self) -> bool {
        matches!(self, ParamValue::Text(text) if text.trim().is_empty())
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Flag(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_parses_as_number() {
        assert_eq!(ParamValue::from("12,5").as_f64(), Some(12.5));
        assert_eq!(ParamValue::from("x").as_f64(), None);
        assert!(ParamValue::from("  ").is_blank());
        assert!(!ParamValue::Flag(false).is_blank());
    }

    #[test]
    fn untagged_deserialization() {
        let values: Vec<ParamValue> = serde_json::from_str(r#"[true, 4, "X"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                ParamValue::Flag(true),
                ParamValue::Number(4.0),
                ParamValue::Text("X".to_string())
            ]
        );
    }
}
