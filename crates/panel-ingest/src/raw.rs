//! Raw, not-yet-normalized input per service family.

use std::collections::BTreeMap;

use panel_model::{CncOperation, EdgeSet, EdgeSide, PartDimensions, ParamValue, ServiceFamily};
use serde::{Deserialize, Serialize};

/// Tokens that mean "nothing here" in any family.
const BLANK_MARKERS: &[&str] = &["", "-", "0", "NONE", "N/A", "NA"];

/// True for an explicit "no service" marker (`-`, `0`, `NONE`, ...).
pub fn is_blank_marker(text: &str) -> bool {
    let upper = text.trim().to_uppercase();
    BLANK_MARKERS.contains(&upper.as_str())
}

/// Raw input for one family: free-text tokens, source columns and
/// structured hints that arrived already separated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFields<H> {
    #[serde(default)]
    pub tokens: Vec<String>,
    /// Source header (as written) to cell value.
    #[serde(default)]
    pub columns: BTreeMap<String, ParamValue>,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub hints: Option<H>,
}

impl<H> Default for RawFields<H> {
    fn default() -> Self {
        Self {
            tokens: Vec::new(),
            columns: BTreeMap::new(),
            hints: None,
        }
    }
}

impl<H> RawFields<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw fields holding a single text token.
    pub fn text(token: impl Into<String>) -> Self {
        Self::new().with_token(token)
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.tokens.push(token.into());
        self
    }

    #[must_use]
    pub fn with_column(mut self, header: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.columns.insert(header.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_hints(mut self, hints: H) -> Self {
        self.hints = Some(hints);
        self
    }

    /// No tokens, no columns and no hints at all.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.columns.is_empty() && self.hints.is_none()
    }

    /// Nothing but blanks: empty, or only blank cells and whitespace tokens.
    ///
    /// Explicit markers such as `-` or `NONE` do not count as blank.
    pub fn is_blank(&self) -> bool {
        self.hints.is_none()
            && self.tokens.iter().all(|token| token.trim().is_empty())
            && self.columns.values().all(ParamValue::is_blank)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeHints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<EdgeSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tape_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness_mm: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrooveHints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<EdgeSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_mm: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrillingHints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hinge_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hinge_offset_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hinge_edge: Option<EdgeSide>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CncHints {
    /// Operations that arrived fully structured.
    #[serde(default)]
    pub operations: Vec<CncOperation>,
}

/// Raw input for one part, split by family.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<PartDimensions>,
    #[serde(default)]
    pub edgeband: RawFields<EdgeHints>,
    #[serde(default)]
    pub groove: RawFields<GrooveHints>,
    #[serde(default)]
    pub drilling: RawFields<DrillingHints>,
    #[serde(default)]
    pub cnc: RawFields<CncHints>,
    /// Columns whose header no family claimed. A dialect may still know them.
    #[serde(default)]
    pub unmapped: BTreeMap<String, ParamValue>,
}

impl RawPart {
    /// Append a text token to one family.
    pub fn push_token(&mut self, family: ServiceFamily, token: impl Into<String>) {
        let token = token.into();
        match family {
            ServiceFamily::EdgeBand => self.edgeband.tokens.push(token),
            ServiceFamily::Groove => self.groove.tokens.push(token),
            ServiceFamily::Drilling => self.drilling.tokens.push(token),
            ServiceFamily::Cnc => self.cnc.tokens.push(token),
        }
    }

    /// Record a source column for one family.
    pub fn push_column(
        &mut self,
        family: ServiceFamily,
        header: impl Into<String>,
        value: ParamValue,
    ) {
        let header = header.into();
        match family {
            ServiceFamily::EdgeBand => self.edgeband.columns.insert(header, value),
            ServiceFamily::Groove => self.groove.columns.insert(header, value),
            ServiceFamily::Drilling => self.drilling.columns.insert(header, value),
            ServiceFamily::Cnc => self.cnc.columns.insert(header, value),
        };
    }

    pub fn tokens(&self, family: ServiceFamily) -> &[String] {
        match family {
            ServiceFamily::EdgeBand => &self.edgeband.tokens,
            ServiceFamily::Groove => &self.groove.tokens,
            ServiceFamily::Drilling => &self.drilling.tokens,
            ServiceFamily::Cnc => &self.cnc.tokens,
        }
    }

    pub fn columns(&self, family: ServiceFamily) -> &BTreeMap<String, ParamValue> {
        match family {
            ServiceFamily::EdgeBand => &self.edgeband.columns,
            ServiceFamily::Groove => &self.groove.columns,
            ServiceFamily::Drilling => &self.drilling.columns,
            ServiceFamily::Cnc => &self.cnc.columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_markers() {
        for marker in ["", " ", "-", "0", "none", "N/A", "na"] {
            assert!(is_blank_marker(marker), "{marker:?}");
        }
        assert!(!is_blank_marker("2L"));
    }

    #[test]
    fn explicit_marker_is_not_blank() {
        let blank: RawFields<EdgeHints> = RawFields::new().with_column("L1", "");
        assert!(blank.is_blank());
        let marked: RawFields<EdgeHints> = RawFields::text("-");
        assert!(!marked.is_blank());
    }
}
