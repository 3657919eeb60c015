use serde::{Deserialize, Serialize};

use crate::edge::EdgeSet;

/// Edge banding applied to one or more edges of a part.
///
/// An empty edge set means "no edge banding" and is never materialized:
/// [`EdgeBandSpec::new`] returns `None` for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeBandSpec {
    pub edges: EdgeSet,
    /// Tape/material identifier (e.g. "PVC-WHITE-1").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tape_id: Option<String>,
    /// Tape thickness in mm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl EdgeBandSpec {
    pub fn new(edges: EdgeSet) -> Option<Self> {
        if edges.is_empty() {
            return None;
        }
        Some(Self {
            edges,
            tape_id: None,
            thickness_mm: None,
            remarks: None,
        })
    }

    #[must_use]
    pub fn with_tape(mut self, tape_id: impl Into<String>) -> Self {
        self.tape_id = Some(tape_id.into());
        self
    }

    #[must_use]
    pub fn with_thickness(mut self, thickness_mm: f64) -> Self {
        self.thickness_mm = Some(thickness_mm);
        self
    }

    #[must_use]
    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }

    /// Union of edges; tape, thickness and remarks keep the first value present.
    #[must_use]
    pub fn merge(self, other: EdgeBandSpec) -> Self {
        Self {
            edges: self.edges.union(other.edges),
            tape_id: self.tape_id.or(other.tape_id),
            thickness_mm: self.thickness_mm.or(other.thickness_mm),
            remarks: self.remarks.or(other.remarks),
        }
    }
}

/// Merge two optional edge-band specs.
pub fn merge_edgeband(a: Option<EdgeBandSpec>, b: Option<EdgeBandSpec>) -> Option<EdgeBandSpec> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.merge(b)),
        (a, b) => a.or(b),
    }
}
