use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::edge::{EdgeSet, EdgeSide};
use crate::error::ModelError;
use crate::face::Face;

/// Start/end offsets along the groove for a stopped (non-through) groove.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoppedRange {
    pub start_mm: f64,
    pub end_mm: f64,
}

/// A single groove running parallel to one reference edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrooveSpec {
    /// Reference edge the groove runs along.
    pub side: EdgeSide,
    /// Perpendicular distance from the reference edge to the groove, in mm.
    pub offset_mm: f64,
    pub width_mm: f64,
    pub depth_mm: f64,
    #[serde(default)]
    pub face: Face,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stopped: Option<StoppedRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl GrooveSpec {
    pub fn new(side: EdgeSide, width_mm: f64, depth_mm: f64, offset_mm: f64) -> Self {
        Self {
            side,
            offset_mm,
            width_mm,
            depth_mm,
            face: Face::Front,
            stopped: None,
            note: None,
        }
    }

    #[must_use]
    pub fn with_face(mut self, face: Face) -> Self {
        self.face = face;
        self
    }

    #[must_use]
    pub fn with_stopped(mut self, start_mm: f64, end_mm: f64) -> Self {
        self.stopped = Some(StoppedRange { start_mm, end_mm });
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn is_through(&self) -> bool {
        self.stopped.is_none()
    }

    /// True when two grooves share everything except the reference edge.
    pub fn same_profile(&self, other: &GrooveSpec) -> bool {
        self.offset_mm == other.offset_mm
            && self.width_mm == other.width_mm
            && self.depth_mm == other.depth_mm
            && self.face == other.face
            && self.stopped == other.stopped
    }

    /// Expand a groove target into one spec per implied edge.
    pub fn expand(
        target: GrooveTarget,
        width_mm: f64,
        depth_mm: f64,
        offset_mm: f64,
        face: Face,
    ) -> Vec<GrooveSpec> {
        target
            .edges()
            .iter()
            .map(|side| GrooveSpec::new(side, width_mm, depth_mm, offset_mm).with_face(face))
            .collect()
    }
}

/// The edges a single groove code applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum GrooveTarget {
    /// All four edges.
    All,
    /// Both long edges.
    Long,
    /// Both width edges.
    Width,
    Side(EdgeSide),
}

impl GrooveTarget {
    pub fn edges(&self) -> EdgeSet {
        match self {
            GrooveTarget::All => EdgeSet::ALL,
            GrooveTarget::Long => EdgeSet::LONG,
            GrooveTarget::Width => EdgeSet::WIDTH,
            GrooveTarget::Side(side) => EdgeSet::single(*side),
        }
    }

    /// The target covering exactly `edges`, if one exists.
    pub fn from_edges(edges: EdgeSet) -> Option<GrooveTarget> {
        if edges == EdgeSet::ALL {
            return Some(GrooveTarget::All);
        }
        if edges == EdgeSet::LONG {
            return Some(GrooveTarget::Long);
        }
        if edges == EdgeSet::WIDTH {
            return Some(GrooveTarget::Width);
        }
        if edges.len() == 1 {
            return edges.iter().next().map(GrooveTarget::Side);
        }
        None
    }

    /// Token used inside groove shortcodes (`ALL`, `L`, `W`, `L1`, ...).
    pub fn as_code(&self) -> &'static str {
        match self {
            GrooveTarget::All => "ALL",
            GrooveTarget::Long => "L",
            GrooveTarget::Width => "W",
            GrooveTarget::Side(side) => side.as_str(),
        }
    }
}

impl fmt::Display for GrooveTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

impl FromStr for GrooveTarget {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ALL" | "4" | "4S" => Ok(GrooveTarget::All),
            "L" | "2L" => Ok(GrooveTarget::Long),
            "W" | "2W" => Ok(GrooveTarget::Width),
            other => other
                .parse::<EdgeSide>()
                .map(GrooveTarget::Side)
                .map_err(|_| ModelError::UnknownGrooveTarget(s.to_string())),
        }
    }
}

impl From<GrooveTarget> for String {
    fn from(target: GrooveTarget) -> Self {
        target.as_code().to_string()
    }
}

impl TryFrom<String> for GrooveTarget {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_target_expands_to_four_grooves() {
        let grooves = GrooveSpec::expand(GrooveTarget::All, 4.0, 8.0, 12.0, Face::Front);
        assert_eq!(grooves.len(), 4);
        assert!(grooves.iter().all(|g| g.width_mm == 4.0 && g.offset_mm == 12.0));
    }

    #[test]
    fn target_from_edges() {
        assert_eq!(GrooveTarget::from_edges(EdgeSet::LONG), Some(GrooveTarget::Long));
        assert_eq!(
            GrooveTarget::from_edges(EdgeSet::single(EdgeSide::W2)),
            Some(GrooveTarget::Side(EdgeSide::W2))
        );
        let odd: EdgeSet = [EdgeSide::L1, EdgeSide::W1].into_iter().collect();
        assert_eq!(GrooveTarget::from_edges(odd), None);
    }

    #[test]
    fn target_serializes_as_code() {
        let json = serde_json::to_string(&GrooveTarget::Side(EdgeSide::W2)).unwrap();
        assert_eq!(json, "\"W2\"");
        let target: GrooveTarget = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(target, GrooveTarget::All);
    }
}
