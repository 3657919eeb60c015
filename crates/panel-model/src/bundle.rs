use serde::{Deserialize, Serialize};

use crate::cnc::CncOperation;
use crate::edge::EdgeSide;
use crate::edgeband::{EdgeBandSpec, merge_edgeband};
use crate::family::ServiceFamily;
use crate::groove::GrooveSpec;
use crate::hole::HolePatternSpec;

/// All machining services attached to one part.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartServices {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edgeband: Option<EdgeBandSpec>,
    #[serde(default)]
    pub grooves: Vec<GrooveSpec>,
    #[serde(default)]
    pub holes: Vec<HolePatternSpec>,
    #[serde(default)]
    pub cnc: Vec<CncOperation>,
}

impl PartServices {
    pub fn is_empty(&self) -> bool {
        ServiceFamily::ALL
            .iter()
            .all(|family| self.family_is_empty(*family))
    }

    pub fn family_is_empty(&self, family: ServiceFamily) -> bool {
        match family {
            ServiceFamily::EdgeBand => self.edgeband.is_none(),
            ServiceFamily::Groove => self.grooves.is_empty(),
            ServiceFamily::Drilling => self.holes.is_empty(),
            ServiceFamily::Cnc => self.cnc.is_empty(),
        }
    }

    /// Combine two bundles: edge banding merges, list families concatenate.
    #[must_use]
    pub fn merge(mut self, other: PartServices) -> PartServices {
        self.edgeband = merge_edgeband(self.edgeband, other.edgeband);
        self.grooves.extend(other.grooves);
        self.holes.extend(other.holes);
        self.cnc.extend(other.cnc);
        self
    }

    pub fn merge_all<I>(bundles: I) -> PartServices
    where
        I: IntoIterator<Item = PartServices>,
    {
        bundles
            .into_iter()
            .fold(PartServices::default(), PartServices::merge)
    }
}

/// Finished dimensions of a part, used by validation and defaults that
/// depend on size (hinge count by door height).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartDimensions {
    pub length_mm: f64,
    pub width_mm: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness_mm: Option<f64>,
}

impl PartDimensions {
    pub fn new(length_mm: f64, width_mm: f64) -> Self {
        Self {
            length_mm,
            width_mm,
            thickness_mm: None,
        }
    }

    #[must_use]
    pub fn with_thickness(mut self, thickness_mm: f64) -> Self {
        self.thickness_mm = Some(thickness_mm);
        self
    }

    /// Length of the given edge.
    pub fn edge_length(&self, side: EdgeSide) -> f64 {
        if side.is_long() {
            self.length_mm
        } else {
            self.width_mm
        }
    }

    /// Distance between the given edge and the edge opposite it.
    pub fn span_from(&self, side: EdgeSide) -> f64 {
        if side.is_long() {
            self.width_mm
        } else {
            self.length_mm
        }
    }
}
