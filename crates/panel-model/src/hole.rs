use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::edge::EdgeSide;
use crate::error::ModelError;
use crate::face::Face;

/// Hardware/hole pattern kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoleKind {
    Hinge,
    ShelfPin,
    Handle,
    Knob,
    DrawerSlide,
    CamLock,
    Dowel,
    System32,
    Custom,
}

impl HoleKind {
    pub const ALL: [HoleKind; 9] = [
        HoleKind::Hinge,
        HoleKind::ShelfPin,
        HoleKind::Handle,
        HoleKind::Knob,
        HoleKind::DrawerSlide,
        HoleKind::CamLock,
        HoleKind::Dowel,
        HoleKind::System32,
        HoleKind::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HoleKind::Hinge => "hinge",
            HoleKind::ShelfPin => "shelf_pin",
            HoleKind::Handle => "handle",
            HoleKind::Knob => "knob",
            HoleKind::DrawerSlide => "drawer_slide",
            HoleKind::CamLock => "cam_lock",
            HoleKind::Dowel => "dowel",
            HoleKind::System32 => "system_32",
            HoleKind::Custom => "custom",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            HoleKind::Hinge => "hinge",
            HoleKind::ShelfPin => "shelf-pin line",
            HoleKind::Handle => "handle",
            HoleKind::Knob => "knob",
            HoleKind::DrawerSlide => "drawer slide",
            HoleKind::CamLock => "cam lock",
            HoleKind::Dowel => "dowel",
            HoleKind::System32 => "system-32 line",
            HoleKind::Custom => "custom holes",
        }
    }

    /// Number of offsets the kind requires, when the kind fixes it.
    ///
    /// A handle is a two-point span; a knob is a single point.
    pub fn expected_offsets(&self) -> Option<usize> {
        match self {
            HoleKind::Handle => Some(2),
            HoleKind::Knob => Some(1),
            _ => None,
        }
    }
}

impl fmt::Display for HoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HoleKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        HoleKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == key)
            .ok_or_else(|| ModelError::UnknownHoleKind(s.to_string()))
    }
}

/// A group of holes drilled for one kind of hardware.
///
/// Offsets are measured along `ref_edge`, from the edge start or, when
/// `from_center` is set, from the edge midpoint. A hinge offset of `110` with
/// a count of `2` means one cup 110 mm from each end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolePatternSpec {
    pub kind: HoleKind,
    pub ref_edge: EdgeSide,
    pub offsets_mm: Vec<f64>,
    #[serde(default)]
    pub from_center: bool,
    /// Perpendicular distance from the reference edge to the hole centres.
    pub distance_from_edge_mm: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// Spacing between consecutive holes of a line (shelf pins, system 32).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth_mm: Option<f64>,
    #[serde(default)]
    pub face: Face,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl HolePatternSpec {
    pub fn new(
        kind: HoleKind,
        ref_edge: EdgeSide,
        offsets_mm: Vec<f64>,
        distance_from_edge_mm: f64,
    ) -> Self {
        Self {
            kind,
            ref_edge,
            offsets_mm,
            from_center: false,
            distance_from_edge_mm,
            count: None,
            pitch_mm: None,
            hardware_ref: None,
            diameter_mm: None,
            depth_mm: None,
            face: Face::Front,
            note: None,
        }
    }

    /// Offsets measured from the edge midpoint.
    #[must_use]
    pub fn centered(mut self) -> Self {
        self.from_center = true;
        self
    }

    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    #[must_use]
    pub fn with_pitch(mut self, pitch_mm: f64) -> Self {
        self.pitch_mm = Some(pitch_mm);
        self
    }

    #[must_use]
    pub fn with_diameter(mut self, diameter_mm: f64) -> Self {
        self.diameter_mm = Some(diameter_mm);
        self
    }

    #[must_use]
    pub fn with_depth(mut self, depth_mm: f64) -> Self {
        self.depth_mm = Some(depth_mm);
        self
    }

    #[must_use]
    pub fn with_hardware(mut self, hardware_ref: impl Into<String>) -> Self {
        self.hardware_ref = Some(hardware_ref.into());
        self
    }

    #[must_use]
    pub fn with_face(mut self, face: Face) -> Self {
        self.face = face;
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Number of holes the pattern stands for, when it can be known without
    /// the part dimensions.
    pub fn hole_count(&self) -> Option<u32> {
        if let Some(count) = self.count {
            return Some(count);
        }
        if self.pitch_mm.is_some() {
            return None;
        }
        u32::try_from(self.offsets_mm.len()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_str() {
        for kind in HoleKind::ALL {
            assert_eq!(kind.as_str().parse::<HoleKind>().unwrap(), kind);
        }
        assert_eq!("shelf pin".parse::<HoleKind>().unwrap(), HoleKind::ShelfPin);
    }

    #[test]
    fn hole_count_prefers_explicit_count() {
        let hinge = HolePatternSpec::new(HoleKind::Hinge, EdgeSide::L1, vec![110.0], 22.5)
            .with_count(2);
        assert_eq!(hinge.hole_count(), Some(2));

        let handle =
            HolePatternSpec::new(HoleKind::Handle, EdgeSide::W1, vec![-48.0, 48.0], 32.0).centered();
        assert_eq!(handle.hole_count(), Some(2));

        let line = HolePatternSpec::new(HoleKind::ShelfPin, EdgeSide::L1, vec![37.0], 37.0)
            .with_pitch(32.0);
        assert_eq!(line.hole_count(), None);
    }
}
