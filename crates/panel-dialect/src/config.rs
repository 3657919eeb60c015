//! Dialect configuration data.
//!
//! Everything here is plain serde data so a dialect can be stored, diffed and
//! shipped between processes. Executable behaviour lives in
//! [`crate::rules`] and is rebuilt from this data when a [`crate::Dialect`]
//! is constructed.

use std::collections::BTreeMap;

use panel_model::{EdgeSide, Face, HoleKind, ServiceFamily};
use serde::{Deserialize, Serialize};

use crate::rules::PatternRule;

/// Canonical meaning of a source column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnKey {
    L1,
    L2,
    W1,
    W2,
    /// Both long edges.
    Long,
    /// Both width edges.
    Width,
    /// All four edges.
    All,
    /// A column holding a code, a phrase or a yes/no mark for the family.
    Code,
    Tape,
    Thickness,
    GrooveWidth,
    Depth,
    Offset,
    Hinge,
    ShelfPin,
    Handle,
    Knob,
    Slide,
    Radius,
}

impl ColumnKey {
    /// The single edge named by an individual edge column.
    pub fn edge_side(&self) -> Option<EdgeSide> {
        match self {
            ColumnKey::L1 => Some(EdgeSide::L1),
            ColumnKey::L2 => Some(EdgeSide::L2),
            ColumnKey::W1 => Some(EdgeSide::W1),
            ColumnKey::W2 => Some(EdgeSide::W2),
            _ => None,
        }
    }

    /// The hardware kind a drilling column switches on.
    pub fn hole_kind(&self) -> Option<HoleKind> {
        match self {
            ColumnKey::Hinge => Some(HoleKind::Hinge),
            ColumnKey::ShelfPin => Some(HoleKind::ShelfPin),
            ColumnKey::Handle => Some(HoleKind::Handle),
            ColumnKey::Knob => Some(HoleKind::Knob),
            ColumnKey::Slide => Some(HoleKind::DrawerSlide),
            _ => None,
        }
    }
}

/// Vocabulary shared by all four families.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// External token (upper case) to canonical code or preset name.
    pub aliases: BTreeMap<String, String>,
    /// Marks read as "yes" in flag columns (upper case).
    pub yes_values: Vec<String>,
    /// Marks read as "no" in flag columns (upper case).
    pub no_values: Vec<String>,
    /// Code applied when the family's input is entirely blank.
    pub default_if_blank: Option<String>,
    /// Source header (upper case) to canonical column.
    pub columns: BTreeMap<String, ColumnKey>,
    /// Organization-defined pattern rules.
    pub rules: Vec<PatternRule>,
}

/// One family's slice of a dialect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyDialect<P, D> {
    #[serde(flatten)]
    pub vocabulary: Vocabulary,
    /// Named presets (upper-case names).
    #[serde(default = "BTreeMap::new")]
    pub presets: BTreeMap<String, P>,
    pub defaults: D,
}

/// A named edge-band preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgePreset {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tape_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness_mm: Option<f64>,
}

/// A named groove preset; depth and face fall back to the family defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroovePreset {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face: Option<Face>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A named hardware pattern; unset geometry comes from the kind's defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolePreset {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_edge: Option<EdgeSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_from_edge_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware_ref: Option<String>,
}

/// A named CNC preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CncPreset {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face: Option<Face>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tape_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness_mm: Option<f64>,
}

/// Geometry used for a groove when the input states only part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrooveDefaults {
    pub width_mm: f64,
    pub depth_mm: f64,
    pub offset_mm: f64,
    pub side: EdgeSide,
    pub face: Face,
}

/// Default geometry of one hardware kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwareDefaults {
    pub ref_edge: EdgeSide,
    pub distance_from_edge_mm: f64,
    /// First offset along the reference edge.
    pub offset_mm: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth_mm: Option<f64>,
}

/// Hinge count for doors up to `max_height_mm`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeightStep {
    pub max_height_mm: f64,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillingDefaults {
    pub hinge_count: u32,
    /// Ascending by height; doors taller than the last step use its count + 1.
    pub hinge_count_by_height: Vec<HeightStep>,
    pub hinge: HardwareDefaults,
    pub shelf_pin: HardwareDefaults,
    pub handle: HardwareDefaults,
    pub knob: HardwareDefaults,
    pub drawer_slide: HardwareDefaults,
    pub cam_lock: HardwareDefaults,
    pub dowel: HardwareDefaults,
    pub system_32: HardwareDefaults,
}

impl DrillingDefaults {
    /// Geometry defaults for a kind. Custom holes borrow the dowel geometry.
    pub fn for_kind(&self, kind: HoleKind) -> &HardwareDefaults {
        match kind {
            HoleKind::Hinge => &self.hinge,
            HoleKind::ShelfPin => &self.shelf_pin,
            HoleKind::Handle => &self.handle,
            HoleKind::Knob => &self.knob,
            HoleKind::DrawerSlide => &self.drawer_slide,
            HoleKind::CamLock => &self.cam_lock,
            HoleKind::Dowel | HoleKind::Custom => &self.dowel,
            HoleKind::System32 => &self.system_32,
        }
    }

    pub fn for_kind_mut(&mut self, kind: HoleKind) -> &mut HardwareDefaults {
        match kind {
            HoleKind::Hinge => &mut self.hinge,
            HoleKind::ShelfPin => &mut self.shelf_pin,
            HoleKind::Handle => &mut self.handle,
            HoleKind::Knob => &mut self.knob,
            HoleKind::DrawerSlide => &mut self.drawer_slide,
            HoleKind::CamLock => &mut self.cam_lock,
            HoleKind::Dowel | HoleKind::Custom => &mut self.dowel,
            HoleKind::System32 => &mut self.system_32,
        }
    }

    /// Hinge count for a door of the given height.
    pub fn hinge_count_for_height(&self, height_mm: f64) -> u32 {
        match self
            .hinge_count_by_height
            .iter()
            .find(|step| height_mm <= step.max_height_mm)
        {
            Some(step) => step.count,
            None => self
                .hinge_count_by_height
                .last()
                .map_or(self.hinge_count, |step| step.count + 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CncDefaults {
    pub face: Face,
    pub text_height_mm: f64,
}

/// A complete dialect: every field populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialectConfig {
    pub version: String,
    pub edgeband: FamilyDialect<EdgePreset, EdgeDefaults>,
    pub groove: FamilyDialect<GroovePreset, GrooveDefaults>,
    pub drilling: FamilyDialect<HolePreset, DrillingDefaults>,
    pub cnc: FamilyDialect<CncPreset, CncDefaults>,
}

impl DialectConfig {
    pub fn vocabulary(&self, family: ServiceFamily) -> &Vocabulary {
        match family {
            ServiceFamily::EdgeBand => &self.edgeband.vocabulary,
            ServiceFamily::Groove => &self.groove.vocabulary,
            ServiceFamily::Drilling => &self.drilling.vocabulary,
            ServiceFamily::Cnc => &self.cnc.vocabulary,
        }
    }

    /// Names of the family's presets.
    pub fn preset_names(&self, family: ServiceFamily) -> Vec<&str> {
        match family {
            ServiceFamily::EdgeBand => self.edgeband.presets.keys().map(String::as_str).collect(),
            ServiceFamily::Groove => self.groove.presets.keys().map(String::as_str).collect(),
            ServiceFamily::Drilling => self.drilling.presets.keys().map(String::as_str).collect(),
            ServiceFamily::Cnc => self.cnc.presets.keys().map(String::as_str).collect(),
        }
    }
}
