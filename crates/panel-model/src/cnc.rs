//! CNC operations.
//!
//! Parameters are a closed sum type per operation kind, so a cutout always has
//! a width and height and a pocket always has a depth. Only [`CncParams::Custom`]
//! falls back to an open, string-keyed parameter map.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::edge::{CornerSet, EdgeSet, EdgeSide};
use crate::face::Face;
use crate::value::ParamValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CncOpKind {
    Cutout,
    Pocket,
    Radius,
    Profile,
    Rebate,
    Chamfer,
    DrillArray,
    Text,
    Custom,
}

impl CncOpKind {
    /// Keyword used as the shortcode prefix.
    pub fn as_code(&self) -> &'static str {
        match self {
            CncOpKind::Cutout => "CUTOUT",
            CncOpKind::Pocket => "POCKET",
            CncOpKind::Radius => "RADIUS",
            CncOpKind::Profile => "PROFILE",
            CncOpKind::Rebate => "REBATE",
            CncOpKind::Chamfer => "CHAMFER",
            CncOpKind::DrillArray => "DRILL",
            CncOpKind::Text => "TEXT",
            CncOpKind::Custom => "PRG",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CncOpKind::Cutout => "cutout",
            CncOpKind::Pocket => "pocket",
            CncOpKind::Radius => "corner radius",
            CncOpKind::Profile => "edge profile",
            CncOpKind::Rebate => "rebate",
            CncOpKind::Chamfer => "chamfer",
            CncOpKind::DrillArray => "drill array",
            CncOpKind::Text => "text engraving",
            CncOpKind::Custom => "custom program",
        }
    }
}

impl fmt::Display for CncOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CncParams {
    Cutout {
        shape: String,
        width_mm: f64,
        height_mm: f64,
    },
    Pocket {
        width_mm: f64,
        height_mm: f64,
        depth_mm: f64,
    },
    Radius {
        radius_mm: f64,
        corners: CornerSet,
    },
    Profile {
        profile: String,
        edges: EdgeSet,
    },
    Rebate {
        side: EdgeSide,
        width_mm: f64,
        depth_mm: f64,
    },
    Chamfer {
        size_mm: f64,
        edges: EdgeSet,
    },
    DrillArray {
        rows: u32,
        cols: u32,
        pitch_mm: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        diameter_mm: Option<f64>,
    },
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height_mm: Option<f64>,
    },
    Custom {
        program: String,
        #[serde(default)]
        params: BTreeMap<String, ParamValue>,
    },
}

impl CncParams {
    pub fn kind(&self) -> CncOpKind {
        match self {
            CncParams::Cutout { .. } => CncOpKind::Cutout,
            CncParams::Pocket { .. } => CncOpKind::Pocket,
            CncParams::Radius { .. } => CncOpKind::Radius,
            CncParams::Profile { .. } => CncOpKind::Profile,
            CncParams::Rebate { .. } => CncOpKind::Rebate,
            CncParams::Chamfer { .. } => CncOpKind::Chamfer,
            CncParams::DrillArray { .. } => CncOpKind::DrillArray,
            CncParams::Text { .. } => CncOpKind::Text,
            CncParams::Custom { .. } => CncOpKind::Custom,
        }
    }
}

/// Position of an operation on the panel face, from the `FL` corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x_mm: f64,
    pub y_mm: f64,
}

/// Bounding dimensions of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width_mm: f64,
    pub height_mm: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth_mm: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CncOperation {
    pub params: CncParams,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face: Option<Face>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CncOperation {
    pub fn new(params: CncParams) -> Self {
        Self {
            params,
            face: None,
            position: None,
            note: None,
        }
    }

    #[must_use]
    pub fn with_face(mut self, face: Face) -> Self {
        self.face = Some(face);
        self
    }

    #[must_use]
    pub fn with_position(mut self, x_mm: f64, y_mm: f64) -> Self {
        self.position = Some(Position { x_mm, y_mm });
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn kind(&self) -> CncOpKind {
        self.params.kind()
    }

    /// Shape or program identifier (`SINK`, `OGEE`, a program name, or the
    /// kind keyword when the kind has no further identity).
    pub fn shape_id(&self) -> &str {
        match &self.params {
            CncParams::Cutout { shape, .. } => shape,
            CncParams::Profile { profile, .. } => profile,
            CncParams::Custom { program, .. } => program,
            other => other.kind().as_code(),
        }
    }

    pub fn dimensions(&self) -> Option<Dimensions> {
        match &self.params {
            CncParams::Cutout {
                width_mm,
                height_mm,
                ..
            } => Some(Dimensions {
                width_mm: *width_mm,
                height_mm: *height_mm,
                depth_mm: None,
            }),
            CncParams::Pocket {
                width_mm,
                height_mm,
                depth_mm,
            } => Some(Dimensions {
                width_mm: *width_mm,
                height_mm: *height_mm,
                depth_mm: Some(*depth_mm),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_identity() {
        let sink = CncOperation::new(CncParams::Cutout {
            shape: "SINK".to_string(),
            width_mm: 600.0,
            height_mm: 500.0,
        });
        assert_eq!(sink.kind(), CncOpKind::Cutout);
        assert_eq!(sink.shape_id(), "SINK");
        assert_eq!(sink.dimensions().map(|d| d.width_mm), Some(600.0));

        let radius = CncOperation::new(CncParams::Radius {
            radius_mm: 25.0,
            corners: CornerSet::FRONT,
        });
        assert_eq!(radius.shape_id(), "RADIUS");
        assert!(radius.dimensions().is_none());
    }

    #[test]
    fn params_are_tagged() {
        let op = CncOperation::new(CncParams::Pocket {
            width_mm: 100.0,
            height_mm: 50.0,
            depth_mm: 10.0,
        });
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["params"]["type"], "pocket");
    }
}
