//! Canonical specs back to shortcodes.

use std::collections::BTreeMap;

use panel_codec::{
    HoleCode, Overrides, attach_overrides, encode_cnc, encode_edges, encode_groove, encode_hole,
    group_grooves,
};
use panel_model::{
    CncOperation, EdgeBandSpec, GrooveSpec, HoleKind, HolePatternSpec, PartServices,
};
use serde::Serialize;

use crate::NONE_MARKER;

/// Dialect values a shortcode leaves implicit.
///
/// A value that matches its default is omitted from the code; anything else
/// is written as an `@` override.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeDefaults {
    /// `None` writes every groove depth.
    pub groove_depth_mm: Option<f64>,
    pub holes: BTreeMap<HoleKind, HoleSize>,
}

/// Default diameter and depth of one hardware kind.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HoleSize {
    pub diameter_mm: Option<f64>,
    pub depth_mm: Option<f64>,
}

impl CodeDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_groove_depth(mut self, depth_mm: f64) -> Self {
        self.groove_depth_mm = Some(depth_mm);
        self
    }

    #[must_use]
    pub fn with_hole_size(mut self, kind: HoleKind, size: HoleSize) -> Self {
        self.holes.insert(kind, size);
        self
    }
}

/// Edge-band code; a thickness rides along as a bare override (`2L2W@2`).
pub fn edgeband_code(spec: Option<&EdgeBandSpec>) -> String {
    let Some(spec) = spec else {
        return NONE_MARKER.to_string();
    };
    if spec.edges.is_empty() {
        return NONE_MARKER.to_string();
    }
    let overrides = Overrides {
        bare: spec.thickness_mm,
        ..Overrides::default()
    };
    attach_overrides(&encode_edges(spec.edges), &overrides)
}

/// Groove codes, grouped onto `G-ALL`, `GL` and `GW` where the profiles
/// allow.
///
/// Depth is not part of the groove grammar. It is written as `@d` when it
/// differs from `default_depth_mm`, and always when no default is known.
pub fn groove_codes(grooves: &[GrooveSpec], default_depth_mm: Option<f64>) -> Vec<String> {
    group_grooves(grooves)
        .into_iter()
        .map(|group| {
            let overrides = Overrides {
                depth: (default_depth_mm != Some(group.depth_mm)).then_some(group.depth_mm),
                ..Overrides::default()
            };
            attach_overrides(&encode_groove(&group.code), &overrides)
        })
        .collect()
}

/// Hole code; patterns without a code fall back to the kind keyword.
///
/// Diameter and depth are written as `@dia` and `@d` when they differ from
/// the kind's defaults.
pub fn hole_code(spec: &HolePatternSpec, defaults: &CodeDefaults) -> String {
    let base = match HoleCode::from_spec(spec) {
        Some(code) => encode_hole(&code),
        None => spec.kind.as_str().to_uppercase(),
    };
    let size = defaults.holes.get(&spec.kind).copied().unwrap_or_default();
    let overrides = Overrides {
        diameter: spec.diameter_mm.filter(|&diameter| size.diameter_mm != Some(diameter)),
        depth: spec.depth_mm.filter(|&depth| size.depth_mm != Some(depth)),
        ..Overrides::default()
    };
    attach_overrides(&base, &overrides)
}

pub fn cnc_code(operation: &CncOperation) -> String {
    encode_cnc(&operation.params)
}

/// Every code of a bundle, family by family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PartShortcodes {
    pub edgeband: String,
    pub grooves: Vec<String>,
    pub holes: Vec<String>,
    pub cnc: Vec<String>,
}

pub fn shortcodes(services: &PartServices, defaults: &CodeDefaults) -> PartShortcodes {
    PartShortcodes {
        edgeband: edgeband_code(services.edgeband.as_ref()),
        grooves: groove_codes(&services.grooves, defaults.groove_depth_mm),
        holes: services
            .holes
            .iter()
            .map(|spec| hole_code(spec, defaults))
            .collect(),
        cnc: services.cnc.iter().map(cnc_code).collect(),
    }
}
