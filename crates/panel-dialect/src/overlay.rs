//! Partial organization dialects and the merge onto the global default.
//!
//! Merge rules, per family:
//! - aliases, presets and columns merge by key; the organization wins
//! - yes/no value sets and default-if-blank are replaced wholesale when given
//! - rules merge by id; an organization rule replaces a default rule with the
//!   same id, new ids are appended
//! - defaults are overridden field by field
//!
//! The merge is total: the result always has every field populated.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use panel_model::{EdgeSide, Face};
use serde::{Deserialize, Serialize};

use crate::config::{
    CncDefaults, CncPreset, ColumnKey, DialectConfig, DrillingDefaults, EdgeDefaults, EdgePreset,
    FamilyDialect, GrooveDefaults, GroovePreset, HardwareDefaults, HeightStep, HolePreset,
    Vocabulary,
};
use crate::dialect::{Dialect, lookup_key};
use crate::error::{DialectError, Result};
use crate::rules::PatternRule;

/// One family's partial configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FamilyOverlay<P, D> {
    pub aliases: BTreeMap<String, String>,
    pub yes_values: Option<Vec<String>>,
    pub no_values: Option<Vec<String>>,
    /// An empty string clears the inherited default.
    pub default_if_blank: Option<String>,
    pub columns: BTreeMap<String, ColumnKey>,
    pub presets: BTreeMap<String, P>,
    pub rules: Vec<PatternRule>,
    pub defaults: D,
}

impl<P, D: Default> Default for FamilyOverlay<P, D> {
    fn default() -> Self {
        Self {
            aliases: BTreeMap::new(),
            yes_values: None,
            no_values: None,
            default_if_blank: None,
            columns: BTreeMap::new(),
            presets: BTreeMap::new(),
            rules: Vec::new(),
            defaults: D::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeDefaultsPatch {
    pub tape_id: Option<String>,
    pub thickness_mm: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrooveDefaultsPatch {
    pub width_mm: Option<f64>,
    pub depth_mm: Option<f64>,
    pub offset_mm: Option<f64>,
    pub side: Option<EdgeSide>,
    pub face: Option<Face>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HardwarePatch {
    pub ref_edge: Option<EdgeSide>,
    pub distance_from_edge_mm: Option<f64>,
    pub offset_mm: Option<f64>,
    pub pitch_mm: Option<f64>,
    pub diameter_mm: Option<f64>,
    pub depth_mm: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrillingDefaultsPatch {
    pub hinge_count: Option<u32>,
    pub hinge_count_by_height: Option<Vec<HeightStep>>,
    pub hinge: HardwarePatch,
    pub shelf_pin: HardwarePatch,
    pub handle: HardwarePatch,
    pub knob: HardwarePatch,
    pub drawer_slide: HardwarePatch,
    pub cam_lock: HardwarePatch,
    pub dowel: HardwarePatch,
    pub system_32: HardwarePatch,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CncDefaultsPatch {
    pub face: Option<Face>,
    pub text_height_mm: Option<f64>,
}

/// A partial dialect as an organization stores it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialectOverlay {
    pub org_id: Option<String>,
    pub edgeband: FamilyOverlay<EdgePreset, EdgeDefaultsPatch>,
    pub groove: FamilyOverlay<GroovePreset, GrooveDefaultsPatch>,
    pub drilling: FamilyOverlay<HolePreset, DrillingDefaultsPatch>,
    pub cnc: FamilyOverlay<CncPreset, CncDefaultsPatch>,
}

impl DialectOverlay {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load an overlay from a `.json` or `.toml` file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| DialectError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Self::from_json_str(&text),
            Some("toml") => Self::from_toml_str(&text),
            _ => Err(DialectError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Overlay that only adds edge-band aliases.
    pub fn with_edge_alias(mut self, alias: &str, code: &str) -> Self {
        self.edgeband
            .aliases
            .insert(alias.to_string(), code.to_string());
        self
    }
}

fn upper_keys<V: Clone>(map: &BTreeMap<String, V>) -> impl Iterator<Item = (String, V)> + '_ {
    map.iter().map(|(key, value)| (lookup_key(key), value.clone()))
}

fn upper_values(values: &[String]) -> Vec<String> {
    values.iter().map(|value| lookup_key(value)).collect()
}

fn merge_vocabulary<P, D>(base: &Vocabulary, overlay: &FamilyOverlay<P, D>) -> Vocabulary {
    let mut merged = base.clone();
    merged.aliases.extend(upper_keys(&overlay.aliases));
    merged.columns.extend(upper_keys(&overlay.columns));
    if let Some(yes) = &overlay.yes_values {
        merged.yes_values = upper_values(yes);
    }
    if let Some(no) = &overlay.no_values {
        merged.no_values = upper_values(no);
    }
    if let Some(code) = &overlay.default_if_blank {
        merged.default_if_blank = (!code.trim().is_empty()).then(|| code.trim().to_string());
    }
    for rule in &overlay.rules {
        match merged.rules.iter_mut().find(|existing| existing.id == rule.id) {
            Some(existing) => *existing = rule.clone(),
            None => merged.rules.push(rule.clone()),
        }
    }
    merged
}

fn merge_family<P: Clone, D: Clone, X>(
    base: &FamilyDialect<P, D>,
    overlay: &FamilyOverlay<P, X>,
    patch: impl FnOnce(&mut D, &X),
) -> FamilyDialect<P, D> {
    let mut presets = base.presets.clone();
    presets.extend(upper_keys(&overlay.presets));
    let mut defaults = base.defaults.clone();
    patch(&mut defaults, &overlay.defaults);
    FamilyDialect {
        vocabulary: merge_vocabulary(&base.vocabulary, overlay),
        presets,
        defaults,
    }
}

fn set<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

fn patch_edge(defaults: &mut EdgeDefaults, patch: &EdgeDefaultsPatch) {
    if patch.tape_id.is_some() {
        defaults.tape_id.clone_from(&patch.tape_id);
    }
    if patch.thickness_mm.is_some() {
        defaults.thickness_mm = patch.thickness_mm;
    }
}

fn patch_groove(defaults: &mut GrooveDefaults, patch: &GrooveDefaultsPatch) {
    set(&mut defaults.width_mm, &patch.width_mm);
    set(&mut defaults.depth_mm, &patch.depth_mm);
    set(&mut defaults.offset_mm, &patch.offset_mm);
    set(&mut defaults.side, &patch.side);
    set(&mut defaults.face, &patch.face);
}

fn patch_hardware(defaults: &mut HardwareDefaults, patch: &HardwarePatch) {
    set(&mut defaults.ref_edge, &patch.ref_edge);
    set(&mut defaults.distance_from_edge_mm, &patch.distance_from_edge_mm);
    set(&mut defaults.offset_mm, &patch.offset_mm);
    if patch.pitch_mm.is_some() {
        defaults.pitch_mm = patch.pitch_mm;
    }
    if patch.diameter_mm.is_some() {
        defaults.diameter_mm = patch.diameter_mm;
    }
    if patch.depth_mm.is_some() {
        defaults.depth_mm = patch.depth_mm;
    }
}

fn patch_drilling(defaults: &mut DrillingDefaults, patch: &DrillingDefaultsPatch) {
    set(&mut defaults.hinge_count, &patch.hinge_count);
    set(&mut defaults.hinge_count_by_height, &patch.hinge_count_by_height);
    patch_hardware(&mut defaults.hinge, &patch.hinge);
    patch_hardware(&mut defaults.shelf_pin, &patch.shelf_pin);
    patch_hardware(&mut defaults.handle, &patch.handle);
    patch_hardware(&mut defaults.knob, &patch.knob);
    patch_hardware(&mut defaults.drawer_slide, &patch.drawer_slide);
    patch_hardware(&mut defaults.cam_lock, &patch.cam_lock);
    patch_hardware(&mut defaults.dowel, &patch.dowel);
    patch_hardware(&mut defaults.system_32, &patch.system_32);
}

fn patch_cnc(defaults: &mut CncDefaults, patch: &CncDefaultsPatch) {
    set(&mut defaults.face, &patch.face);
    set(&mut defaults.text_height_mm, &patch.text_height_mm);
}

/// Layer an overlay onto a full configuration.
pub fn merge_config(base: &DialectConfig, overlay: &DialectOverlay) -> DialectConfig {
    DialectConfig {
        version: base.version.clone(),
        edgeband: merge_family(&base.edgeband, &overlay.edgeband, patch_edge),
        groove: merge_family(&base.groove, &overlay.groove, patch_groove),
        drilling: merge_family(&base.drilling, &overlay.drilling, patch_drilling),
        cnc: merge_family(&base.cnc, &overlay.cnc, patch_cnc),
    }
}

/// Merge an organization overlay onto the default and build the dialect.
pub fn merge_with_default(default: &DialectConfig, overlay: &DialectOverlay) -> Dialect {
    Dialect::new(overlay.org_id.clone(), merge_config(default, overlay))
}
