//! The global default dialect.
//!
//! A fixed, versioned value covering common shop conventions. It is never
//! mutated; organization overlays are merged onto a copy.

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

use panel_model::{EdgeSide, Face};

use crate::config::{
    CncDefaults, CncPreset, ColumnKey, DialectConfig, DrillingDefaults, EdgeDefaults, EdgePreset,
    FamilyDialect, GrooveDefaults, GroovePreset, HardwareDefaults, HeightStep, HolePreset,
    Vocabulary,
};
use crate::dialect::Dialect;

pub const DEFAULT_DIALECT_VERSION: &str = "2024.1";

pub const DEFAULT_YES_VALUES: &[&str] = &["X", "XX", "Y", "YES", "TRUE", "1", "✓", "✔", "ON"];
pub const DEFAULT_NO_VALUES: &[&str] = &["N", "NO", "FALSE", "0", "-", "OFF"];

const EDGE_ALIASES: &[(&str, &str)] = &[
    ("ALL", "2L2W"),
    ("4S", "2L2W"),
    ("4 SIDES", "2L2W"),
    ("ALL ROUND", "2L2W"),
    ("2L2S", "2L2W"),
    ("2L1S", "2L1W"),
    ("2S", "2W"),
    ("LONG", "2L"),
    ("SHORT", "2W"),
];

const EDGE_COLUMNS: &[(&str, ColumnKey)] = &[
    ("L1", ColumnKey::L1),
    ("L2", ColumnKey::L2),
    ("W1", ColumnKey::W1),
    ("W2", ColumnKey::W2),
    ("L", ColumnKey::Long),
    ("W", ColumnKey::Width),
    ("ALL", ColumnKey::All),
    ("EDGE", ColumnKey::Code),
    ("EDGING", ColumnKey::Code),
    ("EDGEBAND", ColumnKey::Code),
    ("EDGE BAND", ColumnKey::Code),
    ("EB", ColumnKey::Code),
    ("TAPE", ColumnKey::Tape),
    ("EDGE TAPE", ColumnKey::Tape),
    ("EB THICKNESS", ColumnKey::Thickness),
];

const GROOVE_ALIASES: &[(&str, &str)] = &[
    ("BACK", "BPG"),
    ("BP", "BPG"),
    ("BACK GROOVE", "BPG"),
    ("DRAWER BOTTOM", "DBG"),
];

const GROOVE_COLUMNS: &[(&str, ColumnKey)] = &[
    ("GROOVE", ColumnKey::Code),
    ("GROOVES", ColumnKey::Code),
    ("BACK GROOVE", ColumnKey::Code),
    ("GROOVE WIDTH", ColumnKey::GrooveWidth),
    ("GROOVE DEPTH", ColumnKey::Depth),
    ("GROOVE OFFSET", ColumnKey::Offset),
];

const DRILLING_ALIASES: &[(&str, &str)] = &[
    ("CUP", "H2"),
    ("CUPS", "H2"),
    ("PINS", "SP"),
    ("SHELF PINS", "SP"),
    ("CTR KNOB", "KN-CTR"),
];

const DRILLING_COLUMNS: &[(&str, ColumnKey)] = &[
    ("DRILLING", ColumnKey::Code),
    ("HOLES", ColumnKey::Code),
    ("HARDWARE", ColumnKey::Code),
    ("HINGE", ColumnKey::Hinge),
    ("HINGES", ColumnKey::Hinge),
    ("SHELF PIN", ColumnKey::ShelfPin),
    ("SHELF PINS", ColumnKey::ShelfPin),
    ("HANDLE", ColumnKey::Handle),
    ("KNOB", ColumnKey::Knob),
    ("SLIDE", ColumnKey::Slide),
    ("DRAWER SLIDE", ColumnKey::Slide),
];

const CNC_ALIASES: &[(&str, &str)] = &[
    ("SINK CUTOUT", "SINK"),
    ("HOB CUTOUT", "HOB"),
    ("SOFT CORNERS", "SOFTCORNERS"),
];

const CNC_COLUMNS: &[(&str, ColumnKey)] = &[
    ("CNC", ColumnKey::Code),
    ("CUTOUT", ColumnKey::Code),
    ("MACHINING", ColumnKey::Code),
    ("RADIUS", ColumnKey::Radius),
    ("CORNER RADIUS", ColumnKey::Radius),
];

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

fn vocabulary(aliases: &[(&str, &str)], columns: &[(&str, ColumnKey)]) -> Vocabulary {
    Vocabulary {
        aliases: aliases
            .iter()
            .map(|(key, code)| ((*key).to_string(), (*code).to_string()))
            .collect(),
        yes_values: strings(DEFAULT_YES_VALUES),
        no_values: strings(DEFAULT_NO_VALUES),
        default_if_blank: None,
        columns: columns
            .iter()
            .map(|(header, key)| ((*header).to_string(), *key))
            .collect(),
        rules: Vec::new(),
    }
}

fn hardware(
    ref_edge: EdgeSide,
    distance_from_edge_mm: f64,
    offset_mm: f64,
    diameter_mm: f64,
    depth_mm: f64,
) -> HardwareDefaults {
    HardwareDefaults {
        ref_edge,
        distance_from_edge_mm,
        offset_mm,
        pitch_mm: None,
        diameter_mm: Some(diameter_mm),
        depth_mm: Some(depth_mm),
    }
}

/// Build the global default configuration.
pub fn default_config() -> DialectConfig {
    let edgeband = FamilyDialect {
        vocabulary: vocabulary(EDGE_ALIASES, EDGE_COLUMNS),
        presets: BTreeMap::from([
            (
                "DOOR".to_string(),
                EdgePreset {
                    code: "2L2W".to_string(),
                    tape_id: None,
                    thickness_mm: Some(2.0),
                },
            ),
            (
                "SHELF-FRONT".to_string(),
                EdgePreset {
                    code: "W1".to_string(),
                    tape_id: None,
                    thickness_mm: Some(1.0),
                },
            ),
        ]),
        defaults: EdgeDefaults::default(),
    };

    let groove = FamilyDialect {
        vocabulary: vocabulary(GROOVE_ALIASES, GROOVE_COLUMNS),
        presets: BTreeMap::from([(
            "BACK-PANEL".to_string(),
            GroovePreset {
                code: "GW2-4-10".to_string(),
                depth_mm: Some(10.0),
                face: Some(Face::Back),
                note: None,
            },
        )]),
        defaults: GrooveDefaults {
            width_mm: 4.0,
            depth_mm: 10.0,
            offset_mm: 10.0,
            side: EdgeSide::W2,
            face: Face::Front,
        },
    };

    let drilling = FamilyDialect {
        vocabulary: vocabulary(DRILLING_ALIASES, DRILLING_COLUMNS),
        presets: BTreeMap::from([(
            "DOOR-HINGE".to_string(),
            HolePreset {
                code: "H2-100".to_string(),
                ref_edge: None,
                distance_from_edge_mm: None,
                diameter_mm: None,
                depth_mm: None,
                hardware_ref: None,
            },
        )]),
        defaults: DrillingDefaults {
            hinge_count: 2,
            hinge_count_by_height: vec![
                HeightStep {
                    max_height_mm: 900.0,
                    count: 2,
                },
                HeightStep {
                    max_height_mm: 1600.0,
                    count: 3,
                },
                HeightStep {
                    max_height_mm: 2000.0,
                    count: 4,
                },
            ],
            hinge: hardware(EdgeSide::L1, 22.5, 100.0, 35.0, 13.0),
            shelf_pin: HardwareDefaults {
                pitch_mm: Some(32.0),
                ..hardware(EdgeSide::L1, 37.0, 37.0, 5.0, 12.0)
            },
            handle: hardware(EdgeSide::W1, 32.0, 0.0, 5.0, 25.0),
            knob: hardware(EdgeSide::W1, 32.0, 0.0, 5.0, 25.0),
            drawer_slide: hardware(EdgeSide::L1, 37.0, 37.0, 4.0, 12.0),
            cam_lock: hardware(EdgeSide::W1, 8.0, 34.0, 15.0, 13.0),
            dowel: hardware(EdgeSide::W1, 9.5, 32.0, 8.0, 12.0),
            system_32: HardwareDefaults {
                pitch_mm: Some(32.0),
                ..hardware(EdgeSide::L1, 37.0, 37.0, 5.0, 12.0)
            },
        },
    };

    let cnc = FamilyDialect {
        vocabulary: vocabulary(CNC_ALIASES, CNC_COLUMNS),
        presets: BTreeMap::from([(
            "SOFT".to_string(),
            CncPreset {
                code: "RADIUS-3-ALL".to_string(),
                face: None,
                note: None,
            },
        )]),
        defaults: CncDefaults {
            face: Face::Front,
            text_height_mm: 10.0,
        },
    };

    DialectConfig {
        version: DEFAULT_DIALECT_VERSION.to_string(),
        edgeband,
        groove,
        drilling,
        cnc,
    }
}

static GLOBAL_DEFAULT: LazyLock<Arc<Dialect>> =
    LazyLock::new(|| Arc::new(Dialect::new(None, default_config())));

/// The shared global default dialect.
pub fn global_default() -> Arc<Dialect> {
    Arc::clone(&GLOBAL_DEFAULT)
}
