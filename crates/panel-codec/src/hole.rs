//! Hole codes and the built-in named patterns per hardware kind.

use std::sync::LazyLock;

use panel_model::{HoleKind, HolePatternSpec};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::number::{NUM, format_mm, parse_mm};

/// What a hole code states. Geometry the code leaves out (reference edge,
/// distance from the edge, diameter) is filled in from the dialect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HoleCode {
    /// `H{count}[-{offset}]`; the offset is measured from each end.
    Hinge { count: u32, offset_mm: Option<f64> },
    /// `SP[-{pitch}]`
    ShelfPin { pitch_mm: Option<f64> },
    /// `HD-CC{centers}`
    Handle { centers_mm: f64 },
    /// `KN-{offset}` or `KN-CTR` (`None`).
    Knob { offset_mm: Option<f64> },
    /// `DS-{length}`
    DrawerSlide { length_mm: f64 },
    /// `CL-{offset}`
    CamLock { offset_mm: f64 },
    /// `DW-{offset}`
    Dowel { offset_mm: f64 },
    /// `S32[-{distance}]`
    System32 { distance_mm: Option<f64> },
}

impl HoleCode {
    pub fn kind(&self) -> HoleKind {
        match self {
            HoleCode::Hinge { .. } => HoleKind::Hinge,
            HoleCode::ShelfPin { .. } => HoleKind::ShelfPin,
            HoleCode::Handle { .. } => HoleKind::Handle,
            HoleCode::Knob { .. } => HoleKind::Knob,
            HoleCode::DrawerSlide { .. } => HoleKind::DrawerSlide,
            HoleCode::CamLock { .. } => HoleKind::CamLock,
            HoleCode::Dowel { .. } => HoleKind::Dowel,
            HoleCode::System32 { .. } => HoleKind::System32,
        }
    }

    /// Recover the code a hole pattern was built from.
    ///
    /// Custom patterns and patterns missing the offsets their kind needs have
    /// no code.
    pub fn from_spec(spec: &HolePatternSpec) -> Option<HoleCode> {
        let first = spec.offsets_mm.first().copied();
        let code = match spec.kind {
            HoleKind::Hinge => {
                let count = match spec.count {
                    Some(count) => count,
                    None => u32::try_from(spec.offsets_mm.len()).ok()?,
                };
                HoleCode::Hinge {
                    count,
                    offset_mm: first,
                }
            }
            HoleKind::ShelfPin => HoleCode::ShelfPin {
                pitch_mm: spec.pitch_mm,
            },
            HoleKind::Handle => match spec.offsets_mm.as_slice() {
                [a, b] => HoleCode::Handle {
                    centers_mm: (b - a).abs(),
                },
                _ => return None,
            },
            HoleKind::Knob => HoleCode::Knob {
                offset_mm: if spec.from_center && first == Some(0.0) {
                    None
                } else {
                    first
                },
            },
            HoleKind::DrawerSlide => match spec.offsets_mm.as_slice() {
                [front, back] => HoleCode::DrawerSlide {
                    length_mm: front + back,
                },
                _ => return None,
            },
            HoleKind::CamLock => HoleCode::CamLock { offset_mm: first? },
            HoleKind::Dowel => HoleCode::Dowel { offset_mm: first? },
            HoleKind::System32 => HoleCode::System32 {
                distance_mm: Some(spec.distance_from_edge_mm),
            },
            HoleKind::Custom => return None,
        };
        Some(code)
    }
}

static HINGE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^H(\d+)(?:-{NUM})?$")).expect("Invalid hinge code regex")
});
static SHELF_PIN_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^SP(?:-{NUM})?$")).expect("Invalid shelf-pin code regex")
});
static SYSTEM32_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^S32(?:-{NUM})?$")).expect("Invalid system-32 code regex")
});
static HANDLE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^HD-?CC-?{NUM}$")).expect("Invalid handle code regex")
});
static KNOB_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^KN(?:-(CTR|{NUM}))?$")).expect("Invalid knob code regex")
});
static SINGLE_VALUE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^(DS|CL|DW)-{NUM}$")).expect("Invalid hardware code regex")
});

pub fn decode_hole(code: &str) -> Option<HoleCode> {
    let upper = code.trim().to_uppercase();
    if let Some(caps) = HINGE_CODE.captures(&upper) {
        let count = caps[1].parse::<u32>().ok().filter(|count| *count > 0)?;
        let offset_mm = match caps.get(2) {
            Some(offset) => Some(parse_mm(offset.as_str())?),
            None => None,
        };
        return Some(HoleCode::Hinge { count, offset_mm });
    }
    if let Some(caps) = SHELF_PIN_CODE.captures(&upper) {
        return Some(HoleCode::ShelfPin {
            pitch_mm: caps.get(1).and_then(|pitch| parse_mm(pitch.as_str())),
        });
    }
    if let Some(caps) = SYSTEM32_CODE.captures(&upper) {
        return Some(HoleCode::System32 {
            distance_mm: caps.get(1).and_then(|d| parse_mm(d.as_str())),
        });
    }
    if let Some(caps) = HANDLE_CODE.captures(&upper) {
        return Some(HoleCode::Handle {
            centers_mm: parse_mm(&caps[1])?,
        });
    }
    if let Some(caps) = KNOB_CODE.captures(&upper) {
        let offset_mm = match caps.get(2) {
            Some(offset) => Some(parse_mm(offset.as_str())?),
            None => None,
        };
        return Some(HoleCode::Knob { offset_mm });
    }
    let caps = SINGLE_VALUE_CODE.captures(&upper)?;
    let value = parse_mm(&caps[2])?;
    match &caps[1] {
        "DS" => Some(HoleCode::DrawerSlide { length_mm: value }),
        "CL" => Some(HoleCode::CamLock { offset_mm: value }),
        "DW" => Some(HoleCode::Dowel { offset_mm: value }),
        _ => None,
    }
}

pub fn encode_hole(code: &HoleCode) -> String {
    match code {
        HoleCode::Hinge {
            count,
            offset_mm: Some(offset),
        } => format!("H{count}-{}", format_mm(*offset)),
        HoleCode::Hinge {
            count,
            offset_mm: None,
        } => format!("H{count}"),
        HoleCode::ShelfPin { pitch_mm } => optional_suffix("SP", *pitch_mm),
        HoleCode::System32 { distance_mm } => optional_suffix("S32", *distance_mm),
        HoleCode::Handle { centers_mm } => format!("HD-CC{}", format_mm(*centers_mm)),
        HoleCode::Knob { offset_mm: None } => "KN-CTR".to_string(),
        HoleCode::Knob {
            offset_mm: Some(offset),
        } => format!("KN-{}", format_mm(*offset)),
        HoleCode::DrawerSlide { length_mm } => format!("DS-{}", format_mm(*length_mm)),
        HoleCode::CamLock { offset_mm } => format!("CL-{}", format_mm(*offset_mm)),
        HoleCode::Dowel { offset_mm } => format!("DW-{}", format_mm(*offset_mm)),
    }
}

fn optional_suffix(prefix: &str, value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{prefix}-{}", format_mm(value)),
        None => prefix.to_string(),
    }
}

const HINGE_PATTERNS: &[(&str, HoleCode)] = &[
    ("HINGE", HoleCode::Hinge { count: 2, offset_mm: None }),
    ("HINGE2", HoleCode::Hinge { count: 2, offset_mm: Some(100.0) }),
    ("HINGE3", HoleCode::Hinge { count: 3, offset_mm: Some(100.0) }),
    ("HINGE4", HoleCode::Hinge { count: 4, offset_mm: Some(100.0) }),
];

const SHELF_PIN_PATTERNS: &[(&str, HoleCode)] = &[
    ("SHELF", HoleCode::ShelfPin { pitch_mm: Some(32.0) }),
    ("SP32", HoleCode::ShelfPin { pitch_mm: Some(32.0) }),
    ("SP64", HoleCode::ShelfPin { pitch_mm: Some(64.0) }),
];

const HANDLE_PATTERNS: &[(&str, HoleCode)] = &[
    ("HD96", HoleCode::Handle { centers_mm: 96.0 }),
    ("HD128", HoleCode::Handle { centers_mm: 128.0 }),
    ("HD160", HoleCode::Handle { centers_mm: 160.0 }),
    ("HD192", HoleCode::Handle { centers_mm: 192.0 }),
];

const KNOB_PATTERNS: &[(&str, HoleCode)] = &[
    ("KNOB", HoleCode::Knob { offset_mm: None }),
];

const DRAWER_SLIDE_PATTERNS: &[(&str, HoleCode)] = &[
    ("DS350", HoleCode::DrawerSlide { length_mm: 350.0 }),
    ("DS400", HoleCode::DrawerSlide { length_mm: 400.0 }),
    ("DS450", HoleCode::DrawerSlide { length_mm: 450.0 }),
    ("DS500", HoleCode::DrawerSlide { length_mm: 500.0 }),
    ("DS550", HoleCode::DrawerSlide { length_mm: 550.0 }),
];

const CAM_LOCK_PATTERNS: &[(&str, HoleCode)] = &[
    ("CAM", HoleCode::CamLock { offset_mm: 34.0 }),
    ("MINIFIX", HoleCode::CamLock { offset_mm: 34.0 }),
];

const DOWEL_PATTERNS: &[(&str, HoleCode)] = &[
    ("DOWEL", HoleCode::Dowel { offset_mm: 32.0 }),
    ("DW", HoleCode::Dowel { offset_mm: 32.0 }),
];

const SYSTEM32_PATTERNS: &[(&str, HoleCode)] = &[
    ("SYS32", HoleCode::System32 { distance_mm: Some(37.0) }),
    ("SYSTEM32", HoleCode::System32 { distance_mm: Some(37.0) }),
];

/// Named-pattern table for one hardware kind.
pub fn builtin_hole_patterns(kind: HoleKind) -> &'static [(&'static str, HoleCode)] {
    match kind {
        HoleKind::Hinge => HINGE_PATTERNS,
        HoleKind::ShelfPin => SHELF_PIN_PATTERNS,
        HoleKind::Handle => HANDLE_PATTERNS,
        HoleKind::Knob => KNOB_PATTERNS,
        HoleKind::DrawerSlide => DRAWER_SLIDE_PATTERNS,
        HoleKind::CamLock => CAM_LOCK_PATTERNS,
        HoleKind::Dowel => DOWEL_PATTERNS,
        HoleKind::System32 => SYSTEM32_PATTERNS,
        HoleKind::Custom => &[],
    }
}

/// Look a name up across every kind's named-pattern table.
pub fn builtin_hole_preset(name: &str) -> Option<HoleCode> {
    let upper = name.trim().to_uppercase();
    HoleKind::ALL.into_iter().find_map(|kind| {
        builtin_hole_patterns(kind)
            .iter()
            .find(|(pattern, _)| *pattern == upper)
            .map(|(_, code)| *code)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_model::EdgeSide;

    #[test]
    fn decodes_dynamic_forms() {
        assert_eq!(
            decode_hole("H2-110"),
            Some(HoleCode::Hinge {
                count: 2,
                offset_mm: Some(110.0)
            })
        );
        assert_eq!(
            decode_hole("hd-cc96"),
            Some(HoleCode::Handle { centers_mm: 96.0 })
        );
        assert_eq!(decode_hole("KN-CTR"), Some(HoleCode::Knob { offset_mm: None }));
        assert_eq!(
            decode_hole("KN-50"),
            Some(HoleCode::Knob {
                offset_mm: Some(50.0)
            })
        );
        assert_eq!(decode_hole("SP"), Some(HoleCode::ShelfPin { pitch_mm: None }));
        assert_eq!(
            decode_hole("DS-450"),
            Some(HoleCode::DrawerSlide { length_mm: 450.0 })
        );
        assert_eq!(decode_hole("H0-100"), None);
        assert_eq!(decode_hole("HOB"), None);
    }

    #[test]
    fn spec_recovers_code() {
        let hinge = HolePatternSpec::new(HoleKind::Hinge, EdgeSide::L1, vec![110.0], 22.5)
            .with_count(2);
        assert_eq!(
            HoleCode::from_spec(&hinge).map(|code| encode_hole(&code)),
            Some("H2-110".to_string())
        );

        let handle =
            HolePatternSpec::new(HoleKind::Handle, EdgeSide::W1, vec![-48.0, 48.0], 32.0).centered();
        assert_eq!(
            HoleCode::from_spec(&handle),
            Some(HoleCode::Handle { centers_mm: 96.0 })
        );

        let knob = HolePatternSpec::new(HoleKind::Knob, EdgeSide::W1, vec![0.0], 32.0).centered();
        assert_eq!(
            HoleCode::from_spec(&knob).map(|code| encode_hole(&code)),
            Some("KN-CTR".to_string())
        );
    }

    #[test]
    fn named_patterns() {
        assert_eq!(
            builtin_hole_preset("hd128"),
            Some(HoleCode::Handle { centers_mm: 128.0 })
        );
        assert!(
            builtin_hole_patterns(HoleKind::Custom).is_empty(),
            "custom holes have no named patterns"
        );
    }
}
