//! CNC operation codes and built-in macros.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use panel_model::{CncParams, CornerSet, EdgeSet};
use regex::Regex;

use crate::edgeband::{decode_edges, encode_edges};
use crate::number::{NUM, format_mm, parse_mm};

/// Shape used when a cutout code names none.
pub const DEFAULT_CUTOUT_SHAPE: &str = "RECT";

static CUTOUT_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^CUTOUT-(?:([A-Z][A-Z0-9]*)-)?{NUM}X{NUM}$"))
        .expect("Invalid cutout code regex")
});
static POCKET_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^POCKET-{NUM}X{NUM}X{NUM}$")).expect("Invalid pocket code regex")
});
static RADIUS_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^RADIUS-{NUM}(?:-([A-Z+]+))?$")).expect("Invalid radius code regex")
});
static PROFILE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^PROFILE-([A-Z][A-Z0-9]*)(?:-([0-9A-Z]+))?$").expect("Invalid profile code regex")
});
static REBATE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^REBATE-(L1|L2|W1|W2)-{NUM}X{NUM}$")).expect("Invalid rebate code regex")
});
static CHAMFER_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^CHAMFER-{NUM}(?:-([0-9A-Z]+))?$")).expect("Invalid chamfer code regex")
});
static DRILL_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^DRILL-(\d+)X(\d+)-{NUM}(?:-{NUM})?$"))
        .expect("Invalid drill array code regex")
});
static FREE_TEXT_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)(TEXT|PRG)-(.+)$").expect("Invalid text/program code regex")
});

pub fn decode_cnc(code: &str) -> Option<CncParams> {
    let trimmed = code.trim();
    // Text and program names keep their case.
    if let Some(caps) = FREE_TEXT_CODE.captures(trimmed) {
        let value = caps[2].to_string();
        return Some(if caps[1].eq_ignore_ascii_case("TEXT") {
            CncParams::Text {
                text: value,
                height_mm: None,
            }
        } else {
            CncParams::Custom {
                program: value,
                params: BTreeMap::new(),
            }
        });
    }

    let upper = trimmed.to_uppercase();
    if let Some(caps) = CUTOUT_CODE.captures(&upper) {
        return Some(CncParams::Cutout {
            shape: caps
                .get(1)
                .map_or(DEFAULT_CUTOUT_SHAPE, |shape| shape.as_str())
                .to_string(),
            width_mm: parse_mm(&caps[2])?,
            height_mm: parse_mm(&caps[3])?,
        });
    }
    if let Some(caps) = POCKET_CODE.captures(&upper) {
        return Some(CncParams::Pocket {
            width_mm: parse_mm(&caps[1])?,
            height_mm: parse_mm(&caps[2])?,
            depth_mm: parse_mm(&caps[3])?,
        });
    }
    if let Some(caps) = RADIUS_CODE.captures(&upper) {
        let corners = match caps.get(2) {
            Some(code) => CornerSet::parse_code(code.as_str())?,
            None => CornerSet::ALL,
        };
        return Some(CncParams::Radius {
            radius_mm: parse_mm(&caps[1])?,
            corners,
        });
    }
    if let Some(caps) = PROFILE_CODE.captures(&upper) {
        return Some(CncParams::Profile {
            profile: caps[1].to_string(),
            edges: optional_edges(caps.get(2).map(|m| m.as_str()))?,
        });
    }
    if let Some(caps) = REBATE_CODE.captures(&upper) {
        return Some(CncParams::Rebate {
            side: caps[1].parse().ok()?,
            width_mm: parse_mm(&caps[2])?,
            depth_mm: parse_mm(&caps[3])?,
        });
    }
    if let Some(caps) = CHAMFER_CODE.captures(&upper) {
        return Some(CncParams::Chamfer {
            size_mm: parse_mm(&caps[1])?,
            edges: optional_edges(caps.get(2).map(|m| m.as_str()))?,
        });
    }
    let caps = DRILL_CODE.captures(&upper)?;
    let diameter_mm = match caps.get(4) {
        Some(dia) => Some(parse_mm(dia.as_str())?),
        None => None,
    };
    Some(CncParams::DrillArray {
        rows: caps[1].parse().ok()?,
        cols: caps[2].parse().ok()?,
        pitch_mm: parse_mm(&caps[3])?,
        diameter_mm,
    })
}

/// Absent edge code means every edge; an unknown one fails the decode.
fn optional_edges(code: Option<&str>) -> Option<EdgeSet> {
    match code {
        Some(code) => decode_edges(code),
        None => Some(EdgeSet::ALL),
    }
}

pub fn encode_cnc(params: &CncParams) -> String {
    match params {
        CncParams::Cutout {
            shape,
            width_mm,
            height_mm,
        } => {
            let dims = format!("{}x{}", format_mm(*width_mm), format_mm(*height_mm));
            if shape.eq_ignore_ascii_case(DEFAULT_CUTOUT_SHAPE) {
                format!("CUTOUT-{dims}")
            } else {
                format!("CUTOUT-{shape}-{dims}")
            }
        }
        CncParams::Pocket {
            width_mm,
            height_mm,
            depth_mm,
        } => format!(
            "POCKET-{}x{}x{}",
            format_mm(*width_mm),
            format_mm(*height_mm),
            format_mm(*depth_mm)
        ),
        CncParams::Radius { radius_mm, corners } => {
            format!("RADIUS-{}-{}", format_mm(*radius_mm), corners.code())
        }
        CncParams::Profile { profile, edges } => {
            format!("PROFILE-{profile}-{}", encode_edges(*edges))
        }
        CncParams::Rebate {
            side,
            width_mm,
            depth_mm,
        } => format!(
            "REBATE-{side}-{}x{}",
            format_mm(*width_mm),
            format_mm(*depth_mm)
        ),
        CncParams::Chamfer { size_mm, edges } => {
            format!("CHAMFER-{}-{}", format_mm(*size_mm), encode_edges(*edges))
        }
        CncParams::DrillArray {
            rows,
            cols,
            pitch_mm,
            diameter_mm,
        } => {
            let base = format!("DRILL-{rows}x{cols}-{}", format_mm(*pitch_mm));
            match diameter_mm {
                Some(dia) => format!("{base}-{}", format_mm(*dia)),
                None => base,
            }
        }
        CncParams::Text { text, .. } => format!("TEXT-{text}"),
        CncParams::Custom { program, .. } => format!("PRG-{program}"),
    }
}

/// Fully pre-defined operations addressed by a single name.
pub fn builtin_cnc_macro(name: &str) -> Option<CncParams> {
    let params = match name.trim().to_uppercase().as_str() {
        "SINK" => cutout("SINK", 600.0, 500.0),
        "HOB" => cutout("HOB", 560.0, 490.0),
        "GROMMET60" => cutout("GROMMET", 60.0, 60.0),
        "GROMMET80" => cutout("GROMMET", 80.0, 80.0),
        "SOFTCORNERS" => CncParams::Radius {
            radius_mm: 3.0,
            corners: CornerSet::ALL,
        },
        _ => return None,
    };
    Some(params)
}

fn cutout(shape: &str, width_mm: f64, height_mm: f64) -> CncParams {
    CncParams::Cutout {
        shape: shape.to_string(),
        width_mm,
        height_mm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_model::EdgeSide;

    #[test]
    fn decodes_cutout_with_and_without_shape() {
        assert_eq!(
            decode_cnc("CUTOUT-SINK-600x500"),
            Some(cutout("SINK", 600.0, 500.0))
        );
        assert_eq!(
            decode_cnc("cutout-300x200"),
            Some(cutout(DEFAULT_CUTOUT_SHAPE, 300.0, 200.0))
        );
        assert_eq!(encode_cnc(&cutout("RECT", 300.0, 200.0)), "CUTOUT-300x200");
    }

    #[test]
    fn radius_defaults_to_all_corners() {
        assert_eq!(
            decode_cnc("RADIUS-25-FRONT"),
            Some(CncParams::Radius {
                radius_mm: 25.0,
                corners: CornerSet::FRONT
            })
        );
        assert_eq!(
            decode_cnc("RADIUS-3"),
            Some(CncParams::Radius {
                radius_mm: 3.0,
                corners: CornerSet::ALL
            })
        );
        assert_eq!(decode_cnc("RADIUS-3-XY"), None);
    }

    #[test]
    fn other_kinds() {
        assert_eq!(
            decode_cnc("POCKET-100x50x10"),
            Some(CncParams::Pocket {
                width_mm: 100.0,
                height_mm: 50.0,
                depth_mm: 10.0
            })
        );
        assert_eq!(
            decode_cnc("REBATE-W2-10x8"),
            Some(CncParams::Rebate {
                side: EdgeSide::W2,
                width_mm: 10.0,
                depth_mm: 8.0
            })
        );
        assert_eq!(
            decode_cnc("PROFILE-OGEE-2L").map(|p| encode_cnc(&p)),
            Some("PROFILE-OGEE-2L".to_string())
        );
        assert_eq!(
            decode_cnc("Text-Kitchen A"),
            Some(CncParams::Text {
                text: "Kitchen A".to_string(),
                height_mm: None
            })
        );
        assert_eq!(
            decode_cnc("DRILL-2x3-32-5").map(|p| encode_cnc(&p)),
            Some("DRILL-2x3-32-5".to_string())
        );
        assert_eq!(decode_cnc("SINK"), None);
    }

    #[test]
    fn macros() {
        assert_eq!(builtin_cnc_macro("sink"), Some(cutout("SINK", 600.0, 500.0)));
        assert!(builtin_cnc_macro("UNKNOWN").is_none());
    }
}
