use std::sync::LazyLock;

use panel_codec::{DEFAULT_CUTOUT_SHAPE, builtin_cnc_macro};
use panel_dialect::CncDefaults;
use panel_model::{CncOperation, CncParams, CornerSet, EdgeSet, EdgeSide};
use regex::Regex;

use crate::heuristics::{named_sides, number, size};

static SINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bsinks?\b").expect("Invalid sink phrase regex"));
static HOB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:hobs?|cooktops?|cook\s*tops?)\b").expect("Invalid hob phrase regex")
});
static CUTOUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bcut\s*-?\s*outs?\b").expect("Invalid cutout phrase regex"));
static RADIUS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bradius\b|\bradiused\b|\brounded\s+corners?\b|\bcorners?\s+rounded\b")
        .expect("Invalid radius phrase regex")
});
static RADIUS_SIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\br\s*(\d+(?:[.,]\d+)?)\b|(\d+(?:[.,]\d+)?)\s*mm\b|\bradius\s*:?\s*(\d+(?:[.,]\d+)?)")
        .expect("Invalid radius size regex")
});
static CORNER_GROUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(front|back|left|right)\b").expect("Invalid corner group regex")
});
static PROFILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(ogee|bullnose|cove|ovolo|bevel(?:led)?|roman\s*ogee)\b|\bprofiled?\s+([a-z][a-z0-9]*)")
        .expect("Invalid profile phrase regex")
});
static POCKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bpockets?\b").expect("Invalid pocket phrase regex"));
static DEPTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*mm\s*deep\b|\bdepth\s*:?\s*(\d+(?:[.,]\d+)?)")
        .expect("Invalid pocket depth regex")
});
static REBATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:rebate|rabbet)s?\b").expect("Invalid rebate phrase regex"));
static ENGRAVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(?:engrave|engraving|engraved|text)\b\s*[:\-]?\s*["']?([^"']*[^"'\s])["']?\s*$"#)
        .expect("Invalid engraving phrase regex")
});

fn named_cutout(regex: &Regex, shape: &str, text: &str) -> Option<CncParams> {
    if !regex.is_match(text) {
        return None;
    }
    match size(text) {
        Some((width_mm, height_mm, _)) => Some(CncParams::Cutout {
            shape: shape.to_string(),
            width_mm,
            height_mm,
        }),
        None => builtin_cnc_macro(shape),
    }
}

fn plain_cutout(text: &str) -> Option<CncParams> {
    if !CUTOUT.is_match(text) || SINK.is_match(text) || HOB.is_match(text) {
        return None;
    }
    let (width_mm, height_mm, _) = size(text)?;
    Some(CncParams::Cutout {
        shape: DEFAULT_CUTOUT_SHAPE.to_string(),
        width_mm,
        height_mm,
    })
}

fn radius(text: &str) -> Option<CncParams> {
    if !RADIUS.is_match(text) {
        return None;
    }
    let default_radius = match builtin_cnc_macro("SOFTCORNERS") {
        Some(CncParams::Radius { radius_mm, .. }) => radius_mm,
        _ => return None,
    };
    let corners = CORNER_GROUP
        .captures(text)
        .and_then(|caps| CornerSet::parse_code(&caps[1]))
        .unwrap_or(CornerSet::ALL);
    Some(CncParams::Radius {
        radius_mm: number(&RADIUS_SIZE, text).unwrap_or(default_radius),
        corners,
    })
}

fn profile(text: &str) -> Option<CncParams> {
    let caps = PROFILE.captures(text)?;
    let name = caps.get(1).or_else(|| caps.get(2))?.as_str();
    if ["on", "to", "at", "for", "all", "the"].contains(&name.to_lowercase().as_str()) {
        return None;
    }
    let profile: String = name
        .split_whitespace()
        .collect::<String>()
        .to_uppercase()
        .trim_end_matches("LED")
        .to_string();
    let sides = named_sides(text);
    Some(CncParams::Profile {
        profile,
        edges: if sides.is_empty() { EdgeSet::ALL } else { sides },
    })
}

fn pocket(text: &str) -> Option<CncParams> {
    if !POCKET.is_match(text) {
        return None;
    }
    let (width_mm, height_mm, third) = size(text)?;
    let depth_mm = third.or_else(|| number(&DEPTH, text))?;
    Some(CncParams::Pocket {
        width_mm,
        height_mm,
        depth_mm,
    })
}

fn rebate(text: &str) -> Option<CncParams> {
    if !REBATE.is_match(text) {
        return None;
    }
    let (width_mm, depth_mm, _) = size(text)?;
    let side = named_sides(text).iter().next().unwrap_or(EdgeSide::W2);
    Some(CncParams::Rebate {
        side,
        width_mm,
        depth_mm,
    })
}

fn engraving(text: &str, defaults: &CncDefaults) -> Option<CncParams> {
    let caps = ENGRAVE.captures(text)?;
    let engraved = caps[1].trim();
    if engraved.is_empty() {
        return None;
    }
    Some(CncParams::Text {
        text: engraved.to_string(),
        height_mm: Some(defaults.text_height_mm),
    })
}

/// CNC operations described by a phrase such as "sink cutout" or
/// "rounded corners r5".
pub fn recognize(text: &str, defaults: &CncDefaults) -> Option<Vec<CncOperation>> {
    let operations: Vec<CncOperation> = [
        named_cutout(&SINK, "SINK", text),
        named_cutout(&HOB, "HOB", text),
        plain_cutout(text),
        radius(text),
        profile(text),
        pocket(text),
        rebate(text),
        engraving(text, defaults),
    ]
    .into_iter()
    .flatten()
    .map(|params| CncOperation::new(params).with_face(defaults.face))
    .collect();
    (!operations.is_empty()).then_some(operations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_dialect::default_config;
    use panel_model::Corner;

    fn params(text: &str) -> Vec<CncParams> {
        recognize(text, &default_config().cnc.defaults)
            .unwrap_or_default()
            .into_iter()
            .map(|operation| operation.params)
            .collect()
    }

    #[test]
    fn cutouts() {
        assert_eq!(params("sink cutout"), vec![builtin_cnc_macro("SINK").unwrap()]);
        assert_eq!(
            params("hob cut-out 580 x 500"),
            vec![CncParams::Cutout {
                shape: "HOB".to_string(),
                width_mm: 580.0,
                height_mm: 500.0
            }]
        );
        assert_eq!(
            params("cutout 100x80"),
            vec![CncParams::Cutout {
                shape: "RECT".to_string(),
                width_mm: 100.0,
                height_mm: 80.0
            }]
        );
    }

    #[test]
    fn corners_and_profiles() {
        assert_eq!(
            params("rounded corners r5 front"),
            vec![CncParams::Radius {
                radius_mm: 5.0,
                corners: CornerSet::from_iter([Corner::FrontLeft, Corner::FrontRight])
            }]
        );
        assert_eq!(
            params("ogee profile on L1"),
            vec![CncParams::Profile {
                profile: "OGEE".to_string(),
                edges: EdgeSet::single(EdgeSide::L1)
            }]
        );
    }

    #[test]
    fn pocket_rebate_text() {
        assert_eq!(
            params("pocket 100x50 10mm deep"),
            vec![CncParams::Pocket {
                width_mm: 100.0,
                height_mm: 50.0,
                depth_mm: 10.0
            }]
        );
        assert_eq!(
            params("rebate 10x8 on W1"),
            vec![CncParams::Rebate {
                side: EdgeSide::W1,
                width_mm: 10.0,
                depth_mm: 8.0
            }]
        );
        assert_eq!(
            params("engrave \"ACME 42\""),
            vec![CncParams::Text {
                text: "ACME 42".to_string(),
                height_mm: Some(10.0)
            }]
        );
        assert!(params("white pvc").is_empty());
    }
}
