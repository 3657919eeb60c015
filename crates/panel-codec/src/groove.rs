//! Groove codes: `G[target]-{width}-{offset}` and the built-in presets.

use std::sync::LazyLock;

use panel_model::{EdgeSet, EdgeSide, Face, GrooveSpec, GrooveTarget};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::number::{NUM, format_mm, parse_mm};

static GROOVE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^G(?:-?(ALL|L1|L2|W1|W2|L|W))?-{NUM}-{NUM}$"
    ))
    .expect("Invalid groove code regex")
});

/// What a groove code states: where, how wide, how far from the edge.
///
/// Depth and face are not part of the grammar; they come from an `@d`
/// override or the dialect defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrooveCode {
    pub target: GrooveTarget,
    pub width_mm: f64,
    pub offset_mm: f64,
}

impl GrooveCode {
    pub fn new(target: GrooveTarget, width_mm: f64, offset_mm: f64) -> Self {
        Self {
            target,
            width_mm,
            offset_mm,
        }
    }

    /// Expand into one spec per implied edge.
    pub fn to_specs(&self, depth_mm: f64, face: Face) -> Vec<GrooveSpec> {
        GrooveSpec::expand(self.target, self.width_mm, depth_mm, self.offset_mm, face)
    }
}

/// Built-in groove shortcuts.
const GROOVE_PRESETS: &[(&str, GrooveCode)] = &[
    // back-panel groove
    (
        "BPG",
        GrooveCode {
            target: GrooveTarget::Side(EdgeSide::W2),
            width_mm: 4.0,
            offset_mm: 10.0,
        },
    ),
    // drawer-bottom groove
    (
        "DBG",
        GrooveCode {
            target: GrooveTarget::All,
            width_mm: 4.0,
            offset_mm: 12.0,
        },
    ),
];

pub fn decode_groove(code: &str) -> Option<GrooveCode> {
    let upper = code.trim().to_uppercase();
    let caps = GROOVE_CODE.captures(&upper)?;
    let target = match caps.get(1) {
        Some(token) => token.as_str().parse::<GrooveTarget>().ok()?,
        None => GrooveTarget::Side(EdgeSide::W2),
    };
    let width_mm = parse_mm(&caps[2])?;
    let offset_mm = parse_mm(&caps[3])?;
    Some(GrooveCode::new(target, width_mm, offset_mm))
}

pub fn encode_groove(code: &GrooveCode) -> String {
    let prefix = match code.target {
        GrooveTarget::All => "G-ALL".to_string(),
        other => format!("G{}", other.as_code()),
    };
    format!(
        "{prefix}-{}-{}",
        format_mm(code.width_mm),
        format_mm(code.offset_mm)
    )
}

pub fn builtin_groove_preset(name: &str) -> Option<GrooveCode> {
    let upper = name.trim().to_uppercase();
    GROOVE_PRESETS
        .iter()
        .find(|(preset, _)| *preset == upper)
        .map(|(_, code)| *code)
}

/// Grooves that share a profile, collapsed onto the widest target.
#[derive(Debug, Clone, PartialEq)]
pub struct GrooveGroup {
    pub code: GrooveCode,
    pub depth_mm: f64,
    pub face: Face,
}

/// Collapse a groove list into codes.
///
/// Grooves with the same profile on all four edges always become one `ALL`
/// group; both long or both width edges become `L` / `W`. Whatever is left
/// stays per side. Stopped grooves are never grouped. Order follows the
/// first appearance of each profile.
pub fn group_grooves(grooves: &[GrooveSpec]) -> Vec<GrooveGroup> {
    let mut buckets: Vec<(&GrooveSpec, EdgeSet)> = Vec::new();
    let mut groups = Vec::new();
    for groove in grooves {
        if !groove.is_through() {
            groups.push(single_group(groove, groove.side));
            continue;
        }
        match buckets
            .iter_mut()
            .find(|(head, edges)| head.same_profile(groove) && !edges.contains(groove.side))
        {
            Some((_, edges)) => {
                edges.insert(groove.side);
            }
            None => buckets.push((groove, EdgeSet::single(groove.side))),
        }
    }
    for (head, edges) in buckets {
        let mut remaining = edges;
        let mut push = |target: GrooveTarget| {
            groups.push(GrooveGroup {
                code: GrooveCode::new(target, head.width_mm, head.offset_mm),
                depth_mm: head.depth_mm,
                face: head.face,
            });
        };
        if remaining.is_all() {
            push(GrooveTarget::All);
            continue;
        }
        for (pair, target) in [
            (EdgeSet::LONG, GrooveTarget::Long),
            (EdgeSet::WIDTH, GrooveTarget::Width),
        ] {
            if pair.iter().all(|side| remaining.contains(side)) {
                push(target);
                for side in pair.iter() {
                    remaining.remove(side);
                }
            }
        }
        for side in remaining.iter() {
            push(GrooveTarget::Side(side));
        }
    }
    groups
}

fn single_group(groove: &GrooveSpec, side: EdgeSide) -> GrooveGroup {
    GrooveGroup {
        code: GrooveCode::new(GrooveTarget::Side(side), groove.width_mm, groove.offset_mm),
        depth_mm: groove.depth_mm,
        face: groove.face,
    }
}
