//! Edge-band codes: a closed table plus side-token concatenation.

use std::sync::LazyLock;

use panel_model::{EdgeSet, EdgeSide};
use regex::Regex;

/// Canonical codes. Encoding prefers these over concatenation.
const EDGE_CODES: &[(&str, &[EdgeSide])] = &[
    ("0", &[]),
    ("L1", &[EdgeSide::L1]),
    ("L2", &[EdgeSide::L2]),
    ("W1", &[EdgeSide::W1]),
    ("W2", &[EdgeSide::W2]),
    ("2L", &[EdgeSide::L1, EdgeSide::L2]),
    ("2W", &[EdgeSide::W1, EdgeSide::W2]),
    ("L2W", &[EdgeSide::L1, EdgeSide::W1, EdgeSide::W2]),
    ("2L1W", &[EdgeSide::L1, EdgeSide::L2, EdgeSide::W1]),
    (
        "2L2W",
        &[EdgeSide::L1, EdgeSide::L2, EdgeSide::W1, EdgeSide::W2],
    ),
];

/// Spellings accepted on decode only.
const EDGE_ALIASES: &[(&str, &[EdgeSide])] = &[
    ("ALL", &EdgeSide::ALL),
    ("4", &EdgeSide::ALL),
    ("4S", &EdgeSide::ALL),
    ("1L", &[EdgeSide::L1]),
    ("1W", &[EdgeSide::W1]),
    ("1L1W", &[EdgeSide::L1, EdgeSide::W1]),
    ("1L2W", &[EdgeSide::L1, EdgeSide::W1, EdgeSide::W2]),
];

static SIDE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:L1|L2|W1|W2)+$").expect("Invalid edge run regex"));

/// Decode an edge-band code into its edge set.
///
/// `0` decodes to the empty set (an explicit "no banding"); unknown input
/// yields `None`. A concatenation that repeats a side is rejected.
pub fn decode_edges(code: &str) -> Option<EdgeSet> {
    let upper = code.trim().to_uppercase();
    if upper.is_empty() {
        return None;
    }
    if let Some((_, sides)) = EDGE_CODES
        .iter()
        .chain(EDGE_ALIASES)
        .find(|(name, _)| *name == upper)
    {
        return Some(sides.iter().copied().collect());
    }
    if !SIDE_RUN.is_match(&upper) {
        return None;
    }
    let mut set = EdgeSet::new();
    for chunk in upper.as_bytes().chunks(2) {
        let side = std::str::from_utf8(chunk).ok()?.parse::<EdgeSide>().ok()?;
        if !set.insert(side) {
            return None;
        }
    }
    Some(set)
}

/// Encode an edge set. Table codes win; other subsets concatenate sides.
pub fn encode_edges(edges: EdgeSet) -> String {
    let table_hit = EDGE_CODES.iter().find(|(_, sides)| {
        let set: EdgeSet = sides.iter().copied().collect();
        set == edges
    });
    if let Some((name, _)) = table_hit {
        return (*name).to_string();
    }
    edges.iter().map(|side| side.as_str()).collect()
}
