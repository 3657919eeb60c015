use std::sync::LazyLock;

use panel_codec::parse_mm;
use panel_dialect::GrooveDefaults;
use panel_model::{EdgeSet, GrooveSpec};
use regex::Regex;

use crate::heuristics::{named_sides, number};

static GROOVE_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:groov\w*|dado\w*|back\s*panel|drawer\s+bottom|rear\s+panel)\b")
        .expect("Invalid groove word regex")
});
static ALL_EDGES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:all|4|four)\s*(?:edges?|sides?|round|around)\b|\bdrawer\s+bottom\b")
        .expect("Invalid groove all-edges regex")
});
static LONG_EDGES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:both|2|two)\s+long\b|\blong\s+(?:edges|sides)\b")
        .expect("Invalid groove long-edges regex")
});
static SHORT_EDGES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:both|2|two)\s+(?:short|width|end)\b|\b(?:short|width|end)\s+(?:edges|sides)\b")
        .expect("Invalid groove short-edges regex")
});
static MILLIMETRES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*mm\b").expect("Invalid millimetre regex"));
static DEPTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*mm\s*deep\b|\bdepth\s*:?\s*(\d+(?:[.,]\d+)?)")
        .expect("Invalid groove depth regex")
});
static OFFSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*mm\s*(?:in\s+)?from\b|\boffset\s*:?\s*(\d+(?:[.,]\d+)?)")
        .expect("Invalid groove offset regex")
});
static WIDTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bwidth\s*:?\s*(\d+(?:[.,]\d+)?)|(\d+(?:[.,]\d+)?)\s*mm\s*wide\b")
        .expect("Invalid groove width regex")
});

/// The first `{n}mm` that is not qualified as a depth or an offset.
fn bare_millimetres(text: &str) -> Option<f64> {
    MILLIMETRES.captures_iter(text).find_map(|caps| {
        let whole = caps.get(0)?;
        let rest = text[whole.end()..].trim_start().to_lowercase();
        let qualified = ["deep", "from", "in from", "offset"]
            .iter()
            .any(|word| rest.starts_with(word));
        if qualified { None } else { parse_mm(&caps[1]) }
    })
}

/// Every edge the phrase names, empty when it names none.
fn named_edges(text: &str) -> EdgeSet {
    if ALL_EDGES.is_match(text) {
        return EdgeSet::ALL;
    }
    let mut edges = named_sides(text);
    if LONG_EDGES.is_match(text) {
        edges = edges.union(EdgeSet::LONG);
    }
    if SHORT_EDGES.is_match(text) {
        edges = edges.union(EdgeSet::WIDTH);
    }
    edges
}

/// Grooves described by a phrase such as "back panel groove 8mm".
///
/// Needs either a groove word or a bare `{n}mm` width. Without an edge
/// qualifier the groove goes on the default side, the back edge (`W2`).
pub fn recognize(text: &str, defaults: &GrooveDefaults) -> Option<Vec<GrooveSpec>> {
    let width = number(&WIDTH, text).or_else(|| bare_millimetres(text));
    if width.is_none() && !GROOVE_WORD.is_match(text) {
        return None;
    }
    let mut edges = named_edges(text);
    if edges.is_empty() {
        edges = EdgeSet::single(defaults.side);
    }
    let width_mm = width.unwrap_or(defaults.width_mm);
    let depth_mm = number(&DEPTH, text).unwrap_or(defaults.depth_mm);
    let offset_mm = number(&OFFSET, text).unwrap_or(defaults.offset_mm);
    let specs = edges
        .iter()
        .map(|side| GrooveSpec::new(side, width_mm, depth_mm, offset_mm).with_face(defaults.face))
        .collect();
    Some(specs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_dialect::default_config;
    use panel_model::EdgeSide;

    fn defaults() -> GrooveDefaults {
        default_config().groove.defaults
    }

    #[test]
    fn bare_width_goes_to_back_edge() {
        let specs = recognize("8mm", &defaults()).unwrap();
        assert_eq!(specs, vec![GrooveSpec::new(EdgeSide::W2, 8.0, 10.0, 10.0)]);
    }

    #[test]
    fn qualified_numbers() {
        let specs = recognize("groove both long 6mm wide 8mm deep 12mm from edge", &defaults()).unwrap();
        assert_eq!(specs.len(), 2);
        assert!(specs.iter().all(|spec| spec.width_mm == 6.0 && spec.depth_mm == 8.0 && spec.offset_mm == 12.0));
    }

    #[test]
    fn drawer_bottom_runs_all_round() {
        let specs = recognize("drawer bottom groove", &defaults()).unwrap();
        assert_eq!(specs.len(), 4);
        assert!(recognize("white pvc", &defaults()).is_none());
    }

    #[test]
    fn every_named_side_gets_a_groove() {
        let sides = |text: &str| -> Vec<EdgeSide> {
            recognize(text, &defaults())
                .unwrap()
                .iter()
                .map(|spec| spec.side)
                .collect()
        };
        assert_eq!(sides("groove on L1 and W1"), vec![EdgeSide::L1, EdgeSide::W1]);
        assert_eq!(
            sides("groove L1, L2 and W2"),
            vec![EdgeSide::L1, EdgeSide::L2, EdgeSide::W2]
        );
        assert_eq!(sides("groove both long and W1").len(), 3);
    }
}
