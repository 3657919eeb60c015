use std::sync::LazyLock;

use panel_model::{EdgeSet, EdgeSide};
use regex::Regex;

use crate::heuristics::named_sides;

static ALL_EDGES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:all|4|four)\s*(?:edges?|sides?|round|around)\b|\ball\s+round\b|\bfully\s+banded\b")
        .expect("Invalid all-edges regex")
});
static BOTH_LONG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:both|2|two)\s+long(?:\s+(?:edges?|sides?))?\b|\blong\s+(?:edges|sides)\b")
        .expect("Invalid long-edges regex")
});
static BOTH_SHORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:both|2|two)\s+(?:short|width|end)(?:\s+(?:edges?|sides?))?\b|\b(?:short|width|end)\s+(?:edges|sides)\b",
    )
    .expect("Invalid short-edges regex")
});
static ONE_LONG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:one|1|single)\s+long(?:\s+(?:edge|side))?\b|\bfront\s+edge\b")
        .expect("Invalid one-long regex")
});
static ONE_SHORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:one|1|single)\s+(?:short|width|end)(?:\s+(?:edge|side))?\b")
        .expect("Invalid one-short regex")
});

/// Edge sides described by a phrase such as "both long edges".
///
/// Every recognized phrase contributes; literal side names (`L1`) count too.
pub fn recognize(text: &str) -> Option<EdgeSet> {
    if ALL_EDGES.is_match(text) {
        return Some(EdgeSet::ALL);
    }
    let mut edges = named_sides(text);
    if BOTH_LONG.is_match(text) {
        edges = edges.union(EdgeSet::LONG);
    } else if ONE_LONG.is_match(text) {
        edges.insert(EdgeSide::L1);
    }
    if BOTH_SHORT.is_match(text) {
        edges = edges.union(EdgeSet::WIDTH);
    } else if ONE_SHORT.is_match(text) {
        edges.insert(EdgeSide::W1);
    }
    (!edges.is_empty()).then_some(edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrases() {
        assert_eq!(recognize("edge all round"), Some(EdgeSet::ALL));
        assert_eq!(recognize("banding on all 4 sides"), Some(EdgeSet::ALL));
        assert_eq!(recognize("both long edges"), Some(EdgeSet::LONG));
        assert_eq!(
            recognize("2 long 1 short"),
            Some(EdgeSet::from_iter([EdgeSide::L1, EdgeSide::L2, EdgeSide::W1]))
        );
        assert_eq!(recognize("front edge only"), Some(EdgeSet::single(EdgeSide::L1)));
        assert_eq!(recognize("tape on w2"), Some(EdgeSet::single(EdgeSide::W2)));
        assert_eq!(recognize("white pvc"), None);
    }
}
