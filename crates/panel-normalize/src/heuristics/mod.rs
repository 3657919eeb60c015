//! Natural-language recognizers, the last strategy of each family.
//!
//! Everything imprecise lives here, behind one `recognize` function per
//! family, so it can be tuned or switched off
//! ([`NormalizeOptions::natural_language`](crate::NormalizeOptions)) without
//! touching the structured paths.

pub mod cnc;
pub mod drilling;
pub mod edgeband;
pub mod groove;

use std::sync::LazyLock;

use panel_codec::parse_mm;
use panel_model::{EdgeSet, EdgeSide};
use regex::Regex;

static SIDE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(L1|L2|W1|W2)\b").expect("Invalid side word regex"));

static SIZE_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*(?:mm)?\s*[x×*]\s*(\d+(?:[.,]\d+)?)(?:\s*(?:mm)?\s*[x×*]\s*(\d+(?:[.,]\d+)?))?")
        .expect("Invalid size pair regex")
});

/// Edge sides named literally (`L1`, `w2`) anywhere in the text.
pub(crate) fn named_sides(text: &str) -> EdgeSet {
    SIDE_WORD
        .captures_iter(text)
        .filter_map(|caps| caps[1].parse::<EdgeSide>().ok())
        .collect()
}

/// The first `A x B [x C]` size in the text.
pub(crate) fn size(text: &str) -> Option<(f64, f64, Option<f64>)> {
    let caps = SIZE_PAIR.captures(text)?;
    let first = parse_mm(&caps[1])?;
    let second = parse_mm(&caps[2])?;
    let third = caps.get(3).and_then(|m| parse_mm(m.as_str()));
    Some((first, second, third))
}

/// First capture group of `regex` that parses as a number.
pub(crate) fn number(regex: &Regex, text: &str) -> Option<f64> {
    let caps = regex.captures(text)?;
    caps.iter()
        .skip(1)
        .flatten()
        .find_map(|m| parse_mm(m.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_and_sides() {
        assert_eq!(size("sink 600 x 500mm"), Some((600.0, 500.0, None)));
        assert_eq!(size("pocket 100x50x10"), Some((100.0, 50.0, Some(10.0))));
        assert_eq!(size("no size"), None);
        assert_eq!(named_sides("groove l1 and W2"), EdgeSet::from_iter([EdgeSide::L1, EdgeSide::W2]));
    }
}
