//! Keyword routing for free-text phrases and source column headers.

use panel_model::ServiceFamily;

const EDGE_KEYWORDS: &[&str] = &["EDG", "BAND", "TAPE", "LIPP"];
const GROOVE_KEYWORDS: &[&str] = &["GROOV", "DADO"];
const GROOVE_PHRASES: &[&str] = &["BACK PANEL", "DRAWER BOTTOM"];
const DRILLING_KEYWORDS: &[&str] = &[
    "HINGE", "HANDLE", "KNOB", "PIN", "SLIDE", "RUNNER", "CAM", "MINIFIX", "DOWEL", "HOLE",
    "DRILL", "BORE", "SYSTEM", "HARDWARE",
];
const CNC_KEYWORDS: &[&str] = &[
    "CUTOUT", "SINK", "HOB", "RADIUS", "POCKET", "PROFILE", "REBATE", "RABBET", "CHAMFER",
    "BEVEL", "ENGRAV", "TEXT", "CNC", "CORNER", "MACHIN",
];
const CNC_PHRASES: &[&str] = &["CUT OUT"];

const LENGTH_HEADERS: &[&str] = &["LENGTH", "LEN", "LENGTH MM", "LENGTH (MM)"];
const WIDTH_HEADERS: &[&str] = &["WIDTH", "WIDTH MM", "WIDTH (MM)"];
const THICKNESS_HEADERS: &[&str] = &["THICKNESS", "THK", "THICKNESS MM", "THICKNESS (MM)"];
const LABEL_HEADERS: &[&str] = &["PART", "NAME", "LABEL", "ID", "PART NAME", "PART ID", "PART NO"];
const NOTE_HEADERS: &[&str] = &[
    "NOTE",
    "NOTES",
    "REMARK",
    "REMARKS",
    "SERVICES",
    "DESCRIPTION",
    "COMMENT",
    "COMMENTS",
];
const EDGE_HEADERS: &[&str] = &["L1", "L2", "W1", "W2", "L", "W", "ALL", "EB"];

/// What a source column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderRole {
    Length,
    Width,
    Thickness,
    Label,
    /// Free text holding services of any family.
    Notes,
    Family(ServiceFamily),
    Unmapped,
}

/// Upper-case words, split on anything that is not a letter or digit.
fn words(text: &str) -> Vec<String> {
    text.to_uppercase()
        .split(|ch: char| !ch.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

fn collapse(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

fn has_keyword(words: &[String], joined: &str, keywords: &[&str], phrases: &[&str]) -> bool {
    words
        .iter()
        .any(|word| keywords.iter().any(|keyword| word.starts_with(keyword)))
        || phrases.iter().any(|phrase| joined.contains(phrase))
}

/// Families whose vocabulary shows up in a phrase, in family order.
pub fn keyword_families(text: &str) -> Vec<ServiceFamily> {
    let words = words(text);
    let joined = words.join(" ");
    ServiceFamily::ALL
        .into_iter()
        .filter(|family| {
            let (keywords, phrases) = match family {
                ServiceFamily::EdgeBand => (EDGE_KEYWORDS, &[][..]),
                ServiceFamily::Groove => (GROOVE_KEYWORDS, GROOVE_PHRASES),
                ServiceFamily::Drilling => (DRILLING_KEYWORDS, &[][..]),
                ServiceFamily::Cnc => (CNC_KEYWORDS, CNC_PHRASES),
            };
            has_keyword(&words, &joined, keywords, phrases)
        })
        .collect()
}

/// Classify a source column header.
///
/// Dimension, label and note headers must match exactly. Family headers
/// match on keywords, with grooves checked first so that `GROOVE WIDTH` is
/// not taken for a part dimension or an edge column.
pub fn classify_header(header: &str) -> HeaderRole {
    let key = collapse(header.trim_matches('\u{feff}'));
    if key.is_empty() {
        return HeaderRole::Unmapped;
    }
    let key = key.as_str();
    if LENGTH_HEADERS.contains(&key) {
        return HeaderRole::Length;
    }
    if WIDTH_HEADERS.contains(&key) {
        return HeaderRole::Width;
    }
    if THICKNESS_HEADERS.contains(&key) {
        return HeaderRole::Thickness;
    }
    if LABEL_HEADERS.contains(&key) {
        return HeaderRole::Label;
    }
    if NOTE_HEADERS.contains(&key) {
        return HeaderRole::Notes;
    }

    let words = words(key);
    let joined = words.join(" ");
    if has_keyword(&words, &joined, GROOVE_KEYWORDS, GROOVE_PHRASES) {
        return HeaderRole::Family(ServiceFamily::Groove);
    }
    if has_keyword(&words, &joined, DRILLING_KEYWORDS, &[]) {
        return HeaderRole::Family(ServiceFamily::Drilling);
    }
    if has_keyword(&words, &joined, CNC_KEYWORDS, CNC_PHRASES) {
        return HeaderRole::Family(ServiceFamily::Cnc);
    }
    if EDGE_HEADERS.contains(&key)
        || words.iter().any(|word| EDGE_HEADERS.contains(&word.as_str()))
        || has_keyword(&words, &joined, EDGE_KEYWORDS, &[])
    {
        return HeaderRole::Family(ServiceFamily::EdgeBand);
    }
    HeaderRole::Unmapped
}
