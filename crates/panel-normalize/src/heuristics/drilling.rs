use std::sync::LazyLock;

use panel_codec::HoleCode;
use panel_dialect::DrillingDefaults;
use panel_model::{HoleKind, HolePatternSpec};
use regex::Regex;

use crate::drilling::{base_spec, default_code, hole_spec};
use crate::heuristics::number;

static HINGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:(\d+)\s*(?:x\s*)?)?(?:hinges?|hinge\s+holes?|cups?|cup\s+holes?)\b")
        .expect("Invalid hinge phrase regex")
});
static HINGE_OFFSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*mm\s*(?:in\s+)?from\b|@\s*(\d+(?:[.,]\d+)?)|\boffset\s*:?\s*(\d+(?:[.,]\d+)?)")
        .expect("Invalid hinge offset regex")
});
static SHELF_PIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bshelf[\s-]*(?:pins?|holes?|supports?)\b|\bpin\s+holes?\b|\badjustable\s+shel(?:f|ves)\b")
        .expect("Invalid shelf-pin phrase regex")
});
static PITCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*mm\s*(?:pitch|spacing|apart)\b|\b(?:pitch|spacing)\s*:?\s*(\d+(?:[.,]\d+)?)")
        .expect("Invalid pitch regex")
});
static HANDLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:handles?|pulls?)\b").expect("Invalid handle phrase regex"));
static CENTERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*(?:mm)?\s*(?:cc|c/c|c-c|centers?|centres?)\b|\b(?:cc|c/c)\s*:?\s*(\d+(?:[.,]\d+)?)")
        .expect("Invalid centers regex")
});
static KNOB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bknobs?\b").expect("Invalid knob phrase regex"));
static KNOB_OFFSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*mm\s*(?:in\s+)?from\b").expect("Invalid knob offset regex")
});
static DRAWER_SLIDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:drawer\s+)?(?:slides?|runners?)\b").expect("Invalid slide phrase regex")
});
static SLIDE_LENGTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{3})\s*(?:mm)?\b").expect("Invalid slide length regex"));
static CAM_LOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bcam(?:s|\s*locks?)?\b|\bminifix\b").expect("Invalid cam phrase regex")
});
static DOWEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bdowels?\b").expect("Invalid dowel phrase regex"));
static SYSTEM32: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bsys(?:tem)?[\s-]*32\b|\b32\s*mm\s+system\b").expect("Invalid system-32 phrase regex")
});

fn hinge(text: &str, defaults: &DrillingDefaults) -> Option<HolePatternSpec> {
    let caps = HINGE.captures(text)?;
    let mut spec = base_spec(HoleKind::Hinge, defaults);
    if let Some(offset) = number(&HINGE_OFFSET, text) {
        spec.offsets_mm = vec![offset];
    }
    // Without a stated count the part height decides later.
    spec.count = caps
        .get(1)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .filter(|count| *count > 0);
    Some(spec)
}

fn shelf_pin(text: &str, defaults: &DrillingDefaults) -> Option<HolePatternSpec> {
    if !SHELF_PIN.is_match(text) {
        return None;
    }
    let pitch = number(&PITCH, text);
    Some(hole_spec(&HoleCode::ShelfPin { pitch_mm: pitch }, defaults))
}

fn handle(text: &str, defaults: &DrillingDefaults) -> Option<HolePatternSpec> {
    if !HANDLE.is_match(text) {
        return None;
    }
    let code = match number(&CENTERS, text) {
        Some(centers_mm) => HoleCode::Handle { centers_mm },
        None => default_code(HoleKind::Handle)?,
    };
    Some(hole_spec(&code, defaults))
}

fn knob(text: &str, defaults: &DrillingDefaults) -> Option<HolePatternSpec> {
    if !KNOB.is_match(text) {
        return None;
    }
    let offset_mm = number(&KNOB_OFFSET, text);
    Some(hole_spec(&HoleCode::Knob { offset_mm }, defaults))
}

fn drawer_slide(text: &str, defaults: &DrillingDefaults) -> Option<HolePatternSpec> {
    if !DRAWER_SLIDE.is_match(text) {
        return None;
    }
    let code = match number(&SLIDE_LENGTH, text) {
        Some(length_mm) => HoleCode::DrawerSlide { length_mm },
        None => default_code(HoleKind::DrawerSlide)?,
    };
    Some(hole_spec(&code, defaults))
}

fn fixed(
    kind: HoleKind,
    regex: &Regex,
    text: &str,
    defaults: &DrillingDefaults,
) -> Option<HolePatternSpec> {
    if !regex.is_match(text) {
        return None;
    }
    Some(hole_spec(&default_code(kind)?, defaults))
}

/// Hole patterns described by a phrase such as "2 hinges" or "drawer slide 450".
///
/// Every hardware recognizer runs; a phrase naming several kinds yields one
/// pattern per kind.
pub fn recognize(text: &str, defaults: &DrillingDefaults) -> Option<Vec<HolePatternSpec>> {
    let specs: Vec<HolePatternSpec> = [
        hinge(text, defaults),
        shelf_pin(text, defaults),
        handle(text, defaults),
        knob(text, defaults),
        drawer_slide(text, defaults),
        fixed(HoleKind::CamLock, &CAM_LOCK, text, defaults),
        fixed(HoleKind::Dowel, &DOWEL, text, defaults),
        fixed(HoleKind::System32, &SYSTEM32, text, defaults),
    ]
    .into_iter()
    .flatten()
    .collect();
    (!specs.is_empty()).then_some(specs)
}
