//! Drilling normalization: hole patterns from codes, presets, hardware
//! columns and phrases.

use std::collections::BTreeMap;
use std::str::FromStr;

use panel_codec::{
    HoleCode, Overrides, builtin_hole_patterns, builtin_hole_preset, decode_hole, split_overrides,
};
use panel_dialect::{ColumnKey, Dialect, DrillingDefaults, HolePreset, lookup_key};
use panel_ingest::{DrillingHints, RawFields};
use panel_model::{HoleKind, HolePatternSpec, PartDimensions, ParamValue, ServiceFamily};

use crate::chain::{FamilyResolver, apply_default_if_blank, resolve_input, resolve_tokens};
use crate::columns::{Mark, column_input, mark, small_count};
use crate::heuristics;
use crate::options::NormalizeOptions;
use crate::trace::{FamilyOutcome, Recorder, Strategy};

/// A pattern of `kind` carrying only the dialect's hardware defaults.
pub(crate) fn base_spec(kind: HoleKind, defaults: &DrillingDefaults) -> HolePatternSpec {
    let hardware = defaults.for_kind(kind);
    let mut spec = HolePatternSpec::new(
        kind,
        hardware.ref_edge,
        vec![hardware.offset_mm],
        hardware.distance_from_edge_mm,
    );
    spec.pitch_mm = hardware.pitch_mm;
    spec.diameter_mm = hardware.diameter_mm;
    spec.depth_mm = hardware.depth_mm;
    spec
}

/// Expand a decoded hole code into a full pattern.
pub(crate) fn hole_spec(code: &HoleCode, defaults: &DrillingDefaults) -> HolePatternSpec {
    let mut spec = base_spec(code.kind(), defaults);
    match *code {
        HoleCode::Hinge { count, offset_mm } => {
            if let Some(offset_mm) = offset_mm {
                spec.offsets_mm = vec![offset_mm];
            }
            spec.count = Some(count);
        }
        HoleCode::ShelfPin { pitch_mm } => {
            spec.pitch_mm = pitch_mm.or(spec.pitch_mm).or(Some(32.0));
        }
        HoleCode::Handle { centers_mm } => {
            spec.offsets_mm = vec![-centers_mm / 2.0, centers_mm / 2.0];
            spec.from_center = true;
        }
        HoleCode::Knob { offset_mm } => match offset_mm {
            Some(offset_mm) => spec.offsets_mm = vec![offset_mm],
            None => {
                spec.offsets_mm = vec![0.0];
                spec.from_center = true;
            }
        },
        HoleCode::DrawerSlide { length_mm } => {
            let front = defaults.drawer_slide.offset_mm;
            spec.offsets_mm = vec![front, length_mm - front];
        }
        HoleCode::CamLock { offset_mm } | HoleCode::Dowel { offset_mm } => {
            spec.offsets_mm = vec![offset_mm];
        }
        HoleCode::System32 { distance_mm } => {
            if let Some(distance_mm) = distance_mm {
                spec.distance_from_edge_mm = distance_mm;
            }
        }
    }
    spec
}

/// The first built-in pattern of a kind, used when nothing gives a size.
pub(crate) fn default_code(kind: HoleKind) -> Option<HoleCode> {
    builtin_hole_patterns(kind).first().map(|(_, code)| *code)
}

/// A hole code for a number typed into a hardware column.
fn code_for_number(kind: HoleKind, value: f64) -> Option<HoleCode> {
    let code = match kind {
        HoleKind::Hinge | HoleKind::Custom => return None,
        HoleKind::ShelfPin => HoleCode::ShelfPin {
            pitch_mm: Some(value),
        },
        HoleKind::Handle => HoleCode::Handle { centers_mm: value },
        HoleKind::Knob => HoleCode::Knob {
            offset_mm: Some(value),
        },
        HoleKind::DrawerSlide => HoleCode::DrawerSlide { length_mm: value },
        HoleKind::CamLock => HoleCode::CamLock { offset_mm: value },
        HoleKind::Dowel => HoleCode::Dowel { offset_mm: value },
        HoleKind::System32 => HoleCode::System32 {
            distance_mm: Some(value),
        },
    };
    Some(code)
}

fn apply_preset(mut spec: HolePatternSpec, preset: &HolePreset) -> HolePatternSpec {
    if let Some(ref_edge) = preset.ref_edge {
        spec.ref_edge = ref_edge;
    }
    if let Some(distance) = preset.distance_from_edge_mm {
        spec.distance_from_edge_mm = distance;
    }
    if let Some(diameter) = preset.diameter_mm {
        spec.diameter_mm = Some(diameter);
    }
    if let Some(depth) = preset.depth_mm {
        spec.depth_mm = Some(depth);
    }
    if let Some(hardware_ref) = &preset.hardware_ref {
        spec.hardware_ref = Some(hardware_ref.clone());
    }
    spec
}

fn override_spec(mut spec: HolePatternSpec, overrides: &Overrides) -> HolePatternSpec {
    if let Some(count) = overrides.count.filter(|count| count.is_finite() && *count >= 1.0) {
        spec.count = Some(count.round() as u32);
    }
    let offset = overrides.offset.or(overrides.bare);
    match spec.kind {
        HoleKind::Handle => {
            if let Some(centers) = overrides.centers.or(offset) {
                spec.offsets_mm = vec![-centers / 2.0, centers / 2.0];
                spec.from_center = true;
            }
        }
        HoleKind::DrawerSlide => {
            if let Some(front) = offset {
                let length: f64 = spec.offsets_mm.iter().sum();
                spec.offsets_mm = vec![front, length - front];
            }
        }
        _ => {
            if let Some(offset) = offset {
                spec.offsets_mm = vec![offset];
                spec.from_center = false;
            }
        }
    }
    if let Some(diameter) = overrides.diameter {
        spec.diameter_mm = Some(diameter);
    }
    if let Some(depth) = overrides.depth {
        spec.depth_mm = Some(depth);
    }
    spec
}

struct DrillingResolver<'a> {
    dialect: &'a Dialect,
}

impl DrillingResolver<'_> {
    fn defaults(&self) -> &DrillingDefaults {
        &self.dialect.config().drilling.defaults
    }
}

impl FamilyResolver for DrillingResolver<'_> {
    type Output = Vec<HolePatternSpec>;

    const FAMILY: ServiceFamily = ServiceFamily::Drilling;

    fn preset(&self, name: &str) -> Option<Self::Output> {
        let preset = self.dialect.config().drilling.presets.get(&lookup_key(name))?;
        let (code, overrides) = split_overrides(&preset.code);
        let code = decode_hole(code).or_else(|| builtin_hole_preset(code))?;
        let spec = apply_preset(hole_spec(&code, self.defaults()), preset);
        Some(vec![override_spec(spec, &overrides)])
    }

    fn decode(&self, code: &str) -> Option<Self::Output> {
        decode_hole(code).map(|code| vec![hole_spec(&code, self.defaults())])
    }

    fn builtin(&self, name: &str) -> Option<Self::Output> {
        builtin_hole_preset(name).map(|code| vec![hole_spec(&code, self.defaults())])
    }

    fn heuristic(&self, text: &str) -> Option<Self::Output> {
        heuristics::drilling::recognize(text, self.defaults())
    }

    fn apply_overrides(&self, output: Self::Output, overrides: &Overrides) -> Self::Output {
        output
            .into_iter()
            .map(|spec| override_spec(spec, overrides))
            .collect()
    }
}

fn push_unique(specs: &mut Vec<HolePatternSpec>, spec: HolePatternSpec) {
    if !specs.contains(&spec) {
        specs.push(spec);
    }
}

fn hint_spec(hints: &DrillingHints, defaults: &DrillingDefaults) -> Option<HolePatternSpec> {
    if hints.hinge_count.is_none()
        && hints.hinge_offset_mm.is_none()
        && hints.hinge_edge.is_none()
    {
        return None;
    }
    let mut spec = base_spec(HoleKind::Hinge, defaults);
    spec.count = hints.hinge_count;
    if let Some(offset) = hints.hinge_offset_mm {
        spec.offsets_mm = vec![offset];
    }
    if let Some(edge) = hints.hinge_edge {
        spec.ref_edge = edge;
    }
    Some(spec)
}

/// The hardware kind a drilling column is about, if its header names one.
fn column_kind(dialect: &Dialect, header: &str) -> Option<HoleKind> {
    match dialect.column_key(ServiceFamily::Drilling, header) {
        Some(key) => key.hole_kind(),
        None => HoleKind::from_str(header.trim()).ok(),
    }
}

fn apply_columns(
    resolver: &DrillingResolver<'_>,
    options: &NormalizeOptions,
    columns: &BTreeMap<String, ParamValue>,
    recorder: &mut Recorder,
    specs: &mut Vec<HolePatternSpec>,
) {
    let dialect = resolver.dialect;
    let family = ServiceFamily::Drilling;
    for (header, value) in columns {
        let kind = match dialect.column_key(family, header) {
            Some(ColumnKey::Code) => None,
            _ => column_kind(dialect, header),
        };
        // A hinge count of 1 is a count, not a yes mark.
        let cell = match (kind, small_count(value, u32::MAX)) {
            (Some(HoleKind::Hinge), Some(count)) => Mark::Number(f64::from(count)),
            _ => mark(dialect, family, value),
        };
        let from_column = match (kind, cell) {
            (_, Mark::Blank | Mark::No) => None,
            (None, Mark::Yes) => {
                recorder.miss(family, column_input(header, value));
                None
            }
            (None, Mark::Number(_) | Mark::Text(_)) | (Some(_), Mark::Text(_)) => {
                let text = value.as_text();
                let mut collect = |output: Vec<HolePatternSpec>| {
                    for spec in output {
                        push_unique(specs, spec);
                    }
                };
                resolve_input(resolver, dialect, options, &text, recorder, &mut collect);
                None
            }
            (Some(HoleKind::Hinge), Mark::Number(count)) => {
                if count.fract() == 0.0 && count >= 1.0 {
                    let mut spec = base_spec(HoleKind::Hinge, resolver.defaults());
                    spec.count = Some(count as u32);
                    Some(spec)
                } else {
                    recorder.miss(family, column_input(header, value));
                    None
                }
            }
            (Some(HoleKind::Hinge), Mark::Yes) => {
                Some(base_spec(HoleKind::Hinge, resolver.defaults()))
            }
            (Some(kind), Mark::Yes) => {
                default_code(kind).map(|code| hole_spec(&code, resolver.defaults()))
            }
            (Some(kind), Mark::Number(number)) => {
                code_for_number(kind, number).map(|code| hole_spec(&code, resolver.defaults()))
            }
        };
        if let Some(spec) = from_column {
            recorder.hit(family, column_input(header, value), Strategy::Column);
            push_unique(specs, spec);
        }
    }
}

/// Give hinges without a count the count for the door's height.
fn fill_hinge_counts(
    specs: &mut [HolePatternSpec],
    defaults: &DrillingDefaults,
    dimensions: Option<&PartDimensions>,
) {
    for spec in specs.iter_mut() {
        if spec.kind != HoleKind::Hinge || spec.count.is_some() {
            continue;
        }
        let count = match dimensions {
            Some(dimensions) => {
                defaults.hinge_count_for_height(dimensions.edge_length(spec.ref_edge))
            }
            None => defaults.hinge_count,
        };
        tracing::trace!(count, "hinge count from defaults");
        spec.count = Some(count);
    }
}

/// Normalize the drilling input of one part.
///
/// `dimensions` lets the hinge count follow the dialect's height table when
/// no count was given.
pub fn normalize_drilling(
    raw: &RawFields<DrillingHints>,
    dimensions: Option<&PartDimensions>,
    dialect: &Dialect,
    options: &NormalizeOptions,
) -> FamilyOutcome<Vec<HolePatternSpec>> {
    let resolver = DrillingResolver { dialect };
    let mut recorder = Recorder::default();
    let mut specs = Vec::new();

    if let Some(spec) = raw
        .hints
        .as_ref()
        .and_then(|hints| hint_spec(hints, resolver.defaults()))
    {
        recorder.hit(ServiceFamily::Drilling, "hints", Strategy::Hint);
        specs.push(spec);
    }

    let mut sink = |output: Vec<HolePatternSpec>| {
        for spec in output {
            push_unique(&mut specs, spec);
        }
    };
    resolve_tokens(&resolver, dialect, options, &raw.tokens, &mut recorder, &mut sink);
    if raw.is_blank() {
        apply_default_if_blank(&resolver, dialect, &mut recorder, &mut sink);
    }
    apply_columns(&resolver, options, &raw.columns, &mut recorder, &mut specs);

    fill_hinge_counts(&mut specs, resolver.defaults(), dimensions);
    FamilyOutcome::new(specs, recorder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_dialect::{default_config, global_default};

    fn defaults() -> DrillingDefaults {
        default_config().drilling.defaults
    }

    fn normalize(raw: &RawFields<DrillingHints>) -> Vec<HolePatternSpec> {
        normalize_drilling(raw, None, &global_default(), &NormalizeOptions::default()).value
    }

    #[test]
    fn hinge_code_keeps_count_and_offset() {
        let specs = normalize(&RawFields::text("H2-110"));
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].count, Some(2));
        assert_eq!(specs[0].offsets_mm, vec![110.0]);
        assert_eq!(specs[0].diameter_mm, Some(35.0));
    }

    #[test]
    fn drawer_slide_holes_at_both_ends() {
        let spec = hole_spec(&HoleCode::DrawerSlide { length_mm: 450.0 }, &defaults());
        let front = defaults().drawer_slide.offset_mm;
        assert_eq!(spec.offsets_mm, vec![front, 450.0 - front]);
    }

    #[test]
    fn overrides_reach_the_pattern() {
        let specs = normalize(&RawFields::text("H2-100@c3@dia26"));
        assert_eq!(specs[0].count, Some(3));
        assert_eq!(specs[0].diameter_mm, Some(26.0));
    }

    #[test]
    fn hinge_count_follows_height() {
        let dialect = global_default();
        let raw = RawFields::text("hinges");
        let tall = PartDimensions::new(2000.0, 500.0);
        let expected = dialect
            .config()
            .drilling
            .defaults
            .hinge_count_for_height(2000.0);
        let outcome = normalize_drilling(&raw, Some(&tall), &dialect, &NormalizeOptions::default());
        assert_eq!(outcome.value[0].count, Some(expected));

        let outcome = normalize_drilling(&raw, None, &dialect, &NormalizeOptions::default());
        assert_eq!(outcome.value[0].count, Some(defaults().hinge_count));
    }

    #[test]
    fn hardware_columns() {
        let raw = RawFields::new()
            .with_column("Hinges", "3")
            .with_column("Handle", "128")
            .with_column("Shelf pins", "");
        let specs = normalize(&raw);
        assert_eq!(specs.len(), 2);
        let handle = specs.iter().find(|spec| spec.kind == HoleKind::Handle).unwrap();
        assert_eq!(handle.offsets_mm, vec![-64.0, 64.0]);
        let hinge = specs.iter().find(|spec| spec.kind == HoleKind::Hinge).unwrap();
        assert_eq!(hinge.count, Some(3));
    }

    #[test]
    fn single_hinge_column_is_a_count() {
        let specs = normalize(&RawFields::new().with_column("Hinges", "1"));
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].count, Some(1));

        let specs = normalize(&RawFields::new().with_column("Hinges", "x"));
        assert_eq!(specs[0].count, Some(defaults().hinge_count));
    }

    #[test]
    fn zero_count_override_is_ignored() {
        let specs = normalize(&RawFields::text("H2-100@c0"));
        assert_eq!(specs[0].count, Some(2));
    }

    #[test]
    fn hints_become_a_hinge() {
        let hints = DrillingHints {
            hinge_count: Some(4),
            ..DrillingHints::default()
        };
        let outcome = normalize_drilling(
            &RawFields::new().with_hints(hints),
            None,
            &global_default(),
            &NormalizeOptions::default(),
        );
        assert_eq!(outcome.value[0].count, Some(4));
        assert_eq!(outcome.trace[0].strategy, Strategy::Hint);
    }
}
