//! Groove normalization.

use std::collections::BTreeMap;

use panel_codec::{Overrides, builtin_groove_preset, decode_groove, split_overrides};
use panel_dialect::{ColumnKey, Dialect, GrooveDefaults, lookup_key};
use panel_ingest::{GrooveHints, RawFields};
use panel_model::{EdgeSet, GrooveSpec, ParamValue, ServiceFamily};

use crate::chain::{FamilyResolver, apply_default_if_blank, resolve_input, resolve_tokens};
use crate::columns::{Mark, column_input, mark};
use crate::heuristics;
use crate::options::NormalizeOptions;
use crate::trace::{FamilyOutcome, Recorder, Strategy};

struct GrooveResolver<'a> {
    dialect: &'a Dialect,
}

impl GrooveResolver<'_> {
    fn defaults(&self) -> &GrooveDefaults {
        &self.dialect.config().groove.defaults
    }
}

impl FamilyResolver for GrooveResolver<'_> {
    type Output = Vec<GrooveSpec>;

    const FAMILY: ServiceFamily = ServiceFamily::Groove;

    fn preset(&self, name: &str) -> Option<Self::Output> {
        let preset = self.dialect.config().groove.presets.get(&lookup_key(name))?;
        let (code, overrides) = split_overrides(&preset.code);
        let code = decode_groove(code).or_else(|| builtin_groove_preset(code))?;
        let defaults = self.defaults();
        let specs = code
            .to_specs(
                preset.depth_mm.unwrap_or(defaults.depth_mm),
                preset.face.unwrap_or(defaults.face),
            )
            .into_iter()
            .map(|spec| match &preset.note {
                Some(note) => spec.with_note(note.clone()),
                None => spec,
            })
            .collect();
        Some(self.apply_overrides(specs, &overrides))
    }

    fn decode(&self, code: &str) -> Option<Self::Output> {
        let defaults = self.defaults();
        decode_groove(code).map(|code| code.to_specs(defaults.depth_mm, defaults.face))
    }

    fn builtin(&self, name: &str) -> Option<Self::Output> {
        let defaults = self.defaults();
        builtin_groove_preset(name).map(|code| code.to_specs(defaults.depth_mm, defaults.face))
    }

    fn heuristic(&self, text: &str) -> Option<Self::Output> {
        heuristics::groove::recognize(text, self.defaults())
    }

    fn apply_overrides(&self, output: Self::Output, overrides: &Overrides) -> Self::Output {
        output
            .into_iter()
            .map(|mut spec| {
                if let Some(depth) = overrides.depth {
                    spec.depth_mm = depth;
                }
                if let Some(width) = overrides.width.or(overrides.bare) {
                    spec.width_mm = width;
                }
                if let Some(offset) = overrides.offset {
                    spec.offset_mm = offset;
                }
                spec
            })
            .collect()
    }
}

fn push_unique(grooves: &mut Vec<GrooveSpec>, spec: GrooveSpec) {
    if !grooves.contains(&spec) {
        grooves.push(spec);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GrooveColumn {
    Code,
    Width,
    Depth,
    Offset,
    Edges(EdgeSet),
}

fn groove_column(dialect: &Dialect, header: &str) -> GrooveColumn {
    match dialect.column_key(ServiceFamily::Groove, header) {
        Some(ColumnKey::GrooveWidth) => GrooveColumn::Width,
        Some(ColumnKey::Depth) => GrooveColumn::Depth,
        Some(ColumnKey::Offset) => GrooveColumn::Offset,
        Some(ColumnKey::Long) => GrooveColumn::Edges(EdgeSet::LONG),
        Some(ColumnKey::Width) => GrooveColumn::Edges(EdgeSet::WIDTH),
        Some(ColumnKey::All) => GrooveColumn::Edges(EdgeSet::ALL),
        Some(key) => key
            .edge_side()
            .map_or(GrooveColumn::Code, |side| GrooveColumn::Edges(EdgeSet::single(side))),
        None => GrooveColumn::Code,
    }
}

/// Width, depth and offset columns that shape the grooves other columns ask for.
#[derive(Debug, Clone, Copy, Default)]
struct Geometry {
    width_mm: Option<f64>,
    depth_mm: Option<f64>,
    offset_mm: Option<f64>,
}

impl Geometry {
    fn grooves(&self, edges: EdgeSet, defaults: &GrooveDefaults) -> Vec<GrooveSpec> {
        edges
            .iter()
            .map(|side| {
                GrooveSpec::new(
                    side,
                    self.width_mm.unwrap_or(defaults.width_mm),
                    self.depth_mm.unwrap_or(defaults.depth_mm),
                    self.offset_mm.unwrap_or(defaults.offset_mm),
                )
                .with_face(defaults.face)
            })
            .collect()
    }
}

fn apply_columns(
    resolver: &GrooveResolver<'_>,
    options: &NormalizeOptions,
    columns: &BTreeMap<String, ParamValue>,
    recorder: &mut Recorder,
    grooves: &mut Vec<GrooveSpec>,
) {
    let dialect = resolver.dialect;
    let family = ServiceFamily::Groove;
    let classified: Vec<(GrooveColumn, &String, &ParamValue)> = columns
        .iter()
        .map(|(header, value)| (groove_column(dialect, header), header, value))
        .collect();

    let mut geometry = Geometry::default();
    for (column, header, value) in &classified {
        let slot = match column {
            GrooveColumn::Width => &mut geometry.width_mm,
            GrooveColumn::Depth => &mut geometry.depth_mm,
            GrooveColumn::Offset => &mut geometry.offset_mm,
            GrooveColumn::Code | GrooveColumn::Edges(_) => continue,
        };
        if let Some(number) = value.as_f64() {
            *slot = Some(number);
            recorder.hit(family, column_input(header, value), Strategy::Column);
        }
    }

    for (column, header, value) in classified {
        let edges = match column {
            GrooveColumn::Code => EdgeSet::single(resolver.defaults().side),
            GrooveColumn::Edges(edges) => edges,
            _ => continue,
        };
        let produced = match mark(dialect, family, value) {
            Mark::Blank | Mark::No => continue,
            Mark::Yes => geometry.grooves(edges, resolver.defaults()),
            Mark::Number(width) => Geometry {
                width_mm: Some(width),
                ..geometry
            }
            .grooves(edges, resolver.defaults()),
            Mark::Text(text) => {
                let mut collect = |output: Vec<GrooveSpec>| {
                    for spec in output {
                        push_unique(grooves, spec);
                    }
                };
                resolve_input(resolver, dialect, options, &text, recorder, &mut collect);
                continue;
            }
        };
        recorder.hit(family, column_input(header, value), Strategy::Column);
        for spec in produced {
            push_unique(grooves, spec);
        }
    }
}

fn hint_spec(hints: &GrooveHints, defaults: &GrooveDefaults) -> Option<GrooveSpec> {
    if hints == &GrooveHints::default() {
        return None;
    }
    Some(
        GrooveSpec::new(
            hints.side.unwrap_or(defaults.side),
            hints.width_mm.unwrap_or(defaults.width_mm),
            hints.depth_mm.unwrap_or(defaults.depth_mm),
            hints.offset_mm.unwrap_or(defaults.offset_mm),
        )
        .with_face(defaults.face),
    )
}

/// Normalize the groove input of one part. Identical grooves are kept once.
pub fn normalize_grooves(
    raw: &RawFields<GrooveHints>,
    dialect: &Dialect,
    options: &NormalizeOptions,
) -> FamilyOutcome<Vec<GrooveSpec>> {
    let resolver = GrooveResolver { dialect };
    let mut recorder = Recorder::default();
    let mut grooves = Vec::new();

    if let Some(spec) = raw
        .hints
        .as_ref()
        .and_then(|hints| hint_spec(hints, resolver.defaults()))
    {
        recorder.hit(ServiceFamily::Groove, "hints", Strategy::Hint);
        grooves.push(spec);
    }

    let mut sink = |output: Vec<GrooveSpec>| {
        for spec in output {
            push_unique(&mut grooves, spec);
        }
    };
    resolve_tokens(&resolver, dialect, options, &raw.tokens, &mut recorder, &mut sink);
    if raw.is_blank() {
        apply_default_if_blank(&resolver, dialect, &mut recorder, &mut sink);
    }
    apply_columns(&resolver, options, &raw.columns, &mut recorder, &mut grooves);

    FamilyOutcome::new(grooves, recorder)
}
