//! Edge banding normalization.

use std::collections::BTreeMap;

use panel_codec::{Overrides, decode_edges, split_overrides};
use panel_dialect::{ColumnKey, Dialect, lookup_key};
use panel_ingest::{EdgeHints, RawFields};
use panel_model::{EdgeBandSpec, EdgeSet, EdgeSide, ParamValue, ServiceFamily};

use crate::chain::{FamilyResolver, apply_default_if_blank, resolve_input, resolve_tokens};
use crate::columns::{Mark, column_input, mark, small_count};
use crate::heuristics;
use crate::options::NormalizeOptions;
use crate::trace::{FamilyOutcome, Recorder, Strategy};

/// What one strategy contributed to the band of a part.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct EdgeFragment {
    edges: EdgeSet,
    tape_id: Option<String>,
    thickness_mm: Option<f64>,
}

impl EdgeFragment {
    fn edges(edges: EdgeSet) -> Self {
        Self {
            edges,
            ..Self::default()
        }
    }

    /// Union the edges; the first tape and thickness seen are kept.
    fn absorb(&mut self, other: EdgeFragment) {
        self.edges = self.edges.union(other.edges);
        if self.tape_id.is_none() {
            self.tape_id = other.tape_id;
        }
        if self.thickness_mm.is_none() {
            self.thickness_mm = other.thickness_mm;
        }
    }
}

struct EdgeResolver<'a> {
    dialect: &'a Dialect,
}

impl FamilyResolver for EdgeResolver<'_> {
    type Output = EdgeFragment;

    const FAMILY: ServiceFamily = ServiceFamily::EdgeBand;

    fn preset(&self, name: &str) -> Option<Self::Output> {
        let preset = self.dialect.config().edgeband.presets.get(&lookup_key(name))?;
        let (code, overrides) = split_overrides(&preset.code);
        let fragment = EdgeFragment {
            edges: decode_edges(code)?,
            tape_id: preset.tape_id.clone(),
            thickness_mm: preset.thickness_mm,
        };
        Some(self.apply_overrides(fragment, &overrides))
    }

    fn decode(&self, code: &str) -> Option<Self::Output> {
        decode_edges(code).map(EdgeFragment::edges)
    }

    // The codec's edge grammar already carries the shop-wide shorthands.
    fn builtin(&self, _name: &str) -> Option<Self::Output> {
        None
    }

    fn heuristic(&self, text: &str) -> Option<Self::Output> {
        heuristics::edgeband::recognize(text).map(EdgeFragment::edges)
    }

    fn apply_overrides(&self, mut output: Self::Output, overrides: &Overrides) -> Self::Output {
        if let Some(thickness) = overrides.depth.or(overrides.bare) {
            output.thickness_mm = Some(thickness);
        }
        output
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeColumn {
    Single(EdgeSide),
    Combined(EdgeSet),
    Code,
    Tape,
    Thickness,
}

fn edge_column(dialect: &Dialect, header: &str) -> Option<EdgeColumn> {
    match dialect.column_key(ServiceFamily::EdgeBand, header) {
        Some(key) => match key {
            ColumnKey::Long => Some(EdgeColumn::Combined(EdgeSet::LONG)),
            ColumnKey::Width => Some(EdgeColumn::Combined(EdgeSet::WIDTH)),
            ColumnKey::All => Some(EdgeColumn::Combined(EdgeSet::ALL)),
            ColumnKey::Code => Some(EdgeColumn::Code),
            ColumnKey::Tape => Some(EdgeColumn::Tape),
            ColumnKey::Thickness => Some(EdgeColumn::Thickness),
            other => other.edge_side().map(EdgeColumn::Single),
        },
        // A header written as an edge code (`2L`, `W1`) names its edges.
        None => decode_edges(header)
            .filter(|edges| !edges.is_empty())
            .map(|edges| {
                let mut sides = edges.iter();
                match (sides.next(), sides.next()) {
                    (Some(side), None) => EdgeColumn::Single(side),
                    _ => EdgeColumn::Combined(edges),
                }
            }),
    }
}

/// Combined columns (`L`, `W`, `ALL`) first, individual sides after, so that
/// `L1 = no` can take back an edge that `L = X` granted.
fn column_order(column: EdgeColumn) -> u8 {
    match column {
        EdgeColumn::Code | EdgeColumn::Tape | EdgeColumn::Thickness => 0,
        EdgeColumn::Combined(_) => 1,
        EdgeColumn::Single(_) => 2,
    }
}

/// The first `count` sides of a combined column.
fn first_sides(edges: EdgeSet, count: u32) -> EdgeSet {
    edges.iter().take(count as usize).collect()
}

fn apply_columns(
    resolver: &EdgeResolver<'_>,
    options: &NormalizeOptions,
    columns: &BTreeMap<String, ParamValue>,
    recorder: &mut Recorder,
    band: &mut EdgeFragment,
) {
    let dialect = resolver.dialect;
    let family = ServiceFamily::EdgeBand;
    let mut ordered: Vec<(EdgeColumn, &String, &ParamValue)> = columns
        .iter()
        .filter_map(|(header, value)| {
            let column = edge_column(dialect, header);
            if column.is_none() {
                tracing::debug!(header, "edge column not understood");
            }
            column.map(|column| (column, header, value))
        })
        .collect();
    ordered.sort_by_key(|(column, _, _)| column_order(*column));

    for (column, header, value) in ordered {
        let cell = mark(dialect, family, value);
        let applied = match (column, cell) {
            (_, Mark::Blank) => false,
            (EdgeColumn::Code, Mark::No) => false,
            (EdgeColumn::Code, _) => {
                let text = value.as_text();
                let mut absorb = |fragment: EdgeFragment| band.absorb(fragment);
                resolve_input(resolver, dialect, options, &text, recorder, &mut absorb);
                false
            }
            (EdgeColumn::Tape, Mark::No) => false,
            (EdgeColumn::Tape, _) => {
                band.tape_id = Some(value.as_text());
                true
            }
            // Read as a number even when it doubles as a yes mark (`1`).
            (EdgeColumn::Thickness, _) => match value.as_f64() {
                Some(thickness) => {
                    band.thickness_mm = Some(thickness);
                    true
                }
                None => false,
            },
            (EdgeColumn::Combined(edges), cell) => match (small_count(value, 2), cell) {
                (Some(count), _) if edges != EdgeSet::ALL => {
                    band.edges = band.edges.union(first_sides(edges, count));
                    true
                }
                (_, Mark::No) => {
                    for side in edges.iter() {
                        band.edges.remove(side);
                    }
                    true
                }
                (_, Mark::Yes) => {
                    band.edges = band.edges.union(edges);
                    true
                }
                (_, Mark::Number(thickness)) => {
                    band.edges = band.edges.union(edges);
                    band.thickness_mm.get_or_insert(thickness);
                    true
                }
                (_, Mark::Text(tape)) => {
                    band.edges = band.edges.union(edges);
                    band.tape_id.get_or_insert(tape);
                    true
                }
                (_, Mark::Blank) => false,
            },
            (EdgeColumn::Single(side), Mark::No) => {
                band.edges.remove(side);
                true
            }
            (EdgeColumn::Single(side), Mark::Yes) => {
                band.edges.insert(side);
                true
            }
            (EdgeColumn::Single(side), Mark::Number(thickness)) => {
                band.edges.insert(side);
                band.thickness_mm.get_or_insert(thickness);
                true
            }
            (EdgeColumn::Single(side), Mark::Text(tape)) => {
                band.edges.insert(side);
                band.tape_id.get_or_insert(tape);
                true
            }
        };
        if applied {
            recorder.hit(family, column_input(header, value), Strategy::Column);
        }
    }
}

/// Normalize the edge banding input of one part.
///
/// Every source contributes edges to one band; `None` when no edge ends up
/// banded.
pub fn normalize_edgeband(
    raw: &RawFields<EdgeHints>,
    dialect: &Dialect,
    options: &NormalizeOptions,
) -> FamilyOutcome<Option<EdgeBandSpec>> {
    let resolver = EdgeResolver { dialect };
    let mut recorder = Recorder::default();
    let mut band = EdgeFragment::default();

    if let Some(hints) = &raw.hints {
        band.absorb(EdgeFragment {
            edges: hints.edges.unwrap_or_default(),
            tape_id: hints.tape_id.clone(),
            thickness_mm: hints.thickness_mm,
        });
        recorder.hit(ServiceFamily::EdgeBand, "hints", Strategy::Hint);
    }

    let mut sink = |fragment: EdgeFragment| band.absorb(fragment);
    resolve_tokens(&resolver, dialect, options, &raw.tokens, &mut recorder, &mut sink);
    if raw.is_blank() {
        apply_default_if_blank(&resolver, dialect, &mut recorder, &mut sink);
    }
    apply_columns(&resolver, options, &raw.columns, &mut recorder, &mut band);

    let defaults = &dialect.config().edgeband.defaults;
    let spec = EdgeBandSpec::new(band.edges).map(|spec| {
        let spec = match band.tape_id.or_else(|| defaults.tape_id.clone()) {
            Some(tape_id) => spec.with_tape(tape_id),
            None => spec,
        };
        match band.thickness_mm.or(defaults.thickness_mm) {
            Some(thickness) => spec.with_thickness(thickness),
            None => spec,
        }
    });
    FamilyOutcome::new(spec, recorder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_dialect::global_default;

    fn edges(raw: &RawFields<EdgeHints>) -> EdgeSet {
        normalize_edgeband(raw, &global_default(), &NormalizeOptions::default())
            .value
            .map(|spec| spec.edges)
            .unwrap_or_default()
    }

    #[test]
    fn tokens_union() {
        let raw = RawFields::text("2L").with_token("W1");
        let expected: EdgeSet = [EdgeSide::L1, EdgeSide::L2, EdgeSide::W1].into_iter().collect();
        assert_eq!(edges(&raw), expected);
    }

    #[test]
    fn preset_carries_thickness() {
        let outcome = normalize_edgeband(
            &RawFields::text("door"),
            &global_default(),
            &NormalizeOptions::default(),
        );
        let spec = outcome.value.unwrap();
        assert!(spec.edges.is_all());
        assert_eq!(spec.thickness_mm, Some(2.0));
        assert_eq!(outcome.trace[0].strategy, Strategy::Preset);
    }

    #[test]
    fn thickness_override() {
        let outcome = normalize_edgeband(
            &RawFields::text("2L@d0.8"),
            &global_default(),
            &NormalizeOptions::default(),
        );
        assert_eq!(outcome.value.unwrap().thickness_mm, Some(0.8));
    }

    #[test]
    fn combined_count_columns() {
        let raw = RawFields::new().with_column("L", "1").with_column("W", "2");
        let expected: EdgeSet = [EdgeSide::L1, EdgeSide::W1, EdgeSide::W2].into_iter().collect();
        assert_eq!(edges(&raw), expected);
    }

    #[test]
    fn single_column_no_removes() {
        let raw = RawFields::new()
            .with_column("ALL", "X")
            .with_column("W2", "no");
        let expected: EdgeSet = [EdgeSide::L1, EdgeSide::L2, EdgeSide::W1].into_iter().collect();
        assert_eq!(edges(&raw), expected);
    }

    #[test]
    fn tape_column_and_text_cells() {
        let outcome = normalize_edgeband(
            &RawFields::new()
                .with_column("W1", "OAK-22")
                .with_column("EB thickness", "1"),
            &global_default(),
            &NormalizeOptions::default(),
        );
        let spec = outcome.value.unwrap();
        assert_eq!(spec.edges, EdgeSet::single(EdgeSide::W1));
        assert_eq!(spec.tape_id.as_deref(), Some("OAK-22"));
        assert_eq!(spec.thickness_mm, Some(1.0));
    }

    #[test]
    fn explicit_none() {
        assert!(edges(&RawFields::text("0")).is_empty());
        assert!(edges(&RawFields::text("NONE")).is_empty());
    }
}
