//! CNC normalization.

use std::collections::BTreeMap;

use panel_codec::{Overrides, builtin_cnc_macro, decode_cnc, split_overrides};
use panel_dialect::{CncDefaults, ColumnKey, Dialect, lookup_key};
use panel_ingest::{CncHints, RawFields};
use panel_model::{CncOperation, CncParams, CornerSet, ParamValue, ServiceFamily};

use crate::chain::{FamilyResolver, apply_default_if_blank, resolve_input, resolve_tokens};
use crate::columns::{Mark, column_input, mark};
use crate::heuristics;
use crate::options::NormalizeOptions;
use crate::trace::{FamilyOutcome, Recorder, Strategy};

/// Give an operation the dialect's face and text height where it has none.
fn with_defaults(mut operation: CncOperation, defaults: &CncDefaults) -> CncOperation {
    if operation.face.is_none() {
        operation.face = Some(defaults.face);
    }
    if let CncParams::Text { height_mm, .. } = &mut operation.params
        && height_mm.is_none()
    {
        *height_mm = Some(defaults.text_height_mm);
    }
    operation
}

fn override_params(params: CncParams, overrides: &Overrides) -> CncParams {
    match params {
        CncParams::Cutout {
            shape,
            width_mm,
            height_mm,
        } => CncParams::Cutout {
            shape,
            width_mm: overrides.width.unwrap_or(width_mm),
            height_mm,
        },
        CncParams::Pocket {
            width_mm,
            height_mm,
            depth_mm,
        } => CncParams::Pocket {
            width_mm: overrides.width.unwrap_or(width_mm),
            height_mm,
            depth_mm: overrides.depth.or(overrides.bare).unwrap_or(depth_mm),
        },
        CncParams::Radius { radius_mm, corners } => CncParams::Radius {
            radius_mm: overrides.bare.unwrap_or(radius_mm),
            corners,
        },
        CncParams::Profile { profile, edges } => CncParams::Profile { profile, edges },
        CncParams::Rebate {
            side,
            width_mm,
            depth_mm,
        } => CncParams::Rebate {
            side,
            width_mm: overrides.width.or(overrides.bare).unwrap_or(width_mm),
            depth_mm: overrides.depth.unwrap_or(depth_mm),
        },
        CncParams::Chamfer { size_mm, edges } => CncParams::Chamfer {
            size_mm: overrides.bare.unwrap_or(size_mm),
            edges,
        },
        CncParams::DrillArray {
            rows,
            cols,
            pitch_mm,
            diameter_mm,
        } => CncParams::DrillArray {
            rows,
            cols,
            pitch_mm: overrides.bare.unwrap_or(pitch_mm),
            diameter_mm: overrides.diameter.or(diameter_mm),
        },
        CncParams::Text { text, height_mm } => CncParams::Text {
            text,
            height_mm: overrides.bare.or(height_mm),
        },
        CncParams::Custom {
            program,
            mut params,
        } => {
            // Custom programs take every named value as a parameter.
            let named = [
                ("d", overrides.depth),
                ("w", overrides.width),
                ("o", overrides.offset),
                ("dia", overrides.diameter),
                ("c", overrides.count),
                ("cc", overrides.centers),
            ];
            for (key, value) in named {
                if let Some(value) = value {
                    params.insert(key.to_string(), ParamValue::Number(value));
                }
            }
            for (key, value) in &overrides.extra {
                params.insert(key.clone(), ParamValue::Number(*value));
            }
            CncParams::Custom { program, params }
        }
    }
}

struct CncResolver<'a> {
    dialect: &'a Dialect,
}

impl CncResolver<'_> {
    fn defaults(&self) -> &CncDefaults {
        &self.dialect.config().cnc.defaults
    }

    fn operation(&self, params: CncParams) -> Vec<CncOperation> {
        vec![with_defaults(CncOperation::new(params), self.defaults())]
    }
}

impl FamilyResolver for CncResolver<'_> {
    type Output = Vec<CncOperation>;

    const FAMILY: ServiceFamily = ServiceFamily::Cnc;

    fn preset(&self, name: &str) -> Option<Self::Output> {
        let preset = self.dialect.config().cnc.presets.get(&lookup_key(name))?;
        let (code, overrides) = split_overrides(&preset.code);
        let params = decode_cnc(code).or_else(|| builtin_cnc_macro(code))?;
        let mut operation = CncOperation::new(override_params(params, &overrides));
        operation.face = preset.face;
        operation.note = preset.note.clone();
        Some(vec![with_defaults(operation, self.defaults())])
    }

    fn decode(&self, code: &str) -> Option<Self::Output> {
        decode_cnc(code).map(|params| self.operation(params))
    }

    fn builtin(&self, name: &str) -> Option<Self::Output> {
        builtin_cnc_macro(name).map(|params| self.operation(params))
    }

    fn heuristic(&self, text: &str) -> Option<Self::Output> {
        heuristics::cnc::recognize(text, self.defaults())
    }

    fn apply_overrides(&self, output: Self::Output, overrides: &Overrides) -> Self::Output {
        output
            .into_iter()
            .map(|mut operation| {
                operation.params = override_params(operation.params, overrides);
                operation
            })
            .collect()
    }
}

fn push_unique(operations: &mut Vec<CncOperation>, operation: CncOperation) {
    if !operations.contains(&operation) {
        operations.push(operation);
    }
}

fn apply_columns(
    resolver: &CncResolver<'_>,
    options: &NormalizeOptions,
    columns: &BTreeMap<String, ParamValue>,
    recorder: &mut Recorder,
    operations: &mut Vec<CncOperation>,
) {
    let dialect = resolver.dialect;
    let family = ServiceFamily::Cnc;
    for (header, value) in columns {
        let is_radius = dialect.column_key(family, header) == Some(ColumnKey::Radius);
        let produced = match (is_radius, mark(dialect, family, value)) {
            (_, Mark::Blank | Mark::No) => continue,
            (true, Mark::Number(radius_mm)) => resolver.operation(CncParams::Radius {
                radius_mm,
                corners: CornerSet::ALL,
            }),
            (true, Mark::Yes) => match builtin_cnc_macro("SOFTCORNERS") {
                Some(params) => resolver.operation(params),
                None => continue,
            },
            (false, Mark::Yes) => {
                recorder.miss(family, column_input(header, value));
                continue;
            }
            (_, Mark::Number(_) | Mark::Text(_)) => {
                let text = value.as_text();
                let mut collect = |output: Vec<CncOperation>| {
                    for operation in output {
                        push_unique(operations, operation);
                    }
                };
                resolve_input(resolver, dialect, options, &text, recorder, &mut collect);
                continue;
            }
        };
        recorder.hit(family, column_input(header, value), Strategy::Column);
        for operation in produced {
            push_unique(operations, operation);
        }
    }
}

/// Normalize the CNC input of one part. Identical operations are kept once.
pub fn normalize_cnc(
    raw: &RawFields<CncHints>,
    dialect: &Dialect,
    options: &NormalizeOptions,
) -> FamilyOutcome<Vec<CncOperation>> {
    let resolver = CncResolver { dialect };
    let mut recorder = Recorder::default();
    let mut operations = Vec::new();

    if let Some(hints) = raw.hints.as_ref().filter(|hints| !hints.operations.is_empty()) {
        for operation in &hints.operations {
            push_unique(
                &mut operations,
                with_defaults(operation.clone(), resolver.defaults()),
            );
        }
        recorder.hit(ServiceFamily::Cnc, "hints", Strategy::Hint);
    }

    let mut sink = |output: Vec<CncOperation>| {
        for operation in output {
            push_unique(&mut operations, operation);
        }
    };
    resolve_tokens(&resolver, dialect, options, &raw.tokens, &mut recorder, &mut sink);
    if raw.is_blank() {
        apply_default_if_blank(&resolver, dialect, &mut recorder, &mut sink);
    }
    apply_columns(&resolver, options, &raw.columns, &mut recorder, &mut operations);

    FamilyOutcome::new(operations, recorder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_dialect::global_default;
    use panel_model::{CncOpKind, Face};

    fn normalize(raw: &RawFields<CncHints>) -> Vec<CncOperation> {
        normalize_cnc(raw, &global_default(), &NormalizeOptions::default()).value
    }

    #[test]
    fn macro_gets_default_face() {
        let operations = normalize(&RawFields::text("SINK"));
        assert_eq!(operations.len(), 1);
        assert_eq!(operations[0].shape_id(), "SINK");
        assert_eq!(operations[0].face, Some(Face::Front));
    }

    #[test]
    fn radius_override() {
        let operations = normalize(&RawFields::text("soft@5"));
        assert_eq!(
            operations[0].params,
            CncParams::Radius {
                radius_mm: 5.0,
                corners: CornerSet::ALL
            }
        );
    }

    #[test]
    fn radius_column() {
        let raw = RawFields::new()
            .with_column("Corner radius", "6")
            .with_column("CNC", "");
        let operations = normalize(&raw);
        assert_eq!(operations.len(), 1);
        assert_eq!(operations[0].kind(), CncOpKind::Radius);
    }

    #[test]
    fn custom_program_takes_named_overrides() {
        let operations = normalize(&RawFields::text("PRG-LOGO@d3"));
        let CncParams::Custom { program, params } = &operations[0].params else {
            panic!("expected custom program");
        };
        assert_eq!(program, "LOGO");
        assert_eq!(params.get("d"), Some(&ParamValue::Number(3.0)));
    }

    #[test]
    fn unknown_phrase_is_unresolved() {
        let outcome = normalize_cnc(
            &RawFields::text("paint it blue"),
            &global_default(),
            &NormalizeOptions::default(),
        );
        assert!(outcome.value.is_empty());
        assert_eq!(outcome.unresolved, vec!["paint it blue"]);
    }
}
