//! Whole-part normalization: the four families, the trace and validation.

use std::borrow::Cow;
use std::collections::BTreeSet;

use panel_dialect::Dialect;
use panel_ingest::{RawFields, RawPart, extract_raw_fields};
use panel_model::{PartServices, ServiceFamily};
use panel_validate::{ValidationContext, ValidationWarning, validate_with_context};
use serde::Serialize;

use crate::cnc::normalize_cnc;
use crate::drilling::normalize_drilling;
use crate::edgeband::normalize_edgeband;
use crate::groove::normalize_grooves;
use crate::options::NormalizeOptions;
use crate::trace::Resolution;

/// The canonical services of one part plus everything a reviewer needs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NormalizedPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub services: PartServices,
    /// Advisory only; the services are returned as normalized.
    pub warnings: Vec<ValidationWarning>,
    pub trace: Vec<Resolution>,
    /// Inputs that no family could interpret.
    pub unresolved: Vec<String>,
}

/// Hand unmapped columns to every family whose dialect knows the header.
fn route_unmapped<'a>(raw: &'a RawPart, dialect: &Dialect) -> Cow<'a, RawPart> {
    let known = |header: &str| {
        ServiceFamily::ALL
            .into_iter()
            .filter(|family| dialect.column_key(*family, header).is_some())
            .collect::<Vec<_>>()
    };
    if raw.unmapped.keys().all(|header| known(header).is_empty()) {
        return Cow::Borrowed(raw);
    }
    let mut routed = raw.clone();
    for (header, value) in &raw.unmapped {
        let families = known(header);
        if families.is_empty() {
            continue;
        }
        routed.unmapped.remove(header);
        for family in families {
            tracing::trace!(header, family = %family, "dialect column claimed");
            routed.push_column(family, header.clone(), value.clone());
        }
    }
    Cow::Owned(routed)
}

/// Misses of one family that no other family resolved, first occurrence only.
fn unresolved_inputs(trace: &[Resolution], missed: Vec<String>) -> Vec<String> {
    let resolved: BTreeSet<&str> = trace.iter().map(|hit| hit.input.as_str()).collect();
    let mut seen = BTreeSet::new();
    missed
        .into_iter()
        .filter(|input| !resolved.contains(input.as_str()) && seen.insert(input.clone()))
        .collect()
}

/// Normalize one part under a dialect.
///
/// Never fails: anything that cannot be interpreted ends up in
/// `unresolved`, and problems with the result end up in `warnings`.
pub fn normalize_part(
    raw: &RawPart,
    dialect: &Dialect,
    options: &NormalizeOptions,
) -> NormalizedPart {
    let raw = route_unmapped(raw, dialect);

    let edgeband = normalize_edgeband(&raw.edgeband, dialect, options);
    let grooves = normalize_grooves(&raw.groove, dialect, options);
    let holes = normalize_drilling(&raw.drilling, raw.dimensions.as_ref(), dialect, options);
    let cnc = normalize_cnc(&raw.cnc, dialect, options);

    let mut trace = edgeband.trace;
    trace.extend(grooves.trace);
    trace.extend(holes.trace);
    trace.extend(cnc.trace);
    let missed: Vec<String> = [
        edgeband.unresolved,
        grooves.unresolved,
        holes.unresolved,
        cnc.unresolved,
    ]
    .concat();
    let unresolved = unresolved_inputs(&trace, missed);

    let services = PartServices {
        edgeband: edgeband.value,
        grooves: grooves.value,
        holes: holes.value,
        cnc: cnc.value,
    };
    let warnings = if options.validate {
        let context = match raw.dimensions {
            Some(dimensions) => ValidationContext::new().with_dimensions(dimensions),
            None => ValidationContext::new(),
        };
        validate_with_context(&services, &context)
    } else {
        Vec::new()
    };

    if !unresolved.is_empty() {
        tracing::debug!(
            label = raw.label.as_deref().unwrap_or_default(),
            unresolved = ?unresolved,
            "part has unresolved inputs"
        );
    }
    NormalizedPart {
        label: raw.label.clone(),
        services,
        warnings,
        trace,
        unresolved,
    }
}

/// Normalize free-form notation such as `2L2W, GL-4-10, 2 hinges`.
pub fn normalize_text(text: &str, dialect: &Dialect, options: &NormalizeOptions) -> NormalizedPart {
    normalize_part(&extract_raw_fields(text, None), dialect, options)
}

/// Resolve a single token of a known family; `None` when nothing comes out.
pub fn normalize_token(
    family: ServiceFamily,
    token: &str,
    dialect: &Dialect,
    options: &NormalizeOptions,
) -> Option<PartServices> {
    let mut services = PartServices::default();
    match family {
        ServiceFamily::EdgeBand => {
            services.edgeband = normalize_edgeband(&RawFields::text(token), dialect, options).value;
        }
        ServiceFamily::Groove => {
            services.grooves = normalize_grooves(&RawFields::text(token), dialect, options).value;
        }
        ServiceFamily::Drilling => {
            services.holes = normalize_drilling(&RawFields::text(token), None, dialect, options).value;
        }
        ServiceFamily::Cnc => {
            services.cnc = normalize_cnc(&RawFields::text(token), dialect, options).value;
        }
    }
    (!services.is_empty()).then_some(services)
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_dialect::{DialectOverlay, default_config, global_default, merge_with_default};
    use panel_model::{EdgeSet, PartDimensions, ParamValue};

    #[test]
    fn mixed_line() {
        let part = normalize_text("2L2W G-ALL-4-10 H2-110", &global_default(), &NormalizeOptions::default());
        let services = &part.services;
        assert!(services.edgeband.as_ref().unwrap().edges.is_all());
        assert_eq!(services.grooves.len(), 4);
        assert_eq!(services.holes.len(), 1);
        assert!(part.unresolved.is_empty());
        assert_eq!(part.trace.len(), 3);
    }

    #[test]
    fn phrase_sent_everywhere_is_unresolved_once() {
        let part = normalize_text("make it nice", &global_default(), &NormalizeOptions::default());
        assert!(part.services.is_empty());
        assert_eq!(part.unresolved, vec!["make it nice"]);
    }

    #[test]
    fn phrase_resolved_by_one_family_is_not_unresolved() {
        let dialect = merge_with_default(
            &default_config(),
            &DialectOverlay::default().with_edge_alias("FULL", "2L2W"),
        );
        let part = normalize_text("full", &dialect, &NormalizeOptions::default());
        assert_eq!(part.services.edgeband.unwrap().edges, EdgeSet::ALL);
        assert!(part.unresolved.is_empty());
    }

    #[test]
    fn dimensions_reach_validation() {
        let mut raw = extract_raw_fields("GW2-4-10@d20", None);
        raw.dimensions = Some(PartDimensions::new(600.0, 300.0).with_thickness(18.0));
        let part = normalize_part(&raw, &global_default(), &NormalizeOptions::default());
        assert_eq!(part.warnings.len(), 1);
        assert_eq!(part.services.grooves[0].depth_mm, 20.0);

        let quiet = normalize_part(&raw, &global_default(), &NormalizeOptions::new().validate(false));
        assert!(quiet.warnings.is_empty());
    }

    #[test]
    fn dialect_claims_unmapped_column() {
        let mut overlay = DialectOverlay::default();
        overlay
            .edgeband
            .columns
            .insert("BANDING".to_string(), panel_dialect::ColumnKey::Code);
        let dialect = merge_with_default(&default_config(), &overlay);
        let mut raw = RawPart::default();
        raw.unmapped.insert("Banding".to_string(), ParamValue::from("2W"));
        let part = normalize_part(&raw, &dialect, &NormalizeOptions::default());
        assert_eq!(part.services.edgeband.unwrap().edges, EdgeSet::WIDTH);
    }

    #[test]
    fn single_token() {
        let dialect = global_default();
        let options = NormalizeOptions::default();
        let services = normalize_token(ServiceFamily::Drilling, "KN-CTR", &dialect, &options).unwrap();
        assert_eq!(services.holes.len(), 1);
        assert!(normalize_token(ServiceFamily::Groove, "-", &dialect, &options).is_none());
    }
}
