//! End-to-end normalization behavior against the default and overlay dialects.

use panel_codec::encode_edges;
use panel_dialect::{
    Dialect, DialectOverlay, PatternRule, default_config, global_default, merge_with_default,
};
use panel_ingest::{EdgeHints, RawFields, RawPart};
use panel_model::{EdgeSet, EdgeSide, HoleKind, PartServices, ServiceFamily};
use panel_normalize::{
    NormalizeOptions, Strategy, normalize_edgeband, normalize_grooves, normalize_part,
    normalize_text, normalize_token,
};
use proptest::prelude::*;

fn full_alias_dialect() -> Dialect {
    merge_with_default(
        &default_config(),
        &DialectOverlay::default().with_edge_alias("FULL", "2L2W"),
    )
}

fn services(text: &str, dialect: &Dialect) -> PartServices {
    normalize_text(text, dialect, &NormalizeOptions::default()).services
}

#[test]
fn canonical_code_and_aliases_agree() {
    let dialect = full_alias_dialect();
    let canonical = services("2L2W", &dialect);
    assert!(canonical.edgeband.as_ref().is_some_and(|spec| spec.edges.is_all()));
    for alias in ["ALL", "4S", "FULL", "all", "full"] {
        assert_eq!(services(alias, &dialect), canonical, "{alias}");
    }
}

#[test]
fn alias_beats_phrase_heuristic() {
    let overlay = DialectOverlay::default().with_edge_alias("ALL EDGES", "L1");
    let dialect = merge_with_default(&default_config(), &overlay);
    let outcome = normalize_edgeband(
        &RawFields::text("all edges"),
        &dialect,
        &NormalizeOptions::default(),
    );
    assert_eq!(outcome.value.unwrap().edges, EdgeSet::single(EdgeSide::L1));
    assert_eq!(outcome.trace[0].strategy, Strategy::Alias);

    // Without the alias the phrase heuristic answers.
    let outcome = normalize_edgeband(
        &RawFields::text("all edges"),
        &global_default(),
        &NormalizeOptions::default(),
    );
    assert_eq!(outcome.value.unwrap().edges, EdgeSet::ALL);
    assert_eq!(outcome.trace[0].strategy, Strategy::Heuristic);
}

#[test]
fn merged_alias_keeps_every_default_alias() {
    let dialect = full_alias_dialect();
    let default = global_default();
    for (alias, code) in &default.vocabulary(ServiceFamily::EdgeBand).aliases {
        assert_eq!(dialect.alias(ServiceFamily::EdgeBand, alias), Some(code.as_str()));
    }
    assert_eq!(dialect.alias(ServiceFamily::EdgeBand, "full"), Some("2L2W"));
    let edges = normalize_token(ServiceFamily::EdgeBand, "FULL", &dialect, &NormalizeOptions::default())
        .and_then(|services| services.edgeband)
        .map(|spec| spec.edges);
    assert_eq!(edges, Some(EdgeSet::ALL));
}

#[test]
fn depth_override_keeps_code_geometry() {
    let grooves = services("GL-4-10@d6", &global_default()).grooves;
    assert_eq!(grooves.len(), 2);
    for groove in &grooves {
        assert_eq!(groove.depth_mm, 6.0);
        assert_eq!(groove.width_mm, 4.0);
        assert_eq!(groove.offset_mm, 10.0);
    }
    let sides: Vec<EdgeSide> = grooves.iter().map(|groove| groove.side).collect();
    assert_eq!(sides, vec![EdgeSide::L1, EdgeSide::L2]);
}

#[test]
fn blank_markers_produce_nothing() {
    let dialect = global_default();
    let options = NormalizeOptions::default();
    for text in ["", "-", "0", "NONE"] {
        let part = normalize_text(text, &dialect, &options);
        assert!(part.services.is_empty(), "{text:?}");
        assert!(part.unresolved.is_empty(), "{text:?}");
        for family in ServiceFamily::ALL {
            assert_eq!(normalize_token(family, text, &dialect, &options), None, "{family} {text:?}");
        }
    }
}

#[test]
fn groove_phrase_keeps_the_named_sides() {
    let outcome = normalize_grooves(
        &RawFields::text("groove on L1 and W1"),
        &global_default(),
        &NormalizeOptions::default(),
    );
    let sides: Vec<EdgeSide> = outcome.value.iter().map(|groove| groove.side).collect();
    assert_eq!(sides, vec![EdgeSide::L1, EdgeSide::W1]);
    assert_eq!(outcome.trace[0].strategy, Strategy::Heuristic);
}

#[test]
fn mixed_codes_on_one_line() {
    let services = services("2L2W G-ALL-4-10 H2-110", &global_default());

    assert!(services.edgeband.unwrap().edges.is_all());

    assert_eq!(services.grooves.len(), 4);
    let sides: EdgeSet = services.grooves.iter().map(|groove| groove.side).collect();
    assert!(sides.is_all());
    for groove in &services.grooves {
        assert_eq!(groove.width_mm, 4.0);
        assert_eq!(groove.offset_mm, 10.0);
    }

    assert_eq!(services.holes.len(), 1);
    let hinge = &services.holes[0];
    assert_eq!(hinge.kind, HoleKind::Hinge);
    assert_eq!(hinge.count, Some(2));
    assert_eq!(hinge.offsets_mm, vec![110.0]);
    assert!(services.cnc.is_empty());
}

#[test]
fn combined_and_individual_edge_columns() {
    let raw: RawFields<EdgeHints> = RawFields::new()
        .with_column("L", "X")
        .with_column("W", "")
        .with_column("L1", "")
        .with_column("L2", "Y");
    let outcome = normalize_edgeband(&raw, &global_default(), &NormalizeOptions::default());
    assert_eq!(outcome.value.unwrap().edges, EdgeSet::LONG);
    assert!(outcome.unresolved.is_empty());
}

#[test]
fn individual_no_overrides_combined_yes() {
    let raw: RawFields<EdgeHints> = RawFields::new()
        .with_column("L", "X")
        .with_column("L1", "no");
    let outcome = normalize_edgeband(&raw, &global_default(), &NormalizeOptions::default());
    assert_eq!(outcome.value.unwrap().edges, EdgeSet::single(EdgeSide::L2));
}

#[test]
fn pattern_rule_resolves_house_notation() {
    let mut overlay = DialectOverlay::default();
    overlay
        .groove
        .rules
        .push(PatternRule::code("house-groove", r"^NUT(\d+)$", "GW2-$1-10"));
    let dialect = merge_with_default(&default_config(), &overlay);
    let part = normalize_text("NUT6", &dialect, &NormalizeOptions::default());
    assert_eq!(part.services.grooves.len(), 1);
    assert_eq!(part.services.grooves[0].width_mm, 6.0);
    assert!(
        part.trace
            .iter()
            .any(|hit| hit.strategy == Strategy::Rule { id: "house-groove".to_string() })
    );
}

#[test]
fn default_if_blank_applies_only_to_blank_input() {
    let mut overlay = DialectOverlay::default();
    overlay.edgeband.default_if_blank = Some("2L".to_string());
    let dialect = merge_with_default(&default_config(), &overlay);
    let options = NormalizeOptions::default();

    let blank = normalize_part(&RawPart::default(), &dialect, &options);
    assert_eq!(blank.services.edgeband.unwrap().edges, EdgeSet::LONG);
    assert_eq!(blank.trace[0].strategy, Strategy::DefaultIfBlank);

    let marked = normalize_text("-", &dialect, &options);
    assert!(marked.services.edgeband.is_none());
}

#[test]
fn heuristics_can_be_switched_off() {
    let options = NormalizeOptions::new().natural_language(false);
    let part = normalize_text("2 hinges", &global_default(), &options);
    assert!(part.services.holes.is_empty());
    assert_eq!(part.unresolved, vec!["2 hinges"]);
}

#[test]
fn depth_zero_is_flagged_not_changed() {
    let part = normalize_text("GW2-4-10@d0", &global_default(), &NormalizeOptions::default());
    assert_eq!(part.services.grooves[0].depth_mm, 0.0);
    let depth_warnings: Vec<_> = part
        .warnings
        .iter()
        .filter(|warning| warning.message.contains("depth must be positive"))
        .collect();
    assert_eq!(depth_warnings.len(), 1);
}

fn edge_set(bits: u8) -> EdgeSet {
    EdgeSide::ALL
        .into_iter()
        .enumerate()
        .filter(|(index, _)| bits & (1 << index) != 0)
        .map(|(_, side)| side)
        .collect()
}

proptest! {
    #[test]
    fn encoded_edges_normalize_back(bits in 0u8..16) {
        let edges = edge_set(bits);
        let code = encode_edges(edges);
        let normalized = normalize_token(
            ServiceFamily::EdgeBand,
            &code,
            &global_default(),
            &NormalizeOptions::default(),
        )
        .and_then(|services| services.edgeband)
        .map(|spec| spec.edges)
        .unwrap_or_default();
        prop_assert_eq!(normalized, edges);
    }
}
