//! Shortcodes written by the formatter read back to the same services.

use panel_codec::{decode_edges, decode_groove, decode_hole, split_overrides};
use panel_format::{CodeDefaults, HoleSize, groove_codes, hole_code, shortcodes};
use panel_model::{
    EdgeBandSpec, EdgeSet, EdgeSide, Face, GrooveSpec, HoleKind, HolePatternSpec, PartServices,
};

#[test]
fn groove_codes_expand_back_to_the_same_grooves() {
    let grooves = vec![
        GrooveSpec::new(EdgeSide::L1, 4.0, 10.0, 10.0),
        GrooveSpec::new(EdgeSide::L2, 4.0, 10.0, 10.0),
        GrooveSpec::new(EdgeSide::W2, 3.0, 8.0, 12.0),
    ];
    let mut expanded = Vec::new();
    for code in groove_codes(&grooves, Some(10.0)) {
        let (base, overrides) = split_overrides(&code);
        let decoded = decode_groove(base).expect("formatter output decodes");
        expanded.extend(decoded.to_specs(overrides.depth.unwrap_or(10.0), Face::Front));
    }
    assert_eq!(expanded, grooves);
}

#[test]
fn band_code_reads_back() {
    let edges: EdgeSet = [EdgeSide::L1, EdgeSide::W1, EdgeSide::W2].into_iter().collect();
    let services = PartServices {
        edgeband: EdgeBandSpec::new(edges),
        ..PartServices::default()
    };
    let codes = shortcodes(&services, &CodeDefaults::new());
    assert_eq!(decode_edges(&codes.edgeband), Some(edges));
}

#[test]
fn hole_code_reads_back() {
    let spec = HolePatternSpec::new(HoleKind::CamLock, EdgeSide::W1, vec![34.0], 8.0);
    let code = hole_code(&spec, &CodeDefaults::new());
    insta::assert_snapshot!(code, @"CL-34");
    assert!(decode_hole(&code).is_some());
}

#[test]
fn hinge_diameter_override_survives_formatting() {
    let defaults = CodeDefaults::new().with_hole_size(
        HoleKind::Hinge,
        HoleSize {
            diameter_mm: Some(35.0),
            depth_mm: None,
        },
    );
    let hinge = HolePatternSpec::new(HoleKind::Hinge, EdgeSide::L1, vec![100.0], 22.5)
        .with_count(2)
        .with_diameter(26.0);
    let code = hole_code(&hinge, &defaults);
    assert_eq!(code, "H2-100@dia26");
    let (base, overrides) = split_overrides(&code);
    assert!(decode_hole(base).is_some());
    assert_eq!(overrides.diameter, Some(26.0));
}

#[test]
fn json_shape_of_codes() {
    let services = PartServices {
        edgeband: EdgeBandSpec::new(EdgeSet::LONG).map(|spec| spec.with_thickness(0.8)),
        grooves: vec![GrooveSpec::new(EdgeSide::W2, 4.0, 10.0, 10.0)],
        ..PartServices::default()
    };
    let defaults = CodeDefaults::new().with_groove_depth(10.0);
    insta::assert_json_snapshot!(shortcodes(&services, &defaults), @r#"
    {
      "edgeband": "2L@0.8",
      "grooves": [
        "GW2-4-10"
      ],
      "holes": [],
      "cnc": []
    }
    "#);
}
