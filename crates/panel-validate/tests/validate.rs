use panel_model::{
    CncOperation, CncParams, CornerSet, EdgeBandSpec, EdgeSet, EdgeSide, GrooveSpec, HoleKind,
    HolePatternSpec, PartDimensions, PartServices, ServiceFamily,
};
use panel_validate::{ValidationContext, validate_services, validate_with_context};

fn groove(depth_mm: f64) -> GrooveSpec {
    GrooveSpec::new(EdgeSide::W2, 4.0, depth_mm, 10.0)
}

#[test]
fn zero_depth_groove_gives_one_warning() {
    let services = PartServices {
        grooves: vec![groove(0.0)],
        ..PartServices::default()
    };
    let before = services.clone();

    let warnings = validate_services(&services);

    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].family, ServiceFamily::Groove);
    assert!(warnings[0].message.contains("depth must be positive"));
    assert_eq!(services, before);
}

#[test]
fn clean_bundle_has_no_warnings() {
    let services = PartServices {
        edgeband: EdgeBandSpec::new(EdgeSet::ALL).map(|spec| spec.with_thickness(1.0)),
        grooves: vec![groove(10.0)],
        holes: vec![
            HolePatternSpec::new(HoleKind::Hinge, EdgeSide::L1, vec![100.0], 22.5).with_count(2),
            HolePatternSpec::new(HoleKind::Handle, EdgeSide::W1, vec![-48.0, 48.0], 32.0).centered(),
        ],
        cnc: vec![CncOperation::new(CncParams::Radius {
            radius_mm: 3.0,
            corners: CornerSet::ALL,
        })],
    };
    let context = ValidationContext::new()
        .with_dimensions(PartDimensions::new(720.0, 450.0).with_thickness(18.0));
    assert!(validate_with_context(&services, &context).is_empty());
}

#[test]
fn structural_problems_are_reported() {
    let mut edgeband = EdgeBandSpec::new(EdgeSet::LONG).expect("non-empty edges");
    edgeband.edges = EdgeSet::EMPTY;
    let services = PartServices {
        edgeband: Some(edgeband),
        grooves: vec![
            GrooveSpec::new(EdgeSide::L1, 0.0, 8.0, -1.0),
            GrooveSpec::new(EdgeSide::L1, 0.0, 8.0, -1.0),
        ],
        holes: vec![],
        cnc: vec![CncOperation::new(CncParams::Cutout {
            shape: "RECT".to_string(),
            width_mm: 0.0,
            height_mm: 100.0,
        })],
    };
    let fields: Vec<String> = validate_services(&services)
        .into_iter()
        .map(|warning| warning.field)
        .collect();
    assert_eq!(
        fields,
        vec![
            "edgeband.edges",
            "grooves[0].width_mm",
            "grooves[0].offset_mm",
            "grooves[1].width_mm",
            "grooves[1].offset_mm",
            "grooves[1].side",
            "cnc[0].width_mm",
        ]
    );
}
