//! Round-trip properties of the shortcode grammar.

use panel_codec::{
    GrooveCode, HoleCode, Overrides, decode_cnc, decode_edges, decode_groove, decode_hole,
    encode_cnc, encode_edges, encode_groove, encode_hole, split_overrides,
};
use panel_model::{CncParams, CornerSet, EdgeSet, EdgeSide, GrooveTarget};
use proptest::prelude::*;

/// Millimetre values on a half-millimetre grid.
fn mm() -> impl Strategy<Value = f64> {
    (0u32..4000).prop_map(|n| f64::from(n) / 2.0)
}

fn edge_set() -> impl Strategy<Value = EdgeSet> {
    proptest::collection::vec(any::<bool>(), 4).prop_map(|flags| {
        EdgeSide::ALL
            .into_iter()
            .zip(flags)
            .filter(|(_, on)| *on)
            .map(|(side, _)| side)
            .collect()
    })
}

fn groove_target() -> impl Strategy<Value = GrooveTarget> {
    prop_oneof![
        Just(GrooveTarget::All),
        Just(GrooveTarget::Long),
        Just(GrooveTarget::Width),
        proptest::sample::select(EdgeSide::ALL.to_vec()).prop_map(GrooveTarget::Side),
    ]
}

fn hole_code() -> impl Strategy<Value = HoleCode> {
    prop_oneof![
        (1u32..12, proptest::option::of(mm()))
            .prop_map(|(count, offset_mm)| HoleCode::Hinge { count, offset_mm }),
        proptest::option::of(mm()).prop_map(|pitch_mm| HoleCode::ShelfPin { pitch_mm }),
        mm().prop_map(|centers_mm| HoleCode::Handle { centers_mm }),
        proptest::option::of(mm()).prop_map(|offset_mm| HoleCode::Knob { offset_mm }),
        mm().prop_map(|length_mm| HoleCode::DrawerSlide { length_mm }),
        mm().prop_map(|offset_mm| HoleCode::CamLock { offset_mm }),
        mm().prop_map(|offset_mm| HoleCode::Dowel { offset_mm }),
        proptest::option::of(mm()).prop_map(|distance_mm| HoleCode::System32 { distance_mm }),
    ]
}

fn corner_set() -> impl Strategy<Value = CornerSet> {
    proptest::collection::vec(any::<bool>(), 4)
        .prop_map(|flags| {
            panel_model::Corner::ALL
                .into_iter()
                .zip(flags)
                .filter(|(_, on)| *on)
                .map(|(corner, _)| corner)
                .collect::<CornerSet>()
        })
        .prop_filter("radius needs a corner", |corners| !corners.is_empty())
}

fn cnc_params() -> impl Strategy<Value = CncParams> {
    let name = "[A-Z][A-Z0-9]{0,7}";
    prop_oneof![
        (name, mm(), mm()).prop_map(|(shape, width_mm, height_mm)| CncParams::Cutout {
            shape,
            width_mm,
            height_mm
        }),
        (mm(), mm(), mm()).prop_map(|(width_mm, height_mm, depth_mm)| CncParams::Pocket {
            width_mm,
            height_mm,
            depth_mm
        }),
        (mm(), corner_set())
            .prop_map(|(radius_mm, corners)| CncParams::Radius { radius_mm, corners }),
        (name, edge_set()).prop_map(|(profile, edges)| CncParams::Profile { profile, edges }),
        (
            proptest::sample::select(EdgeSide::ALL.to_vec()),
            mm(),
            mm()
        )
            .prop_map(|(side, width_mm, depth_mm)| CncParams::Rebate {
                side,
                width_mm,
                depth_mm
            }),
        (mm(), edge_set()).prop_map(|(size_mm, edges)| CncParams::Chamfer { size_mm, edges }),
        (1u32..20, 1u32..20, mm(), proptest::option::of(mm())).prop_map(
            |(rows, cols, pitch_mm, diameter_mm)| CncParams::DrillArray {
                rows,
                cols,
                pitch_mm,
                diameter_mm
            }
        ),
        "[A-Za-z0-9]([A-Za-z0-9 ]{0,14}[A-Za-z0-9])?".prop_map(|text| CncParams::Text {
            text,
            height_mm: None
        }),
    ]
}

proptest! {
    #[test]
    fn edge_sets_round_trip(edges in edge_set()) {
        prop_assert_eq!(decode_edges(&encode_edges(edges)), Some(edges));
    }

    #[test]
    fn groove_codes_round_trip(target in groove_target(), width_mm in mm(), offset_mm in mm()) {
        let code = GrooveCode::new(target, width_mm, offset_mm);
        prop_assert_eq!(decode_groove(&encode_groove(&code)), Some(code));
    }

    #[test]
    fn hole_codes_round_trip(code in hole_code()) {
        prop_assert_eq!(decode_hole(&encode_hole(&code)), Some(code));
    }

    #[test]
    fn cnc_params_round_trip(params in cnc_params()) {
        prop_assert_eq!(decode_cnc(&encode_cnc(&params)), Some(params));
    }

    #[test]
    fn override_suffix_round_trips(depth in proptest::option::of(mm()), width in proptest::option::of(mm())) {
        let overrides = Overrides { depth, width, ..Overrides::default() };
        let token = panel_codec::attach_overrides("GL-4-10", &overrides);
        let (base, parsed) = split_overrides(&token);
        prop_assert_eq!(base, "GL-4-10");
        prop_assert_eq!(parsed, overrides);
    }
}

#[test]
fn decode_never_panics_on_garbage() {
    for junk in ["", "@", "G--", "H-", "CUTOUT-", "RADIUS--", "L1L2L1", "@@d", "2L2W@"] {
        let _ = panel_codec::decode_any(junk);
    }
}
