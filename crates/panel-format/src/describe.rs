//! Human-readable descriptions.

use panel_codec::format_mm;
use panel_model::{
    CncOperation, CncParams, CornerSet, EdgeBandSpec, EdgeSet, Face, GrooveSpec, HolePatternSpec,
    PartServices,
};

use crate::{NONE_MARKER, join_or_none};

fn mm(value: f64) -> String {
    format!("{} mm", format_mm(value))
}

fn edge_phrase(edges: EdgeSet) -> String {
    if edges.is_all() {
        "all four edges".to_string()
    } else if edges == EdgeSet::LONG {
        "both long edges".to_string()
    } else if edges == EdgeSet::WIDTH {
        "both short edges".to_string()
    } else {
        edges.to_string()
    }
}

fn corner_phrase(corners: CornerSet) -> String {
    if corners == CornerSet::ALL {
        "all corners".to_string()
    } else {
        format!("corners {}", corners.code())
    }
}

pub fn describe_edgeband(spec: Option<&EdgeBandSpec>) -> String {
    let Some(spec) = spec.filter(|spec| !spec.edges.is_empty()) else {
        return NONE_MARKER.to_string();
    };
    let mut text = format!("Edge band on {}", edge_phrase(spec.edges));
    if let Some(tape) = &spec.tape_id {
        text.push_str(&format!(", tape {tape}"));
    }
    if let Some(thickness) = spec.thickness_mm {
        text.push_str(&format!(", {} thick", mm(thickness)));
    }
    if let Some(remarks) = &spec.remarks {
        text.push_str(&format!(" ({remarks})"));
    }
    text
}

pub fn describe_groove(spec: &GrooveSpec) -> String {
    let mut text = format!(
        "Groove on {}: {} wide, {} deep, {} from the edge",
        spec.side,
        mm(spec.width_mm),
        mm(spec.depth_mm),
        mm(spec.offset_mm)
    );
    if let Some(range) = &spec.stopped {
        text.push_str(&format!(
            ", stopped {} to {}",
            format_mm(range.start_mm),
            mm(range.end_mm)
        ));
    }
    if spec.face == Face::Back {
        text.push_str(", back face");
    }
    text
}

pub fn describe_holes(spec: &HolePatternSpec) -> String {
    let mut text = match spec.hole_count() {
        Some(count) => format!("{count} x {} on {}", spec.kind.label(), spec.ref_edge),
        None => format!("{} on {}", spec.kind.label(), spec.ref_edge),
    };
    if let Some(pitch) = spec.pitch_mm {
        text.push_str(&format!(" every {}", mm(pitch)));
    }
    text.push_str(&format!(", {} in", mm(spec.distance_from_edge_mm)));
    if let Some(diameter) = spec.diameter_mm {
        text.push_str(&format!(", {} dia", mm(diameter)));
    }
    if let Some(depth) = spec.depth_mm {
        text.push_str(&format!(", {} deep", mm(depth)));
    }
    if let Some(hardware) = &spec.hardware_ref {
        text.push_str(&format!(" ({hardware})"));
    }
    text
}

pub fn describe_cnc(operation: &CncOperation) -> String {
    let mut text = match &operation.params {
        CncParams::Cutout {
            shape,
            width_mm,
            height_mm,
        } => format!(
            "{shape} cutout {} x {}",
            format_mm(*width_mm),
            mm(*height_mm)
        ),
        CncParams::Pocket {
            width_mm,
            height_mm,
            depth_mm,
        } => format!(
            "Pocket {} x {}, {} deep",
            format_mm(*width_mm),
            mm(*height_mm),
            mm(*depth_mm)
        ),
        CncParams::Radius { radius_mm, corners } => {
            format!("Corner radius {} on {}", mm(*radius_mm), corner_phrase(*corners))
        }
        CncParams::Profile { profile, edges } => {
            format!("{profile} edge profile on {}", edge_phrase(*edges))
        }
        CncParams::Rebate {
            side,
            width_mm,
            depth_mm,
        } => format!(
            "Rebate on {side}: {} wide, {} deep",
            mm(*width_mm),
            mm(*depth_mm)
        ),
        CncParams::Chamfer { size_mm, edges } => {
            format!("Chamfer {} on {}", mm(*size_mm), edge_phrase(*edges))
        }
        CncParams::DrillArray {
            rows,
            cols,
            pitch_mm,
            diameter_mm,
        } => {
            let base = format!("Drill array {rows} x {cols} at {} pitch", mm(*pitch_mm));
            match diameter_mm {
                Some(diameter) => format!("{base}, {} dia", mm(*diameter)),
                None => base,
            }
        }
        CncParams::Text { text, height_mm } => match height_mm {
            Some(height) => format!("Engrave \"{text}\", {} high", mm(*height)),
            None => format!("Engrave \"{text}\""),
        },
        CncParams::Custom { program, params } => {
            if params.is_empty() {
                format!("Program {program}")
            } else {
                let args: Vec<String> = params
                    .iter()
                    .map(|(key, value)| format!("{key}={value}"))
                    .collect();
                format!("Program {program} ({})", args.join(", "))
            }
        }
    };
    if operation.face == Some(Face::Back) {
        text.push_str(", back face");
    }
    if let Some(position) = &operation.position {
        text.push_str(&format!(
            " at {},{}",
            format_mm(position.x_mm),
            format_mm(position.y_mm)
        ));
    }
    text
}

/// Every service of a bundle, joined with `; `.
pub fn describe(services: &PartServices) -> String {
    let mut parts = Vec::new();
    if services.edgeband.as_ref().is_some_and(|spec| !spec.edges.is_empty()) {
        parts.push(describe_edgeband(services.edgeband.as_ref()));
    }
    parts.extend(services.grooves.iter().map(describe_groove));
    parts.extend(services.holes.iter().map(describe_holes));
    parts.extend(services.cnc.iter().map(describe_cnc));
    join_or_none(&parts, "; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_model::{EdgeSide, HoleKind};

    #[test]
    fn absent_services_describe_as_none() {
        assert_eq!(describe_edgeband(None), "-");
        assert_eq!(describe(&PartServices::default()), "-");
    }

    #[test]
    fn band_phrases() {
        let spec = EdgeBandSpec::new(EdgeSet::ALL)
            .unwrap()
            .with_tape("OAK-22")
            .with_thickness(2.0);
        insta::assert_snapshot!(
            describe_edgeband(Some(&spec)),
            @"Edge band on all four edges, tape OAK-22, 2 mm thick"
        );
        let single = EdgeBandSpec::new(EdgeSet::single(EdgeSide::W1)).unwrap();
        assert_eq!(describe_edgeband(Some(&single)), "Edge band on W1");
    }

    #[test]
    fn stopped_back_groove() {
        let spec = GrooveSpec::new(EdgeSide::W2, 4.0, 8.0, 10.0)
            .with_stopped(50.0, 300.0)
            .with_face(Face::Back);
        insta::assert_snapshot!(
            describe_groove(&spec),
            @"Groove on W2: 4 mm wide, 8 mm deep, 10 mm from the edge, stopped 50 to 300 mm, back face"
        );
    }

    #[test]
    fn shelf_pin_line_has_no_count() {
        let spec = HolePatternSpec::new(HoleKind::ShelfPin, EdgeSide::L1, vec![37.0], 37.0)
            .with_pitch(32.0)
            .with_diameter(5.0);
        insta::assert_snapshot!(
            describe_holes(&spec),
            @"shelf-pin line on L1 every 32 mm, 37 mm in, 5 mm dia"
        );
    }

    #[test]
    fn radius_on_all_corners() {
        let operation = CncOperation::new(CncParams::Radius {
            radius_mm: 3.0,
            corners: CornerSet::ALL,
        });
        assert_eq!(describe_cnc(&operation), "Corner radius 3 mm on all corners");
    }
}
