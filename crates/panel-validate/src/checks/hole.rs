use panel_model::{HolePatternSpec, ServiceFamily};

use crate::checks::{ValidationContext, require_non_negative, require_positive};
use crate::warning::ValidationWarning;

pub fn check(holes: &[HolePatternSpec], context: &ValidationContext) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    for (index, hole) in holes.iter().enumerate() {
        let mut push = |field: &str, message: String| {
            warnings.push(ValidationWarning::new(
                ServiceFamily::Drilling,
                format!("holes[{index}].{field}"),
                message,
            ));
        };

        if hole.count == Some(0) {
            push("count", format!("{} hole count must be positive", hole.kind.label()));
        }
        if hole.offsets_mm.is_empty() && hole.count.is_none() && hole.pitch_mm.is_none() {
            push("offsets_mm", format!("{} pattern has no offsets", hole.kind.label()));
        }
        if let Some(expected) = hole.kind.expected_offsets()
            && hole.offsets_mm.len() != expected
        {
            push(
                "offsets_mm",
                format!(
                    "{} needs {expected} offsets, found {}",
                    hole.kind.label(),
                    hole.offsets_mm.len()
                ),
            );
        }
        if !hole.from_center
            && let Some(message) = hole
                .offsets_mm
                .iter()
                .find_map(|offset| require_non_negative(*offset, "offset"))
        {
            push("offsets_mm", message);
        }
        if let Some(message) = require_non_negative(hole.distance_from_edge_mm, "distance from edge") {
            push("distance_from_edge_mm", message);
        }
        for (field, value, what) in [
            ("pitch_mm", hole.pitch_mm, "pitch"),
            ("diameter_mm", hole.diameter_mm, "diameter"),
            ("depth_mm", hole.depth_mm, "depth"),
        ] {
            if let Some(message) = value.and_then(|value| require_positive(value, what)) {
                push(field, message);
            }
        }

        if let Some(dimensions) = context.dimensions {
            let length = dimensions.edge_length(hole.ref_edge);
            let reach = if hole.from_center { length / 2.0 } else { length };
            if hole.offsets_mm.iter().any(|offset| offset.abs() > reach) {
                push(
                    "offsets_mm",
                    format!("offset beyond the {length} mm edge {}", hole.ref_edge),
                );
            }
            if hole.distance_from_edge_mm > dimensions.span_from(hole.ref_edge) {
                push(
                    "distance_from_edge_mm",
                    format!("distance {} lies outside the part", hole.distance_from_edge_mm),
                );
            }
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_model::{EdgeSide, HoleKind};

    #[test]
    fn handle_needs_two_offsets() {
        let holes = vec![HolePatternSpec::new(HoleKind::Handle, EdgeSide::W1, vec![0.0], 32.0).centered()];
        let warnings = check(&holes, &ValidationContext::new());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "holes[0].offsets_mm");
    }

    #[test]
    fn zero_count_and_bad_diameter() {
        let holes = vec![
            HolePatternSpec::new(HoleKind::Hinge, EdgeSide::L1, vec![100.0], 22.5)
                .with_count(0)
                .with_diameter(0.0),
        ];
        let messages: Vec<String> = check(&holes, &ValidationContext::new())
            .into_iter()
            .map(|warning| warning.message)
            .collect();
        assert_eq!(
            messages,
            vec!["hinge hole count must be positive", "diameter must be positive"]
        );
    }
}
