use panel_model::{GrooveSpec, ServiceFamily};

use crate::checks::{ValidationContext, require_non_negative, require_positive};
use crate::warning::ValidationWarning;

pub fn check(grooves: &[GrooveSpec], context: &ValidationContext) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    for (index, groove) in grooves.iter().enumerate() {
        let mut push = |field: &str, message: String| {
            warnings.push(ValidationWarning::new(
                ServiceFamily::Groove,
                format!("grooves[{index}].{field}"),
                message,
            ));
        };

        if let Some(message) = require_positive(groove.width_mm, "width") {
            push("width_mm", message);
        }
        if let Some(message) = require_positive(groove.depth_mm, "depth") {
            push("depth_mm", message);
        }
        if let Some(message) = require_non_negative(groove.offset_mm, "offset") {
            push("offset_mm", message);
        }
        if let Some(stopped) = groove.stopped
            && (stopped.start_mm < 0.0 || stopped.end_mm <= stopped.start_mm)
        {
            push(
                "stopped",
                format!(
                    "stopped range {}..{} is not increasing from zero",
                    stopped.start_mm, stopped.end_mm
                ),
            );
        }

        if let Some(thickness) = context.thickness_mm()
            && groove.depth_mm >= thickness
        {
            push(
                "depth_mm",
                format!(
                    "depth {} reaches through the {} mm panel",
                    groove.depth_mm, thickness
                ),
            );
        }
        if let Some(dimensions) = context.dimensions {
            let span = dimensions.span_from(groove.side);
            if groove.offset_mm + groove.width_mm > span {
                push(
                    "offset_mm",
                    format!(
                        "groove at offset {} lies outside the part ({} mm from {})",
                        groove.offset_mm, span, groove.side
                    ),
                );
            }
        }

        let duplicate = grooves[..index]
            .iter()
            .any(|earlier| earlier.side == groove.side && earlier.same_profile(groove));
        if duplicate {
            push(
                "side",
                format!(
                    "duplicate groove on {} at offset {}",
                    groove.side, groove.offset_mm
                ),
            );
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_model::{EdgeSide, PartDimensions};

    #[test]
    fn context_checks_use_part_dimensions() {
        let context =
            ValidationContext::new().with_dimensions(PartDimensions::new(600.0, 300.0).with_thickness(8.0));
        let grooves = vec![GrooveSpec::new(EdgeSide::W2, 4.0, 10.0, 598.0)];
        let warnings = check(&grooves, &context);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].message.contains("reaches through"));
        assert!(warnings[1].message.contains("outside the part"));
    }
}
