use panel_model::{CncOperation, CncParams, ServiceFamily};

use crate::checks::{ValidationContext, require_positive};
use crate::warning::ValidationWarning;

/// Problems with one operation's parameters, as `(field, message)`.
fn param_problems(params: &CncParams) -> Vec<(&'static str, String)> {
    let mut problems = Vec::new();
    let mut positive = |field: &'static str, value: f64, what: &str| {
        if let Some(message) = require_positive(value, what) {
            problems.push((field, message));
        }
    };
    match params {
        CncParams::Cutout {
            width_mm, height_mm, ..
        } => {
            positive("width_mm", *width_mm, "cutout width");
            positive("height_mm", *height_mm, "cutout height");
        }
        CncParams::Pocket {
            width_mm,
            height_mm,
            depth_mm,
        } => {
            positive("width_mm", *width_mm, "pocket width");
            positive("height_mm", *height_mm, "pocket height");
            positive("depth_mm", *depth_mm, "pocket depth");
        }
        CncParams::Radius { radius_mm, .. } => positive("radius_mm", *radius_mm, "radius"),
        CncParams::Rebate {
            width_mm, depth_mm, ..
        } => {
            positive("width_mm", *width_mm, "rebate width");
            positive("depth_mm", *depth_mm, "rebate depth");
        }
        CncParams::Chamfer { size_mm, .. } => positive("size_mm", *size_mm, "chamfer size"),
        CncParams::DrillArray {
            rows,
            cols,
            pitch_mm,
            diameter_mm,
        } => {
            positive("rows", f64::from(*rows), "row count");
            positive("cols", f64::from(*cols), "column count");
            positive("pitch_mm", *pitch_mm, "pitch");
            if let Some(diameter) = diameter_mm {
                positive("diameter_mm", *diameter, "diameter");
            }
        }
        CncParams::Text { height_mm, .. } => {
            if let Some(height) = height_mm {
                positive("height_mm", *height, "text height");
            }
        }
        CncParams::Profile { .. } | CncParams::Custom { .. } => {}
    }

    match params {
        CncParams::Radius { corners, .. } if corners.is_empty() => {
            problems.push(("corners", "corner set is empty".to_string()));
        }
        CncParams::Profile { edges, .. } | CncParams::Chamfer { edges, .. } if edges.is_empty() => {
            problems.push(("edges", "edge set is empty".to_string()));
        }
        CncParams::Text { text, .. } if text.trim().is_empty() => {
            problems.push(("text", "engraving text is blank".to_string()));
        }
        CncParams::Custom { program, .. } if program.trim().is_empty() => {
            problems.push(("program", "program name is blank".to_string()));
        }
        _ => {}
    }
    problems
}

pub fn check(operations: &[CncOperation], context: &ValidationContext) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    for (index, operation) in operations.iter().enumerate() {
        for (field, message) in param_problems(&operation.params) {
            warnings.push(ValidationWarning::new(
                ServiceFamily::Cnc,
                format!("cnc[{index}].{field}"),
                message,
            ));
        }

        let Some(dimensions) = context.dimensions else {
            continue;
        };
        if let Some(size) = operation.dimensions() {
            if size.width_mm > dimensions.length_mm || size.height_mm > dimensions.width_mm {
                warnings.push(ValidationWarning::new(
                    ServiceFamily::Cnc,
                    format!("cnc[{index}].params"),
                    format!(
                        "{} {}x{} does not fit the {}x{} part",
                        operation.kind().label(),
                        size.width_mm,
                        size.height_mm,
                        dimensions.length_mm,
                        dimensions.width_mm
                    ),
                ));
            }
            if let (Some(depth), Some(thickness)) = (size.depth_mm, dimensions.thickness_mm)
                && depth >= thickness
            {
                warnings.push(ValidationWarning::new(
                    ServiceFamily::Cnc,
                    format!("cnc[{index}].depth_mm"),
                    format!("pocket depth {depth} reaches through the {thickness} mm panel"),
                ));
            }
        }
    }
    warnings
}
