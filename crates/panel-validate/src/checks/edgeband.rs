use panel_model::{EdgeBandSpec, ServiceFamily};

use crate::checks::require_positive;
use crate::warning::ValidationWarning;

pub fn check(spec: &EdgeBandSpec) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    if spec.edges.is_empty() {
        warnings.push(ValidationWarning::new(
            ServiceFamily::EdgeBand,
            "edgeband.edges",
            "edge set is empty",
        ));
    }
    if let Some(message) = spec
        .thickness_mm
        .and_then(|thickness| require_positive(thickness, "tape thickness"))
    {
        warnings.push(ValidationWarning::new(
            ServiceFamily::EdgeBand,
            "edgeband.thickness_mm",
            message,
        ));
    }
    if spec
        .tape_id
        .as_deref()
        .is_some_and(|tape| tape.trim().is_empty())
    {
        warnings.push(ValidationWarning::new(
            ServiceFamily::EdgeBand,
            "edgeband.tape_id",
            "tape id is blank",
        ));
    }
    warnings
}
