//! Post-normalization sanity checks.
//!
//! Validation inspects a finished [`PartServices`] bundle and reports
//! structural or numeric problems as advisory warnings for a human
//! reviewer. It never fails and never changes the bundle; machining
//! feasibility is not judged here.

pub mod checks;
pub mod warning;

use panel_model::PartServices;

pub use checks::ValidationContext;
pub use warning::ValidationWarning;

/// Check a bundle without knowing anything about the part.
pub fn validate_services(services: &PartServices) -> Vec<ValidationWarning> {
    validate_with_context(services, &ValidationContext::default())
}

/// Check a bundle; part dimensions in `context` enable bounds checks.
pub fn validate_with_context(
    services: &PartServices,
    context: &ValidationContext,
) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    if let Some(edgeband) = &services.edgeband {
        warnings.extend(checks::edgeband::check(edgeband));
    }
    warnings.extend(checks::groove::check(&services.grooves, context));
    warnings.extend(checks::hole::check(&services.holes, context));
    warnings.extend(checks::cnc::check(&services.cnc, context));
    warnings
}
