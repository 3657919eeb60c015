//! One module per service family; each exposes `check`.

pub mod cnc;
pub mod edgeband;
pub mod groove;
pub mod hole;

use panel_model::PartDimensions;

/// Optional knowledge about the part the services belong to.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationContext {
    pub dimensions: Option<PartDimensions>,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_dimensions(mut self, dimensions: PartDimensions) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    pub(crate) fn thickness_mm(&self) -> Option<f64> {
        self.dimensions.and_then(|dimensions| dimensions.thickness_mm)
    }
}

/// `"{what} must be positive"` when `value` is zero, negative or NaN.
pub(crate) fn require_positive(value: f64, what: &str) -> Option<String> {
    (value.is_nan() || value <= 0.0).then(|| format!("{what} must be positive"))
}

/// `"{what} must not be negative"` when `value` is below zero or NaN.
pub(crate) fn require_non_negative(value: f64, what: &str) -> Option<String> {
    (value.is_nan() || value < 0.0).then(|| format!("{what} must not be negative"))
}
