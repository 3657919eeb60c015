//! Validation warning type.

use std::fmt;

use panel_model::ServiceFamily;
use serde::{Deserialize, Serialize};

/// An advisory finding on a produced bundle.
///
/// `field` locates the offending value (`grooves[1].depth_mm`); `message`
/// is meant for a human reviewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub family: ServiceFamily,
    pub field: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(
        family: ServiceFamily,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            family,
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.family, self.field, self.message)
    }
}
