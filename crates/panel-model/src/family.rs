use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// The four service families a part can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ServiceFamily {
    #[serde(rename = "edgeband")]
    EdgeBand,
    #[serde(rename = "groove")]
    Groove,
    #[serde(rename = "drilling")]
    Drilling,
    #[serde(rename = "cnc")]
    Cnc,
}

impl ServiceFamily {
    pub const ALL: [ServiceFamily; 4] = [
        ServiceFamily::EdgeBand,
        ServiceFamily::Groove,
        ServiceFamily::Drilling,
        ServiceFamily::Cnc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceFamily::EdgeBand => "edgeband",
            ServiceFamily::Groove => "groove",
            ServiceFamily::Drilling => "drilling",
            ServiceFamily::Cnc => "cnc",
        }
    }

    /// Short label used in compact summaries.
    pub fn short_label(&self) -> &'static str {
        match self {
            ServiceFamily::EdgeBand => "EB",
            ServiceFamily::Groove => "G",
            ServiceFamily::Drilling => "H",
            ServiceFamily::Cnc => "CNC",
        }
    }
}

impl fmt::Display for ServiceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceFamily {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "edgeband" | "edge" | "eb" | "banding" => Ok(ServiceFamily::EdgeBand),
            "groove" | "grooves" | "g" => Ok(ServiceFamily::Groove),
            "drilling" | "holes" | "hole" | "h" => Ok(ServiceFamily::Drilling),
            "cnc" => Ok(ServiceFamily::Cnc),
            _ => Err(ModelError::UnknownFamily(s.to_string())),
        }
    }
}
