use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// The face of the panel a cut or hole is machined from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Face {
    #[default]
    Front,
    Back,
}

impl Face {
    pub fn as_str(&self) -> &'static str {
        match self {
            Face::Front => "front",
            Face::Back => "back",
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Face {
    type Err = ModelError;

    /// Accepts the usual shop spellings (`F`, `TOP`, `B`, `BOTTOM`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "F" | "FRONT" | "TOP" | "A" => Ok(Face::Front),
            "B" | "BACK" | "BOTTOM" | "REAR" => Ok(Face::Back),
            _ => Err(ModelError::UnknownFace(s.to_string())),
        }
    }
}
