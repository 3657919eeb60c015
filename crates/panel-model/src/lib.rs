//! Canonical service model for panel machining.
//!
//! Every notation an organization uses for edge banding, grooves, drilling and
//! CNC work is normalized into the types of this crate. Downstream consumers
//! (pricing, cut-optimization export, 2D preview) only ever see these values.
//!
//! # Module Organization
//!
//! - [`edge`]: Edge sides, edge sets and corner sets of a rectangular part
//! - [`edgeband`]: Edge-band specification
//! - [`groove`]: Groove specification and groove targets
//! - [`hole`]: Hole-pattern specification (hinges, shelf pins, handles, ...)
//! - [`cnc`]: CNC operations as a closed sum type per operation kind
//! - [`bundle`]: The per-part service bundle and part dimensions
//! - [`family`]: The four service families
//! - [`value`]: Loosely-typed cell/parameter values

pub mod bundle;
pub mod cnc;
pub mod edge;
pub mod edgeband;
pub mod error;
pub mod face;
pub mod family;
pub mod groove;
pub mod hole;
pub mod value;

pub use bundle::{PartDimensions, PartServices};
pub use cnc::{CncOpKind, CncOperation, CncParams, Dimensions, Position};
pub use edge::{Corner, CornerSet, EdgeSet, EdgeSide};
pub use edgeband::EdgeBandSpec;
pub use error::{ModelError, Result};
pub use face::Face;
pub use family::ServiceFamily;
pub use groove::{GrooveSpec, GrooveTarget, StoppedRange};
pub use hole::{HoleKind, HolePatternSpec};
pub use value::ParamValue;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundle_serializes() {
        let services = PartServices {
            edgeband: EdgeBandSpec::new(EdgeSet::LONG),
            grooves: vec![GrooveSpec::new(EdgeSide::W2, 4.0, 10.0, 10.0)],
            holes: vec![],
            cnc: vec![],
        };
        let json = serde_json::to_string(&services).expect("serialize services");
        let round: PartServices = serde_json::from_str(&json).expect("deserialize services");
        assert_eq!(round, services);
    }
}
