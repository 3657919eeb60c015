//! Canonical shortcode codec.
//!
//! Fixed-grammar encode/decode between canonical service values and their
//! short notations (`2L2W`, `GL-4-10`, `H2-110`, `CUTOUT-SINK-600x500`).
//! Decoding is total: malformed input yields `None`, never an error. For
//! every representable value `decode(encode(v)) == v`.
//!
//! Any code may carry an `@override` suffix, see [`overrides`].

pub mod cnc;
pub mod edgeband;
pub mod groove;
pub mod hole;
pub mod number;
pub mod overrides;

use panel_model::{CncParams, EdgeSet, ServiceFamily};
use serde::Serialize;

pub use cnc::{DEFAULT_CUTOUT_SHAPE, builtin_cnc_macro, decode_cnc, encode_cnc};
pub use edgeband::{decode_edges, encode_edges};
pub use groove::{
    GrooveCode, GrooveGroup, builtin_groove_preset, decode_groove, encode_groove, group_grooves,
};
pub use hole::{HoleCode, builtin_hole_patterns, builtin_hole_preset, decode_hole, encode_hole};
pub use number::{format_mm, parse_mm};
pub use overrides::{Overrides, attach_overrides, split_overrides};

/// A code decoded without knowing its family up front.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "family", content = "value", rename_all = "snake_case")]
pub enum Decoded {
    EdgeBand(EdgeSet),
    Groove(GrooveCode),
    Hole(HoleCode),
    Cnc(CncParams),
}

impl Decoded {
    pub fn family(&self) -> ServiceFamily {
        match self {
            Decoded::EdgeBand(_) => ServiceFamily::EdgeBand,
            Decoded::Groove(_) => ServiceFamily::Groove,
            Decoded::Hole(_) => ServiceFamily::Drilling,
            Decoded::Cnc(_) => ServiceFamily::Cnc,
        }
    }

    pub fn encode(&self) -> String {
        match self {
            Decoded::EdgeBand(edges) => encode_edges(*edges),
            Decoded::Groove(code) => encode_groove(code),
            Decoded::Hole(code) => encode_hole(code),
            Decoded::Cnc(params) => encode_cnc(params),
        }
    }
}

/// Decode a token of unknown family, ignoring any `@` suffix.
///
/// Structural grammars are tried before the built-in preset tables, and
/// groove, hole and CNC before edge banding.
pub fn decode_any(token: &str) -> Option<Decoded> {
    let (base, _) = split_overrides(token);
    if base.is_empty() {
        return None;
    }
    decode_groove(base)
        .or_else(|| builtin_groove_preset(base))
        .map(Decoded::Groove)
        .or_else(|| {
            decode_hole(base)
                .or_else(|| builtin_hole_preset(base))
                .map(Decoded::Hole)
        })
        .or_else(|| {
            decode_cnc(base)
                .or_else(|| builtin_cnc_macro(base))
                .map(Decoded::Cnc)
        })
        .or_else(|| decode_edges(base).map(Decoded::EdgeBand))
}

/// Which family a bare code belongs to, if it is a code at all.
pub fn detect_family(token: &str) -> Option<ServiceFamily> {
    decode_any(token).map(|decoded| decoded.family())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_families() {
        assert_eq!(detect_family("2L2W"), Some(ServiceFamily::EdgeBand));
        assert_eq!(detect_family("GL-4-10@d6"), Some(ServiceFamily::Groove));
        assert_eq!(detect_family("H2-110"), Some(ServiceFamily::Drilling));
        assert_eq!(detect_family("SINK"), Some(ServiceFamily::Cnc));
        assert_eq!(detect_family("BPG"), Some(ServiceFamily::Groove));
        assert_eq!(detect_family("hinges"), None);
        assert_eq!(detect_family(""), None);
    }

    #[test]
    fn decoded_serializes_with_family_tag() {
        let decoded = decode_any("H2-110").expect("hinge code");
        let json = serde_json::to_value(&decoded).expect("serialize decoded");
        assert_eq!(json["family"], "hole");
        assert_eq!(decoded.encode(), "H2-110");
    }
}
