//! Formatting of canonical panel services.
//!
//! The inverse direction of normalization: canonical specs back to
//! shortcodes, human-readable descriptions, a compact one-line summary for
//! tables and tooltips, and aggregate statistics for export.
//!
//! Formatters never fail. An absent spec or an empty list formats to
//! [`NONE_MARKER`], never to an empty string.
//!
//! # Module Organization
//!
//! - [`shortcode`]: canonical codes through the codec's encode path
//! - [`describe`]: human-readable text
//! - [`summary`]: `EB:2L2W | G:GL-4-10 | H:H2-100 | CNC:-`
//! - [`stats`]: edge-band length, groove length, hole and operation counts

pub mod describe;
pub mod shortcode;
pub mod stats;
pub mod summary;

pub use describe::{describe, describe_cnc, describe_edgeband, describe_groove, describe_holes};
pub use shortcode::{
    CodeDefaults, HoleSize, PartShortcodes, cnc_code, edgeband_code, groove_codes, hole_code,
    shortcodes,
};
pub use stats::ServiceStats;
pub use summary::summarize;

/// What every formatter prints for "no service".
pub const NONE_MARKER: &str = "-";

/// Join formatted items, or the none marker when there are none.
pub(crate) fn join_or_none(items: &[String], separator: &str) -> String {
    if items.is_empty() {
        NONE_MARKER.to_string()
    } else {
        items.join(separator)
    }
}
