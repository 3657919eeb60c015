//! Raw field extraction.
//!
//! Turns free text, column maps and CSV cut lists into a [`RawPart`]: one
//! [`RawFields`] per service family, nothing resolved yet. Resolution is the
//! normalizer's job; this crate only decides which family a piece of input
//! belongs to.

pub mod classify;
pub mod cut_list;
pub mod error;
pub mod extract;
pub mod raw;

pub use classify::{HeaderRole, classify_header, keyword_families};
pub use cut_list::{CutList, parse_cut_list, read_cut_list};
pub use error::{IngestError, Result};
pub use extract::{detect_delimiter, extract_raw_fields, raw_part_from_row, split_delimited};
pub use raw::{
    CncHints, DrillingHints, EdgeHints, GrooveHints, RawFields, RawPart, is_blank_marker,
};
