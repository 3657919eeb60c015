//! Library side of the `panel-notation` command line tool.

pub mod dialect_source;
pub mod logging;
pub mod report;

pub use dialect_source::{DialectDump, load_dialect};
pub use report::{CutListReport, PartReport};
