//! Dialect-driven normalization of panel service notation.
//!
//! Every raw input runs through one ordered strategy chain per family:
//! organization alias, dialect preset, canonical codec, built-in preset,
//! pattern rules and finally natural-language heuristics. The first strategy
//! that answers wins. Each answer is recorded in a trace, and inputs nothing
//! understood are reported back rather than dropped.
//!
//! # Module Organization
//!
//! - [`edgeband`], [`groove`], [`drilling`], [`cnc`]: One normalizer per family
//! - [`heuristics`]: Natural-language recognizers
//! - [`part`]: Whole-part normalization and validation
//! - [`resolver`]: Organization-aware entry point with a dialect cache
//! - [`trace`]: Which strategy resolved which input
//!
//! # Example
//!
//! ```
//! use panel_dialect::global_default;
//! use panel_normalize::{NormalizeOptions, normalize_text};
//!
//! let part = normalize_text("2L2W, GL-4-10, 2 hinges", &global_default(), &NormalizeOptions::default());
//! assert!(part.services.edgeband.is_some());
//! assert_eq!(part.services.grooves.len(), 2);
//! assert_eq!(part.services.holes.len(), 1);
//! ```

mod chain;
mod columns;

pub mod cnc;
pub mod drilling;
pub mod edgeband;
pub mod groove;
pub mod heuristics;
pub mod options;
pub mod part;
pub mod resolver;
pub mod trace;

pub use cnc::normalize_cnc;
pub use drilling::normalize_drilling;
pub use edgeband::normalize_edgeband;
pub use groove::normalize_grooves;
pub use options::NormalizeOptions;
pub use part::{NormalizedPart, normalize_part, normalize_text, normalize_token};
pub use resolver::OrgResolver;
pub use trace::{FamilyOutcome, Resolution, Strategy};
