//! Organization notation dialects.
//!
//! A dialect tells the normalizers how one organization writes its services:
//! aliases, yes/no marks, column headers, named presets, pattern rules and
//! default geometry for each of the four service families.
//!
//! # Module Organization
//!
//! - [`config`]: The complete dialect configuration (plain serde data)
//! - [`defaults`]: The versioned global default
//! - [`overlay`]: Partial organization dialects and `merge_with_default`
//! - [`rules`]: Data-only pattern rules and their compiled form
//! - [`dialect`]: The runtime [`Dialect`] built from a configuration
//! - [`cache`]: TTL cache keyed by organization, with the store seam

pub mod cache;
pub mod config;
pub mod defaults;
pub mod dialect;
pub mod error;
pub mod overlay;
pub mod rules;

pub use cache::{DEFAULT_TTL, DialectCache, DialectStore};
pub use config::{
    CncDefaults, CncPreset, ColumnKey, DialectConfig, DrillingDefaults, EdgeDefaults, EdgePreset,
    FamilyDialect, GrooveDefaults, GroovePreset, HardwareDefaults, HeightStep, HolePreset,
    Vocabulary,
};
pub use defaults::{DEFAULT_DIALECT_VERSION, default_config, global_default};
pub use dialect::{Dialect, lookup_key};
pub use error::{DialectError, Result};
pub use overlay::{DialectOverlay, FamilyOverlay, merge_config, merge_with_default};
pub use rules::{CompiledRule, PatternRule, RuleOutput, RuleTransform, compile_rules};
