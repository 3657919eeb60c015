//! Record of how each raw input was resolved.

use std::fmt;

use panel_model::ServiceFamily;
use serde::Serialize;

/// The strategy that produced a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum Strategy {
    /// Structured hints that arrived already separated.
    Hint,
    Alias,
    Preset,
    Codec,
    Builtin,
    Rule { id: String },
    Heuristic,
    Column,
    DefaultIfBlank,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Hint => f.write_str("hint"),
            Strategy::Alias => f.write_str("alias"),
            Strategy::Preset => f.write_str("preset"),
            Strategy::Codec => f.write_str("codec"),
            Strategy::Builtin => f.write_str("builtin"),
            Strategy::Rule { id } => write!(f, "rule {id}"),
            Strategy::Heuristic => f.write_str("heuristic"),
            Strategy::Column => f.write_str("column"),
            Strategy::DefaultIfBlank => f.write_str("default-if-blank"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub family: ServiceFamily,
    pub input: String,
    #[serde(flatten)]
    pub strategy: Strategy,
}

/// Trace and misses of one family's normalization.
#[derive(Debug, Clone, Default)]
pub(crate) struct Recorder {
    pub(crate) trace: Vec<Resolution>,
    pub(crate) unresolved: Vec<String>,
}

impl Recorder {
    pub(crate) fn hit(
        &mut self,
        family: ServiceFamily,
        input: impl Into<String>,
        strategy: Strategy,
    ) {
        let input = input.into();
        tracing::debug!(family = %family, %input, %strategy, "resolved");
        self.trace.push(Resolution {
            family,
            input,
            strategy,
        });
    }

    pub(crate) fn miss(&mut self, family: ServiceFamily, input: impl Into<String>) {
        let input = input.into();
        tracing::debug!(family = %family, %input, "no strategy resolved input");
        self.unresolved.push(input);
    }
}

/// Result of normalizing one family: the value plus how it came about.
#[derive(Debug, Clone)]
pub struct FamilyOutcome<T> {
    pub value: T,
    pub trace: Vec<Resolution>,
    /// Inputs no strategy could interpret.
    pub unresolved: Vec<String>,
}

impl<T> FamilyOutcome<T> {
    pub(crate) fn new(value: T, recorder: Recorder) -> Self {
        Self {
            value,
            trace: recorder.trace,
            unresolved: recorder.unresolved,
        }
    }
}
