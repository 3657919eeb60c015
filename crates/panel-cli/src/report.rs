//! Per-part reports shown by `normalize` and `cut-list`.

use panel_dialect::Dialect;
use panel_format::{
    CodeDefaults, HoleSize, PartShortcodes, ServiceStats, describe, shortcodes, summarize,
};
use panel_model::{HoleKind, PartDimensions};
use panel_normalize::{NormalizedPart, Resolution};
use panel_validate::ValidationWarning;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PartReport {
    pub label: Option<String>,
    pub summary: String,
    pub description: String,
    pub codes: PartShortcodes,
    pub stats: ServiceStats,
    pub warnings: Vec<ValidationWarning>,
    pub unresolved: Vec<String>,
    pub trace: Vec<Resolution>,
}

impl PartReport {
    pub fn new(
        part: NormalizedPart,
        dimensions: Option<&PartDimensions>,
        dialect: &Dialect,
    ) -> Self {
        let defaults = code_defaults(dialect);
        Self {
            summary: summarize(&part.services, &defaults),
            description: describe(&part.services),
            codes: shortcodes(&part.services, &defaults),
            stats: ServiceStats::from_services(&part.services, dimensions),
            label: part.label,
            warnings: part.warnings,
            unresolved: part.unresolved,
            trace: part.trace,
        }
    }

    /// Anything a reviewer should look at.
    pub fn needs_review(&self) -> bool {
        !self.warnings.is_empty() || !self.unresolved.is_empty()
    }
}

/// What the dialect leaves implicit in its shortcodes.
fn code_defaults(dialect: &Dialect) -> CodeDefaults {
    let config = dialect.config();
    HoleKind::ALL.into_iter().fold(
        CodeDefaults::new().with_groove_depth(config.groove.defaults.depth_mm),
        |defaults, kind| {
            let hardware = config.drilling.defaults.for_kind(kind);
            defaults.with_hole_size(
                kind,
                HoleSize {
                    diameter_mm: hardware.diameter_mm,
                    depth_mm: hardware.depth_mm,
                },
            )
        },
    )
}

#[derive(Debug, Clone, Serialize)]
pub struct CutListReport {
    pub parts: Vec<PartReport>,
    pub totals: ServiceStats,
}

impl CutListReport {
    pub fn new(parts: Vec<PartReport>) -> Self {
        let totals = parts.iter().map(|part| part.stats).sum();
        Self { parts, totals }
    }

    pub fn review_count(&self) -> usize {
        self.parts.iter().filter(|part| part.needs_review()).count()
    }
}
