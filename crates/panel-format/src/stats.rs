//! Aggregate figures for export and pricing.

use std::iter::Sum;
use std::ops::AddAssign;

use panel_model::{GrooveSpec, HolePatternSpec, PartDimensions, PartServices};
use serde::Serialize;

/// Totals for one part, or for a whole cut list once summed.
///
/// Lengths need the part dimensions and stay `None` without them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ServiceStats {
    pub edgeband_length_mm: Option<f64>,
    pub edge_count: usize,
    pub groove_count: usize,
    pub groove_length_mm: Option<f64>,
    pub hole_pattern_count: usize,
    /// Holes whose number is known; pitched lines count only with dimensions.
    pub hole_count: u32,
    pub cnc_count: usize,
}

fn groove_length(groove: &GrooveSpec, dimensions: Option<&PartDimensions>) -> Option<f64> {
    match &groove.stopped {
        Some(range) => Some((range.end_mm - range.start_mm).max(0.0)),
        None => dimensions.map(|dimensions| dimensions.edge_length(groove.side)),
    }
}

/// Holes along a pitched line: from the first offset to the same distance
/// short of the far end.
fn line_holes(spec: &HolePatternSpec, pitch_mm: f64, dimensions: &PartDimensions) -> u32 {
    if pitch_mm <= 0.0 {
        return 0;
    }
    let start = spec.offsets_mm.first().copied().unwrap_or(0.0);
    let usable = dimensions.edge_length(spec.ref_edge) - 2.0 * start;
    if usable < 0.0 {
        return 0;
    }
    (usable / pitch_mm).floor() as u32 + 1
}

fn hole_count(spec: &HolePatternSpec, dimensions: Option<&PartDimensions>) -> u32 {
    match (spec.hole_count(), spec.pitch_mm, dimensions) {
        (Some(count), _, _) => count,
        (None, Some(pitch), Some(dimensions)) => line_holes(spec, pitch, dimensions),
        _ => 0,
    }
}

fn add_option(total: Option<f64>, value: Option<f64>) -> Option<f64> {
    match (total, value) {
        (Some(a), Some(b)) => Some(a + b),
        (a, b) => a.or(b),
    }
}

impl ServiceStats {
    pub fn from_services(services: &PartServices, dimensions: Option<&PartDimensions>) -> Self {
        let edges = services
            .edgeband
            .as_ref()
            .map(|spec| spec.edges)
            .unwrap_or_default();
        let edgeband_length_mm = dimensions.map(|dimensions| {
            edges
                .iter()
                .map(|side| dimensions.edge_length(side))
                .sum::<f64>()
        });

        let groove_length_mm = services
            .grooves
            .iter()
            .map(|groove| groove_length(groove, dimensions))
            .try_fold(0.0, |total, length| length.map(|length| total + length));

        Self {
            edgeband_length_mm,
            edge_count: edges.len(),
            groove_count: services.grooves.len(),
            groove_length_mm,
            hole_pattern_count: services.holes.len(),
            hole_count: services
                .holes
                .iter()
                .map(|spec| hole_count(spec, dimensions))
                .sum(),
            cnc_count: services.cnc.len(),
        }
    }
}

impl AddAssign for ServiceStats {
    fn add_assign(&mut self, other: ServiceStats) {
        self.edgeband_length_mm = add_option(self.edgeband_length_mm, other.edgeband_length_mm);
        self.edge_count += other.edge_count;
        self.groove_count += other.groove_count;
        self.groove_length_mm = add_option(self.groove_length_mm, other.groove_length_mm);
        self.hole_pattern_count += other.hole_pattern_count;
        self.hole_count += other.hole_count;
        self.cnc_count += other.cnc_count;
    }
}

impl Sum for ServiceStats {
    fn sum<I: Iterator<Item = ServiceStats>>(iter: I) -> Self {
        iter.fold(ServiceStats::default(), |mut total, stats| {
            total += stats;
            total
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_model::{EdgeBandSpec, EdgeSet, EdgeSide, HoleKind};

    fn door() -> PartServices {
        PartServices {
            edgeband: EdgeBandSpec::new(EdgeSet::ALL),
            grooves: vec![GrooveSpec::new(EdgeSide::W2, 4.0, 10.0, 10.0)],
            holes: vec![
                HolePatternSpec::new(HoleKind::Hinge, EdgeSide::L1, vec![100.0], 22.5)
                    .with_count(3),
                HolePatternSpec::new(HoleKind::ShelfPin, EdgeSide::L1, vec![37.0], 37.0)
                    .with_pitch(32.0),
            ],
            cnc: Vec::new(),
        }
    }

    #[test]
    fn lengths_need_dimensions() {
        let stats = ServiceStats::from_services(&door(), None);
        assert_eq!(stats.edgeband_length_mm, None);
        assert_eq!(stats.groove_length_mm, None);
        assert_eq!(stats.edge_count, 4);
        assert_eq!(stats.hole_count, 3);
    }

    #[test]
    fn with_dimensions() {
        let dimensions = PartDimensions::new(1000.0, 400.0);
        let stats = ServiceStats::from_services(&door(), Some(&dimensions));
        assert_eq!(stats.edgeband_length_mm, Some(2800.0));
        assert_eq!(stats.groove_length_mm, Some(400.0));
        // (1000 - 74) / 32 = 28.9, so 29 pin holes plus 3 hinge cups
        assert_eq!(stats.hole_count, 32);
    }

    #[test]
    fn stopped_groove_length_is_its_range() {
        let services = PartServices {
            grooves: vec![GrooveSpec::new(EdgeSide::L1, 4.0, 10.0, 10.0).with_stopped(50.0, 350.0)],
            ..PartServices::default()
        };
        let stats = ServiceStats::from_services(&services, None);
        assert_eq!(stats.groove_length_mm, Some(300.0));
    }

    #[test]
    fn totals_add_up() {
        let dimensions = PartDimensions::new(1000.0, 400.0);
        let total: ServiceStats = [
            ServiceStats::from_services(&door(), Some(&dimensions)),
            ServiceStats::from_services(&door(), None),
        ]
        .into_iter()
        .sum();
        assert_eq!(total.edge_count, 8);
        assert_eq!(total.edgeband_length_mm, Some(2800.0));
        assert_eq!(total.hole_count, 35);
    }
}
