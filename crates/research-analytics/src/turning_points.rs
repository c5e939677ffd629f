//! Turning point detection and filtering.
//!
//! Detection flags every local extremum of a smoothed series; filtering then
//! enforces the alternation rule of the Bry-Boschan procedure, letting a more
//! extreme point supersede a weaker predecessor of the same kind.

use research_core::{TurningPoint, TurningPointKind};

/// Raw local extrema found by [`TurningPointDetector`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Candidates {
    /// Local maxima, in index order.
    pub peaks: Vec<TurningPoint>,
    /// Local minima, in index order.
    pub troughs: Vec<TurningPoint>,
}

/// Finds local peaks and troughs in a smoothed series.
#[derive(Clone, Copy, Debug)]
pub struct TurningPointDetector {
    max_look_range: usize,
}

impl Default for TurningPointDetector {
    fn default() -> Self {
        Self::new(2)
    }
}

impl TurningPointDetector {
    /// Creates a detector with the given comparison range cap.
    #[must_use]
    pub const fn new(max_look_range: usize) -> Self {
        Self { max_look_range }
    }

    /// Comparison range for a series of `len` values: a third of the length,
    /// capped at `max_look_range` and never below one.
    #[must_use]
    pub fn look_range(&self, len: usize) -> usize {
        (len / 3).min(self.max_look_range).max(1)
    }

    /// Detects extrema of `smoothed`; `dates[i]` labels `smoothed[i]`.
    ///
    /// A point is a peak when it is strictly greater than every neighbour
    /// within the look range on both sides, and a trough when strictly less.
    #[must_use]
    pub fn detect(&self, dates: &[String], smoothed: &[f64]) -> Candidates {
        let n = smoothed.len().min(dates.len());
        let look = self.look_range(n);
        let mut candidates = Candidates::default();

        for i in look..n.saturating_sub(look) {
            let value = smoothed[i];
            let mut neighbours = (1..=look).flat_map(|j| [smoothed[i - j], smoothed[i + j]]);

            if neighbours.clone().all(|other| value > other) {
                candidates.peaks.push(TurningPoint::new(
                    dates[i].clone(),
                    value,
                    i,
                    TurningPointKind::Peak,
                ));
            } else if neighbours.all(|other| value < other) {
                candidates.troughs.push(TurningPoint::new(
                    dates[i].clone(),
                    value,
                    i,
                    TurningPointKind::Trough,
                ));
            }
        }

        candidates
    }
}

/// Enforces peak/trough alternation.
#[derive(Clone, Copy, Debug)]
pub struct TurningPointFilter {
    min_separation: usize,
}

impl Default for TurningPointFilter {
    fn default() -> Self {
        Self::new(1)
    }
}

impl TurningPointFilter {
    /// Creates a filter requiring `min_separation` indices between kept points.
    #[must_use]
    pub const fn new(min_separation: usize) -> Self {
        Self { min_separation }
    }

    /// Merges peaks and troughs into an alternating sequence ordered by index.
    ///
    /// A point is kept when its kind differs from the last kept point and it
    /// is far enough from it. Otherwise, a higher peak replaces a kept peak
    /// and a lower trough replaces a kept trough.
    #[must_use]
    pub fn filter(&self, candidates: Candidates) -> Vec<TurningPoint> {
        let mut points: Vec<TurningPoint> = candidates
            .peaks
            .into_iter()
            .chain(candidates.troughs)
            .collect();
        points.sort_by_key(|p| p.index);

        let mut filtered: Vec<TurningPoint> = Vec::with_capacity(points.len());
        for point in points {
            let Some(last) = filtered.last_mut() else {
                filtered.push(point);
                continue;
            };

            let separated = point.index.saturating_sub(last.index) >= self.min_separation;
            if last.kind != point.kind && separated {
                filtered.push(point);
            } else if last.kind == point.kind && is_more_extreme(&point, last) {
                *last = point;
            }
        }

        filtered
    }
}

fn is_more_extreme(candidate: &TurningPoint, current: &TurningPoint) -> bool {
    match candidate.kind {
        TurningPointKind::Peak => candidate.value > current.value,
        TurningPointKind::Trough => candidate.value < current.value,
    }
}
