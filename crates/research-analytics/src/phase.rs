//! Cycle phase classification.

use research_core::{CyclePhase, TurningPoint, TurningPointKind};
use tracing::debug;

/// Maps the latest turning point, or the raw trend, to a [`CyclePhase`].
#[derive(Clone, Copy, Debug)]
pub struct PhaseClassifier {
    expansion_threshold: f64,
    downturn_threshold: f64,
}

impl Default for PhaseClassifier {
    fn default() -> Self {
        Self::new(1.01, 0.99)
    }
}

impl PhaseClassifier {
    /// Creates a classifier.
    ///
    /// After a trough, a latest value above `trough * expansion_threshold`
    /// is an expansion; after a peak, a latest value below
    /// `peak * downturn_threshold` is a downturn.
    #[must_use]
    pub const fn new(expansion_threshold: f64, downturn_threshold: f64) -> Self {
        Self {
            expansion_threshold,
            downturn_threshold,
        }
    }

    /// Classifies the current phase.
    ///
    /// `turning_points` are the filtered points, `smoothed` the smoothed
    /// series they were found in, and `raw` the unsmoothed values.
    #[must_use]
    pub fn classify(
        &self,
        turning_points: &[TurningPoint],
        smoothed: &[f64],
        raw: &[f64],
    ) -> CyclePhase {
        if smoothed.len() < 3 {
            return CyclePhase::InsufficientData;
        }

        let Some(last) = turning_points.last() else {
            let phase = trend_phase(raw);
            debug!(%phase, "No turning points, classified by raw trend");
            return phase;
        };

        match smoothed.last() {
            Some(&latest) if latest.is_finite() && last.value.is_finite() => {
                self.relative_to(last, latest)
            }
            _ => {
                let phase = raw_direction(raw);
                debug!(%phase, "Non-finite values, classified by last raw change");
                phase
            }
        }
    }

    fn relative_to(&self, last: &TurningPoint, latest: f64) -> CyclePhase {
        match last.kind {
            TurningPointKind::Trough if latest > last.value * self.expansion_threshold => {
                CyclePhase::Expansion
            }
            TurningPointKind::Trough => CyclePhase::Recovery,
            TurningPointKind::Peak if latest < last.value * self.downturn_threshold => {
                CyclePhase::Downturn
            }
            TurningPointKind::Peak => CyclePhase::Peak,
        }
    }
}

/// Classifies by the shape of the last three values.
///
/// Strictly rising is expansion, strictly falling is downturn, a dip then
/// rise is recovery, a rise then dip is a peak; anything else is uncertain.
#[must_use]
pub fn trend_phase(values: &[f64]) -> CyclePhase {
    let [.., a, b, c] = values else {
        return CyclePhase::InsufficientData;
    };

    if a < b && b < c {
        CyclePhase::Expansion
    } else if a > b && b > c {
        CyclePhase::Downturn
    } else if b < a && c > b {
        CyclePhase::Recovery
    } else if b > a && c < b {
        CyclePhase::Peak
    } else {
        CyclePhase::Uncertain
    }
}

fn raw_direction(values: &[f64]) -> CyclePhase {
    match values {
        [.., previous, latest] if latest > previous => CyclePhase::Improving,
        [.., _, _] => CyclePhase::Declining,
        _ => CyclePhase::InsufficientData,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trough(value: f64) -> TurningPoint {
        TurningPoint::new("2020-Q2", value, 2, TurningPointKind::Trough)
    }

    fn peak(value: f64) -> TurningPoint {
        TurningPoint::new("2019-Q4", value, 2, TurningPointKind::Peak)
    }

    #[test]
    fn test_after_trough() {
        let classifier = PhaseClassifier::default();
        let raw = [1.0, 1.0, 1.0, 1.0];
        assert_eq!(
            classifier.classify(&[trough(100.0)], &[100.0, 99.0, 101.5], &raw),
            CyclePhase::Expansion
        );
        assert_eq!(
            classifier.classify(&[trough(100.0)], &[100.0, 99.0, 100.5], &raw),
            CyclePhase::Recovery
        );
    }

    #[test]
    fn test_after_peak() {
        let classifier = PhaseClassifier::default();
        let raw = [1.0, 1.0, 1.0, 1.0];
        assert_eq!(
            classifier.classify(&[peak(100.0)], &[100.0, 101.0, 98.0], &raw),
            CyclePhase::Downturn
        );
        assert_eq!(
            classifier.classify(&[peak(100.0)], &[100.0, 101.0, 99.5], &raw),
            CyclePhase::Peak
        );
    }

    #[test]
    fn test_non_finite_falls_back_to_raw_direction() {
        let classifier = PhaseClassifier::default();
        assert_eq!(
            classifier.classify(&[peak(f64::NAN)], &[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]),
            CyclePhase::Improving
        );
        assert_eq!(
            classifier.classify(&[peak(f64::NAN)], &[1.0, 2.0, 3.0], &[3.0, 2.0, 2.0]),
            CyclePhase::Declining
        );
    }

    #[test]
    fn test_trend_without_turning_points() {
        let classifier = PhaseClassifier::default();
        let smoothed = [0.0; 4];
        assert_eq!(
            classifier.classify(&[], &smoothed, &[1.0, 2.0, 3.0, 4.0]),
            CyclePhase::Expansion
        );
        assert_eq!(
            classifier.classify(&[], &smoothed, &[4.0, 3.0, 2.0, 1.0]),
            CyclePhase::Downturn
        );
        assert_eq!(
            classifier.classify(&[], &smoothed, &[5.0, 3.0, 2.0, 4.0]),
            CyclePhase::Recovery
        );
        assert_eq!(
            classifier.classify(&[], &smoothed, &[1.0, 2.0, 5.0, 3.0]),
            CyclePhase::Peak
        );
        assert_eq!(
            classifier.classify(&[], &smoothed, &[1.0, 2.0, 2.0, 2.0]),
            CyclePhase::Uncertain
        );
    }

    #[test]
    fn test_too_few_values() {
        let classifier = PhaseClassifier::default();
        assert_eq!(
            classifier.classify(&[], &[1.0, 2.0], &[1.0, 2.0]),
            CyclePhase::InsufficientData
        );
        assert_eq!(trend_phase(&[1.0, 2.0]), CyclePhase::InsufficientData);
    }
}
