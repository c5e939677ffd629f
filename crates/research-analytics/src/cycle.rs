//! Business cycle pipeline.
//!
//! Orders a series chronologically, smooths it, detects and filters turning
//! points, and classifies the current phase. Short or non-numeric input
//! yields an analysis with an `error` and the `insufficient_data` phase
//! instead of a failure.

use research_core::{CycleConfig, CyclePhaseAnalysis, EconomicSeries, SeriesPoint};
use tracing::{debug, instrument};

use crate::dates::chronological_key;
use crate::phase::PhaseClassifier;
use crate::smoothing::Smoother;
use crate::turning_points::{TurningPointDetector, TurningPointFilter};

const TOO_FEW_POINTS: &str = "Insufficient data points for cycle analysis";
const TOO_FEW_VALUES: &str = "Insufficient numeric data points for cycle analysis";

/// Runs the cycle pipeline over a single series.
#[derive(Clone, Debug)]
pub struct CycleAnalyzer {
    min_points: usize,
    smoother: Smoother,
    detector: TurningPointDetector,
    filter: TurningPointFilter,
    classifier: PhaseClassifier,
}

impl Default for CycleAnalyzer {
    fn default() -> Self {
        Self::new(&CycleConfig::default())
    }
}

impl CycleAnalyzer {
    /// Creates an analyzer from configuration.
    #[must_use]
    pub fn new(config: &CycleConfig) -> Self {
        Self {
            min_points: config.min_points,
            smoother: Smoother::new(config.max_smoothing_window),
            detector: TurningPointDetector::new(config.max_look_range),
            filter: TurningPointFilter::new(config.min_separation),
            classifier: PhaseClassifier::new(config.expansion_threshold, config.downturn_threshold),
        }
    }

    /// Analyses `series` and classifies its current cycle phase.
    #[instrument(skip(self, series), fields(series = %series.name, points = series.len()))]
    pub fn analyze(&self, series: &EconomicSeries) -> CyclePhaseAnalysis {
        if series.len() < self.min_points {
            debug!("Too few points for cycle analysis");
            return CyclePhaseAnalysis::insufficient(TOO_FEW_POINTS, series.len());
        }

        let mut points: Vec<&SeriesPoint> = series.data.iter().collect();
        points.sort_by_cached_key(|p| chronological_key(&p.date).into_owned());

        let (dates, values): (Vec<String>, Vec<f64>) = points
            .iter()
            .filter_map(|p| p.parsed_value().map(|v| (p.date.clone(), v)))
            .unzip();

        if values.len() < self.min_points {
            debug!(numeric = values.len(), "Too few numeric values for cycle analysis");
            return CyclePhaseAnalysis::insufficient(TOO_FEW_VALUES, values.len());
        }

        let smoothed = self.smoother.smooth(&values);
        let candidates = self.detector.detect(&dates, &smoothed);
        debug!(
            peaks = candidates.peaks.len(),
            troughs = candidates.troughs.len(),
            "Detected turning point candidates"
        );

        let turning_points = self.filter.filter(candidates);
        let current_phase = self.classifier.classify(&turning_points, &smoothed, &values);
        debug!(%current_phase, turning_points = turning_points.len(), "Classified cycle phase");

        CyclePhaseAnalysis {
            turning_points,
            current_phase,
            latest_date: dates.last().cloned(),
            analysis_period: match (dates.first(), dates.last()) {
                (Some(first), Some(last)) => Some(format!("{first} to {last}")),
                _ => None,
            },
            points_analyzed: values.len(),
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use research_core::{Cadence, CyclePhase, TurningPointKind};

    fn quarterly(values: &[f64]) -> EconomicSeries {
        let data = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                SeriesPoint::new(
                    format!("{}-Q{}", 2015 + i / 4, i % 4 + 1),
                    v.to_string(),
                )
            })
            .collect();
        EconomicSeries::new("Real GDP", Cadence::Quarterly, data)
    }

    #[test]
    fn test_fewer_than_four_points() {
        let analysis = CycleAnalyzer::default().analyze(&quarterly(&[1.0, 2.0, 3.0]));
        assert_eq!(analysis.current_phase, CyclePhase::InsufficientData);
        assert_eq!(analysis.error.as_deref(), Some(TOO_FEW_POINTS));
        assert_eq!(analysis.points_analyzed, 3);
    }

    #[test]
    fn test_fewer_than_four_numeric_values() {
        let mut series = quarterly(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        series.data[1].value = String::new();
        series.data[3].value = "n/a".to_string();

        let analysis = CycleAnalyzer::default().analyze(&series);
        assert_eq!(analysis.current_phase, CyclePhase::InsufficientData);
        assert_eq!(analysis.error.as_deref(), Some(TOO_FEW_VALUES));
    }

    #[test]
    fn test_cycle_with_alternating_turning_points() {
        let analysis = CycleAnalyzer::default().analyze(&quarterly(&[
            100.0, 102.0, 105.0, 108.0, 110.0, 107.0, 103.0, 100.0, 98.0, 101.0, 105.0, 109.0,
            113.0, 116.0,
        ]));

        assert!(analysis.error.is_none());
        assert_eq!(analysis.points_analyzed, 14);
        assert_eq!(analysis.latest_date.as_deref(), Some("2018-Q2"));
        assert_eq!(analysis.analysis_period.as_deref(), Some("2015-Q1 to 2018-Q2"));
        assert!(!analysis.turning_points.is_empty());
        assert!(
            analysis
                .turning_points
                .windows(2)
                .all(|w| w[0].kind != w[1].kind)
        );
        assert_eq!(
            analysis.turning_points.last().map(|p| p.kind),
            Some(TurningPointKind::Trough)
        );
        assert_eq!(analysis.current_phase, CyclePhase::Expansion);
    }

    #[test]
    fn test_unsorted_input_is_ordered_chronologically() {
        let mut series = quarterly(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        series.data.reverse();

        let analysis = CycleAnalyzer::default().analyze(&series);
        assert_eq!(analysis.latest_date.as_deref(), Some("2016-Q2"));
        assert!(analysis.turning_points.is_empty());
        assert_eq!(analysis.current_phase, CyclePhase::Expansion);
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let series = quarterly(&[5.0, 3.0, 4.0, 6.0, 2.0, 7.0, 1.0, 8.0]);
        let analyzer = CycleAnalyzer::default();

        let first = serde_json::to_string(&analyzer.analyze(&series)).unwrap();
        let second = serde_json::to_string(&analyzer.analyze(&series)).unwrap();
        assert_eq!(first, second);
    }
}
