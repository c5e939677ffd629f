//! Cross-indicator macro snapshot.

use chrono::NaiveDate;
use research_core::{
    AnalyticsConfig, Cadence, CyclePhaseAnalysis, EconomicSeries, Indicator, LatestValue,
    MacroSnapshot,
};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

use crate::cycle::CycleAnalyzer;
use crate::dates::chronological_key;
use crate::growth::latest_growth;
use crate::retention::RetentionFilter;

const NO_QUARTERLY_GDP: &str = "No quarterly real GDP series available";

/// Builds [`MacroSnapshot`]s from a set of indicator series.
///
/// Every series is first cut to its retention window. GDP growth and the
/// cycle analysis are computed on the retained real GDP series.
#[derive(Clone, Debug, Default)]
pub struct MacroAnalyzer {
    retention: RetentionFilter,
    cycle: CycleAnalyzer,
}

impl MacroAnalyzer {
    /// Creates an analyzer from configuration.
    #[must_use]
    pub fn new(config: &AnalyticsConfig) -> Self {
        Self {
            retention: RetentionFilter::new(config.retention.clone()),
            cycle: CycleAnalyzer::new(&config.cycle),
        }
    }

    /// Retention filter applied to every series.
    #[must_use]
    pub const fn retention(&self) -> &RetentionFilter {
        &self.retention
    }

    /// Builds a snapshot as of `as_of`.
    ///
    /// When several series measure real GDP at the same cadence, the first
    /// one is used.
    #[instrument(skip(self, series), fields(series = series.len()))]
    pub fn snapshot(&self, series: &[EconomicSeries], as_of: NaiveDate) -> MacroSnapshot {
        let retained: Vec<EconomicSeries> = series
            .iter()
            .map(|s| self.retention.retain(s, as_of).series)
            .collect();

        let real_gdp = |cadence: Cadence| {
            retained
                .iter()
                .find(|s| s.cadence == cadence && s.measures(Indicator::RealGdp))
        };

        let latest_values = retained
            .iter()
            .filter_map(|s| Some((format!("{} ({})", s.name, s.cadence), latest_value(s)?)))
            .collect();

        let cycle = match real_gdp(Cadence::Quarterly) {
            Some(gdp) => self.cycle.analyze(gdp),
            None => {
                debug!("No quarterly real GDP series, skipping cycle analysis");
                CyclePhaseAnalysis::insufficient(NO_QUARTERLY_GDP, 0)
            }
        };

        MacroSnapshot {
            as_of,
            real_gdp_growth_annual: real_gdp(Cadence::Annual)
                .map(|s| latest_growth(&s.data))
                .unwrap_or_default(),
            real_gdp_growth_quarterly: real_gdp(Cadence::Quarterly)
                .map(|s| latest_growth(&s.data))
                .unwrap_or_default(),
            latest_values,
            cycle,
        }
    }
}

/// Newest observation with a numeric value.
fn latest_value(series: &EconomicSeries) -> Option<LatestValue> {
    series
        .data
        .iter()
        .filter_map(|p| Some((p, p.parsed_value()?)))
        .max_by(|(a, _), (b, _)| chronological_key(&a.date).cmp(&chronological_key(&b.date)))
        .map(|(p, value)| LatestValue {
            date: p.date.clone(),
            value,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use research_core::{CyclePhase, SeriesPoint};

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    fn quarterly_gdp(values: &[f64]) -> EconomicSeries {
        let data = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let year = 2021 + i / 4;
                let quarter = i % 4 + 1;
                SeriesPoint::new(format!("{year}-Q{quarter}"), v.to_string())
            })
            .collect();
        EconomicSeries::for_indicator(Indicator::RealGdp, Cadence::Quarterly, data)
    }

    #[test]
    fn test_snapshot_without_gdp() {
        let unemployment = EconomicSeries::for_indicator(
            Indicator::UnemploymentRate,
            Cadence::Monthly,
            vec![
                SeriesPoint::new("2024-05-01", "4.0"),
                SeriesPoint::new("2024-04-01", "3.9"),
                SeriesPoint::new("2010-01-01", "9.8"),
            ],
        );

        let snapshot = MacroAnalyzer::default().snapshot(&[unemployment.clone()], as_of());
        assert!(snapshot.real_gdp_growth_annual.is_empty());
        assert!(snapshot.real_gdp_growth_quarterly.is_empty());
        assert_eq!(snapshot.cycle.current_phase, CyclePhase::InsufficientData);
        assert_eq!(snapshot.cycle.error.as_deref(), Some(NO_QUARTERLY_GDP));

        let key = format!("{} (monthly)", unemployment.name);
        assert_eq!(
            snapshot.latest_values.get(&key),
            Some(&LatestValue {
                date: "2024-05-01".to_string(),
                value: 4.0,
            })
        );
    }

    #[test]
    fn test_snapshot_with_gdp() {
        let quarterly = quarterly_gdp(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0, 106.0, 108.0]);
        let annual = EconomicSeries::for_indicator(
            Indicator::RealGdp,
            Cadence::Annual,
            vec![
                SeriesPoint::new("2022-01-01", "200"),
                SeriesPoint::new("2023-01-01", "210"),
            ],
        );

        let snapshot = MacroAnalyzer::default().snapshot(&[annual, quarterly], as_of());
        assert_eq!(snapshot.real_gdp_growth_annual.get("2023-01-01"), Some(&5.0));
        assert_eq!(snapshot.real_gdp_growth_quarterly.get("2022-Q4"), Some(&1.89));
        assert_eq!(snapshot.cycle.current_phase, CyclePhase::Expansion);
        assert_eq!(snapshot.cycle.latest_date.as_deref(), Some("2022-Q4"));
        assert_eq!(snapshot.latest_values.len(), 2);
    }

    #[test]
    fn test_latest_value_skips_non_numeric() {
        let series = EconomicSeries::new(
            "Fed Funds",
            Cadence::Daily,
            vec![
                SeriesPoint::new("2024-06-27", "5.33"),
                SeriesPoint::new("2024-06-28", "."),
            ],
        );
        let latest = latest_value(&series).unwrap();
        assert_eq!(latest.date, "2024-06-27");
        assert!(latest_value(&EconomicSeries::new("empty", Cadence::Daily, vec![])).is_none());
    }

    #[test]
    fn test_snapshot_is_idempotent() {
        let analyzer = MacroAnalyzer::default();
        let series = [quarterly_gdp(&[100.0, 99.0, 98.0, 99.0, 101.0, 103.0])];
        let first = serde_json::to_vec(&analyzer.snapshot(&series, as_of())).unwrap();
        let second = serde_json::to_vec(&analyzer.snapshot(&series, as_of())).unwrap();
        assert_eq!(first, second);
    }
}
