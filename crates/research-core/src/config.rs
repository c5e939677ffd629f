//! Analytics configuration.
//!
//! [`AnalyticsConfig`] groups the tunable constants of the analytics
//! components. Every section implements [`Default`] with the values the
//! research pipeline uses, and the whole structure can be loaded from JSON
//! where any omitted field falls back to its default.

use serde::{Deserialize, Serialize};

use crate::cadence::{Cadence, PeriodWindow};
use crate::error::{ResearchError, Result};

/// Top-level analytics configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Retention windows per cadence.
    pub retention: RetentionConfig,
    /// Ratio engine settings.
    pub ratios: RatioConfig,
    /// Cycle analysis settings.
    pub cycle: CycleConfig,
}

impl AnalyticsConfig {
    /// Parses a configuration from JSON and validates it.
    ///
    /// # Example
    ///
    /// ```
    /// use research_core::AnalyticsConfig;
    ///
    /// let config = AnalyticsConfig::from_json(r#"{"cycle": {"min_points": 6}}"#).unwrap();
    /// assert_eq!(config.cycle.min_points, 6);
    /// assert_eq!(config.cycle.max_look_range, 2);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every setting is usable.
    pub fn validate(&self) -> Result<()> {
        self.retention.validate()?;
        self.ratios.validate()?;
        self.cycle.validate()
    }
}

/// Retention windows per cadence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionConfig {
    /// Window for annual series.
    pub annual: PeriodWindow,
    /// Window for quarterly series.
    pub quarterly: PeriodWindow,
    /// Window for monthly series.
    pub monthly: PeriodWindow,
    /// Window for daily series.
    pub daily: PeriodWindow,
    /// Minimum quarterly points; fewer triggers a backfill from unfiltered data.
    pub quarterly_min_points: usize,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            annual: PeriodWindow::for_cadence(Cadence::Annual),
            quarterly: PeriodWindow::for_cadence(Cadence::Quarterly),
            monthly: PeriodWindow::for_cadence(Cadence::Monthly),
            daily: PeriodWindow::for_cadence(Cadence::Daily),
            quarterly_min_points: 6,
        }
    }
}

impl RetentionConfig {
    /// Window configured for a cadence.
    #[must_use]
    pub const fn window(&self, cadence: Cadence) -> PeriodWindow {
        match cadence {
            Cadence::Annual => self.annual,
            Cadence::Quarterly => self.quarterly,
            Cadence::Monthly => self.monthly,
            Cadence::Daily => self.daily,
        }
    }

    fn validate(&self) -> Result<()> {
        for cadence in Cadence::ALL {
            if self.window(cadence).months == 0 {
                return Err(ResearchError::InvalidParameter(format!(
                    "retention window for {cadence} series must be at least one month"
                )));
            }
        }
        Ok(())
    }
}

/// Ratio engine settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatioConfig {
    /// Maximum statement periods considered per sequence.
    pub max_periods: usize,
    /// Day count used for the cash conversion cycle.
    pub days_per_year: f64,
}

impl Default for RatioConfig {
    fn default() -> Self {
        Self {
            max_periods: crate::statement::MAX_STATEMENT_PERIODS,
            days_per_year: 365.0,
        }
    }
}

impl RatioConfig {
    fn validate(&self) -> Result<()> {
        if self.max_periods == 0 {
            return Err(ResearchError::InvalidParameter(
                "ratios.max_periods must be positive".to_string(),
            ));
        }
        if !(self.days_per_year.is_finite() && self.days_per_year > 0.0) {
            return Err(ResearchError::InvalidParameter(format!(
                "ratios.days_per_year must be positive, got {}",
                self.days_per_year
            )));
        }
        Ok(())
    }
}

/// Cycle analysis settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleConfig {
    /// Minimum observations (and minimum numeric observations) to run at all.
    pub min_points: usize,
    /// Upper bound of the adaptive moving-average window.
    pub max_smoothing_window: usize,
    /// Upper bound of the adaptive turning-point comparison range.
    pub max_look_range: usize,
    /// Minimum index gap between consecutive kept turning points.
    pub min_separation: usize,
    /// Latest value above `trough * threshold` means expansion.
    pub expansion_threshold: f64,
    /// Latest value below `peak * threshold` means downturn.
    pub downturn_threshold: f64,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            min_points: 4,
            max_smoothing_window: 3,
            max_look_range: 2,
            min_separation: 1,
            expansion_threshold: 1.01,
            downturn_threshold: 0.99,
        }
    }
}

impl CycleConfig {
    fn validate(&self) -> Result<()> {
        if self.max_smoothing_window == 0 || self.max_look_range == 0 {
            return Err(ResearchError::InvalidParameter(
                "cycle smoothing window and look range must be positive".to_string(),
            ));
        }
        if !(self.expansion_threshold.is_finite() && self.downturn_threshold.is_finite()) {
            return Err(ResearchError::InvalidParameter(
                "cycle phase thresholds must be finite".to_string(),
            ));
        }
        Ok(())
    }
}
