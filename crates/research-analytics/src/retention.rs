//! Retention filtering.
//!
//! Drops observations older than the retention window of their series'
//! cadence. Filtering is fail-open: an observation whose date cannot be
//! parsed is kept rather than silently lost.

use chrono::NaiveDate;
use research_core::{Cadence, EconomicSeries, RetainedSeries, RetentionConfig};
use tracing::{debug, instrument};

use crate::dates::parse_date;

/// Filters series to their cadence's retention window.
#[derive(Clone, Debug, Default)]
pub struct RetentionFilter {
    config: RetentionConfig,
}

impl RetentionFilter {
    /// Creates a filter with the given windows.
    #[must_use]
    pub const fn new(config: RetentionConfig) -> Self {
        Self { config }
    }

    /// Returns the configured windows.
    #[must_use]
    pub const fn config(&self) -> &RetentionConfig {
        &self.config
    }

    /// Keeps the observations dated on or after the window cutoff relative
    /// to `as_of`.
    ///
    /// Unparseable dates are kept. For quarterly series, if fewer than
    /// `quarterly_min_points` observations survive, the result is instead the
    /// most recent `quarterly_min_points` observations of the unfiltered
    /// series, newest first by raw date string.
    #[instrument(skip(self, series), fields(series = %series.name, cadence = %series.cadence))]
    pub fn retain(&self, series: &EconomicSeries, as_of: NaiveDate) -> RetainedSeries {
        let window = self.config.window(series.cadence);
        let cutoff = window.cutoff(as_of);

        let mut kept = Vec::with_capacity(series.len());
        for point in &series.data {
            match parse_date(&point.date, series.cadence) {
                Ok(date) if date < cutoff => {}
                Ok(_) => kept.push(point.clone()),
                Err(e) => {
                    debug!(date = %point.date, error = %e, "Keeping point with unparseable date");
                    kept.push(point.clone());
                }
            }
        }

        let min_points = self.config.quarterly_min_points;
        let backfilled = series.cadence == Cadence::Quarterly && kept.len() < min_points;
        if backfilled {
            debug!(
                retained = kept.len(),
                min_points, "Backfilling quarterly series from unfiltered data"
            );
            // raw string order; mixed date formats can misorder here
            let mut recent = series.data.clone();
            recent.sort_by(|a, b| b.date.cmp(&a.date));
            recent.truncate(min_points);
            kept = recent;
        }

        let dropped = series.len().saturating_sub(kept.len());
        debug!(kept = kept.len(), dropped, %cutoff, "Applied retention window");

        RetainedSeries {
            series: EconomicSeries {
                data: kept,
                ..series.clone()
            },
            window,
            cutoff,
            dropped,
            backfilled,
        }
    }
}
