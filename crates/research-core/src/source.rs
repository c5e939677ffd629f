//! Collaborator traits for fetching raw research data.
//!
//! The analytics never fetch anything themselves. Whatever talks to the
//! market-data vendor (or a cache in front of it) implements these traits and
//! hands already-fetched batches to the analytics:
//!
//! - [`DataSource`] - Base trait with provider metadata
//! - [`StatementSource`] - Income, balance sheet and cash flow statements
//! - [`IndicatorSource`] - Macro indicator series

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    cadence::Cadence,
    error::Result,
    series::{EconomicSeries, Indicator},
    statement::StatementBundle,
    types::{PeriodType, Symbol},
};

/// Base trait for all data sources.
pub trait DataSource: Send + Sync + Debug {
    /// Returns the name of this source (e.g., "Alpha Vantage").
    fn name(&self) -> &str;

    /// Returns a description of this source.
    fn description(&self) -> &str;

    /// Returns the indicator cadences this source can deliver.
    fn supported_cadences(&self) -> &[Cadence];
}

/// Source of financial statements.
#[async_trait]
pub trait StatementSource: DataSource {
    /// Fetches the aligned statements for a symbol, newest period first.
    async fn fetch_statements(
        &self,
        symbol: &Symbol,
        period_type: PeriodType,
    ) -> Result<StatementBundle>;
}

/// Source of macro indicator series.
#[async_trait]
pub trait IndicatorSource: DataSource {
    /// Fetches an indicator at the requested cadence.
    async fn fetch_indicator(
        &self,
        indicator: Indicator,
        cadence: Cadence,
    ) -> Result<EconomicSeries>;

    /// Fetches several indicators at their default cadences.
    ///
    /// Default implementation calls `fetch_indicator` sequentially and skips
    /// indicators the source has no data for. Sources can override with a
    /// batched implementation.
    async fn fetch_indicators(&self, indicators: &[Indicator]) -> Result<Vec<EconomicSeries>> {
        let mut series = Vec::with_capacity(indicators.len());

        for indicator in indicators {
            match self
                .fetch_indicator(*indicator, indicator.default_cadence())
                .await
            {
                Ok(s) => series.push(s),
                Err(crate::error::ResearchError::DataNotAvailable(_)) => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(series)
    }
}
