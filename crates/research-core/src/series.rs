//! Economic indicator series types.
//!
//! - [`SeriesPoint`] - One dated observation, value kept as the vendor string
//! - [`EconomicSeries`] - A named indicator with its cadence
//! - [`RetainedSeries`] - A series after retention filtering
//! - [`Indicator`] - Catalog of macro indicators used by the research pipeline

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cadence::{Cadence, PeriodWindow};
use crate::numeric::parse_lenient;

/// One dated observation of an economic series.
///
/// Dates are `YYYY-MM-DD` or fiscal-quarter `YYYY-Qn`; values are numeric
/// strings exactly as delivered.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Observation date.
    pub date: String,
    /// Observation value as a numeric string.
    pub value: String,
}

impl SeriesPoint {
    /// Creates a new observation.
    #[must_use]
    pub fn new(date: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            value: value.into(),
        }
    }

    /// Returns the value as a number, or `None` if it is blank or unparseable.
    #[must_use]
    pub fn parsed_value(&self) -> Option<f64> {
        parse_lenient(&self.value)
    }
}

/// A named macro indicator series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EconomicSeries {
    /// Indicator name (e.g. "Real Gross Domestic Product").
    pub name: String,
    /// Reporting cadence.
    pub cadence: Cadence,
    /// Catalog indicator this series measures, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indicator: Option<Indicator>,
    /// Unit of the values, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Observations in source order.
    pub data: Vec<SeriesPoint>,
}

impl EconomicSeries {
    /// Creates a new series.
    #[must_use]
    pub fn new(name: impl Into<String>, cadence: Cadence, data: Vec<SeriesPoint>) -> Self {
        Self {
            name: name.into(),
            cadence,
            indicator: None,
            unit: None,
            data,
        }
    }

    /// Creates a series for a catalog indicator, named after its label.
    #[must_use]
    pub fn for_indicator(indicator: Indicator, cadence: Cadence, data: Vec<SeriesPoint>) -> Self {
        Self {
            indicator: Some(indicator),
            ..Self::new(indicator.label(), cadence, data)
        }
    }

    /// Returns true if this series measures `indicator`, either by tag or by
    /// carrying the indicator's label as its name.
    #[must_use]
    pub fn measures(&self, indicator: Indicator) -> bool {
        match self.indicator {
            Some(tagged) => tagged == indicator,
            None => self.name.eq_ignore_ascii_case(indicator.label()),
        }
    }

    /// Sets the unit of the series.
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Returns the number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if there are no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A series filtered to its cadence's retention window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RetainedSeries {
    /// The retained observations.
    pub series: EconomicSeries,
    /// Window that was applied.
    pub window: PeriodWindow,
    /// Earliest date kept.
    pub cutoff: NaiveDate,
    /// Number of source points dropped as too old.
    pub dropped: usize,
    /// True when the quarterly minimum forced a backfill from unfiltered data.
    pub backfilled: bool,
}

/// Macro indicators consumed by the research pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    /// Real gross domestic product.
    RealGdp,
    /// Real GDP per capita.
    RealGdpPerCapita,
    /// Effective federal funds rate.
    FederalFundsRate,
    /// Consumer price index.
    Cpi,
    /// Annual inflation rate.
    Inflation,
    /// Advance retail sales.
    RetailSales,
    /// Durable goods orders.
    DurableGoods,
    /// Unemployment rate.
    UnemploymentRate,
    /// Total nonfarm payroll.
    NonfarmPayroll,
    /// 3-month treasury yield.
    TreasuryYield3Month,
    /// 2-year treasury yield.
    TreasuryYield2Year,
    /// 5-year treasury yield.
    TreasuryYield5Year,
    /// 7-year treasury yield.
    TreasuryYield7Year,
    /// 10-year treasury yield.
    TreasuryYield10Year,
    /// 30-year treasury yield.
    TreasuryYield30Year,
}

impl Indicator {
    /// Every indicator in the catalog.
    pub const ALL: [Self; 15] = [
        Self::RealGdp,
        Self::RealGdpPerCapita,
        Self::FederalFundsRate,
        Self::Cpi,
        Self::Inflation,
        Self::RetailSales,
        Self::DurableGoods,
        Self::UnemploymentRate,
        Self::NonfarmPayroll,
        Self::TreasuryYield3Month,
        Self::TreasuryYield2Year,
        Self::TreasuryYield5Year,
        Self::TreasuryYield7Year,
        Self::TreasuryYield10Year,
        Self::TreasuryYield30Year,
    ];

    /// Vendor function code for this indicator.
    #[must_use]
    pub const fn function(&self) -> &'static str {
        match self {
            Self::RealGdp => "REAL_GDP",
            Self::RealGdpPerCapita => "REAL_GDP_PER_CAPITA",
            Self::FederalFundsRate => "FEDERAL_FUNDS_RATE",
            Self::Cpi => "CPI",
            Self::Inflation => "INFLATION",
            Self::RetailSales => "RETAIL_SALES",
            Self::DurableGoods => "DURABLES",
            Self::UnemploymentRate => "UNEMPLOYMENT",
            Self::NonfarmPayroll => "NONFARM_PAYROLL",
            Self::TreasuryYield3Month
            | Self::TreasuryYield2Year
            | Self::TreasuryYield5Year
            | Self::TreasuryYield7Year
            | Self::TreasuryYield10Year
            | Self::TreasuryYield30Year => "TREASURY_YIELD",
        }
    }

    /// Treasury maturity parameter, for yield indicators.
    #[must_use]
    pub const fn maturity(&self) -> Option<&'static str> {
        match self {
            Self::TreasuryYield3Month => Some("3month"),
            Self::TreasuryYield2Year => Some("2year"),
            Self::TreasuryYield5Year => Some("5year"),
            Self::TreasuryYield7Year => Some("7year"),
            Self::TreasuryYield10Year => Some("10year"),
            Self::TreasuryYield30Year => Some("30year"),
            _ => None,
        }
    }

    /// Cadence the research pipeline requests by default.
    #[must_use]
    pub const fn default_cadence(&self) -> Cadence {
        match self {
            Self::RealGdp | Self::RealGdpPerCapita => Cadence::Quarterly,
            Self::Inflation => Cadence::Annual,
            Self::Cpi
            | Self::RetailSales
            | Self::DurableGoods
            | Self::UnemploymentRate
            | Self::NonfarmPayroll => Cadence::Monthly,
            Self::FederalFundsRate
            | Self::TreasuryYield3Month
            | Self::TreasuryYield2Year
            | Self::TreasuryYield5Year
            | Self::TreasuryYield7Year
            | Self::TreasuryYield10Year
            | Self::TreasuryYield30Year => Cadence::Daily,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::RealGdp => "Real Gross Domestic Product",
            Self::RealGdpPerCapita => "Real GDP per Capita",
            Self::FederalFundsRate => "Effective Federal Funds Rate",
            Self::Cpi => "Consumer Price Index",
            Self::Inflation => "Inflation",
            Self::RetailSales => "Advance Retail Sales",
            Self::DurableGoods => "Durable Goods Orders",
            Self::UnemploymentRate => "Unemployment Rate",
            Self::NonfarmPayroll => "Total Nonfarm Payroll",
            Self::TreasuryYield3Month => "3-Month Treasury Yield",
            Self::TreasuryYield2Year => "2-Year Treasury Yield",
            Self::TreasuryYield5Year => "5-Year Treasury Yield",
            Self::TreasuryYield7Year => "7-Year Treasury Yield",
            Self::TreasuryYield10Year => "10-Year Treasury Yield",
            Self::TreasuryYield30Year => "30-Year Treasury Yield",
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsed_value() {
        assert_eq!(SeriesPoint::new("2024-01-01", "4.33").parsed_value(), Some(4.33));
        assert_eq!(SeriesPoint::new("2024-01-01", ".").parsed_value(), None);
    }

    #[test]
    fn test_series_measures_indicator() {
        let tagged = EconomicSeries::for_indicator(Indicator::RealGdp, Cadence::Annual, Vec::new());
        assert!(tagged.measures(Indicator::RealGdp));
        assert_eq!(tagged.name, "Real Gross Domestic Product");

        let named = EconomicSeries::new("real gross domestic product", Cadence::Quarterly, Vec::new());
        assert!(named.measures(Indicator::RealGdp));
        assert!(!named.measures(Indicator::Cpi));
    }

    #[test]
    fn test_indicator_catalog() {
        assert_eq!(Indicator::RealGdp.function(), "REAL_GDP");
        assert_eq!(Indicator::RealGdp.default_cadence(), Cadence::Quarterly);
        assert_eq!(Indicator::TreasuryYield10Year.maturity(), Some("10year"));
        assert_eq!(Indicator::Cpi.maturity(), None);
        assert!(
            Indicator::ALL
                .iter()
                .filter(|i| i.function() == "TREASURY_YIELD")
                .all(|i| i.maturity().is_some())
        );
    }
}
