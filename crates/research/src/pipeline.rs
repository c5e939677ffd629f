//! Fetch-then-analyse pipeline over a [`SourceRegistry`].

use std::collections::BTreeSet;

use chrono::NaiveDate;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use research_analytics::{
    MacroAnalyzer, RatioEngine, cost_structure, revenue_drivers, working_capital,
};
use research_core::{
    AnalyticsConfig, Cadence, CostStructure, DerivedRatioSet, EconomicSeries, Indicator,
    MacroSnapshot, PeriodType, ResearchError, Result, RevenueDrivers, Symbol, WorkingCapital,
};

use crate::registry::SourceRegistry;

/// Ratios and statement trends of one company.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompanyReport {
    /// Company ticker.
    pub symbol: Symbol,
    /// Statement cadence the report was built from.
    pub period_type: PeriodType,
    /// Number of income statement periods analysed.
    pub periods: usize,
    /// Derived ratios of the latest period.
    pub ratios: DerivedRatioSet,
    /// Revenue growth history.
    pub revenue: RevenueDrivers,
    /// Cost structure history.
    pub costs: CostStructure,
    /// Working capital history.
    pub working_capital: WorkingCapital,
}

/// Runs the analytics over data fetched from a [`SourceRegistry`].
#[derive(Debug, Clone)]
pub struct ResearchPipeline {
    registry: SourceRegistry,
    ratios: RatioEngine,
    macro_analyzer: MacroAnalyzer,
    max_periods: usize,
}

impl ResearchPipeline {
    /// Creates a pipeline with default analytics settings.
    #[must_use]
    pub fn new(registry: SourceRegistry) -> Self {
        let config = AnalyticsConfig::default();
        Self {
            registry,
            ratios: RatioEngine::new(config.ratios.clone()),
            macro_analyzer: MacroAnalyzer::new(&config),
            max_periods: config.ratios.max_periods,
        }
    }

    /// Creates a pipeline with custom analytics settings.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::InvalidParameter`] if `config` does not
    /// validate.
    pub fn with_config(registry: SourceRegistry, config: &AnalyticsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            registry,
            ratios: RatioEngine::new(config.ratios.clone()),
            macro_analyzer: MacroAnalyzer::new(config),
            max_periods: config.ratios.max_periods,
        })
    }

    /// The registry data is fetched through.
    #[must_use]
    pub const fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Fetches the statements of `symbol` and derives its report.
    #[instrument(skip(self, symbol), fields(symbol = %symbol))]
    pub async fn company_report(
        &self,
        symbol: &Symbol,
        period_type: PeriodType,
    ) -> Result<CompanyReport> {
        let bundle = self
            .registry
            .fetch_statements(symbol, period_type)
            .await?
            .truncated(self.max_periods);

        Ok(CompanyReport {
            symbol: symbol.clone(),
            period_type,
            periods: bundle.income.len(),
            ratios: self.ratios.compute(&bundle),
            revenue: revenue_drivers(&bundle.income),
            costs: cost_structure(&bundle.income),
            working_capital: working_capital(&bundle.balance),
        })
    }

    /// Builds reports for many symbols concurrently.
    ///
    /// Results are returned in the order of `symbols`; one symbol failing
    /// does not affect the others.
    pub async fn company_reports(
        &self,
        symbols: &[Symbol],
        period_type: PeriodType,
    ) -> Vec<(Symbol, Result<CompanyReport>)> {
        let reports = join_all(
            symbols
                .iter()
                .map(|symbol| self.company_report(symbol, period_type)),
        )
        .await;
        symbols.iter().cloned().zip(reports).collect()
    }

    /// Fetches real GDP (annual and quarterly) and `indicators` at their
    /// default cadences, then builds a macro snapshot as of `as_of`.
    ///
    /// Indicators no source has data for are left out of the snapshot.
    ///
    /// # Errors
    ///
    /// Any fetch failure other than [`ResearchError::DataNotAvailable`].
    #[instrument(skip(self, indicators), fields(indicators = indicators.len()))]
    pub async fn macro_report(
        &self,
        indicators: &[Indicator],
        as_of: NaiveDate,
    ) -> Result<MacroSnapshot> {
        let requests: BTreeSet<(Indicator, Cadence)> = [
            (Indicator::RealGdp, Cadence::Annual),
            (Indicator::RealGdp, Cadence::Quarterly),
        ]
        .into_iter()
        .chain(indicators.iter().map(|i| (*i, i.default_cadence())))
        .collect();

        let fetched = join_all(
            requests
                .iter()
                .map(|(indicator, cadence)| self.registry.fetch_indicator(*indicator, *cadence)),
        )
        .await;

        let mut series: Vec<EconomicSeries> = Vec::with_capacity(fetched.len());
        for ((indicator, cadence), result) in requests.into_iter().zip(fetched) {
            match result {
                Ok(s) => series.push(s),
                Err(ResearchError::DataNotAvailable(reason)) => {
                    debug!(%indicator, %cadence, %reason, "Indicator not available");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(self.macro_analyzer.snapshot(&series, as_of))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use research_core::{CyclePhase, StatementPeriod};

    #[cfg(feature = "alphavantage")]
    use research_alphavantage::DocumentSource;

    #[cfg(feature = "alphavantage")]
    const INCOME: &str = r#"{"annualReports": [
        {"fiscalDateEnding": "2023-12-31", "totalRevenue": "1100", "costOfGoodsSold": "600",
         "ebit": "200", "interestExpense": "20", "netIncome": "120"},
        {"fiscalDateEnding": "2022-12-31", "totalRevenue": "1000", "costOfGoodsSold": "650"}
    ]}"#;
    #[cfg(feature = "alphavantage")]
    const BALANCE: &str = r#"{"annualReports": [
        {"totalAssets": "2000", "totalCurrentAssets": "800", "totalCurrentLiabilities": "400",
         "totalLiabilities": "1000", "totalShareholderEquity": "1000"},
        {"totalAssets": "1900", "totalCurrentAssets": "700", "totalCurrentLiabilities": "400"}
    ]}"#;
    #[cfg(feature = "alphavantage")]
    const CASHFLOW: &str = r#"{"annualReports": [
        {"operatingCashflow": "300", "capitalExpenditures": "-50"}
    ]}"#;

    #[cfg(feature = "alphavantage")]
    fn gdp_document() -> String {
        let data: Vec<String> = (0..8)
            .map(|i| {
                let year = 2023 - i / 4;
                let month = 10 - (i % 4) * 3;
                format!(
                    r#"{{"date": "{year}-{month:02}-01", "value": "{}"}}"#,
                    110 - i
                )
            })
            .collect();
        format!(
            r#"{{"name": "Real Gross Domestic Product", "interval": "quarterly", "unit": "billions", "data": [{}]}}"#,
            data.join(",")
        )
    }

    #[cfg(feature = "alphavantage")]
    fn pipeline() -> ResearchPipeline {
        let documents = DocumentSource::new()
            .with_statements(Symbol::new("IBM"), INCOME, BALANCE, CASHFLOW)
            .with_indicator(Indicator::RealGdp, Cadence::Quarterly, gdp_document());
        ResearchPipeline::new(SourceRegistry::new().with_documents(documents))
    }

    #[cfg(feature = "alphavantage")]
    #[tokio::test]
    async fn test_company_report() {
        let report = pipeline()
            .company_report(&Symbol::new("IBM"), PeriodType::Annual)
            .await
            .unwrap();

        assert_eq!(report.periods, 2);
        assert_eq!(report.ratios.free_cash_flow, Some(vec![250.0]));
        assert_eq!(report.ratios.revenue_growth_yoy, Some(10.0));
        assert_eq!(report.ratios.interest_coverage, Some(10.0));
        assert_eq!(report.revenue.growth_rates.len(), 1);
        assert_eq!(report.costs.periods_analyzed, 2);
        assert_eq!(report.working_capital.periods_analyzed, 2);
    }

    #[cfg(feature = "alphavantage")]
    #[tokio::test]
    async fn test_company_reports_keep_order_and_isolate_failures() {
        let symbols = [Symbol::new("MSFT"), Symbol::new("IBM")];
        let reports = pipeline()
            .company_reports(&symbols, PeriodType::Annual)
            .await;

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].0, Symbol::new("MSFT"));
        assert!(matches!(reports[0].1, Err(ResearchError::SymbolNotFound(_))));
        assert!(reports[1].1.is_ok());
    }

    #[cfg(feature = "alphavantage")]
    #[tokio::test]
    async fn test_macro_report() {
        let as_of = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let snapshot = pipeline()
            .macro_report(&[Indicator::UnemploymentRate], as_of)
            .await
            .unwrap();

        assert_eq!(snapshot.as_of, as_of);
        assert!(snapshot.real_gdp_growth_annual.is_empty());
        assert_eq!(
            snapshot.real_gdp_growth_quarterly.get("2023-10-01"),
            Some(&0.92)
        );
        assert_eq!(snapshot.cycle.current_phase, CyclePhase::Expansion);
        assert_eq!(snapshot.latest_values.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_registry_fails() {
        let pipeline = ResearchPipeline::new(SourceRegistry::new());
        let result = pipeline
            .company_report(&Symbol::new("IBM"), PeriodType::Annual)
            .await;
        assert!(matches!(result, Err(ResearchError::ProviderNotConfigured(_))));

        let as_of = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let result = pipeline.macro_report(&[], as_of).await;
        assert!(matches!(result, Err(ResearchError::ProviderNotConfigured(_))));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = AnalyticsConfig::default();
        config.ratios.max_periods = 0;
        let result = ResearchPipeline::with_config(SourceRegistry::new(), &config);
        assert!(matches!(result, Err(ResearchError::InvalidParameter(_))));
    }

    #[test]
    fn test_report_serializes() {
        let report = CompanyReport {
            symbol: Symbol::new("ibm"),
            period_type: PeriodType::Annual,
            periods: 0,
            ratios: DerivedRatioSet::default(),
            revenue: revenue_drivers(&[]),
            costs: cost_structure(&[StatementPeriod::default()]),
            working_capital: working_capital(&[]),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["symbol"], "IBM");
        assert_eq!(json["revenue"]["trend"], "insufficient_data");
    }
}
