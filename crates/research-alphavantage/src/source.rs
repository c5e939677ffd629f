//! In-memory document source.

use async_trait::async_trait;
use research_core::{
    Cadence, DataSource, EconomicSeries, Indicator, IndicatorSource, PeriodType, ResearchError,
    Result, StatementBundle, StatementSource, Symbol,
};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

use crate::PROVIDER_NAME;
use crate::parse::{parse_economic_series, parse_statement_bundle};

/// Economic indicators are published at these intervals.
const SUPPORTED_CADENCES: &[Cadence] = &[
    Cadence::Annual,
    Cadence::Quarterly,
    Cadence::Monthly,
    Cadence::Daily,
];

/// Raw statement documents of one company.
#[derive(Clone)]
struct StatementDocuments {
    income: String,
    balance: String,
    cashflow: String,
}

/// Serves stored Alpha Vantage documents.
///
/// Documents are decoded on every fetch, so the same source can answer
/// annual and quarterly statement requests from one set of documents.
#[derive(Clone, Default)]
pub struct DocumentSource {
    statements: HashMap<Symbol, StatementDocuments>,
    indicators: HashMap<(Indicator, Cadence), String>,
}

impl fmt::Debug for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentSource")
            .field("symbols", &self.statements.len())
            .field("indicators", &self.indicators.len())
            .finish()
    }
}

impl DocumentSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the income statement, balance sheet and cash flow documents of
    /// `symbol`.
    #[must_use]
    pub fn with_statements(
        mut self,
        symbol: Symbol,
        income: impl Into<String>,
        balance: impl Into<String>,
        cashflow: impl Into<String>,
    ) -> Self {
        self.statements.insert(
            symbol,
            StatementDocuments {
                income: income.into(),
                balance: balance.into(),
                cashflow: cashflow.into(),
            },
        );
        self
    }

    /// Adds the document of `indicator` at `cadence`.
    #[must_use]
    pub fn with_indicator(
        mut self,
        indicator: Indicator,
        cadence: Cadence,
        json: impl Into<String>,
    ) -> Self {
        self.indicators.insert((indicator, cadence), json.into());
        self
    }
}

impl DataSource for DocumentSource {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn description(&self) -> &str {
        "Alpha Vantage statement and economic indicator documents"
    }

    fn supported_cadences(&self) -> &[Cadence] {
        SUPPORTED_CADENCES
    }
}

#[async_trait]
impl StatementSource for DocumentSource {
    async fn fetch_statements(
        &self,
        symbol: &Symbol,
        period_type: PeriodType,
    ) -> Result<StatementBundle> {
        let docs = self
            .statements
            .get(symbol)
            .ok_or_else(|| ResearchError::SymbolNotFound(symbol.to_string()))?;
        debug!(%symbol, ?period_type, "Decoding statement documents");

        parse_statement_bundle(&docs.income, &docs.balance, &docs.cashflow, period_type)
    }
}

#[async_trait]
impl IndicatorSource for DocumentSource {
    async fn fetch_indicator(
        &self,
        indicator: Indicator,
        cadence: Cadence,
    ) -> Result<EconomicSeries> {
        let json = self.indicators.get(&(indicator, cadence)).ok_or_else(|| {
            ResearchError::DataNotAvailable(format!("{indicator} at {cadence} cadence"))
        })?;
        debug!(%indicator, %cadence, "Decoding indicator document");

        let mut series = parse_economic_series(json, cadence)?;
        series.indicator = Some(indicator);
        Ok(series)
    }
}
