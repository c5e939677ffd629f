//! Source registry for managing multiple data sources with fallback behavior.

use std::sync::Arc;

use tracing::{debug, warn};

use research_core::{
    Cadence, EconomicSeries, Indicator, IndicatorSource, PeriodType, ResearchError, Result,
    StatementBundle, StatementSource, Symbol,
};

/// Registry of statement and indicator sources with automatic fallback.
///
/// Sources are tried in registration order until one succeeds. Indicator
/// sources that do not list the requested cadence are skipped.
///
/// # Example
///
/// ```rust,ignore
/// use research::{DocumentSource, PeriodType, SourceRegistry, Symbol};
///
/// let registry = SourceRegistry::new().with_documents(documents);
/// let bundle = registry
///     .fetch_statements(&Symbol::new("IBM"), PeriodType::Annual)
///     .await?;
/// ```
#[derive(Default, Clone)]
pub struct SourceRegistry {
    statement_sources: Vec<Arc<dyn StatementSource>>,
    indicator_sources: Vec<Arc<dyn IndicatorSource>>,
}

impl std::fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceRegistry")
            .field(
                "statement_sources",
                &self
                    .statement_sources
                    .iter()
                    .map(|s| s.name())
                    .collect::<Vec<_>>(),
            )
            .field(
                "indicator_sources",
                &self
                    .indicator_sources
                    .iter()
                    .map(|s| s.name())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl SourceRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a statement source.
    pub fn register_statements(&mut self, source: Arc<dyn StatementSource>) {
        debug!(source = source.name(), "Registering statement source");
        self.statement_sources.push(source);
    }

    /// Register an indicator source.
    pub fn register_indicators(&mut self, source: Arc<dyn IndicatorSource>) {
        debug!(source = source.name(), "Registering indicator source");
        self.indicator_sources.push(source);
    }

    /// Fetch financial statements, trying sources in order until one succeeds.
    pub async fn fetch_statements(
        &self,
        symbol: &Symbol,
        period_type: PeriodType,
    ) -> Result<StatementBundle> {
        if self.statement_sources.is_empty() {
            return Err(ResearchError::ProviderNotConfigured(
                "No statement sources registered".to_string(),
            ));
        }

        let mut last_error = None;
        for source in &self.statement_sources {
            debug!(
                source = source.name(),
                symbol = %symbol,
                "Fetching statements"
            );

            match source.fetch_statements(symbol, period_type).await {
                Ok(bundle) => return Ok(bundle),
                Err(e) => {
                    warn!(
                        source = source.name(),
                        error = %e,
                        "Source failed, trying next"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ResearchError::Other("All sources failed with no error".to_string())
        }))
    }

    /// Fetch an indicator series, trying sources that support `cadence` in
    /// order until one succeeds.
    pub async fn fetch_indicator(
        &self,
        indicator: Indicator,
        cadence: Cadence,
    ) -> Result<EconomicSeries> {
        let mut candidates = self
            .indicator_sources
            .iter()
            .filter(|s| s.supported_cadences().contains(&cadence))
            .peekable();
        if candidates.peek().is_none() {
            return Err(ResearchError::ProviderNotConfigured(format!(
                "No indicator sources registered for {cadence} data"
            )));
        }

        let mut last_error = None;
        for source in candidates {
            debug!(
                source = source.name(),
                %indicator,
                %cadence,
                "Fetching indicator"
            );

            match source.fetch_indicator(indicator, cadence).await {
                Ok(series) => return Ok(series),
                Err(e) => {
                    warn!(
                        source = source.name(),
                        error = %e,
                        "Source failed, trying next"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ResearchError::Other("All sources failed with no error".to_string())
        }))
    }

    /// Add stored Alpha Vantage documents as both a statement and an
    /// indicator source.
    #[cfg(feature = "alphavantage")]
    #[must_use]
    pub fn with_documents(mut self, documents: research_alphavantage::DocumentSource) -> Self {
        let source = Arc::new(documents);
        self.register_statements(source.clone());
        self.register_indicators(source);
        self
    }
}
