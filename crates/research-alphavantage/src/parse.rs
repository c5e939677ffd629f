//! Alpha Vantage JSON decoding.

use research_core::{
    Cadence, EconomicSeries, PeriodType, ResearchError, Result, SeriesPoint, StatementBundle,
    StatementPeriod,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::PROVIDER_NAME;

/// Economic indicator document.
#[derive(Debug, Deserialize)]
struct IndicatorDocument {
    #[serde(default)]
    name: String,
    #[serde(default)]
    interval: Option<String>,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    data: Vec<SeriesPoint>,
}

/// Parses a document and rejects the error envelopes Alpha Vantage returns
/// with HTTP 200.
fn parse_document(json: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(json)?;

    if let Some(message) = value.get("Error Message").and_then(Value::as_str) {
        return Err(ResearchError::InvalidParameter(message.to_string()));
    }
    // "Note" is the legacy throttling message, "Information" the current one
    if value.get("Note").or_else(|| value.get("Information")).is_some() {
        return Err(ResearchError::RateLimited {
            provider: PROVIDER_NAME.to_string(),
            retry_after: None,
        });
    }

    Ok(value)
}

fn parse_reports(json: &str, period_type: PeriodType) -> Result<Vec<StatementPeriod>> {
    let mut document = parse_document(json)?;
    match document.get_mut(period_type.reports_key()) {
        Some(reports) => Ok(serde_json::from_value(reports.take())?),
        None => {
            debug!(key = period_type.reports_key(), "Statement document has no reports");
            Ok(Vec::new())
        }
    }
}

/// Decodes the three statement documents of a company into a bundle.
///
/// Reports are read from `annualReports` or `quarterlyReports` depending on
/// `period_type`; a document without that key contributes no periods.
/// Each statement keeps at most ten periods, newest first as delivered.
///
/// # Errors
///
/// Returns [`ResearchError::Parse`] for malformed JSON,
/// [`ResearchError::RateLimited`] for throttling notices and
/// [`ResearchError::InvalidParameter`] for API error messages.
pub fn parse_statement_bundle(
    income: &str,
    balance: &str,
    cashflow: &str,
    period_type: PeriodType,
) -> Result<StatementBundle> {
    Ok(StatementBundle::new(
        period_type,
        parse_reports(income, period_type)?,
        parse_reports(balance, period_type)?,
        parse_reports(cashflow, period_type)?,
    ))
}

/// Decodes an economic indicator document.
///
/// # Errors
///
/// Same as [`parse_statement_bundle`], plus [`ResearchError::DataNotAvailable`]
/// when the document carries no observations.
pub fn parse_economic_series(json: &str, cadence: Cadence) -> Result<EconomicSeries> {
    let document: IndicatorDocument = serde_json::from_value(parse_document(json)?)?;

    if document.data.is_empty() {
        return Err(ResearchError::DataNotAvailable(format!(
            "{} has no {cadence} observations",
            if document.name.is_empty() { "indicator" } else { document.name.as_str() }
        )));
    }
    if let Some(interval) = document
        .interval
        .as_deref()
        .filter(|i| !i.eq_ignore_ascii_case(cadence.as_str()))
    {
        debug!(interval, %cadence, "Document interval differs from requested cadence");
    }

    let series = EconomicSeries::new(document.name, cadence, document.data);
    Ok(match document.unit {
        Some(unit) => series.with_unit(unit),
        None => series,
    })
}
