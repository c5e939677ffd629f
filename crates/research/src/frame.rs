//! Conversion of analytics inputs and outputs to polars `DataFrame`s.
//!
//! Dates are exported as polars `Date` columns; observations whose date
//! cannot be parsed get a null date but keep their raw string in
//! `raw_date`.

use chrono::{Datelike, NaiveDate};
use polars::prelude::*;

use research_analytics::parse_date;
use research_core::{
    CyclePhaseAnalysis, DerivedRatioSet, EconomicSeries, ResearchError, Result, Symbol,
};

/// Days from 0001-01-01 to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

fn epoch_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

fn date_column(name: &str, days: Vec<Option<i32>>) -> Result<Column> {
    Column::new(name.into(), days)
        .cast(&DataType::Date)
        .map_err(|e| ResearchError::Other(e.to_string()))
}

/// One row per observation: `date`, `raw_date` and `value`.
///
/// # Errors
///
/// Returns [`ResearchError::Other`] if polars rejects the columns.
pub fn series_frame(series: &EconomicSeries) -> Result<DataFrame> {
    let days: Vec<Option<i32>> = series
        .data
        .iter()
        .map(|p| parse_date(&p.date, series.cadence).ok().map(epoch_days))
        .collect();
    let raw_dates: Vec<&str> = series.data.iter().map(|p| p.date.as_str()).collect();
    let values: Vec<Option<f64>> = series.data.iter().map(|p| p.parsed_value()).collect();

    DataFrame::new(vec![
        date_column("date", days)?,
        Column::new("raw_date".into(), raw_dates),
        Column::new("value".into(), values),
    ])
    .map_err(|e| ResearchError::Other(e.to_string()))
}

/// One row per filtered turning point: `date`, `index`, `value`, `kind`.
///
/// # Errors
///
/// Returns [`ResearchError::Other`] if polars rejects the columns.
pub fn turning_points_frame(analysis: &CyclePhaseAnalysis) -> Result<DataFrame> {
    let points = &analysis.turning_points;
    let dates: Vec<&str> = points.iter().map(|p| p.date.as_str()).collect();
    let indices: Vec<u64> = points.iter().map(|p| p.index as u64).collect();
    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    let kinds: Vec<&str> = points.iter().map(|p| p.kind.as_str()).collect();

    DataFrame::new(vec![
        Column::new("date".into(), dates),
        Column::new("index".into(), indices),
        Column::new("value".into(), values),
        Column::new("kind".into(), kinds),
    ])
    .map_err(|e| ResearchError::Other(e.to_string()))
}

/// One row per company, one column per ratio.
///
/// `free_cash_flow` holds the latest period's free cash flow.
///
/// # Errors
///
/// Returns [`ResearchError::Other`] if polars rejects the columns.
pub fn ratios_frame(ratios: &[(Symbol, DerivedRatioSet)]) -> Result<DataFrame> {
    let column = |name: &str, field: fn(&DerivedRatioSet) -> Option<f64>| {
        let values: Vec<Option<f64>> = ratios.iter().map(|(_, r)| field(r)).collect();
        Column::new(name.into(), values)
    };
    let symbols: Vec<&str> = ratios.iter().map(|(s, _)| s.as_str()).collect();

    DataFrame::new(vec![
        Column::new("symbol".into(), symbols),
        column("free_cash_flow", |r| {
            r.free_cash_flow.as_ref().and_then(|f| f.first().copied())
        }),
        column("fcf_margin", |r| r.fcf_margin),
        column("roic", |r| r.roic),
        column("fixed_asset_turnover", |r| r.fixed_asset_turnover),
        column("debt_to_equity", |r| r.debt_to_equity),
        column("debt_to_fcf", |r| r.debt_to_fcf),
        column("interest_coverage", |r| r.interest_coverage),
        column("liquidity", |r| r.liquidity),
        column("quick_ratio", |r| r.quick_ratio),
        column("revenue_growth_yoy", |r| r.revenue_growth_yoy),
        column("organic_revenue_growth", |r| r.organic_revenue_growth),
        column("cash_conversion_cycle", |r| r.cash_conversion_cycle),
        column("sga_pct", |r| r.sga_pct),
        column("rd_pct", |r| r.rd_pct),
        column("capex_pct", |r| r.capex_pct),
    ])
    .map_err(|e| ResearchError::Other(e.to_string()))
}
