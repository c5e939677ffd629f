#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/research/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for equity research analytics.
//!
//! This crate provides the foundational abstractions shared by the analytics
//! and provider crates:
//!
//! - [`StatementBundle`](statement::StatementBundle) - Aligned income, balance sheet and cash flow periods
//! - [`EconomicSeries`](series::EconomicSeries) - Dated macro indicator observations
//! - [`PeriodWindow`](cadence::PeriodWindow) - Retention horizon per cadence
//! - [`DerivedRatioSet`](analysis::DerivedRatioSet) - Financial ratios derived from a bundle
//! - [`CyclePhaseAnalysis`](analysis::CyclePhaseAnalysis) - Business cycle classification
//! - [`StatementSource`](source::StatementSource) / [`IndicatorSource`](source::IndicatorSource) - Data collaborators

/// Derived output records (ratios, turning points, cycle phase).
pub mod analysis;
/// Reporting cadence and retention window definitions.
pub mod cadence;
/// Analytics configuration.
pub mod config;
/// Error types for research operations.
pub mod error;
/// Lenient numeric decoding for vendor payloads.
pub mod numeric;
/// Economic indicator series types.
pub mod series;
/// Collaborator traits for fetching raw data.
pub mod source;
/// Financial statement period types.
pub mod statement;
/// Symbol and period type definitions.
pub mod types;

// Re-export commonly used items at crate root
pub use analysis::{
    CostStructure, CostTrend, CyclePhase, CyclePhaseAnalysis, DerivedRatioSet, LatestValue,
    MacroSnapshot, RevenueDrivers, RevenueTrend, TurningPoint, TurningPointKind, WorkingCapital,
    WorkingCapitalTrend,
};
pub use cadence::{Cadence, PeriodWindow};
pub use config::{AnalyticsConfig, CycleConfig, RatioConfig, RetentionConfig};
pub use error::{DateParseError, ResearchError, Result};
pub use series::{EconomicSeries, Indicator, RetainedSeries, SeriesPoint};
pub use source::{DataSource, IndicatorSource, StatementSource};
pub use statement::{StatementBundle, StatementPeriod};
pub use types::{PeriodType, Symbol};
