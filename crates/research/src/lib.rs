#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/research/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Equity research analytics.
//!
//! This crate re-exports the core types and the analytics, and adds a
//! [`SourceRegistry`] for managing data sources with fallback plus a
//! [`ResearchPipeline`] that fetches through it and runs the analytics.
//!
//! # Features
//!
//! - `alphavantage` - Alpha Vantage document decoding and in-memory source
//!
//! # Example
//!
//! ```rust,ignore
//! use research::{DocumentSource, PeriodType, ResearchPipeline, SourceRegistry, Symbol};
//!
//! #[tokio::main]
//! async fn main() -> research::Result<()> {
//!     let registry = SourceRegistry::new().with_documents(
//!         DocumentSource::new().with_statements(Symbol::new("IBM"), income, balance, cashflow),
//!     );
//!     let pipeline = ResearchPipeline::new(registry);
//!
//!     let report = pipeline
//!         .company_report(&Symbol::new("IBM"), PeriodType::Annual)
//!         .await?;
//!     println!("{:?}", report.ratios);
//!
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use research_core::*;

// Analytics
pub use research_analytics::{
    CycleAnalyzer, MacroAnalyzer, PhaseClassifier, RatioEngine, RetentionFilter, Smoother,
    TurningPointDetector, TurningPointFilter, cost_structure, latest_growth, parse_date,
    revenue_drivers, working_capital,
};

// Providers
#[cfg(feature = "alphavantage")]
pub use research_alphavantage::{DocumentSource, parse_economic_series, parse_statement_bundle};

/// Polars `DataFrame` export.
pub mod frame;

mod pipeline;
mod registry;

pub use pipeline::{CompanyReport, ResearchPipeline};
pub use registry::SourceRegistry;
