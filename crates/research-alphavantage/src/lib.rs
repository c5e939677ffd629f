#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/research/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Alpha Vantage data provider.
//!
//! Fetching is left to the caller. This crate turns the JSON documents the
//! [Alpha Vantage](https://www.alphavantage.co/) API returns into
//! [`StatementBundle`](research_core::StatementBundle)s and
//! [`EconomicSeries`](research_core::EconomicSeries), and serves stored
//! documents through the `research-core` collaborator traits.
//!
//! # Usage
//!
//! ```rust,ignore
//! use research_alphavantage::DocumentSource;
//! use research_core::{PeriodType, StatementSource, Symbol};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = DocumentSource::new().with_statements(
//!         Symbol::new("IBM"),
//!         std::fs::read_to_string("ibm_income.json")?,
//!         std::fs::read_to_string("ibm_balance.json")?,
//!         std::fs::read_to_string("ibm_cashflow.json")?,
//!     );
//!
//!     let bundle = source
//!         .fetch_statements(&Symbol::new("IBM"), PeriodType::Annual)
//!         .await?;
//!     println!("{} income periods", bundle.income.len());
//!     Ok(())
//! }
//! ```

mod parse;
mod source;

pub use parse::{parse_economic_series, parse_statement_bundle};
pub use source::DocumentSource;

/// Provider name reported by [`DocumentSource`] and in rate limit errors.
pub const PROVIDER_NAME: &str = "Alpha Vantage";
