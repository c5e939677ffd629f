#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/research/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Financial ratio and business cycle analytics.
//!
//! Control flow for macro data is retention, then either growth or the cycle
//! pipeline (smoothing, turning point detection, alternation filtering and
//! phase classification). Statement bundles go through the ratio engine and
//! the statement trend metrics. All of it is synchronous and side-effect free.
//!
//! # Example
//!
//! ```
//! use research_analytics::CycleAnalyzer;
//! use research_core::{Cadence, CyclePhase, EconomicSeries, SeriesPoint};
//!
//! let series = EconomicSeries::new(
//!     "Real GDP",
//!     Cadence::Quarterly,
//!     vec![
//!         SeriesPoint::new("2023-Q1", "100"),
//!         SeriesPoint::new("2023-Q2", "101"),
//!         SeriesPoint::new("2023-Q3", "102"),
//!     ],
//! );
//!
//! let analysis = CycleAnalyzer::default().analyze(&series);
//! assert_eq!(analysis.current_phase, CyclePhase::InsufficientData);
//! assert!(analysis.error.is_some());
//! ```

/// Business cycle pipeline.
pub mod cycle;
/// Observation date parsing and ordering.
pub mod dates;
/// Growth between observations.
pub mod growth;
/// Cross-indicator macro snapshot.
pub mod macros;
/// Shared arithmetic helpers.
pub mod numeric;
/// Cycle phase classification.
pub mod phase;
/// Financial ratio engine.
pub mod ratios;
/// Retention filtering.
pub mod retention;
/// Adaptive moving average.
pub mod smoothing;
/// Statement trend metrics.
pub mod statements;
/// Turning point detection and filtering.
pub mod turning_points;

pub use cycle::CycleAnalyzer;
pub use dates::{chronological_key, parse_date};
pub use growth::{latest_growth, latest_growth_of, period_growth_rates};
pub use macros::MacroAnalyzer;
pub use numeric::{coalesce, ratio, round_to};
pub use phase::PhaseClassifier;
pub use ratios::RatioEngine;
pub use retention::RetentionFilter;
pub use smoothing::Smoother;
pub use statements::{cost_structure, revenue_drivers, working_capital};
pub use turning_points::{Candidates, TurningPointDetector, TurningPointFilter};
