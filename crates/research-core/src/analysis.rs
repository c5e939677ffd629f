//! Derived output records.
//!
//! These are plain, serializable records with no behavior beyond small
//! constructors. They are produced once per input batch and never updated in
//! place:
//!
//! - [`DerivedRatioSet`] - Financial ratios for one company
//! - [`CyclePhaseAnalysis`] - Turning points and business cycle phase
//! - [`RevenueDrivers`], [`CostStructure`], [`WorkingCapital`] - Statement trends
//! - [`MacroSnapshot`] - Growth, latest values and cycle phase across indicators

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Financial ratios derived from a [`StatementBundle`](crate::StatementBundle).
///
/// Every ratio is optional: `None` means undefined (zero denominator) or, when
/// every field is `None`, that one of the statements was missing entirely.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedRatioSet {
    /// Operating cash flow plus capital expenditures, per cash flow period.
    pub free_cash_flow: Option<Vec<f64>>,
    /// Current free cash flow over revenue.
    pub fcf_margin: Option<f64>,
    /// Net income over (total assets - current liabilities).
    pub roic: Option<f64>,
    /// Revenue over net PP&E.
    pub fixed_asset_turnover: Option<f64>,
    /// Total liabilities over shareholder equity.
    pub debt_to_equity: Option<f64>,
    /// Total liabilities over current free cash flow.
    pub debt_to_fcf: Option<f64>,
    /// EBIT (or operating income) over absolute interest expense.
    pub interest_coverage: Option<f64>,
    /// Current ratio.
    pub liquidity: Option<f64>,
    /// (Current assets - inventory) over current liabilities.
    pub quick_ratio: Option<f64>,
    /// Year-over-year revenue growth in percent.
    pub revenue_growth_yoy: Option<f64>,
    /// Same value as `revenue_growth_yoy`; no acquisition adjustment is applied.
    pub organic_revenue_growth: Option<f64>,
    /// Days inventory + days sales outstanding - days payables outstanding.
    pub cash_conversion_cycle: Option<f64>,
    /// SG&A over revenue.
    pub sga_pct: Option<f64>,
    /// R&D over revenue.
    pub rd_pct: Option<f64>,
    /// Absolute capital expenditures over revenue.
    pub capex_pct: Option<f64>,
}

impl DerivedRatioSet {
    /// Returns true when no ratio could be derived.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Whether a turning point is a local maximum or minimum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurningPointKind {
    /// Local maximum.
    Peak,
    /// Local minimum.
    Trough,
}

impl TurningPointKind {
    /// Returns the lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Peak => "peak",
            Self::Trough => "trough",
        }
    }
}

impl fmt::Display for TurningPointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A local peak or trough in a smoothed series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurningPoint {
    /// Date of the observation.
    pub date: String,
    /// Smoothed value at the turning point.
    pub value: f64,
    /// Position in the chronologically sorted series.
    pub index: usize,
    /// Peak or trough.
    pub kind: TurningPointKind,
}

impl TurningPoint {
    /// Creates a new turning point.
    #[must_use]
    pub fn new(date: impl Into<String>, value: f64, index: usize, kind: TurningPointKind) -> Self {
        Self {
            date: date.into(),
            value,
            index,
            kind,
        }
    }
}

/// Business cycle phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePhase {
    /// Clearly above the last trough, or a sustained rise.
    Expansion,
    /// Just past a trough.
    Recovery,
    /// At or near the last peak.
    Peak,
    /// Clearly below the last peak, or a sustained fall.
    Downturn,
    /// Rising, by raw comparison of the last two values.
    Improving,
    /// Flat or falling, by raw comparison of the last two values.
    Declining,
    /// No discernible pattern.
    Uncertain,
    /// Not enough observations to classify.
    InsufficientData,
}

impl CyclePhase {
    /// Returns the snake_case name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Expansion => "expansion",
            Self::Recovery => "recovery",
            Self::Peak => "peak",
            Self::Downturn => "downturn",
            Self::Improving => "improving",
            Self::Declining => "declining",
            Self::Uncertain => "uncertain",
            Self::InsufficientData => "insufficient_data",
        }
    }
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of running cycle analysis over one series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CyclePhaseAnalysis {
    /// Alternating peaks and troughs, oldest first.
    pub turning_points: Vec<TurningPoint>,
    /// Classified phase.
    pub current_phase: CyclePhase,
    /// Date of the newest observation analysed.
    pub latest_date: Option<String>,
    /// `"<first date> to <last date>"`.
    pub analysis_period: Option<String>,
    /// Number of observations analysed.
    pub points_analyzed: usize,
    /// Reason the analysis could not run, if it could not.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CyclePhaseAnalysis {
    /// Analysis that could not run because the sample was too small.
    #[must_use]
    pub fn insufficient(reason: impl Into<String>, points_analyzed: usize) -> Self {
        Self {
            turning_points: Vec::new(),
            current_phase: CyclePhase::InsufficientData,
            latest_date: None,
            analysis_period: None,
            points_analyzed,
            error: Some(reason.into()),
        }
    }
}

/// Direction of revenue growth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenueTrend {
    /// Fewer than two usable periods.
    InsufficientData,
    /// Growth rates swing by more than 15 points.
    Volatile,
    /// Latest growth beats the historical average.
    Strengthening,
    /// Latest growth trails the historical average.
    Weakening,
    /// Latest growth is in line with history.
    Stable,
}

/// Revenue growth history and trend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevenueDrivers {
    /// Period-over-period growth in percent, newest first.
    pub growth_rates: Vec<f64>,
    /// Trend classification.
    pub trend: RevenueTrend,
    /// Mean of `growth_rates`.
    pub average_growth: f64,
    /// Population standard deviation of `growth_rates`.
    pub volatility: f64,
    /// Number of growth rates computed.
    pub periods_analyzed: usize,
}

/// Direction of a cost ratio.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostTrend {
    /// Fewer than two usable periods.
    InsufficientData,
    /// Costs falling as a share of revenue.
    ImprovingEfficiency,
    /// Costs rising as a share of revenue.
    DeterioratingEfficiency,
    /// No material change.
    StableStructure,
}

/// Cost ratios and their trends.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostStructure {
    /// COGS as percent of revenue, newest first.
    pub cogs_margins: Vec<f64>,
    /// SG&A as percent of revenue, newest first.
    pub sga_ratios: Vec<f64>,
    /// R&D as percent of revenue, newest first.
    pub rd_ratios: Vec<f64>,
    /// Overall trend, by majority of the COGS and SG&A trends.
    pub cost_trend: CostTrend,
    /// Trend of the COGS margin.
    pub cogs_trend: CostTrend,
    /// Trend of the SG&A ratio.
    pub sga_trend: CostTrend,
    /// 0-10 score, 5 is neutral.
    pub efficiency_score: f64,
    /// Number of periods with non-zero revenue.
    pub periods_analyzed: usize,
}

/// Direction of working capital management.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkingCapitalTrend {
    /// Fewer than two usable balance sheets.
    InsufficientData,
    /// Working capital ratio swings by more than 10 points.
    CashFlowConcerns,
    /// Latest ratio above the historical average.
    ImprovingManagement,
    /// Latest ratio below the historical average.
    DeterioratingManagement,
    /// No material change.
    StableManagement,
}

/// Working capital composition and trend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkingCapital {
    /// (Current assets - current liabilities) as percent of total assets.
    pub working_capital_ratios: Vec<f64>,
    /// Receivables as percent of current assets.
    pub receivables_share: Vec<f64>,
    /// Inventory as percent of current assets.
    pub inventory_share: Vec<f64>,
    /// Payables as percent of current liabilities.
    pub payables_share: Vec<f64>,
    /// Trend classification.
    pub trend: WorkingCapitalTrend,
    /// Number of balance sheets with non-zero total assets.
    pub periods_analyzed: usize,
}

/// The most recent observation of a series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatestValue {
    /// Observation date.
    pub date: String,
    /// Observation value.
    pub value: f64,
}

/// Cross-indicator macro view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MacroSnapshot {
    /// Reference date used for retention.
    pub as_of: NaiveDate,
    /// Latest annual real GDP growth, keyed by observation date.
    pub real_gdp_growth_annual: BTreeMap<String, f64>,
    /// Latest quarterly real GDP growth, keyed by observation date.
    pub real_gdp_growth_quarterly: BTreeMap<String, f64>,
    /// Newest observation per series, keyed by `"<name> (<cadence>)"`.
    pub latest_values: BTreeMap<String, LatestValue>,
    /// Cycle analysis of quarterly real GDP.
    pub cycle: CyclePhaseAnalysis,
}
