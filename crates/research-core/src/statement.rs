//! Financial statement period types.
//!
//! A [`StatementPeriod`] carries the raw line items of one reporting period.
//! The same type is used for income statement, balance sheet and cash flow
//! rows; fields that a statement does not report are simply `None`.
//! [`StatementBundle`] aligns the three statements for one company.

use serde::{Deserialize, Serialize};

use crate::numeric::lenient_f64;
use crate::types::PeriodType;

/// Maximum number of periods kept per statement in a bundle.
pub const MAX_STATEMENT_PERIODS: usize = 10;

/// Raw line items of one reporting period.
///
/// Values decode leniently: strings and numbers are accepted, and empty
/// strings, `null`, `"None"` or missing keys all become `None`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementPeriod {
    /// End date of the fiscal period (`YYYY-MM-DD`).
    #[serde(default)]
    pub fiscal_date_ending: Option<String>,

    // Income statement
    /// Total revenue.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_revenue: Option<f64>,
    /// Cost of goods sold.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cost_of_goods_sold: Option<f64>,
    /// Selling, general and administrative expenses.
    #[serde(
        default,
        rename = "sellingGeneralAndAdministrativeExpenses",
        deserialize_with = "lenient_f64"
    )]
    pub sga: Option<f64>,
    /// Research and development expenses.
    #[serde(
        default,
        rename = "researchAndDevelopmentExpenses",
        deserialize_with = "lenient_f64"
    )]
    pub research_and_development: Option<f64>,
    /// Operating income.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub operating_income: Option<f64>,
    /// Earnings before interest and taxes.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ebit: Option<f64>,
    /// Interest expense (sign varies by source).
    #[serde(default, deserialize_with = "lenient_f64")]
    pub interest_expense: Option<f64>,
    /// Net income.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub net_income: Option<f64>,

    // Balance sheet
    /// Total assets.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_assets: Option<f64>,
    /// Total current assets.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_current_assets: Option<f64>,
    /// Inventory.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub inventory: Option<f64>,
    /// Net receivables.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub net_receivables: Option<f64>,
    /// Accounts payable.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub accounts_payable: Option<f64>,
    /// Total current liabilities.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_current_liabilities: Option<f64>,
    /// Total liabilities.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_liabilities: Option<f64>,
    /// Total shareholder equity.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_shareholder_equity: Option<f64>,
    /// Net property, plant and equipment.
    #[serde(
        default,
        rename = "propertyPlantEquipmentNet",
        deserialize_with = "lenient_f64"
    )]
    pub net_ppe: Option<f64>,

    // Cash flow statement
    /// Operating cash flow.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub operating_cashflow: Option<f64>,
    /// Capital expenditures, stored signed-negative by most sources.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub capital_expenditures: Option<f64>,
}

impl StatementPeriod {
    /// Creates an empty period ending on the given date.
    #[must_use]
    pub fn ending(fiscal_date_ending: impl Into<String>) -> Self {
        Self {
            fiscal_date_ending: Some(fiscal_date_ending.into()),
            ..Default::default()
        }
    }
}

/// Income statement, balance sheet and cash flow periods for one company.
///
/// Each sequence is ordered newest-first (index 0 is the current period,
/// index 1 the prior one) and holds at most [`MAX_STATEMENT_PERIODS`] entries.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementBundle {
    /// Cadence of all three sequences.
    pub period_type: PeriodType,
    /// Income statement periods.
    pub income: Vec<StatementPeriod>,
    /// Balance sheet periods.
    pub balance: Vec<StatementPeriod>,
    /// Cash flow statement periods.
    pub cashflow: Vec<StatementPeriod>,
}

impl StatementBundle {
    /// Creates a bundle, truncating each sequence to [`MAX_STATEMENT_PERIODS`].
    #[must_use]
    pub fn new(
        period_type: PeriodType,
        income: Vec<StatementPeriod>,
        balance: Vec<StatementPeriod>,
        cashflow: Vec<StatementPeriod>,
    ) -> Self {
        Self {
            period_type,
            income,
            balance,
            cashflow,
        }
        .truncated(MAX_STATEMENT_PERIODS)
    }

    /// Truncates each sequence to at most `max_periods` entries.
    #[must_use]
    pub fn truncated(mut self, max_periods: usize) -> Self {
        self.income.truncate(max_periods);
        self.balance.truncate(max_periods);
        self.cashflow.truncate(max_periods);
        self
    }

    /// Returns true when all three statement sequences are non-empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !(self.income.is_empty() || self.balance.is_empty() || self.cashflow.is_empty())
    }
}
