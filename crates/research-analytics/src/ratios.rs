//! Financial ratio engine.
//!
//! Derives the [`DerivedRatioSet`] of a company from its aligned statements.
//! Absent line items count as zero, and any ratio whose denominator is zero
//! is `None`. If any of the three statements is missing entirely, every
//! ratio is `None`.

use research_core::{DerivedRatioSet, RatioConfig, StatementBundle, StatementPeriod};
use tracing::{debug, instrument};

use crate::growth::latest_growth_of;
use crate::numeric::{coalesce, ratio};

/// Computes derived ratios from statement bundles.
#[derive(Clone, Debug, Default)]
pub struct RatioEngine {
    config: RatioConfig,
}

impl RatioEngine {
    /// Creates an engine with the given settings.
    #[must_use]
    pub const fn new(config: RatioConfig) -> Self {
        Self { config }
    }

    /// Derives all ratios for `bundle`.
    ///
    /// Index 0 of each statement is the current period. Free cash flow is
    /// reported for every cash flow period up to `max_periods`.
    #[instrument(skip_all, fields(period_type = ?bundle.period_type))]
    pub fn compute(&self, bundle: &StatementBundle) -> DerivedRatioSet {
        let (Some(income), Some(balance), Some(cashflow)) = (
            bundle.income.first(),
            bundle.balance.first(),
            bundle.cashflow.first(),
        ) else {
            debug!(
                income = bundle.income.len(),
                balance = bundle.balance.len(),
                cashflow = bundle.cashflow.len(),
                "Incomplete statement bundle, no ratios derived"
            );
            return DerivedRatioSet::default();
        };

        let free_cash_flow: Vec<f64> = bundle
            .cashflow
            .iter()
            .take(self.config.max_periods)
            .map(|p| coalesce(p.operating_cashflow) + coalesce(p.capital_expenditures))
            .collect();
        let fcf = free_cash_flow.first().copied();

        let revenue = coalesce(income.total_revenue);
        let current_liabilities = coalesce(balance.total_current_liabilities);
        let current_assets = coalesce(balance.total_current_assets);
        let liabilities = coalesce(balance.total_liabilities);

        let ebit = match coalesce(income.ebit) {
            e if e == 0.0 => coalesce(income.operating_income),
            e => e,
        };

        let revenue_growth_yoy = self.revenue_growth(bundle);

        DerivedRatioSet {
            fcf_margin: fcf.and_then(|f| ratio(f, revenue)),
            roic: ratio(
                coalesce(income.net_income),
                coalesce(balance.total_assets) - current_liabilities,
            ),
            fixed_asset_turnover: ratio(revenue, coalesce(balance.net_ppe)),
            debt_to_equity: ratio(liabilities, coalesce(balance.total_shareholder_equity)),
            debt_to_fcf: fcf.and_then(|f| ratio(liabilities, f)),
            interest_coverage: ratio(ebit, coalesce(income.interest_expense).abs()),
            liquidity: ratio(current_assets, current_liabilities),
            quick_ratio: ratio(
                current_assets - coalesce(balance.inventory),
                current_liabilities,
            ),
            revenue_growth_yoy,
            organic_revenue_growth: revenue_growth_yoy,
            cash_conversion_cycle: self.cash_conversion_cycle(income, balance),
            sga_pct: ratio(coalesce(income.sga), revenue),
            rd_pct: ratio(coalesce(income.research_and_development), revenue),
            capex_pct: ratio(coalesce(cashflow.capital_expenditures).abs(), revenue),
            free_cash_flow: Some(free_cash_flow),
        }
    }

    /// Year-over-year revenue growth in percent between the two newest
    /// income statements.
    fn revenue_growth(&self, bundle: &StatementBundle) -> Option<f64> {
        let observations = bundle.income.iter().take(self.config.max_periods).map(|p| {
            (
                p.fiscal_date_ending.as_deref().unwrap_or_default(),
                Some(coalesce(p.total_revenue)),
            )
        });
        latest_growth_of(observations).into_values().next()
    }

    /// Days inventory outstanding plus days sales outstanding minus days
    /// payables outstanding.
    fn cash_conversion_cycle(
        &self,
        income: &StatementPeriod,
        balance: &StatementPeriod,
    ) -> Option<f64> {
        let days = self.config.days_per_year;
        let daily_cogs = coalesce(income.cost_of_goods_sold) / days;
        let daily_revenue = coalesce(income.total_revenue) / days;

        let dio = ratio(coalesce(balance.inventory), daily_cogs)?;
        let dso = ratio(coalesce(balance.net_receivables), daily_revenue)?;
        let dpo = ratio(coalesce(balance.accounts_payable), daily_cogs)?;
        Some(dio + dso - dpo)
    }
}
