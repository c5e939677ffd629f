//! Statement trend metrics.
//!
//! Each metric reads a newest-first sequence of statement periods and
//! compares the latest figure against the average of the older ones.

use research_core::{
    CostStructure, CostTrend, RevenueDrivers, RevenueTrend, StatementPeriod, WorkingCapital,
    WorkingCapitalTrend,
};

use crate::growth::period_growth_rates;
use crate::numeric::{coalesce, mean, ratio};

const REVENUE_VOLATILITY_LIMIT: f64 = 15.0;
const REVENUE_TREND_BAND: f64 = 2.0;
const COST_TREND_BAND: f64 = 1.0;
const EFFICIENCY_NEUTRAL: f64 = 5.0;
const EFFICIENCY_STEP: f64 = 2.0;
const WORKING_CAPITAL_RANGE_LIMIT: f64 = 10.0;
const WORKING_CAPITAL_TREND_BAND: f64 = 2.0;

/// Splits a newest-first sequence into its latest value and the mean of the
/// rest. `None` with fewer than two values.
fn latest_and_history(values: &[f64]) -> Option<(f64, f64)> {
    match values {
        [latest, history @ ..] => mean(history).map(|avg| (*latest, avg)),
        [] => None,
    }
}

fn population_std_dev(values: &[f64]) -> f64 {
    let Some(avg) = mean(values) else {
        return 0.0;
    };
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

fn percent_of(part: Option<f64>, whole: f64) -> Option<f64> {
    ratio(coalesce(part), whole).map(|r| r * 100.0)
}

/// Revenue growth history of newest-first income statements.
#[must_use]
pub fn revenue_drivers(income: &[StatementPeriod]) -> RevenueDrivers {
    let insufficient = |periods_analyzed| RevenueDrivers {
        growth_rates: Vec::new(),
        trend: RevenueTrend::InsufficientData,
        average_growth: 0.0,
        volatility: 0.0,
        periods_analyzed,
    };
    if income.len() < 2 {
        return insufficient(income.len());
    }

    let revenues: Vec<Option<f64>> = income.iter().map(|p| p.total_revenue).collect();
    let growth_rates = period_growth_rates(&revenues);
    let Some(average_growth) = mean(&growth_rates) else {
        return insufficient(0);
    };
    let volatility = population_std_dev(&growth_rates);

    let trend = match latest_and_history(&growth_rates) {
        None => RevenueTrend::Stable,
        Some(_) if volatility > REVENUE_VOLATILITY_LIMIT => RevenueTrend::Volatile,
        Some((latest, older)) if latest > older + REVENUE_TREND_BAND => {
            RevenueTrend::Strengthening
        }
        Some((latest, older)) if latest < older - REVENUE_TREND_BAND => RevenueTrend::Weakening,
        Some(_) => RevenueTrend::Stable,
    };

    RevenueDrivers {
        periods_analyzed: growth_rates.len(),
        growth_rates,
        trend,
        average_growth,
        volatility,
    }
}

fn cost_trend(ratios: &[f64]) -> CostTrend {
    match latest_and_history(ratios) {
        Some((latest, older)) if latest < older - COST_TREND_BAND => {
            CostTrend::ImprovingEfficiency
        }
        Some((latest, older)) if latest > older + COST_TREND_BAND => {
            CostTrend::DeterioratingEfficiency
        }
        _ => CostTrend::StableStructure,
    }
}

/// Cost ratios of newest-first income statements.
///
/// Periods with zero revenue are skipped. With fewer than two statements,
/// or none with revenue, the trend is `InsufficientData` and the score 0.
#[must_use]
pub fn cost_structure(income: &[StatementPeriod]) -> CostStructure {
    let mut cogs_margins = Vec::new();
    let mut sga_ratios = Vec::new();
    let mut rd_ratios = Vec::new();

    if income.len() >= 2 {
        for period in income {
            let revenue = coalesce(period.total_revenue);
            let (Some(cogs), Some(sga), Some(rd)) = (
                percent_of(period.cost_of_goods_sold, revenue),
                percent_of(period.sga, revenue),
                percent_of(period.research_and_development, revenue),
            ) else {
                continue;
            };
            cogs_margins.push(cogs);
            sga_ratios.push(sga);
            rd_ratios.push(rd);
        }
    }

    if cogs_margins.is_empty() {
        return CostStructure {
            cogs_margins,
            sga_ratios,
            rd_ratios,
            cost_trend: CostTrend::InsufficientData,
            cogs_trend: CostTrend::InsufficientData,
            sga_trend: CostTrend::InsufficientData,
            efficiency_score: 0.0,
            periods_analyzed: 0,
        };
    }

    let cogs_trend = cost_trend(&cogs_margins);
    let sga_trend = cost_trend(&sga_ratios);

    let trends = [cogs_trend, sga_trend];
    let improving = trends
        .iter()
        .filter(|t| **t == CostTrend::ImprovingEfficiency)
        .count();
    let deteriorating = trends
        .iter()
        .filter(|t| **t == CostTrend::DeterioratingEfficiency)
        .count();
    let overall = match improving.cmp(&deteriorating) {
        std::cmp::Ordering::Greater => CostTrend::ImprovingEfficiency,
        std::cmp::Ordering::Less => CostTrend::DeterioratingEfficiency,
        std::cmp::Ordering::Equal => CostTrend::StableStructure,
    };

    let efficiency_score = match latest_and_history(&cogs_margins) {
        Some((latest, older)) if latest < older => EFFICIENCY_NEUTRAL + EFFICIENCY_STEP,
        Some((latest, older)) if latest > older => EFFICIENCY_NEUTRAL - EFFICIENCY_STEP,
        _ => EFFICIENCY_NEUTRAL,
    }
    .clamp(0.0, 10.0);

    CostStructure {
        periods_analyzed: cogs_margins.len(),
        cogs_margins,
        sga_ratios,
        rd_ratios,
        cost_trend: overall,
        cogs_trend,
        sga_trend,
        efficiency_score,
    }
}

/// Working capital composition of newest-first balance sheets.
///
/// Balance sheets with zero total assets are skipped. Component shares are
/// only recorded when their denominator is positive.
#[must_use]
pub fn working_capital(balance: &[StatementPeriod]) -> WorkingCapital {
    let mut working_capital_ratios = Vec::new();
    let mut receivables_share = Vec::new();
    let mut inventory_share = Vec::new();
    let mut payables_share = Vec::new();

    if balance.len() >= 2 {
        for sheet in balance {
            let current_assets = coalesce(sheet.total_current_assets);
            let current_liabilities = coalesce(sheet.total_current_liabilities);
            let Some(wc) = ratio(
                current_assets - current_liabilities,
                coalesce(sheet.total_assets),
            ) else {
                continue;
            };
            working_capital_ratios.push(wc * 100.0);

            if current_assets > 0.0 {
                receivables_share.extend(percent_of(sheet.net_receivables, current_assets));
                inventory_share.extend(percent_of(sheet.inventory, current_assets));
            }
            if current_liabilities > 0.0 {
                payables_share.extend(percent_of(sheet.accounts_payable, current_liabilities));
            }
        }
    }

    let trend = if working_capital_ratios.is_empty() {
        WorkingCapitalTrend::InsufficientData
    } else {
        working_capital_trend(&working_capital_ratios)
    };

    WorkingCapital {
        periods_analyzed: working_capital_ratios.len(),
        working_capital_ratios,
        receivables_share,
        inventory_share,
        payables_share,
        trend,
    }
}

fn working_capital_trend(ratios: &[f64]) -> WorkingCapitalTrend {
    if ratios.len() <= 2 {
        return WorkingCapitalTrend::StableManagement;
    }
    let Some((latest, older)) = latest_and_history(ratios) else {
        return WorkingCapitalTrend::StableManagement;
    };
    let (min, max) = ratios
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });

    if max - min > WORKING_CAPITAL_RANGE_LIMIT {
        WorkingCapitalTrend::CashFlowConcerns
    } else if latest > older + WORKING_CAPITAL_TREND_BAND {
        WorkingCapitalTrend::ImprovingManagement
    } else if latest < older - WORKING_CAPITAL_TREND_BAND {
        WorkingCapitalTrend::DeterioratingManagement
    } else {
        WorkingCapitalTrend::StableManagement
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn revenue(values: &[f64]) -> Vec<StatementPeriod> {
        values
            .iter()
            .map(|v| StatementPeriod {
                total_revenue: Some(*v),
                ..StatementPeriod::default()
            })
            .collect()
    }

    fn costs(revenue: f64, cogs: f64, sga: f64, rd: f64) -> StatementPeriod {
        StatementPeriod {
            total_revenue: Some(revenue),
            cost_of_goods_sold: Some(cogs),
            sga: Some(sga),
            research_and_development: Some(rd),
            ..StatementPeriod::default()
        }
    }

    fn sheet(assets: f64, current_assets: f64, current_liabilities: f64) -> StatementPeriod {
        StatementPeriod {
            total_assets: Some(assets),
            total_current_assets: Some(current_assets),
            total_current_liabilities: Some(current_liabilities),
            net_receivables: Some(current_assets / 4.0),
            inventory: Some(current_assets / 2.0),
            accounts_payable: Some(current_liabilities / 2.0),
            ..StatementPeriod::default()
        }
    }

    #[test]
    fn test_revenue_insufficient() {
        for (input, periods) in [
            (revenue(&[]), 0),
            (revenue(&[100.0]), 1),
            (revenue(&[100.0, 0.0]), 0),
        ] {
            let drivers = revenue_drivers(&input);
            assert_eq!(drivers.trend, RevenueTrend::InsufficientData);
            assert!(drivers.growth_rates.is_empty());
            assert_eq!(drivers.average_growth, 0.0);
            assert_eq!(drivers.volatility, 0.0);
            assert_eq!(drivers.periods_analyzed, periods);
        }
    }

    #[test]
    fn test_revenue_skips_missing_values() {
        let income: Vec<StatementPeriod> = serde_json::from_str(
            r#"[{"totalRevenue":"None"},{"totalRevenue":"110"},{"totalRevenue":"100"}]"#,
        )
        .unwrap();
        let drivers = revenue_drivers(&income);
        assert_eq!(drivers.periods_analyzed, 1);
        assert!((drivers.growth_rates[0] - 10.0).abs() < 1e-9);
        assert_eq!(drivers.volatility, 0.0);
        assert_eq!(drivers.trend, RevenueTrend::Stable);
    }

    #[test]
    fn test_revenue_strengthening() {
        let drivers = revenue_drivers(&revenue(&[120e6, 100e6, 90e6]));
        assert_eq!(drivers.periods_analyzed, 2);
        assert_eq!(drivers.trend, RevenueTrend::Strengthening);
        assert!(drivers.average_growth > 10.0);
        assert!((drivers.growth_rates[0] - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_revenue_volatile_and_weakening() {
        let volatile = revenue_drivers(&revenue(&[150e6, 100e6, 110e6]));
        assert!(volatile.volatility > 15.0);
        assert_eq!(volatile.trend, RevenueTrend::Volatile);

        let weakening = revenue_drivers(&revenue(&[103.0, 100.0, 90.0]));
        assert_eq!(weakening.trend, RevenueTrend::Weakening);

        let single = revenue_drivers(&revenue(&[110.0, 100.0]));
        assert_eq!(single.trend, RevenueTrend::Stable);
        assert_eq!(single.volatility, 0.0);
    }

    #[test]
    fn test_cost_structure_insufficient() {
        let structure = cost_structure(&[costs(100.0, 60.0, 20.0, 5.0)]);
        assert_eq!(structure.cost_trend, CostTrend::InsufficientData);
        assert_eq!(structure.efficiency_score, 0.0);
        assert_eq!(structure.periods_analyzed, 0);

        let zero_revenue = cost_structure(&[costs(0.0, 1.0, 1.0, 1.0), costs(0.0, 1.0, 1.0, 1.0)]);
        assert_eq!(zero_revenue.cost_trend, CostTrend::InsufficientData);
    }

    #[test]
    fn test_cost_structure_improving() {
        let structure = cost_structure(&[
            costs(1000.0, 600.0, 150.0, 50.0),
            costs(900.0, 585.0, 150.0, 45.0),
        ]);
        assert_eq!(structure.cogs_trend, CostTrend::ImprovingEfficiency);
        assert_eq!(structure.cost_trend, CostTrend::ImprovingEfficiency);
        assert_eq!(structure.efficiency_score, 7.0);
        assert_eq!(structure.periods_analyzed, 2);
        assert_eq!(structure.rd_ratios.len(), 2);
    }

    #[test]
    fn test_cost_structure_mixed_is_stable() {
        let structure = cost_structure(&[
            costs(1000.0, 700.0, 100.0, 0.0),
            costs(1000.0, 600.0, 200.0, 0.0),
        ]);
        assert_eq!(structure.cogs_trend, CostTrend::DeterioratingEfficiency);
        assert_eq!(structure.sga_trend, CostTrend::ImprovingEfficiency);
        assert_eq!(structure.cost_trend, CostTrend::StableStructure);
        assert_eq!(structure.efficiency_score, 3.0);
    }

    #[test]
    fn test_working_capital_insufficient() {
        let wc = working_capital(&[sheet(1000.0, 400.0, 200.0)]);
        assert_eq!(wc.trend, WorkingCapitalTrend::InsufficientData);
        assert_eq!(wc.periods_analyzed, 0);

        let wc = working_capital(&[sheet(0.0, 400.0, 200.0), sheet(0.0, 300.0, 200.0)]);
        assert_eq!(wc.trend, WorkingCapitalTrend::InsufficientData);
    }

    #[test]
    fn test_working_capital_two_sheets_stable() {
        let wc = working_capital(&[sheet(1e9, 400e6, 200e6), sheet(900e6, 300e6, 200e6)]);
        assert_eq!(wc.periods_analyzed, 2);
        assert_eq!(wc.working_capital_ratios.len(), 2);
        assert_eq!(wc.trend, WorkingCapitalTrend::StableManagement);
        assert_eq!(wc.receivables_share, vec![25.0, 25.0]);
        assert_eq!(wc.inventory_share, vec![50.0, 50.0]);
        assert_eq!(wc.payables_share, vec![50.0, 50.0]);

        let wc = working_capital(&[sheet(100.0, 60.0, 20.0), sheet(100.0, 40.0, 20.0)]);
        assert_eq!(wc.trend, WorkingCapitalTrend::StableManagement);
    }

    #[test]
    fn test_working_capital_improving() {
        let wc = working_capital(&[
            sheet(100.0, 30.0, 20.0),
            sheet(100.0, 25.0, 20.0),
            sheet(100.0, 25.0, 20.0),
        ]);
        assert_eq!(wc.periods_analyzed, 3);
        assert_eq!(wc.trend, WorkingCapitalTrend::ImprovingManagement);
    }

    #[test]
    fn test_working_capital_swings() {
        let wc = working_capital(&[
            sheet(100.0, 60.0, 20.0),
            sheet(100.0, 40.0, 20.0),
            sheet(100.0, 45.0, 20.0),
        ]);
        assert_eq!(wc.trend, WorkingCapitalTrend::CashFlowConcerns);

        let wc = working_capital(&[
            sheet(100.0, 40.0, 20.0),
            sheet(100.0, 41.0, 20.0),
            sheet(100.0, 40.0, 20.0),
        ]);
        assert_eq!(wc.trend, WorkingCapitalTrend::StableManagement);
    }
}
