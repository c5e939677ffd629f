//! Reporting cadence and retention window definitions.
//!
//! This module defines [`Cadence`] for the reporting frequency of an economic
//! series and [`PeriodWindow`], the retention horizon applied to each cadence.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ResearchError;

/// Reporting frequency of an economic series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    /// One observation per year.
    Annual,
    /// One observation per quarter (dates may be `YYYY-Qn`).
    Quarterly,
    /// One observation per month.
    Monthly,
    /// One observation per trading or calendar day.
    Daily,
}

impl Cadence {
    /// All cadences, slowest first.
    pub const ALL: [Self; 4] = [Self::Annual, Self::Quarterly, Self::Monthly, Self::Daily];

    /// Returns the lowercase name used by vendor `interval` parameters.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarterly => "quarterly",
            Self::Monthly => "monthly",
            Self::Daily => "daily",
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cadence {
    type Err = ResearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "annual" => Ok(Self::Annual),
            "quarterly" => Ok(Self::Quarterly),
            "monthly" => Ok(Self::Monthly),
            "daily" => Ok(Self::Daily),
            other => Err(ResearchError::InvalidParameter(format!(
                "Unknown cadence: {other}. Supported: annual, quarterly, monthly, daily"
            ))),
        }
    }
}

/// Retention horizon for a series, in whole calendar months.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodWindow {
    /// Number of months of history to keep.
    pub months: u32,
}

impl PeriodWindow {
    /// Creates a window of the given number of months.
    #[must_use]
    pub const fn months(months: u32) -> Self {
        Self { months }
    }

    /// Creates a window of the given number of years.
    #[must_use]
    pub const fn years(years: u32) -> Self {
        Self { months: years * 12 }
    }

    /// Default horizon for a cadence: six months of daily data, five years of
    /// monthly or quarterly data, ten years of annual data.
    #[must_use]
    pub const fn for_cadence(cadence: Cadence) -> Self {
        match cadence {
            Cadence::Daily => Self::months(6),
            Cadence::Monthly | Cadence::Quarterly => Self::years(5),
            Cadence::Annual => Self::years(10),
        }
    }

    /// Earliest date still inside the window when looking back from `as_of`.
    ///
    /// Month arithmetic clamps to the end of shorter months
    /// (2024-08-31 minus six months is 2024-02-29).
    #[must_use]
    pub fn cutoff(&self, as_of: NaiveDate) -> NaiveDate {
        as_of
            .checked_sub_months(Months::new(self.months))
            .unwrap_or(NaiveDate::MIN)
    }
}
