//! Growth between observations.

use research_core::SeriesPoint;
use std::collections::BTreeMap;

use crate::dates::chronological_key;
use crate::numeric::{ratio, round_to};

/// Growth in percent between the two newest observations.
///
/// Observations are ordered newest first by [`chronological_key`]. The result
/// maps the newest date to the growth rounded to two decimals, and is empty
/// with fewer than two observations, a zero prior value, or a value that does
/// not parse.
///
/// # Example
///
/// ```
/// use research_analytics::latest_growth;
/// use research_core::SeriesPoint;
///
/// let growth = latest_growth(&[
///     SeriesPoint::new("2024", "110"),
///     SeriesPoint::new("2023", "100"),
/// ]);
/// assert_eq!(growth.get("2024"), Some(&10.0));
/// ```
#[must_use]
pub fn latest_growth(points: &[SeriesPoint]) -> BTreeMap<String, f64> {
    latest_growth_of(points.iter().map(|p| (p.date.as_str(), p.parsed_value())))
}

/// [`latest_growth`] over `(date, value)` pairs.
#[must_use]
pub fn latest_growth_of<'a, I>(observations: I) -> BTreeMap<String, f64>
where
    I: IntoIterator<Item = (&'a str, Option<f64>)>,
{
    let mut observations: Vec<(&str, Option<f64>)> = observations.into_iter().collect();
    observations.sort_by(|a, b| chronological_key(b.0).cmp(&chronological_key(a.0)));

    let mut growth = BTreeMap::new();
    if let [(date, Some(current)), (_, Some(previous)), ..] = observations.as_slice() {
        if let Some(change) = ratio(current - previous, *previous) {
            growth.insert((*date).to_string(), round_to(change * 100.0, 2));
        }
    }
    growth
}

/// Period-over-period growth in percent for a newest-first sequence.
///
/// Pairs with a missing value or a zero earlier value are skipped.
#[must_use]
pub fn period_growth_rates(values: &[Option<f64>]) -> Vec<f64> {
    values
        .windows(2)
        .filter_map(|pair| match pair {
            [Some(current), Some(prior)] => ratio(current - prior, *prior),
            _ => None,
        })
        .map(|change| change * 100.0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_point_growth() {
        let growth = latest_growth(&[
            SeriesPoint::new("2024", "110"),
            SeriesPoint::new("2023", "100"),
        ]);
        assert_eq!(growth, BTreeMap::from([("2024".to_string(), 10.0)]));
    }

    #[test]
    fn test_fewer_than_two_points() {
        assert!(latest_growth(&[]).is_empty());
        assert!(latest_growth(&[SeriesPoint::new("2024", "110")]).is_empty());
    }

    #[test]
    fn test_sorts_before_comparing() {
        let growth = latest_growth(&[
            SeriesPoint::new("2023-Q3", "100"),
            SeriesPoint::new("2024-Q1", "99"),
            SeriesPoint::new("2023-Q4", "104"),
        ]);
        assert_eq!(growth.get("2024-Q1"), Some(&-4.81));
    }

    #[test]
    fn test_zero_prior_or_bad_value() {
        assert!(
            latest_growth(&[SeriesPoint::new("2024", "5"), SeriesPoint::new("2023", "0")])
                .is_empty()
        );
        assert!(
            latest_growth(&[SeriesPoint::new("2024", "."), SeriesPoint::new("2023", "3")])
                .is_empty()
        );
    }

    #[test]
    fn test_period_growth_rates() {
        let rates = period_growth_rates(&[Some(121.0), Some(110.0), Some(0.0), Some(50.0)]);
        assert_eq!(rates.len(), 2);
        assert!((rates[0] - 10.0).abs() < 1e-9);
        assert!((rates[1] + 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_period_growth_rates_skip_missing() {
        let rates = period_growth_rates(&[None, Some(110.0), Some(100.0), None]);
        assert_eq!(rates.len(), 1);
        assert!((rates[0] - 10.0).abs() < 1e-9);
        assert!(period_growth_rates(&[Some(5.0), None, Some(3.0)]).is_empty());
    }
}
