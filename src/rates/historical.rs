//! Past monthly rates, as published by the distribution utility.

use std::{fs, path::Path};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};

use crate::{history::MonthKey, prelude::*, quantity::rate::KilowattHourRate};

#[serde_as]
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRate {
    #[serde(rename = "Year")]
    pub year: i32,

    #[serde(rename = "Month")]
    pub month: u32,

    /// Published as either a number or a numeric string.
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(rename = "Total Bill")]
    pub rate: KilowattHourRate,
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct YearlySummary {
    pub year: i32,
    pub average: KilowattHourRate,
    pub min: KilowattHourRate,
    pub max: KilowattHourRate,
    pub n_months: usize,
}

#[must_use]
#[derive(Clone, Debug, Default)]
pub struct HistoricalRates(Vec<HistoricalRate>);

impl From<Vec<HistoricalRate>> for HistoricalRates {
    fn from(rates: Vec<HistoricalRate>) -> Self {
        Self(rates)
    }
}

impl HistoricalRates {
    /// Smallest and largest seasonal adjustment.
    const SEASONAL_FACTOR_BOUNDS: (f64, f64) = (0.95, 1.10);

    /// Amplification of a month's deviation from the overall average.
    const SEASONAL_SENSITIVITY: f64 = 1.5;

    /// Factor for months without any history.
    const DEFAULT_SEASONAL_FACTOR: f64 = 1.01;

    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn read_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        let this = Self::from_json(&text)
            .with_context(|| format!("failed to parse `{}`", path.display()))?;
        info!(n_records = this.0.len(), "loaded historical rates");
        Ok(this)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let rates: Vec<HistoricalRate> = serde_json::from_str(text)?;
        for rate in &rates {
            ensure!(
                (1..=12).contains(&rate.month),
                "invalid month {} in {}",
                rate.month,
                rate.year,
            );
        }
        Ok(Self(rates))
    }

    pub const fn len(&self) -> usize {
        self.0.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Records in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = &HistoricalRate> {
        self.0.iter().sorted_by_key(|rate| (rate.year, rate.month))
    }

    /// Most recent record.
    pub fn latest(&self) -> Option<&HistoricalRate> {
        self.0.iter().max_by_key(|rate| (rate.year, rate.month))
    }

    /// Most recent record of the calendar month, in whichever year it was published.
    pub fn latest_for_month(&self, month: u32) -> Option<&HistoricalRate> {
        self.0.iter().filter(|rate| rate.month == month).max_by_key(|rate| rate.year)
    }

    /// Years with at least one record, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.0.iter().map(|rate| rate.year).unique().sorted().collect()
    }

    #[expect(clippy::cast_precision_loss)]
    pub fn yearly_summary(&self, year: i32) -> Option<YearlySummary> {
        let rates =
            self.0.iter().filter(|rate| rate.year == year).map(|rate| rate.rate).collect_vec();
        let (min, max) = rates.iter().copied().minmax().into_option()?;
        let average = rates.iter().copied().sum::<KilowattHourRate>() / rates.len() as f64;
        Some(YearlySummary { year, average, min, max, n_months: rates.len() })
    }

    /// Adjustment of a month's rate relative to the rest of the year.
    ///
    /// The month's average over all years is divided by the overall average, the deviation from
    /// one is amplified and then bounded.
    #[expect(clippy::cast_precision_loss)]
    pub fn seasonal_factor(&self, month: u32) -> f64 {
        let monthly =
            self.0.iter().filter(|rate| rate.month == month).map(|rate| rate.rate.0).collect_vec();
        if monthly.is_empty() {
            return Self::DEFAULT_SEASONAL_FACTOR;
        }
        let month_average = monthly.iter().sum::<f64>() / monthly.len() as f64;
        let overall_average =
            self.0.iter().map(|rate| rate.rate.0).sum::<f64>() / self.0.len() as f64;
        if overall_average == 0.0 {
            return Self::DEFAULT_SEASONAL_FACTOR;
        }
        let variation = month_average / overall_average;
        let (lower, upper) = Self::SEASONAL_FACTOR_BOUNDS;
        (1.0 + (variation - 1.0) * Self::SEASONAL_SENSITIVITY).clamp(lower, upper)
    }

    /// Reference for comparing a prediction: the latest actual rate of the same calendar month.
    pub fn reference_for(&self, month: MonthKey) -> Option<(MonthKey, KilowattHourRate)> {
        let record = self.latest_for_month(month.month())?;
        let key = MonthKey::new(record.year, record.month).ok()?;
        Some((key, record.rate))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn rates() -> HistoricalRates {
        // language=json
        let json = r#"
            [
                {"Year": 2023, "Month": 4, "Total Bill": 11.0},
                {"Year": 2023, "Month": 5, "Total Bill": "12.0"},
                {"Year": 2024, "Month": 4, "Total Bill": 13.0},
                {"Year": 2024, "Month": 5, "Total Bill": 14.0},
                {"Year": 2024, "Month": 6, "Total Bill": 10.0}
            ]
        "#;
        HistoricalRates::from_json(json).unwrap()
    }

    #[test]
    fn parses_string_rates() {
        let rates = rates();
        assert_eq!(rates.len(), 5);
        assert_eq!(rates.iter().nth(1).unwrap().rate, KilowattHourRate(12.0));
    }

    #[test]
    fn rejects_invalid_month() {
        let json = r#"[{"Year": 2024, "Month": 13, "Total Bill": 1}]"#;
        assert!(HistoricalRates::from_json(json).is_err());
    }

    #[test]
    fn latest() {
        let rates = rates();
        let latest = rates.latest().unwrap();
        assert_eq!((latest.year, latest.month), (2024, 6));
        assert!(HistoricalRates::default().latest().is_none());
    }

    #[test]
    fn latest_for_month() {
        let rates = rates();
        assert_eq!(rates.latest_for_month(4).unwrap().year, 2024);
        assert!(rates.latest_for_month(12).is_none());
        assert_eq!(
            rates.reference_for(MonthKey::new(2025, 5).unwrap()),
            Some((MonthKey::new(2024, 5).unwrap(), KilowattHourRate(14.0))),
        );
    }

    #[test]
    fn yearly_summary() {
        let summary = rates().yearly_summary(2024).unwrap();
        assert_abs_diff_eq!(summary.average.0, 37.0 / 3.0, epsilon = 1e-9);
        assert_eq!(summary.min, KilowattHourRate(10.0));
        assert_eq!(summary.max, KilowattHourRate(14.0));
        assert_eq!(summary.n_months, 3);
        assert!(rates().yearly_summary(2020).is_none());
        assert_eq!(rates().years(), [2023, 2024]);
    }

    #[test]
    fn seasonal_factor() {
        let rates = rates();
        // Overall average is 12, May averages 13: 1 + (13/12 − 1) × 1.5 = 1.125, capped.
        assert_abs_diff_eq!(rates.seasonal_factor(5), 1.10);
        // April averages 12.
        assert_abs_diff_eq!(rates.seasonal_factor(4), 1.0, epsilon = 1e-12);
        // June is 10: 1 + (10/12 − 1) × 1.5 = 0.75, floored.
        assert_abs_diff_eq!(rates.seasonal_factor(6), 0.95);
        assert_abs_diff_eq!(rates.seasonal_factor(1), 1.01);
    }
}
