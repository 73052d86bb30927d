use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use chrono::{Datelike, Month};
use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::error::ValidationError;

/// Calendar month, formatted as `YYYY-MM`.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    SerializeDisplay,
    DeserializeFromStr,
)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if (1..=9999).contains(&year) && (1..=12).contains(&month) {
            Ok(Self { year, month })
        } else {
            Err(ValidationError::InvalidMonth(format!("{year}-{month}")))
        }
    }

    pub fn of(date: &impl Datelike) -> Self {
        Self { year: date.year(), month: date.month() }
    }

    pub const fn year(self) -> i32 {
        self.year
    }

    /// Month number, January is 1.
    pub const fn month(self) -> u32 {
        self.month
    }

    #[must_use]
    pub const fn next(self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    /// English month name, for example `March`.
    pub fn month_name(self) -> &'static str {
        u8::try_from(self.month)
            .ok()
            .and_then(|month| Month::try_from(month).ok())
            .map_or("", |month| month.name())
    }
}

impl Display for MonthKey {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = ValidationError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidMonth(key.to_owned());
        let (year, month) = key.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn parse_ok() {
        assert_eq!("2025-03".parse::<MonthKey>().unwrap(), MonthKey::new(2025, 3).unwrap());
    }

    #[test]
    fn parse_invalid() {
        for key in ["2025-13", "2025-00", "2025-3", "25-03", "2025/03", "March", ""] {
            assert_eq!(
                key.parse::<MonthKey>(),
                Err(ValidationError::InvalidMonth(key.to_owned())),
                "{key}",
            );
        }
    }

    #[test]
    fn display_pads() {
        assert_eq!(MonthKey::new(2025, 3).unwrap().to_string(), "2025-03");
    }

    #[test]
    fn next_wraps_year() {
        assert_eq!(MonthKey::new(2024, 12).unwrap().next(), MonthKey::new(2025, 1).unwrap());
        assert_eq!(MonthKey::new(2024, 5).unwrap().next(), MonthKey::new(2024, 6).unwrap());
    }

    #[test]
    fn ordered_chronologically() {
        assert!(MonthKey::new(2024, 12).unwrap() < MonthKey::new(2025, 1).unwrap());
    }

    #[test]
    fn of_date() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 14).unwrap();
        assert_eq!(MonthKey::of(&date).to_string(), "2025-07");
        assert_eq!(MonthKey::of(&date).month_name(), "July");
    }

    #[test]
    fn serde_as_string() {
        let key = MonthKey::new(2025, 3).unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), r#""2025-03""#);
        assert_eq!(serde_json::from_str::<MonthKey>(r#""2025-03""#).unwrap(), key);
    }
}
