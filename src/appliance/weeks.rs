use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::error::ValidationError;

/// Number of weeks per month an appliance is used, `1..=4`.
///
/// Serialized as the form label, for example `2 Weeks`.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    SerializeDisplay,
    DeserializeFromStr,
)]
pub struct WeeksPerMonth(u32);

impl WeeksPerMonth {
    pub const MAX: Self = Self(4);

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for WeeksPerMonth {
    type Error = ValidationError;

    fn try_from(weeks: u32) -> Result<Self, Self::Error> {
        if (1..=Self::MAX.0).contains(&weeks) {
            Ok(Self(weeks))
        } else {
            Err(ValidationError::WeeksPerMonthOutOfRange(weeks))
        }
    }
}

impl FromStr for WeeksPerMonth {
    type Err = ValidationError;

    /// Parse the first number in the label: `4 Weeks/Month` is 4.
    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let digits: String = label
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(char::is_ascii_digit)
            .collect();
        let weeks = digits
            .parse::<u32>()
            .map_err(|_| ValidationError::InvalidWeeksLabel(label.to_owned()))?;
        Self::try_from(weeks)
    }
}

impl Display for WeeksPerMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.0 == 1 { write!(f, "1 Week") } else { write!(f, "{} Weeks", self.0) }
    }
}
