use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use enumset::EnumSet;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Day of the week, serialized as the short tokens the forms use.
#[derive(Debug, Hash, Serialize, Deserialize, enumset::EnumSetType)]
pub enum Weekday {
    #[serde(rename = "SU")]
    Sunday,

    #[serde(rename = "M")]
    Monday,

    #[serde(rename = "T")]
    Tuesday,

    #[serde(rename = "W")]
    Wednesday,

    #[serde(rename = "TH")]
    Thursday,

    #[serde(rename = "F")]
    Friday,

    #[serde(rename = "S")]
    Saturday,
}

impl Weekday {
    pub const fn token(self) -> &'static str {
        match self {
            Self::Sunday => "SU",
            Self::Monday => "M",
            Self::Tuesday => "T",
            Self::Wednesday => "W",
            Self::Thursday => "TH",
            Self::Friday => "F",
            Self::Saturday => "S",
        }
    }

    /// Parse a comma- or space-separated list of tokens, like `M,W,F`.
    pub fn parse_set(tokens: &str) -> Result<EnumSet<Self>, ValidationError> {
        tokens
            .split([',', ' '])
            .filter(|token| !token.is_empty())
            .map(str::parse::<Self>)
            .collect()
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Weekday {
    type Err = ValidationError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_uppercase().as_str() {
            "SU" => Ok(Self::Sunday),
            "M" => Ok(Self::Monday),
            "T" => Ok(Self::Tuesday),
            "W" => Ok(Self::Wednesday),
            "TH" => Ok(Self::Thursday),
            "F" => Ok(Self::Friday),
            "S" => Ok(Self::Saturday),
            _ => Err(ValidationError::UnknownWeekday(token.to_owned())),
        }
    }
}
