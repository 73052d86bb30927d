use std::str::FromStr;

use derive_more::Display;
use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::error::ValidationError;

/// Opaque account identifier, every stored record belongs to exactly one.
#[derive(
    Clone,
    Debug,
    Display,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    SerializeDisplay,
    DeserializeFromStr,
)]
pub struct UserId(String);

impl FromStr for UserId {
    type Err = ValidationError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        let id = id.trim();
        if id.is_empty() { Err(ValidationError::EmptyName) } else { Ok(Self(id.to_owned())) }
    }
}

/// Sequential identifier of a saved calculation, unique per user.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    derive_more::FromStr,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    SerializeDisplay,
    DeserializeFromStr,
)]
pub struct CalculationId(pub u64);

impl CalculationId {
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}
