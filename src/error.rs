//! Typed failures of the cost engine and its collaborators.
//!
//! Everything else travels as [`anyhow::Error`], which these errors convert into.

use thiserror::Error;

use crate::{
    engine::Fingerprint,
    history::MonthKey,
    quantity::{
        cost::Cost,
        energy::KilowattHours,
        power::Watts,
        rate::KilowattHourRate,
        time::Hours,
    },
};

/// Bad or missing input; the user must fix it, retrying makes no sense.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("`{0}` is required")]
    MissingField(&'static str),

    #[error("name must not be empty")]
    EmptyName,

    #[error("wattage must be positive, got {0}")]
    NonPositiveWattage(Watts),

    #[error("hours per day must be within (0, 24], got {0}")]
    HoursPerDayOutOfRange(Hours),

    #[error("at least one day of the week must be selected")]
    NoDaysSelected,

    #[error("`{0}` is not a weekday, expected one of SU, M, T, W, TH, F, S")]
    UnknownWeekday(String),

    #[error("weeks per month must be within 1..=4, got {0}")]
    WeeksPerMonthOutOfRange(u32),

    #[error("`{0}` does not contain a number of weeks")]
    InvalidWeeksLabel(String),

    #[error("quantity must be at least 1")]
    ZeroQuantity,

    #[error("appliance `{0}` is listed more than once")]
    DuplicateAppliance(String),

    #[error("rate must be positive, got {0}")]
    NonPositiveRate(KilowattHourRate),

    #[error("margin must be non-negative, got {0}")]
    NegativeMargin(KilowattHourRate),

    #[error("energy must be non-negative, got {0}")]
    NegativeEnergy(KilowattHours),

    #[error("average monthly bill cannot be lower than {minimum}, got {actual}")]
    MonthlyBillTooLow { minimum: Cost, actual: Cost },

    #[error("`{0}` is not a valid month, expected `YYYY-MM`")]
    InvalidMonth(String),
}

/// Comparing against a zero reference is undefined.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[error("cannot compare against a zero reference value")]
pub struct DivisionByZeroError;

/// The calculation is already persisted, the caller should skip the save.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("an identical calculation is already saved (fingerprint {fingerprint})")]
pub struct DuplicateCalculationError {
    pub fingerprint: Fingerprint,
}

/// A prediction for the month is already saved and overwriting was not confirmed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[error("a prediction for {month} is already saved, confirm to overwrite it")]
pub struct PredictionExistsError {
    pub month: MonthKey,
}
