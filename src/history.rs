//! Saved calculations and monthly bill predictions.

mod calculation;
mod month;
mod prediction;

pub use self::{
    calculation::{CalculationItem, MINIMUM_MONTHLY_BILL, SavedCalculation},
    month::MonthKey,
    prediction::BillPrediction,
};
