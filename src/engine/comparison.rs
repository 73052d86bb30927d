use serde::Serialize;

use crate::{
    error::DivisionByZeroError,
    quantity::{cost::Cost, percentage::Percentage, rate::KilowattHourRate},
};

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RateComparison {
    pub percent_difference: Percentage,

    /// Whether the predicted rate is above the reference.
    pub is_higher: bool,
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CostComparison {
    /// Absolute difference between the two totals.
    pub difference: Cost,

    pub percent_difference: Percentage,

    /// Whether the candidate total is above the saved one.
    pub is_higher: bool,
}

pub fn compare_to_rate(
    predicted_rate: KilowattHourRate,
    reference_rate: KilowattHourRate,
) -> Result<RateComparison, DivisionByZeroError> {
    let percent_difference = Percentage::relative_difference(predicted_rate.0, reference_rate.0)
        .ok_or(DivisionByZeroError)?;
    Ok(RateComparison { percent_difference, is_higher: predicted_rate > reference_rate })
}

pub fn compare_to_saved_calculation(
    candidate_total: Cost,
    saved_total: Cost,
) -> Result<CostComparison, DivisionByZeroError> {
    let percent_difference = Percentage::relative_difference(candidate_total.0, saved_total.0)
        .ok_or(DivisionByZeroError)?;
    Ok(CostComparison {
        difference: (candidate_total - saved_total).abs(),
        percent_difference,
        is_higher: candidate_total > saved_total,
    })
}
