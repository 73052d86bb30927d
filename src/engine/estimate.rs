use serde::{Deserialize, Serialize};

use crate::{
    error::ValidationError,
    quantity::{cost::Cost, energy::KilowattHours, rate::KilowattHourRate},
};

/// Monthly bill estimate around a predicted rate.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillRange {
    pub min: Cost,
    pub average: Cost,
    pub max: Cost,
}

/// Estimate the bill for the energy at `predicted_rate ± margin`.
///
/// The lower bound never goes below zero, even when the margin exceeds the rate.
pub fn estimate_bill_range(
    total_energy: KilowattHours,
    predicted_rate: KilowattHourRate,
    margin: KilowattHourRate,
) -> Result<BillRange, ValidationError> {
    if !total_energy.is_finite() || total_energy < KilowattHours::ZERO {
        return Err(ValidationError::NegativeEnergy(total_energy));
    }
    if !predicted_rate.is_finite() || predicted_rate <= KilowattHourRate::ZERO {
        return Err(ValidationError::NonPositiveRate(predicted_rate));
    }
    if !margin.is_finite() || margin < KilowattHourRate::ZERO {
        return Err(ValidationError::NegativeMargin(margin));
    }
    let lower_rate = (predicted_rate - margin).max(KilowattHourRate::ZERO);
    Ok(BillRange {
        min: total_energy * lower_rate,
        average: total_energy * predicted_rate,
        max: total_energy * (predicted_rate + margin),
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::prelude::*;

    #[test]
    fn margin_around_rate() -> Result {
        let range = estimate_bill_range(
            KilowattHours(150.0),
            KilowattHourRate(12.5),
            KilowattHourRate(0.3),
        )?;
        assert_abs_diff_eq!(range.average.0, 1875.0, epsilon = 1e-9);
        assert_abs_diff_eq!(range.min.0, 1830.0, epsilon = 1e-9);
        assert_abs_diff_eq!(range.max.0, 1920.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn zero_margin_collapses_range() -> Result {
        let range = estimate_bill_range(
            KilowattHours(42.0),
            KilowattHourRate(11.0),
            KilowattHourRate::ZERO,
        )?;
        assert_eq!(range.min, range.average);
        assert_eq!(range.max, range.average);
        Ok(())
    }

    #[test]
    fn minimum_is_clamped_at_zero() -> Result {
        let range = estimate_bill_range(
            KilowattHours(100.0),
            KilowattHourRate(0.5),
            KilowattHourRate(2.0),
        )?;
        assert_eq!(range.min, Cost::ZERO);
        assert_abs_diff_eq!(range.max.0, 250.0);
        Ok(())
    }

    #[test]
    fn ordered_for_any_margin() -> Result {
        for margin in [0.0, 0.01, 0.3, 5.0, 12.0, 100.0] {
            for energy in [0.0, 1.0, 150.0, 1234.5] {
                let range = estimate_bill_range(
                    KilowattHours(energy),
                    KilowattHourRate(12.0),
                    KilowattHourRate(margin),
                )?;
                assert!(range.min >= Cost::ZERO);
                assert!(range.min <= range.average);
                assert!(range.average <= range.max);
            }
        }
        Ok(())
    }

    #[test]
    fn rejects_invalid_inputs() {
        assert_eq!(
            estimate_bill_range(KilowattHours(1.0), KilowattHourRate(12.0), KilowattHourRate(-0.1)),
            Err(ValidationError::NegativeMargin(KilowattHourRate(-0.1))),
        );
        assert_eq!(
            estimate_bill_range(KilowattHours(-1.0), KilowattHourRate(12.0), KilowattHourRate(0.1)),
            Err(ValidationError::NegativeEnergy(KilowattHours(-1.0))),
        );
        assert!(
            estimate_bill_range(KilowattHours(1.0), KilowattHourRate(0.0), KilowattHourRate(0.1))
                .is_err()
        );
    }
}
