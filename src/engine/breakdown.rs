use serde::{Deserialize, Serialize};

use crate::{
    appliance::ApplianceUsage,
    error::ValidationError,
    quantity::{cost::Cost, rate::KilowattHourRate},
};

/// Cost of running an appliance at four granularities.
///
/// Values are kept unrounded, round only when presenting.
#[must_use]
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::Sum,
)]
pub struct CostBreakdown {
    #[serde(rename = "cost_per_hour")]
    pub per_hour: Cost,

    #[serde(rename = "cost_per_day")]
    pub per_day: Cost,

    #[serde(rename = "cost_per_week")]
    pub per_week: Cost,

    #[serde(rename = "cost_per_month")]
    pub per_month: Cost,
}

/// Price the usage at the given rate.
///
/// The usage is valid by construction, so only the rate is checked here.
pub fn compute_breakdown(
    usage: &ApplianceUsage,
    rate: KilowattHourRate,
) -> Result<CostBreakdown, ValidationError> {
    if !rate.is_finite() || rate <= KilowattHourRate::ZERO {
        return Err(ValidationError::NonPositiveRate(rate));
    }
    let per_hour = usage.hourly_energy() * rate;
    let per_day = per_hour * usage.hours_per_day().0;
    let per_week = per_day * f64::from(usage.day_count());
    let per_month = per_week * f64::from(usage.weeks_per_month().get());
    Ok(CostBreakdown { per_hour, per_day, per_week, per_month })
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use enumset::EnumSet;

    use super::*;
    use crate::{
        appliance::{Weekday, WeeksPerMonth},
        prelude::*,
        quantity::{power::Watts, time::Hours},
    };

    #[test]
    fn three_days_a_week() -> Result {
        let usage = ApplianceUsage::builder()
            .name("Aircon")
            .wattage(Watts(1000.0))
            .hours_per_day(Hours(2.0))
            .days_per_week(Weekday::Monday | Weekday::Wednesday | Weekday::Friday)
            .weeks_per_month(WeeksPerMonth::try_from(4_u32)?)
            .build()?;
        let breakdown = compute_breakdown(&usage, KilowattHourRate(12.0))?;
        assert_abs_diff_eq!(breakdown.per_hour.0, 12.0);
        assert_abs_diff_eq!(breakdown.per_day.0, 24.0);
        assert_abs_diff_eq!(breakdown.per_week.0, 72.0);
        assert_abs_diff_eq!(breakdown.per_month.0, 288.0);
        assert_eq!(breakdown.per_month.to_string(), "₱288.00");
        Ok(())
    }

    #[test]
    fn quantity_multiplies_every_period() -> Result {
        let usage = ApplianceUsage::builder()
            .name("Bulb")
            .wattage(Watts(9.0))
            .hours_per_day(Hours(6.0))
            .days_per_week(EnumSet::all())
            .weeks_per_month(WeeksPerMonth::MAX)
            .quantity(10)
            .build()?;
        let breakdown = compute_breakdown(&usage, KilowattHourRate(12.1901))?;
        assert_relative_eq!(breakdown.per_hour.0, 0.09 * 12.1901, max_relative = 1e-12);
        assert_relative_eq!(
            breakdown.per_month.0,
            0.09 * 12.1901 * 6.0 * 7.0 * 4.0,
            max_relative = 1e-12
        );
        Ok(())
    }

    #[test]
    fn chain_identity_holds() -> Result {
        let rates = [0.5, 7.25, 12.1901, 19.99];
        let hours = [0.25, 1.0, 7.5, 24.0];
        for (rate, hours) in rates.into_iter().zip(hours) {
            for weeks in 1..=4_u32 {
                let usage = ApplianceUsage::builder()
                    .name("Appliance")
                    .wattage(Watts(333.3))
                    .hours_per_day(Hours(hours))
                    .days_per_week(Weekday::Tuesday | Weekday::Thursday)
                    .weeks_per_month(WeeksPerMonth::try_from(weeks)?)
                    .quantity(3)
                    .build()?;
                let breakdown = compute_breakdown(&usage, KilowattHourRate(rate))?;
                assert_relative_eq!(
                    breakdown.per_month.0,
                    breakdown.per_week.0 * f64::from(weeks),
                    max_relative = 1e-9
                );
                assert_relative_eq!(
                    breakdown.per_month.0,
                    breakdown.per_hour.0 * hours * 2.0 * f64::from(weeks),
                    max_relative = 1e-9
                );
            }
        }
        Ok(())
    }

    #[test]
    fn rejects_non_positive_rate() -> Result {
        let usage = ApplianceUsage::builder()
            .name("Fan")
            .wattage(Watts(50.0))
            .hours_per_day(Hours(1.0))
            .days_per_week(EnumSet::all())
            .weeks_per_month(WeeksPerMonth::MAX)
            .build()?;
        assert_eq!(
            compute_breakdown(&usage, KilowattHourRate::ZERO),
            Err(ValidationError::NonPositiveRate(KilowattHourRate::ZERO)),
        );
        assert!(compute_breakdown(&usage, KilowattHourRate(f64::INFINITY)).is_err());
        assert!(compute_breakdown(&usage, KilowattHourRate(-1.0)).is_err());
        Ok(())
    }
}
