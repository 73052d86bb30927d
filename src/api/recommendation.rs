use itertools::Itertools;

use crate::{history::SavedCalculation, prelude::*};

/// Describe every appliance of the calculations, one `Name: 75W, 8h/day, 7d/week` line each.
pub fn build_appliance_info(calculations: &[SavedCalculation]) -> Result<String> {
    let lines = calculations
        .iter()
        .flat_map(SavedCalculation::items)
        .map(|item| {
            format!(
                "{}: {}W, {}h/day, {}d/week",
                item.usage.name(),
                item.usage.wattage().0,
                item.usage.hours_per_day().0,
                item.usage.day_count(),
            )
        })
        .join("\n");
    ensure!(!lines.is_empty(), "the selected calculations contain no appliances");
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::{
        appliance::{ApplianceUsage, Weekday, WeeksPerMonth},
        quantity::{power::Watts, rate::KilowattHourRate, time::Hours},
    };

    fn calculation(usages: Vec<ApplianceUsage>) -> SavedCalculation {
        SavedCalculation::builder()
            .usages(usages)
            .rate(KilowattHourRate(12.0))
            .created_at(Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap())
            .build()
            .unwrap()
    }

    fn usage(name: &str, watts: f64, hours: f64) -> ApplianceUsage {
        ApplianceUsage::builder()
            .name(name)
            .wattage(Watts(watts))
            .hours_per_day(Hours(hours))
            .days_per_week(Weekday::Monday | Weekday::Wednesday | Weekday::Friday)
            .weeks_per_month(WeeksPerMonth::MAX)
            .build()
            .unwrap()
    }

    #[test]
    fn one_line_per_appliance() -> Result {
        let calculations = [
            calculation(vec![usage("Electric fan", 75.0, 8.0)]),
            calculation(vec![usage("Rice cooker", 700.0, 1.5), usage("TV", 120.0, 4.0)]),
        ];
        assert_eq!(
            build_appliance_info(&calculations)?,
            "Electric fan: 75W, 8h/day, 3d/week\nRice cooker: 700W, 1.5h/day, 3d/week\nTV: 120W, \
             4h/day, 3d/week",
        );
        Ok(())
    }

    #[test]
    fn refuses_empty_selection() {
        assert!(build_appliance_info(&[]).is_err());
        assert!(build_appliance_info(&[calculation(vec![])]).is_err());
    }
}
