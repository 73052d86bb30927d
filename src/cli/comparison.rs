use kuryente::{
    engine::{CostComparison, RateComparison},
    error::DivisionByZeroError,
    prelude::*,
    quantity::{cost::Cost, rate::KilowattHourRate},
};

const fn direction(is_higher: bool) -> &'static str {
    if is_higher { "higher" } else { "lower" }
}

pub fn print_cost_comparison(
    total: Cost,
    reference: Cost,
    label: &str,
    comparison: Result<CostComparison, DivisionByZeroError>,
) {
    match comparison {
        Ok(comparison) => println!(
            "{total:.2} is {:.2} ({:.1}) {} than {label} of {reference:.2}",
            comparison.difference,
            comparison.percent_difference,
            direction(comparison.is_higher),
        ),
        Err(error) => warn!(label, "{error}"),
    }
}

pub fn print_rate_comparison(
    rate: KilowattHourRate,
    reference: KilowattHourRate,
    label: &str,
    comparison: Result<RateComparison, DivisionByZeroError>,
) {
    match comparison {
        Ok(comparison) => println!(
            "{rate} differs by {:.1} from {label} of {reference}, it is {}",
            comparison.percent_difference,
            direction(comparison.is_higher),
        ),
        Err(error) => warn!(label, "{error}"),
    }
}
