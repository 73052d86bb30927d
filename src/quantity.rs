#[macro_use]
mod macros;

pub mod cost;
pub mod energy;
pub mod percentage;
pub mod power;
pub mod rate;
pub mod time;

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::{
        cost::Cost,
        energy::KilowattHours,
        power::Watts,
        rate::KilowattHourRate,
        time::Hours,
    };

    #[test]
    fn test_min_max_clamp() {
        assert_eq!(Cost(1.0).min(Cost(2.0)), Cost(1.0));
        assert_eq!(Cost(2.0).max(Cost(1.0)), Cost(2.0));
        assert_eq!(Cost(-5.0).clamp(Cost::ZERO, Cost(3.0)), Cost::ZERO);
    }

    #[test]
    fn test_sum() {
        let total: KilowattHours = [KilowattHours(1.5), KilowattHours(2.5)].into_iter().sum();
        assert_abs_diff_eq!(total.0, 4.0);
    }

    #[test]
    fn test_energy_chain() {
        let energy = Watts(1500.0) * Hours(2.0);
        assert_abs_diff_eq!(energy.0, 3.0);
        let cost = energy * KilowattHourRate(12.0);
        assert_abs_diff_eq!(cost.0, 36.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Cost(288.0).to_string(), "₱288.00");
        assert_eq!(Cost(-1.5).to_string(), "-₱1.50");
        assert_eq!(KilowattHourRate(12.1901).to_string(), "₱12.1901/kWh");
        assert_eq!(format!("{:.1}", KilowattHours(150.0)), "150.0 kWh");
        assert_eq!(Watts(700.0).to_string(), "700 W");
    }
}
