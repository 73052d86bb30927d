use derive_more::Display;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    appliance::ApplianceUsage,
    error::DuplicateCalculationError,
    quantity::cost::Cost,
};

/// Stable identity of a calculation's inputs and result, used to detect duplicate saves.
#[derive(Clone, Debug, Display, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Digest the cost-relevant fields of the usages and the total in centavos.
///
/// Floats are encoded by their bit patterns and names are length-prefixed, so distinct inputs
/// never produce the same canonical text. The encoded usages are sorted before joining, so the
/// order of the list does not matter even when names repeat.
pub fn derive_calculation_fingerprint(usages: &[ApplianceUsage], total_cost: Cost) -> Fingerprint {
    let segments = usages.iter().map(encode_usage).sorted();
    let canonical = format!("{};total:{}", itertools::join(segments, ";"), total_cost.as_cents());
    Fingerprint(format!("{:x}", md5::compute(canonical.as_bytes())))
}

fn encode_usage(usage: &ApplianceUsage) -> String {
    format!(
        "{}:{}|{:016x}|{:016x}|{}|{}|{}",
        usage.name().len(),
        usage.name(),
        usage.wattage().0.to_bits(),
        usage.hours_per_day().0.to_bits(),
        usage.day_count(),
        usage.weeks_per_month().get(),
        usage.quantity(),
    )
}

/// Fail when the fingerprint is among the already saved ones.
pub fn ensure_unique<'a>(
    fingerprint: &Fingerprint,
    existing: impl IntoIterator<Item = &'a Fingerprint>,
) -> Result<(), DuplicateCalculationError> {
    if existing.into_iter().any(|saved| saved == fingerprint) {
        Err(DuplicateCalculationError { fingerprint: fingerprint.clone() })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use enumset::EnumSet;

    use super::*;
    use crate::{
        appliance::{Weekday, WeeksPerMonth},
        quantity::{power::Watts, time::Hours},
    };

    fn usage(name: &str) -> ApplianceUsage {
        ApplianceUsage::builder()
            .name(name)
            .wattage(Watts(100.0))
            .hours_per_day(Hours(2.0))
            .days_per_week(Weekday::Monday | Weekday::Friday)
            .weeks_per_month(WeeksPerMonth::MAX)
            .build()
            .unwrap()
    }

    fn modified(f: impl FnOnce(&mut crate::appliance::ApplianceEntry)) -> ApplianceUsage {
        let mut entry = crate::appliance::ApplianceEntry::from(&usage("Fan"));
        f(&mut entry);
        entry.complete().unwrap()
    }

    #[test]
    fn stable_across_calls() {
        let usages = [usage("Fan"), usage("TV")];
        assert_eq!(
            derive_calculation_fingerprint(&usages, Cost(100.0)),
            derive_calculation_fingerprint(&usages, Cost(100.0)),
        );
        assert_eq!(derive_calculation_fingerprint(&usages, Cost(100.0)).as_str().len(), 32);
    }

    #[test]
    fn invariant_under_permutation() {
        let forward = [usage("Fan"), usage("TV"), usage("Lamp")];
        let backward = [usage("Lamp"), usage("TV"), usage("Fan")];
        assert_eq!(
            derive_calculation_fingerprint(&forward, Cost(12.34)),
            derive_calculation_fingerprint(&backward, Cost(12.34)),
        );
    }

    #[test]
    fn invariant_under_permutation_of_same_named_usages() {
        let small = modified(|entry| entry.wattage = Some(Watts(100.0)));
        let large = modified(|entry| entry.wattage = Some(Watts(200.0)));
        assert_eq!(
            derive_calculation_fingerprint(&[small.clone(), large.clone()], Cost(10.0)),
            derive_calculation_fingerprint(&[large, small], Cost(10.0)),
        );
    }

    #[test]
    fn sensitive_to_every_field() {
        let base = derive_calculation_fingerprint(&[usage("Fan")], Cost(10.0));
        let variants = [
            modified(|entry| entry.name = Some("Fans".to_owned())),
            modified(|entry| entry.wattage = Some(Watts(101.0))),
            modified(|entry| entry.hours_per_day = Some(Hours(2.5))),
            modified(|entry| entry.days_per_week = EnumSet::all()),
            modified(|entry| entry.weeks_per_month = WeeksPerMonth::try_from(3_u32).ok()),
            modified(|entry| entry.quantity = Some(2)),
        ];
        for variant in variants {
            assert_ne!(derive_calculation_fingerprint(&[variant], Cost(10.0)), base);
        }
        assert_ne!(derive_calculation_fingerprint(&[usage("Fan")], Cost(10.01)), base);
    }

    #[test]
    fn total_is_compared_in_centavos() {
        let usages = [usage("Fan")];
        assert_eq!(
            derive_calculation_fingerprint(&usages, Cost(10.001)),
            derive_calculation_fingerprint(&usages, Cost(10.0)),
        );
    }

    #[test]
    fn names_do_not_bleed_into_each_other() {
        assert_ne!(
            derive_calculation_fingerprint(&[usage("A"), usage("B|C")], Cost::ZERO),
            derive_calculation_fingerprint(&[usage("A|B"), usage("C")], Cost::ZERO),
        );
    }

    #[test]
    fn ensure_unique_ok() {
        let fingerprint = derive_calculation_fingerprint(&[usage("Fan")], Cost(1.0));
        let other = derive_calculation_fingerprint(&[usage("TV")], Cost(1.0));
        assert!(ensure_unique(&fingerprint, [&other]).is_ok());
        assert_eq!(
            ensure_unique(&fingerprint, [&other, &fingerprint]),
            Err(DuplicateCalculationError { fingerprint: fingerprint.clone() }),
        );
    }
}
