use enumset::EnumSet;

use crate::{
    appliance::{ApplianceUsage, Weekday, WeeksPerMonth},
    error::ValidationError,
    quantity::{power::Watts, time::Hours},
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EntryStatus {
    /// Some required field is missing or invalid, the entry is not priced.
    Incomplete,

    Completed,
}

/// Appliance entry while it is being filled in.
///
/// Any field may be cleared again, which turns a completed entry back into an incomplete one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApplianceEntry {
    pub name: Option<String>,
    pub wattage: Option<Watts>,
    pub hours_per_day: Option<Hours>,
    pub days_per_week: EnumSet<Weekday>,
    pub weeks_per_month: Option<WeeksPerMonth>,

    /// Defaults to one unit.
    pub quantity: Option<u32>,
}

impl ApplianceEntry {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Self::default() }
    }

    pub fn status(&self) -> EntryStatus {
        if self.complete().is_ok() { EntryStatus::Completed } else { EntryStatus::Incomplete }
    }

    /// Validate the entry into a usage record.
    pub fn complete(&self) -> Result<ApplianceUsage, ValidationError> {
        ApplianceUsage::builder()
            .name(self.name.clone().ok_or(ValidationError::MissingField("name"))?)
            .wattage(self.wattage.ok_or(ValidationError::MissingField("wattage"))?)
            .hours_per_day(self.hours_per_day.ok_or(ValidationError::MissingField("hours"))?)
            .days_per_week(self.days_per_week)
            .weeks_per_month(self.weeks_per_month.ok_or(ValidationError::MissingField("weeks"))?)
            .maybe_quantity(self.quantity)
            .build()
    }
}

impl From<&ApplianceUsage> for ApplianceEntry {
    fn from(usage: &ApplianceUsage) -> Self {
        Self {
            name: Some(usage.name().to_owned()),
            wattage: Some(usage.wattage()),
            hours_per_day: Some(usage.hours_per_day()),
            days_per_week: usage.days_per_week(),
            weeks_per_month: Some(usage.weeks_per_month()),
            quantity: Some(usage.quantity()),
        }
    }
}

/// Usage records of the completed entries, incomplete ones are skipped.
pub fn completed_usages(entries: &[ApplianceEntry]) -> impl Iterator<Item = ApplianceUsage> + '_ {
    entries.iter().filter_map(|entry| entry.complete().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed_entry() -> ApplianceEntry {
        ApplianceEntry {
            wattage: Some(Watts(1000.0)),
            hours_per_day: Some(Hours(2.0)),
            days_per_week: Weekday::Monday | Weekday::Wednesday | Weekday::Friday,
            weeks_per_month: Some(WeeksPerMonth::MAX),
            ..ApplianceEntry::named("Aircon")
        }
    }

    #[test]
    fn new_entry_is_incomplete() {
        let entry = ApplianceEntry::named("Aircon");
        assert_eq!(entry.status(), EntryStatus::Incomplete);
        assert_eq!(entry.complete(), Err(ValidationError::MissingField("wattage")));
    }

    #[test]
    fn filled_entry_is_completed() {
        let entry = completed_entry();
        assert_eq!(entry.status(), EntryStatus::Completed);
        assert_eq!(entry.complete().unwrap().quantity(), 1);
    }

    #[test]
    fn clearing_a_field_reverts_to_incomplete() {
        let mut entry = completed_entry();
        entry.hours_per_day = None;
        assert_eq!(entry.status(), EntryStatus::Incomplete);
        entry.hours_per_day = Some(Hours(3.0));
        entry.days_per_week.clear();
        assert_eq!(entry.complete(), Err(ValidationError::NoDaysSelected));
    }

    #[test]
    fn completed_usages_skips_incomplete_entries() {
        let entries = [completed_entry(), ApplianceEntry::named("Fan"), ApplianceEntry::default()];
        let usages: Vec<_> = completed_usages(&entries).collect();
        assert_eq!(usages.len(), 1);
        assert_eq!(usages[0].name(), "Aircon");
    }

    #[test]
    fn round_trip_through_usage() {
        let usage = completed_entry().complete().unwrap();
        assert_eq!(ApplianceEntry::from(&usage).complete().unwrap(), usage);
    }
}
