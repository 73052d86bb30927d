use bon::bon;
use enumset::EnumSet;
use serde::{Deserialize, Serialize};

use crate::{
    appliance::{Weekday, WeeksPerMonth},
    error::ValidationError,
    quantity::{energy::KilowattHours, power::Watts, time::Hours},
};

/// Operating profile of a single appliance.
///
/// Only constructible through the validating builder, deserialization included.
#[must_use]
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawApplianceUsage", into = "RawApplianceUsage")]
pub struct ApplianceUsage {
    name: String,
    wattage: Watts,
    hours_per_day: Hours,
    days_per_week: EnumSet<Weekday>,
    weeks_per_month: WeeksPerMonth,
    quantity: u32,
}

#[bon]
impl ApplianceUsage {
    #[builder]
    pub fn new(
        #[builder(into)] name: String,
        wattage: Watts,
        hours_per_day: Hours,
        days_per_week: EnumSet<Weekday>,
        weeks_per_month: WeeksPerMonth,
        #[builder(default = 1)] quantity: u32,
    ) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !wattage.is_finite() || wattage <= Watts::ZERO {
            return Err(ValidationError::NonPositiveWattage(wattage));
        }
        if !hours_per_day.is_finite()
            || hours_per_day <= Hours::ZERO
            || hours_per_day > Hours::PER_DAY
        {
            return Err(ValidationError::HoursPerDayOutOfRange(hours_per_day));
        }
        if days_per_week.is_empty() {
            return Err(ValidationError::NoDaysSelected);
        }
        if quantity == 0 {
            return Err(ValidationError::ZeroQuantity);
        }
        Ok(Self {
            name: name.to_owned(),
            wattage,
            hours_per_day,
            days_per_week,
            weeks_per_month,
            quantity,
        })
    }
}

impl ApplianceUsage {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn wattage(&self) -> Watts {
        self.wattage
    }

    pub const fn hours_per_day(&self) -> Hours {
        self.hours_per_day
    }

    pub const fn days_per_week(&self) -> EnumSet<Weekday> {
        self.days_per_week
    }

    /// Number of selected days, `1..=7`.
    #[expect(clippy::cast_possible_truncation)]
    pub fn day_count(&self) -> u32 {
        self.days_per_week.len() as u32
    }

    pub const fn weeks_per_month(&self) -> WeeksPerMonth {
        self.weeks_per_month
    }

    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Energy all units draw in one hour of operation.
    pub fn hourly_energy(&self) -> KilowattHours {
        self.wattage * Hours::ONE * f64::from(self.quantity)
    }

    /// Energy all units draw in a month.
    pub fn monthly_energy(&self) -> KilowattHours {
        self.hourly_energy()
            * self.hours_per_day.0
            * f64::from(self.day_count())
            * f64::from(self.weeks_per_month.get())
    }
}

/// Stored shape, field names follow the appliance form.
#[derive(Serialize, Deserialize)]
struct RawApplianceUsage {
    name: String,

    #[serde(rename = "watt")]
    wattage: Watts,

    #[serde(rename = "hours")]
    hours_per_day: Hours,

    #[serde(rename = "days")]
    days_per_week: Vec<Weekday>,

    #[serde(rename = "weeks")]
    weeks_per_month: WeeksPerMonth,

    #[serde(rename = "quant", default = "RawApplianceUsage::default_quantity")]
    quantity: u32,
}

impl RawApplianceUsage {
    const fn default_quantity() -> u32 {
        1
    }
}

impl TryFrom<RawApplianceUsage> for ApplianceUsage {
    type Error = ValidationError;

    fn try_from(raw: RawApplianceUsage) -> Result<Self, Self::Error> {
        Self::builder()
            .name(raw.name)
            .wattage(raw.wattage)
            .hours_per_day(raw.hours_per_day)
            .days_per_week(raw.days_per_week.into_iter().collect())
            .weeks_per_month(raw.weeks_per_month)
            .quantity(raw.quantity)
            .build()
    }
}

impl From<ApplianceUsage> for RawApplianceUsage {
    fn from(usage: ApplianceUsage) -> Self {
        Self {
            name: usage.name,
            wattage: usage.wattage,
            hours_per_day: usage.hours_per_day,
            days_per_week: usage.days_per_week.iter().collect(),
            weeks_per_month: usage.weeks_per_month,
            quantity: usage.quantity,
        }
    }
}
