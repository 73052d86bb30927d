use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    appliance::ApplianceSet,
    engine::{BillRange, estimate_bill_range},
    error::ValidationError,
    history::MonthKey,
    quantity::{energy::KilowattHours, rate::KilowattHourRate},
};

/// Forecast of one calendar month's bill.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BillPrediction {
    pub month: MonthKey,

    /// Names of the appliance sets the energy was summed over.
    pub appliance_sets: Vec<String>,

    #[serde(rename = "total_kwh")]
    pub total_energy: KilowattHours,

    pub predicted_rate: KilowattHourRate,
    pub margin: KilowattHourRate,
    pub estimated_bill: BillRange,
    pub created_at: DateTime<Utc>,
}

impl BillPrediction {
    /// Sum the monthly energy of the sets and price it at the predicted rate.
    pub fn estimate<'a>(
        month: MonthKey,
        appliance_sets: impl IntoIterator<Item = &'a ApplianceSet>,
        predicted_rate: KilowattHourRate,
        margin: KilowattHourRate,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let (names, total_energy) = appliance_sets.into_iter().fold(
            (Vec::new(), KilowattHours::ZERO),
            |(mut names, total_energy), set| {
                names.push(set.name().to_owned());
                (names, total_energy + set.monthly_energy())
            },
        );
        if names.is_empty() {
            return Err(ValidationError::MissingField("appliance sets"));
        }
        let estimated_bill = estimate_bill_range(total_energy, predicted_rate, margin)?;
        Ok(Self {
            month,
            appliance_sets: names,
            total_energy,
            predicted_rate,
            margin,
            estimated_bill,
            created_at,
        })
    }
}
