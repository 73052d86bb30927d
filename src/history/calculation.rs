use std::fmt::Display;

use bon::bon;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    appliance::ApplianceUsage,
    engine::{
        AggregateTotals,
        CostBreakdown,
        Fingerprint,
        aggregate,
        compute_breakdown,
        derive_calculation_fingerprint,
    },
    error::ValidationError,
    quantity::{cost::Cost, rate::KilowattHourRate},
};

/// Lowest average monthly bill a user may declare.
pub const MINIMUM_MONTHLY_BILL: Cost = Cost(500.0);

#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculationItem {
    pub usage: ApplianceUsage,
    pub breakdown: CostBreakdown,
}

/// Immutable snapshot of a priced appliance list.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedCalculation {
    items: Vec<CalculationItem>,
    totals: AggregateTotals,
    rate: KilowattHourRate,
    created_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,

    /// Average monthly bill the user declared for reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    monthly_bill: Option<Cost>,

    fingerprint: Fingerprint,
}

#[bon]
impl SavedCalculation {
    #[builder]
    pub fn new(
        usages: Vec<ApplianceUsage>,
        rate: KilowattHourRate,
        created_at: DateTime<Utc>,
        #[builder(into)] name: Option<String>,
        monthly_bill: Option<Cost>,
    ) -> Result<Self, ValidationError> {
        if let Some(monthly_bill) = monthly_bill
            && (!monthly_bill.is_finite() || monthly_bill < MINIMUM_MONTHLY_BILL)
        {
            return Err(ValidationError::MonthlyBillTooLow {
                minimum: MINIMUM_MONTHLY_BILL,
                actual: monthly_bill,
            });
        }
        let items = usages
            .into_iter()
            .map(|usage| {
                let breakdown = compute_breakdown(&usage, rate)?;
                Ok(CalculationItem { usage, breakdown })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;
        let totals = aggregate(items.iter().map(|item| &item.breakdown));
        let fingerprint = derive_calculation_fingerprint(
            &items.iter().map(|item| item.usage.clone()).collect::<Vec<_>>(),
            totals.per_month,
        );
        let name = name.map(|name| name.trim().to_owned()).filter(|name| !name.is_empty());
        Ok(Self { items, totals, rate, created_at, name, monthly_bill, fingerprint })
    }
}

impl SavedCalculation {
    pub fn items(&self) -> &[CalculationItem] {
        &self.items
    }

    pub const fn totals(&self) -> AggregateTotals {
        self.totals
    }

    /// Monthly total, the figure calculations are compared by.
    pub const fn total_cost(&self) -> Cost {
        self.totals.per_month
    }

    pub const fn rate(&self) -> KilowattHourRate {
        self.rate
    }

    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub const fn monthly_bill(&self) -> Option<Cost> {
        self.monthly_bill
    }

    pub const fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    /// User-supplied name, or one derived from the appliances.
    pub fn display_name(&self, id: impl Display) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        match self.items.as_slice() {
            [] => format!("Calculation ({id})"),
            [only] => only.usage.name().to_owned(),
            [first, rest @ ..] => {
                let plural = if rest.len() == 1 { "" } else { "s" };
                format!("{} + {} Appliance{plural}", first.usage.name(), rest.len())
            }
        }
    }

    /// Whether the stored breakdowns, totals, and fingerprint still agree with the stored usages.
    pub fn is_consistent(&self) -> bool {
        let breakdowns_match = self.items.iter().all(|item| {
            compute_breakdown(&item.usage, self.rate)
                .is_ok_and(|breakdown| approximately_equal(&breakdown, &item.breakdown))
        });
        let totals = aggregate(self.items.iter().map(|item| &item.breakdown));
        let usages = self.items.iter().map(|item| item.usage.clone()).collect::<Vec<_>>();
        breakdowns_match
            && approximately_equal(&totals, &self.totals)
            && derive_calculation_fingerprint(&usages, self.totals.per_month) == self.fingerprint
    }
}

fn approximately_equal(lhs: &CostBreakdown, rhs: &CostBreakdown) -> bool {
    [
        (lhs.per_hour, rhs.per_hour),
        (lhs.per_day, rhs.per_day),
        (lhs.per_week, rhs.per_week),
        (lhs.per_month, rhs.per_month),
    ]
    .into_iter()
    .all(|(lhs, rhs)| (lhs - rhs).abs().0 <= 1e-9 * lhs.abs().0.max(rhs.abs().0).max(1.0))
}
