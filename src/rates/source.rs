use async_trait::async_trait;

use crate::{history::MonthKey, prelude::*, quantity::rate::KilowattHourRate};

/// Predicted per-kWh rate for a month.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RatePrediction {
    pub rate: KilowattHourRate,

    /// Latest known actual rate for the same calendar month, if the source has one.
    pub reference: Option<(MonthKey, KilowattHourRate)>,

    pub seasonal_factor: Option<f64>,
}

#[async_trait]
pub trait RateSource: Sync {
    async fn predict_rate(&self, month: MonthKey) -> Result<RatePrediction>;
}
