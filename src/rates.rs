mod historical;
mod source;

pub use self::{
    historical::{HistoricalRate, HistoricalRates, YearlySummary},
    source::{RatePrediction, RateSource},
};
