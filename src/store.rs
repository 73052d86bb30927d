//! Per-user persistence of appliance sets, saved calculations, and bill predictions.

mod file;
mod id;

pub use self::{
    file::FileStore,
    id::{CalculationId, UserId},
};
use crate::{
    appliance::{ApplianceSet, ApplianceUsage},
    history::{BillPrediction, MonthKey, SavedCalculation},
    prelude::*,
};

/// Whether an existing record may be replaced.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Overwrite {
    #[default]
    Refused,

    Confirmed,
}

pub trait Store {
    /// Appliance sets in insertion order.
    fn appliance_sets(&self, user: &UserId) -> Result<Vec<ApplianceSet>>;

    fn appliance_set(&self, user: &UserId, name: &str) -> Result<Option<ApplianceSet>>;

    /// Create the set or replace the one with the same name, returning the replaced set.
    fn put_appliance_set(&mut self, user: &UserId, set: ApplianceSet)
    -> Result<Option<ApplianceSet>>;

    fn remove_appliance_set(&mut self, user: &UserId, name: &str) -> Result<ApplianceSet>;

    /// Remove a single appliance, refusing to leave the set empty.
    fn remove_appliance(
        &mut self,
        user: &UserId,
        set_name: &str,
        appliance_name: &str,
    ) -> Result<ApplianceUsage>;

    /// Saved calculations, newest first.
    fn calculations(&self, user: &UserId) -> Result<Vec<(CalculationId, SavedCalculation)>>;

    fn calculation(&self, user: &UserId, id: CalculationId) -> Result<Option<SavedCalculation>>;

    /// Persist the calculation unless an identical one is already saved.
    ///
    /// Fails with [`crate::error::DuplicateCalculationError`] in the latter case.
    fn insert_calculation(
        &mut self,
        user: &UserId,
        calculation: SavedCalculation,
    ) -> Result<CalculationId>;

    fn remove_calculation(&mut self, user: &UserId, id: CalculationId)
    -> Result<SavedCalculation>;

    /// Bill predictions, by month ascending.
    fn bill_predictions(&self, user: &UserId) -> Result<Vec<BillPrediction>>;

    fn bill_prediction(&self, user: &UserId, month: MonthKey) -> Result<Option<BillPrediction>>;

    /// Save the prediction under its month.
    ///
    /// Fails with [`crate::error::PredictionExistsError`] when the month already has one and
    /// overwriting is not confirmed.
    fn put_bill_prediction(
        &mut self,
        user: &UserId,
        prediction: BillPrediction,
        overwrite: Overwrite,
    ) -> Result<Option<BillPrediction>>;
}
