use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    appliance::{ApplianceSet, ApplianceUsage},
    engine::ensure_unique,
    error::PredictionExistsError,
    history::{BillPrediction, MonthKey, SavedCalculation},
    prelude::*,
    store::{CalculationId, Overwrite, Store, UserId},
};

/// Store kept in a single TOML document, read on open and rewritten on [`FileStore::save`].
#[must_use]
pub struct FileStore {
    path: Option<PathBuf>,
    document: Document,
}

#[derive(Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    users: BTreeMap<UserId, UserData>,
}

#[derive(Default, Serialize, Deserialize)]
struct UserData {
    #[serde(default)]
    last_calculation_id: CalculationId,

    #[serde(default)]
    appliance_sets: Vec<ApplianceSet>,

    #[serde(default)]
    calculations: BTreeMap<CalculationId, SavedCalculation>,

    #[serde(default)]
    bill_predictions: BTreeMap<MonthKey, BillPrediction>,
}

impl FileStore {
    /// Open the store file, a missing file is an empty store.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        let document = match fs::read_to_string(path) {
            Ok(text) => toml::from_str(&text)
                .with_context(|| format!("failed to parse `{}`", path.display()))?,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                info!("no store yet, starting empty");
                Document::default()
            }
            Err(error) => {
                return Err(error).with_context(|| format!("failed to read `{}`", path.display()));
            }
        };
        debug!(n_users = document.users.len(), "opened");
        Ok(Self { path: Some(path.to_owned()), document })
    }

    /// Store that is never written anywhere.
    pub fn in_memory() -> Self {
        Self { path: None, document: Document::default() }
    }

    #[instrument(skip_all)]
    pub fn save(&self) -> Result {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let text = toml::to_string_pretty(&self.document).context("failed to serialize the store")?;
        fs::write(path, text).with_context(|| format!("failed to write `{}`", path.display()))?;
        info!(path = %path.display(), "saved");
        Ok(())
    }

    fn user(&self, user: &UserId) -> Option<&UserData> {
        self.document.users.get(user)
    }

    fn user_mut(&mut self, user: &UserId) -> &mut UserData {
        self.document.users.entry(user.clone()).or_default()
    }

    fn set_mut(&mut self, user: &UserId, name: &str) -> Result<&mut ApplianceSet> {
        self.user_mut(user)
            .appliance_sets
            .iter_mut()
            .find(|set| set.name() == name)
            .with_context(|| format!("appliance set `{name}` not found"))
    }
}

impl Store for FileStore {
    fn appliance_sets(&self, user: &UserId) -> Result<Vec<ApplianceSet>> {
        Ok(self.user(user).map(|data| data.appliance_sets.clone()).unwrap_or_default())
    }

    fn appliance_set(&self, user: &UserId, name: &str) -> Result<Option<ApplianceSet>> {
        Ok(self
            .user(user)
            .and_then(|data| data.appliance_sets.iter().find(|set| set.name() == name))
            .cloned())
    }

    #[instrument(skip_all, fields(user = %user, set = set.name()))]
    fn put_appliance_set(
        &mut self,
        user: &UserId,
        set: ApplianceSet,
    ) -> Result<Option<ApplianceSet>> {
        ensure!(!set.is_empty(), "appliance set `{}` has no appliances", set.name());
        let sets = &mut self.user_mut(user).appliance_sets;
        if let Some(existing) = sets.iter_mut().find(|existing| existing.name() == set.name()) {
            info!("replacing");
            Ok(Some(std::mem::replace(existing, set)))
        } else {
            info!(n_appliances = set.len(), "adding");
            sets.push(set);
            Ok(None)
        }
    }

    #[instrument(skip_all, fields(user = %user, set = name))]
    fn remove_appliance_set(&mut self, user: &UserId, name: &str) -> Result<ApplianceSet> {
        let sets = &mut self.user_mut(user).appliance_sets;
        let index = sets
            .iter()
            .position(|set| set.name() == name)
            .with_context(|| format!("appliance set `{name}` not found"))?;
        info!("removing");
        Ok(sets.remove(index))
    }

    #[instrument(skip_all, fields(user = %user, set = set_name, appliance = appliance_name))]
    fn remove_appliance(
        &mut self,
        user: &UserId,
        set_name: &str,
        appliance_name: &str,
    ) -> Result<ApplianceUsage> {
        let set = self.set_mut(user, set_name)?;
        ensure!(
            set.get(appliance_name).is_some(),
            "appliance `{appliance_name}` not found in `{set_name}`",
        );
        ensure!(
            set.len() > 1,
            "`{appliance_name}` is the last appliance of `{set_name}`, remove the set instead",
        );
        info!("removing");
        set.remove(appliance_name).context("appliance disappeared")
    }

    fn calculations(&self, user: &UserId) -> Result<Vec<(CalculationId, SavedCalculation)>> {
        let Some(data) = self.user(user) else {
            return Ok(Vec::new());
        };
        let mut calculations = data
            .calculations
            .iter()
            .map(|(id, calculation)| (*id, calculation.clone()))
            .collect::<Vec<_>>();
        calculations.sort_by(|(lhs_id, lhs), (rhs_id, rhs)| {
            rhs.created_at().cmp(&lhs.created_at()).then_with(|| rhs_id.cmp(lhs_id))
        });
        Ok(calculations)
    }

    fn calculation(&self, user: &UserId, id: CalculationId) -> Result<Option<SavedCalculation>> {
        Ok(self.user(user).and_then(|data| data.calculations.get(&id)).cloned())
    }

    #[instrument(skip_all, fields(user = %user, fingerprint = %calculation.fingerprint()))]
    fn insert_calculation(
        &mut self,
        user: &UserId,
        calculation: SavedCalculation,
    ) -> Result<CalculationId> {
        let data = self.user_mut(user);
        ensure_unique(
            calculation.fingerprint(),
            data.calculations.values().map(SavedCalculation::fingerprint),
        )?;
        let id = data.last_calculation_id.next();
        data.last_calculation_id = id;
        data.calculations.insert(id, calculation);
        info!(%id, "inserted");
        Ok(id)
    }

    #[instrument(skip_all, fields(user = %user, id = %id))]
    fn remove_calculation(
        &mut self,
        user: &UserId,
        id: CalculationId,
    ) -> Result<SavedCalculation> {
        let calculation = self
            .user_mut(user)
            .calculations
            .remove(&id)
            .with_context(|| format!("calculation #{id} not found"))?;
        info!("removed");
        Ok(calculation)
    }

    fn bill_predictions(&self, user: &UserId) -> Result<Vec<BillPrediction>> {
        Ok(self
            .user(user)
            .map(|data| data.bill_predictions.values().cloned().collect())
            .unwrap_or_default())
    }

    fn bill_prediction(&self, user: &UserId, month: MonthKey) -> Result<Option<BillPrediction>> {
        Ok(self.user(user).and_then(|data| data.bill_predictions.get(&month)).cloned())
    }

    #[instrument(skip_all, fields(user = %user, month = %prediction.month))]
    fn put_bill_prediction(
        &mut self,
        user: &UserId,
        prediction: BillPrediction,
        overwrite: Overwrite,
    ) -> Result<Option<BillPrediction>> {
        let month = prediction.month;
        let predictions = &mut self.user_mut(user).bill_predictions;
        if predictions.contains_key(&month) && overwrite != Overwrite::Confirmed {
            return Err(PredictionExistsError { month }.into());
        }
        let replaced = predictions.insert(month, prediction);
        info!(replaced = replaced.is_some(), "saved");
        Ok(replaced)
    }
}
