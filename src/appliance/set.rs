use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{appliance::ApplianceUsage, error::ValidationError, quantity::energy::KilowattHours};

/// Named collection of appliances, the name is unique per user.
#[must_use]
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawApplianceSet", into = "RawApplianceSet")]
pub struct ApplianceSet {
    name: String,
    appliances: Vec<ApplianceUsage>,
}

impl ApplianceSet {
    pub fn new(
        name: impl Into<String>,
        appliances: Vec<ApplianceUsage>,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_owned();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if let Some(duplicate) = appliances.iter().map(ApplianceUsage::name).duplicates().next() {
            return Err(ValidationError::DuplicateAppliance(duplicate.to_owned()));
        }
        Ok(Self { name, appliances })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn appliances(&self) -> &[ApplianceUsage] {
        &self.appliances
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.appliances.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.appliances.is_empty()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ApplianceUsage> {
        self.appliances.iter().find(|usage| usage.name() == name)
    }

    /// Replace the appliance with the same name in place, or append it.
    ///
    /// Returns the replaced record.
    pub fn upsert(&mut self, usage: ApplianceUsage) -> Option<ApplianceUsage> {
        match self.appliances.iter_mut().find(|existing| existing.name() == usage.name()) {
            Some(existing) => Some(std::mem::replace(existing, usage)),
            None => {
                self.appliances.push(usage);
                None
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<ApplianceUsage> {
        let index = self.appliances.iter().position(|usage| usage.name() == name)?;
        Some(self.appliances.remove(index))
    }

    /// Total monthly energy of all the appliances.
    pub fn monthly_energy(&self) -> KilowattHours {
        self.appliances.iter().map(ApplianceUsage::monthly_energy).sum()
    }
}

#[derive(Serialize, Deserialize)]
struct RawApplianceSet {
    name: String,

    #[serde(default)]
    appliances: Vec<ApplianceUsage>,
}

impl TryFrom<RawApplianceSet> for ApplianceSet {
    type Error = ValidationError;

    fn try_from(raw: RawApplianceSet) -> Result<Self, Self::Error> {
        Self::new(raw.name, raw.appliances)
    }
}

impl From<ApplianceSet> for RawApplianceSet {
    fn from(set: ApplianceSet) -> Self {
        Self { name: set.name, appliances: set.appliances }
    }
}
