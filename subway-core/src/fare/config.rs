use std::path::Path;

use serde::{Deserialize, Serialize};

use super::policy::{AgeDiscountPolicy, DistanceSurchargePolicy};
use crate::{Amount, Error};

pub const DEFAULT_BASE_FARE: Amount = 1250;

/// Fare tables, deserializable from JSON or any other serde format.
/// Missing fields fall back to the standard tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FareConfig {
    pub base_fare: Amount,
    pub distance_policies: Vec<DistanceSurchargePolicy>,
    pub age_policies: Vec<AgeDiscountPolicy>,
}

impl Default for FareConfig {
    fn default() -> Self {
        Self {
            base_fare: DEFAULT_BASE_FARE,
            distance_policies: DistanceSurchargePolicy::standard(),
            age_policies: AgeDiscountPolicy::standard(),
        }
    }
}

impl FareConfig {
    /// # Errors
    ///
    /// Returns [`Error::Json`] for malformed input and
    /// [`Error::InvalidConfiguration`] for invalid tables.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Fails if the file cannot be read or as [`FareConfig::from_json_str`] does.
    pub fn from_json_file(path: &Path) -> Result<Self, Error> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("Failed to open file '{}': {}", path.display(), e),
            )
        })?;
        Self::from_json_str(&json)
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] describing the first problem found.
    pub fn validate(&self) -> Result<(), Error> {
        if self.base_fare == 0 {
            return Err(Error::InvalidConfiguration(
                "Base fare must be positive".to_string(),
            ));
        }
        self.distance_policies
            .iter()
            .try_for_each(DistanceSurchargePolicy::validate)?;
        self.age_policies
            .iter()
            .try_for_each(AgeDiscountPolicy::validate)
    }
}
