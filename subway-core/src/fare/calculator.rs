use super::config::{DEFAULT_BASE_FARE, FareConfig};
use super::policy::{AgeDiscountPolicy, DistanceSurchargePolicy};
use super::{Fare, FareApplier, FareContext};
use crate::routing::Path;
use crate::{Age, Amount, Error};

/// Ordered pipeline of fare appliers run over a base fare
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FareCalculator {
    base_fare: Amount,
    appliers: Vec<FareApplier>,
}

impl FareCalculator {
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when the base fare is zero, a
    /// policy is invalid, or a surcharge is placed after a discount.
    pub fn new(base_fare: Amount, appliers: Vec<FareApplier>) -> Result<Self, Error> {
        if base_fare == 0 {
            return Err(Error::InvalidConfiguration(
                "Base fare must be positive".to_string(),
            ));
        }

        if let Some(first_discount) = appliers.iter().position(FareApplier::is_discount) {
            if appliers[first_discount..]
                .iter()
                .any(|applier| !applier.is_discount())
            {
                return Err(Error::InvalidConfiguration(
                    "Surcharges must be applied before discounts".to_string(),
                ));
            }
        }

        for applier in &appliers {
            match applier {
                FareApplier::DistanceSurcharge(policies) => {
                    policies
                        .iter()
                        .try_for_each(DistanceSurchargePolicy::validate)?;
                }
                FareApplier::AgeDiscount(policies) => {
                    policies.iter().try_for_each(AgeDiscountPolicy::validate)?;
                }
                FareApplier::LineSurcharge => {}
            }
        }

        Ok(Self {
            base_fare,
            appliers,
        })
    }

    /// Standard pipeline: distance tiers, then line extra fare, then age discount
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when `config` is invalid.
    pub fn from_config(config: &FareConfig) -> Result<Self, Error> {
        Self::new(
            config.base_fare,
            vec![
                FareApplier::DistanceSurcharge(config.distance_policies.clone()),
                FareApplier::LineSurcharge,
                FareApplier::AgeDiscount(config.age_policies.clone()),
            ],
        )
    }

    pub fn base_fare(&self) -> Amount {
        self.base_fare
    }

    pub fn appliers(&self) -> &[FareApplier] {
        &self.appliers
    }

    pub fn calculate(&self, context: &FareContext<'_>) -> Fare {
        self.appliers
            .iter()
            .fold(Fare::new(self.base_fare), |fare, applier| {
                applier.apply(context, fare)
            })
    }

    pub fn fare_for_path(&self, path: &Path, age: Option<Age>) -> Fare {
        self.calculate(&FareContext {
            distance: path.distance(),
            lines: path.lines(),
            age,
        })
    }
}

impl Default for FareCalculator {
    fn default() -> Self {
        Self {
            base_fare: DEFAULT_BASE_FARE,
            appliers: vec![
                FareApplier::DistanceSurcharge(DistanceSurchargePolicy::standard()),
                FareApplier::LineSurcharge,
                FareApplier::AgeDiscount(AgeDiscountPolicy::standard()),
            ],
        }
    }
}
