//! Distance tiers and age brackets used by the fare appliers

use serde::{Deserialize, Serialize};

use super::Discount;
use crate::{Age, Amount, Distance, Error};

/// Surcharge for the part of a trip that falls into `(lower, upper]` km,
/// charged `unit_fare` for every started `unit_distance` km.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceSurchargePolicy {
    pub lower: Distance,
    /// Open ended when absent
    #[serde(default)]
    pub upper: Option<Distance>,
    pub unit_distance: Distance,
    pub unit_fare: Amount,
}

impl DistanceSurchargePolicy {
    /// Tiers of the standard fare table: +100 per 5 km between 10 and 50 km,
    /// +100 per 8 km beyond 50 km.
    pub fn standard() -> Vec<Self> {
        vec![
            Self {
                lower: 10,
                upper: Some(50),
                unit_distance: 5,
                unit_fare: 100,
            },
            Self {
                lower: 50,
                upper: None,
                unit_distance: 8,
                unit_fare: 100,
            },
        ]
    }

    /// A tier applies once the trip goes past its lower bound
    pub fn is_applicable(&self, distance: Distance) -> bool {
        distance > self.lower
    }

    pub fn surcharge(&self, distance: Distance) -> Amount {
        if !self.is_applicable(distance) || self.unit_distance == 0 {
            return 0;
        }

        let capped = self.upper.map_or(distance, |upper| distance.min(upper));
        if capped <= self.lower {
            return 0;
        }
        let units = (capped - self.lower).div_ceil(self.unit_distance);
        units.saturating_mul(self.unit_fare)
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for a zero unit distance or an
    /// empty range.
    pub fn validate(&self) -> Result<(), Error> {
        if self.unit_distance == 0 {
            return Err(Error::InvalidConfiguration(format!(
                "Distance tier starting at {} km has a zero unit distance",
                self.lower
            )));
        }
        if let Some(upper) = self.upper {
            if upper <= self.lower {
                return Err(Error::InvalidConfiguration(format!(
                    "Distance tier upper bound {upper} km must exceed its lower bound {} km",
                    self.lower
                )));
            }
        }
        Ok(())
    }
}

/// Tiers from `policies` that apply to a trip of `distance` km
pub fn applicable_policies(
    policies: &[DistanceSurchargePolicy],
    distance: Distance,
) -> impl Iterator<Item = &DistanceSurchargePolicy> {
    policies
        .iter()
        .filter(move |policy| policy.is_applicable(distance))
}

/// Discount for riders aged `min_age..=max_age`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeDiscountPolicy {
    pub min_age: Age,
    pub max_age: Age,
    pub deduction: Amount,
    pub percent: u8,
}

impl AgeDiscountPolicy {
    /// Children (6-12) and youth (13-18) of the standard fare table
    pub fn standard() -> Vec<Self> {
        vec![
            Self {
                min_age: 6,
                max_age: 12,
                deduction: 350,
                percent: 50,
            },
            Self {
                min_age: 13,
                max_age: 18,
                deduction: 350,
                percent: 20,
            },
        ]
    }

    pub fn contains(&self, age: Age) -> bool {
        (self.min_age..=self.max_age).contains(&age)
    }

    pub fn discount(&self) -> Discount {
        Discount {
            deduction: self.deduction,
            percent: self.percent,
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for an inverted bracket or a
    /// share above 100 %.
    pub fn validate(&self) -> Result<(), Error> {
        if self.min_age > self.max_age {
            return Err(Error::InvalidConfiguration(format!(
                "Age bracket {}-{} is inverted",
                self.min_age, self.max_age
            )));
        }
        if self.percent > 100 {
            return Err(Error::InvalidConfiguration(format!(
                "Age bracket {}-{} discounts {}%",
                self.min_age, self.max_age, self.percent
            )));
        }
        Ok(())
    }
}
