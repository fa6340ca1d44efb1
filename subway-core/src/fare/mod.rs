//! Fare computation
//!
//! A [`FareCalculator`] starts from the base fare and runs an ordered list of
//! [`FareApplier`]s over it. Surcharges (distance tiers, line extra fare) are
//! added first, age discounts are applied to their sum.

mod applier;
mod calculator;
pub mod config;
pub mod policy;
mod value;

pub use applier::{FareApplier, FareContext};
pub use calculator::FareCalculator;
pub use config::FareConfig;
pub use policy::{AgeDiscountPolicy, DistanceSurchargePolicy};
pub use value::{Discount, Fare, SurchargeKind};
