use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Amount;

/// Source of a surcharge on top of the base fare
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurchargeKind {
    Distance,
    Line,
}

/// Reduction granted to a rider: `deduction` is subtracted first, then
/// `percent` of the remainder is taken off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    pub deduction: Amount,
    pub percent: u8,
}

impl Discount {
    /// Amount taken off `gross`, rounded down
    pub fn amount_off(&self, gross: Amount) -> Amount {
        let discountable = u64::from(gross.saturating_sub(self.deduction));
        let off = discountable * u64::from(self.percent.min(100)) / 100;
        // never more than `gross`
        Amount::try_from(off).unwrap_or(gross)
    }
}

/// Price of a journey, broken down into its parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fare {
    base: Amount,
    surcharges: BTreeMap<SurchargeKind, Amount>,
    discount: Option<Discount>,
}

impl Fare {
    pub fn new(base: Amount) -> Self {
        Self {
            base,
            surcharges: BTreeMap::new(),
            discount: None,
        }
    }

    /// Adds `amount` to the surcharge of the given kind
    #[must_use]
    pub fn with_surcharge(mut self, kind: SurchargeKind, amount: Amount) -> Self {
        if amount > 0 {
            let entry = self.surcharges.entry(kind).or_insert(0);
            *entry = entry.saturating_add(amount);
        }
        self
    }

    #[must_use]
    pub fn with_discount(mut self, discount: Discount) -> Self {
        self.discount = Some(discount);
        self
    }

    pub fn base(&self) -> Amount {
        self.base
    }

    pub fn surcharges(&self) -> &BTreeMap<SurchargeKind, Amount> {
        &self.surcharges
    }

    pub fn surcharge(&self, kind: SurchargeKind) -> Amount {
        self.surcharges.get(&kind).copied().unwrap_or(0)
    }

    pub fn discount(&self) -> Option<Discount> {
        self.discount
    }

    /// Base fare plus every surcharge
    pub fn gross(&self) -> Amount {
        self.surcharges
            .values()
            .fold(self.base, |total, &surcharge| total.saturating_add(surcharge))
    }

    pub fn discount_amount(&self) -> Amount {
        self.discount
            .map_or(0, |discount| discount.amount_off(self.gross()))
    }

    /// Final amount the rider pays
    pub fn amount(&self) -> Amount {
        self.gross() - self.discount_amount()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surcharges_accumulate_per_kind() {
        let fare = Fare::new(1250)
            .with_surcharge(SurchargeKind::Distance, 100)
            .with_surcharge(SurchargeKind::Distance, 100)
            .with_surcharge(SurchargeKind::Line, 300)
            .with_surcharge(SurchargeKind::Line, 0);

        assert_eq!(fare.surcharge(SurchargeKind::Distance), 200);
        assert_eq!(fare.surcharge(SurchargeKind::Line), 300);
        assert_eq!(fare.gross(), 1750);
        assert_eq!(fare.amount(), 1750);
    }

    #[test]
    fn zero_surcharges_are_not_recorded() {
        let fare = Fare::new(1250).with_surcharge(SurchargeKind::Line, 0);

        assert!(fare.surcharges().is_empty());
        assert_eq!(fare.surcharge(SurchargeKind::Line), 0);
    }

    #[test]
    fn discount_deducts_before_taking_a_share() {
        let child = Discount {
            deduction: 350,
            percent: 50,
        };
        let fare = Fare::new(1250).with_discount(child);

        assert_eq!(fare.discount_amount(), 450);
        assert_eq!(fare.amount(), 800);
    }

    #[test]
    fn discount_rounds_down_and_saturates() {
        let youth = Discount {
            deduction: 350,
            percent: 20,
        };
        // (1255 - 350) * 20% = 181
        assert_eq!(youth.amount_off(1255), 181);
        assert_eq!(youth.amount_off(300), 0);

        let free = Discount {
            deduction: 0,
            percent: 100,
        };
        assert_eq!(Fare::new(1250).with_discount(free).amount(), 0);
    }

    #[test]
    fn serializes_breakdown() {
        let fare = Fare::new(1250).with_surcharge(SurchargeKind::Distance, 100);
        let json = serde_json::to_value(&fare).expect("serializable");

        assert_eq!(json["base"], 1250);
        assert_eq!(json["surcharges"]["distance"], 100);
        assert!(json["discount"].is_null());
    }
}
