use std::sync::Arc;

use super::policy::{AgeDiscountPolicy, DistanceSurchargePolicy, applicable_policies};
use super::{Fare, SurchargeKind};
use crate::model::LineInfo;
use crate::{Age, Distance};

/// Trip attributes the fare is computed from
#[derive(Debug, Clone, Copy)]
pub struct FareContext<'a> {
    pub distance: Distance,
    /// Lines travelled, in any order and possibly repeated
    pub lines: &'a [Arc<LineInfo>],
    pub age: Option<Age>,
}

/// Single step of the fare pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FareApplier {
    /// Sum of the surcharges of every applicable distance tier
    DistanceSurcharge(Vec<DistanceSurchargePolicy>),
    /// The highest extra fare among the travelled lines
    LineSurcharge,
    /// Discount of the first bracket containing the rider's age
    AgeDiscount(Vec<AgeDiscountPolicy>),
}

impl FareApplier {
    pub fn apply(&self, context: &FareContext<'_>, fare: Fare) -> Fare {
        match self {
            FareApplier::DistanceSurcharge(policies) => {
                applicable_policies(policies, context.distance).fold(fare, |fare, policy| {
                    fare.with_surcharge(
                        SurchargeKind::Distance,
                        policy.surcharge(context.distance),
                    )
                })
            }
            FareApplier::LineSurcharge => {
                match context.lines.iter().map(|line| line.extra_fare).max() {
                    Some(extra_fare) => fare.with_surcharge(SurchargeKind::Line, extra_fare),
                    None => fare,
                }
            }
            FareApplier::AgeDiscount(policies) => {
                let bracket = context
                    .age
                    .and_then(|age| policies.iter().find(|policy| policy.contains(age)));
                match bracket {
                    Some(policy) => fare.with_discount(policy.discount()),
                    None => fare,
                }
            }
        }
    }

    /// Discounts scale the fare and must run after every surcharge
    pub fn is_discount(&self) -> bool {
        matches!(self, FareApplier::AgeDiscount(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: u64, extra_fare: u32) -> Arc<LineInfo> {
        Arc::new(LineInfo {
            id,
            name: format!("Line {id}"),
            extra_fare,
        })
    }

    fn context(lines: &[Arc<LineInfo>], age: Option<Age>) -> FareContext<'_> {
        FareContext {
            distance: 12,
            lines,
            age,
        }
    }

    #[test]
    fn line_surcharge_takes_the_maximum() {
        let lines = [line(1, 200), line(2, 500), line(3, 100)];
        let fare = FareApplier::LineSurcharge.apply(&context(&lines, None), Fare::new(0));

        assert_eq!(fare.surcharge(SurchargeKind::Line), 500);
    }

    #[test]
    fn line_surcharge_without_lines_adds_nothing() {
        let fare = FareApplier::LineSurcharge.apply(&context(&[], None), Fare::new(1250));

        assert_eq!(fare, Fare::new(1250));
    }

    #[test]
    fn distance_surcharge_sums_applicable_tiers() {
        let applier = FareApplier::DistanceSurcharge(DistanceSurchargePolicy::standard());
        let mut ctx = context(&[], None);

        assert_eq!(
            applier
                .apply(&ctx, Fare::new(0))
                .surcharge(SurchargeKind::Distance),
            100
        );

        ctx.distance = 58;
        assert_eq!(
            applier
                .apply(&ctx, Fare::new(0))
                .surcharge(SurchargeKind::Distance),
            900
        );
    }

    #[test]
    fn unvalidated_inverted_tier_leaves_the_fare_unchanged() {
        let applier = FareApplier::DistanceSurcharge(vec![DistanceSurchargePolicy {
            lower: 10,
            upper: Some(5),
            unit_distance: 5,
            unit_fare: 100,
        }]);
        let mut ctx = context(&[], None);
        ctx.distance = 20;

        assert_eq!(applier.apply(&ctx, Fare::new(1250)), Fare::new(1250));
    }

    #[test]
    fn age_discount_picks_the_matching_bracket() {
        let applier = FareApplier::AgeDiscount(AgeDiscountPolicy::standard());

        let child = applier.apply(&context(&[], Some(8)), Fare::new(1250));
        let youth = applier.apply(&context(&[], Some(15)), Fare::new(1250));
        let adult = applier.apply(&context(&[], Some(30)), Fare::new(1250));
        let unknown = applier.apply(&context(&[], None), Fare::new(1250));

        assert_eq!(child.amount(), 800);
        assert_eq!(youth.amount(), 1070);
        assert_eq!(adult.amount(), 1250);
        assert_eq!(unknown.discount(), None);
        assert!(applier.is_discount());
        assert!(!FareApplier::LineSurcharge.is_discount());
    }
}
