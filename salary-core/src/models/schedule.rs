use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{TableError, check_tiers};

/// One tier of a progressive schedule: `base + (value - min) * rate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleTier {
    pub min: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Decimal>,
    pub base: Decimal,
    pub rate: Decimal,
}

impl ScheduleTier {
    /// Returns true when `value` does not exceed this tier's upper bound.
    pub fn covers(
        &self,
        value: Decimal,
    ) -> bool {
        self.max.is_none_or(|max| value <= max)
    }

    pub fn apply(
        &self,
        value: Decimal,
    ) -> Decimal {
        self.base + (value - self.min) * self.rate
    }
}

/// A non-empty, contiguous list of [`ScheduleTier`]s whose last tier is
/// unbounded.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::{Schedule, ScheduleTier};
///
/// let schedule = Schedule::try_from(vec![
///     ScheduleTier { min: dec!(0), max: Some(dec!(1000)), base: dec!(0), rate: dec!(0.1) },
///     ScheduleTier { min: dec!(1000), max: None, base: dec!(100), rate: dec!(0.2) },
/// ])
/// .unwrap();
///
/// assert_eq!(schedule.evaluate(dec!(500)), dec!(50));
/// assert_eq!(schedule.evaluate(dec!(1500)), dec!(200));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ScheduleTier>", into = "Vec<ScheduleTier>")]
pub struct Schedule {
    tiers: Vec<ScheduleTier>,
}

impl Schedule {
    pub fn tiers(&self) -> &[ScheduleTier] {
        &self.tiers
    }

    /// Returns the first tier covering `value`, or the top tier.
    pub fn tier_for(
        &self,
        value: Decimal,
    ) -> &ScheduleTier {
        let top = self.tiers.len() - 1;
        let index = self
            .tiers
            .iter()
            .position(|tier| tier.covers(value))
            .unwrap_or(top);
        &self.tiers[index]
    }

    /// Evaluates the schedule at `value` using the tier that covers it.
    pub fn evaluate(
        &self,
        value: Decimal,
    ) -> Decimal {
        self.tier_for(value).apply(value)
    }
}

impl TryFrom<Vec<ScheduleTier>> for Schedule {
    type Error = TableError;

    fn try_from(tiers: Vec<ScheduleTier>) -> Result<Self, Self::Error> {
        check_tiers(
            "schedule",
            tiers.iter().map(|t| (t.min, t.max, t.rate)),
        )?;
        Ok(Self { tiers })
    }
}

impl From<Schedule> for Vec<ScheduleTier> {
    fn from(schedule: Schedule) -> Self {
        schedule.tiers
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn two_tiers() -> Vec<ScheduleTier> {
        vec![
            ScheduleTier {
                min: dec!(0),
                max: Some(dec!(1000)),
                base: dec!(0),
                rate: dec!(0.1),
            },
            ScheduleTier {
                min: dec!(1000),
                max: None,
                base: dec!(100),
                rate: dec!(0.2),
            },
        ]
    }

    #[test]
    fn upper_bound_is_inclusive() {
        let schedule = Schedule::try_from(two_tiers()).unwrap();

        assert_eq!(schedule.tier_for(dec!(1000)).base, dec!(0));
        assert_eq!(schedule.evaluate(dec!(1000)), dec!(100));
    }

    #[test]
    fn values_above_all_bounds_use_top_tier() {
        let schedule = Schedule::try_from(two_tiers()).unwrap();

        assert_eq!(schedule.evaluate(dec!(1000000)), dec!(199900));
    }

    #[test]
    fn rejects_empty_schedule() {
        let result = Schedule::try_from(Vec::new());

        assert_eq!(result, Err(TableError::Empty { table: "schedule" }));
    }

    #[test]
    fn rejects_bounded_top_tier() {
        let mut tiers = two_tiers();
        tiers[1].max = Some(dec!(5000));

        let result = Schedule::try_from(tiers);

        assert_eq!(result, Err(TableError::BoundedTop { table: "schedule" }));
    }

    #[test]
    fn rejects_gap_between_tiers() {
        let mut tiers = two_tiers();
        tiers[1].min = dec!(1200);

        let result = Schedule::try_from(tiers);

        assert_eq!(
            result,
            Err(TableError::NotContiguous {
                table: "schedule",
                index: 1
            })
        );
    }
}
