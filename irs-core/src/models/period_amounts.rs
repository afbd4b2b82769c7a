use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Frequency;

/// A derived figure broken down per pay period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodAmounts {
    pub year: Decimal,
    pub month: Decimal,
    pub day: Decimal,
}

impl PeriodAmounts {
    /// The figure for a single period, selected by display frequency.
    pub fn for_frequency(&self, frequency: Frequency) -> Decimal {
        match frequency {
            Frequency::Year => self.year,
            Frequency::Month => self.month,
            Frequency::Day => self.day,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn for_frequency_selects_the_matching_period() {
        let amounts = PeriodAmounts {
            year: dec!(24000),
            month: dec!(2000),
            day: dec!(90.91),
        };

        assert_eq!(amounts.for_frequency(Frequency::Year), dec!(24000));
        assert_eq!(amounts.for_frequency(Frequency::Month), dec!(2000));
        assert_eq!(amounts.for_frequency(Frequency::Day), dec!(90.91));
    }
}
