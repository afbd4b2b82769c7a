//! Fixed Portuguese rate tables.
//!
//! All statutory values are hardcoded constants: the engine models a single
//! tax year and offers no per-year configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::TaxRank;

/// Social security contribution rate for independent workers.
pub const SS_TAX_RATE: Decimal = dec!(0.214);

/// Monthly ceiling on the SS contribution base.
pub const SS_MAX_MONTH_INCOME: Decimal = dec!(5318.4);

/// Fraction of gross income that forms the SS contribution base.
pub const SS_INCOME_FACTOR: Decimal = dec!(0.7);

/// Minimum monthly SS contribution. The yearly minimum is twelve times this.
pub const SS_MIN_MONTH_PAY: Decimal = dec!(20);

pub const YEAR_BUSINESS_DAYS: Decimal = dec!(248);
pub const MONTH_BUSINESS_DAYS: Decimal = dec!(22);
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Floor for specific deductions outside the RNH regime.
pub const MIN_SPECIFIC_DEDUCTIONS: Decimal = dec!(4104);

/// Specific deductions are also capped at this fraction of yearly gross.
pub const SPECIFIC_DEDUCTIONS_GROSS_CAP: Decimal = dec!(0.1);

/// Fraction of yearly gross income recognisable as deductible expenses.
pub const EXPENSES_RATE: Decimal = dec!(0.15);

/// Taxable fraction of gross income when deductible expenses apply.
pub const TAXABLE_FACTOR_WITH_EXPENSES: Decimal = dec!(0.75);

/// Taxable fraction of gross income without deductible expenses.
pub const TAXABLE_FACTOR_WITHOUT_EXPENSES: Decimal = dec!(0.9);

/// Flat rates of the non-habitual-resident regime, replacing the matched
/// bracket's rates when the flag is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RnhRates {
    pub normal_tax: Decimal,
    pub average_tax: Decimal,
}

pub const RNH_TAX: RnhRates = RnhRates {
    normal_tax: dec!(0.2),
    average_tax: dec!(0.2),
};

/// Progressive IRS brackets, ordered by income.
pub const TAX_RANKS: [TaxRank; 7] = [
    TaxRank {
        id: 1,
        min: dec!(0),
        max: Some(dec!(7112)),
        normal_tax: dec!(0.145),
        average_tax: Some(dec!(0.145)),
    },
    TaxRank {
        id: 2,
        min: dec!(7112),
        max: Some(dec!(10732)),
        normal_tax: dec!(0.23),
        average_tax: Some(dec!(0.17367)),
    },
    TaxRank {
        id: 3,
        min: dec!(10732),
        max: Some(dec!(20322)),
        normal_tax: dec!(0.285),
        average_tax: Some(dec!(0.22621)),
    },
    TaxRank {
        id: 4,
        min: dec!(20322),
        max: Some(dec!(25075)),
        normal_tax: dec!(0.35),
        average_tax: Some(dec!(0.24967)),
    },
    TaxRank {
        id: 5,
        min: dec!(25075),
        max: Some(dec!(36967)),
        normal_tax: dec!(0.37),
        average_tax: Some(dec!(0.28838)),
    },
    TaxRank {
        id: 6,
        min: dec!(36967),
        max: Some(dec!(80882)),
        normal_tax: dec!(0.45),
        average_tax: Some(dec!(0.37613)),
    },
    TaxRank {
        id: 7,
        min: dec!(80882),
        max: None,
        normal_tax: dec!(0.48),
        average_tax: None,
    },
];

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn ranks_are_ordered_and_contiguous() {
        for pair in TAX_RANKS.windows(2) {
            assert_eq!(pair[0].max, Some(pair[1].min));
            assert_eq!(pair[0].id + 1, pair[1].id);
        }
    }

    #[test]
    fn only_the_top_rank_is_open_ended() {
        let (top, lower) = TAX_RANKS.split_last().unwrap();

        assert_eq!(top.max, None);
        assert_eq!(top.average_tax, None);
        assert!(lower.iter().all(|r| r.max.is_some() && r.average_tax.is_some()));
    }

    #[test]
    fn every_income_above_zero_matches_exactly_one_rank() {
        for probe in [dec!(0.01), dec!(7112), dec!(18000), dec!(80882.01), dec!(500000)] {
            let matches = TAX_RANKS.iter().filter(|r| r.contains(probe)).count();

            assert_eq!(matches, 1, "income {probe} should match one rank");
        }
    }
}
