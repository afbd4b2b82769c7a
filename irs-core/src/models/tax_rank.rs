use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rates::RNH_TAX;

/// A progressive IRS bracket. The top bracket is open-ended (`max` is
/// `None`) and carries no blended average rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRank {
    pub id: u8,
    pub min: Decimal,
    pub max: Option<Decimal>,
    pub normal_tax: Decimal,
    pub average_tax: Option<Decimal>,
}

impl TaxRank {
    /// Whether `taxable_income` falls inside this bracket.
    ///
    /// Bounds are exclusive below and inclusive above: an income exactly on
    /// a bracket's `max` belongs to that bracket, not the next one. The
    /// open-ended top bracket matches anything above its minimum.
    pub fn contains(&self, taxable_income: Decimal) -> bool {
        taxable_income > self.min && self.max.is_none_or(|max| taxable_income <= max)
    }
}

/// Bracket rates as seen by the rest of the derivation, after the
/// non-habitual-resident override.
///
/// Built by [`RankRates::overlay`]. `id` is absent when no bracket matched
/// (zero, negative or undefined taxable income); callers must treat that as
/// "not the first bracket".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankRates {
    pub id: Option<u8>,
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
    pub normal_tax: Option<Decimal>,
    pub average_tax: Option<Decimal>,
}

impl RankRates {
    /// Merges an optionally matched bracket with the RNH flat rates.
    ///
    /// The flat rates replace `normal_tax` and `average_tax` only; the
    /// bracket identity and bounds are kept. With no bracket and no RNH,
    /// every field is absent.
    pub fn overlay(rank: Option<&TaxRank>, has_rnh: bool) -> Self {
        let mut rates = Self {
            id: rank.map(|r| r.id),
            min: rank.map(|r| r.min),
            max: rank.and_then(|r| r.max),
            normal_tax: rank.map(|r| r.normal_tax),
            average_tax: rank.and_then(|r| r.average_tax),
        };
        if has_rnh {
            rates.normal_tax = Some(RNH_TAX.normal_tax);
            rates.average_tax = Some(RNH_TAX.average_tax);
        }
        rates
    }
}
